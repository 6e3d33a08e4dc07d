//! Background service worker. The only context that creates tabs.
//!
//! Pages send `OPEN_TABS`; the worker filters and caps the URLs, answers
//! with the scheduled count right away, then creates one background tab per
//! timer tick.

use mlo::{OpenerConfig, ScheduledTab, TabPlan, TabSpec};
use mlo_protocol::{Message, OpenTabsResponse};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, WorkerGlobalScope};

type MessageListener = dyn FnMut(JsValue, JsValue, js_sys::Function) -> JsValue;

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
	fn add_message_listener(listener: &Closure<MessageListener>);

	#[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = create, catch)]
	fn create_tab(properties: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();

	let listener = Closure::<MessageListener>::new(on_message);
	add_message_listener(&listener);
	// Lives as long as the worker.
	listener.forget();
	console::debug_1(&"mlo: background ready".into());
}

fn on_message(message: JsValue, _sender: JsValue, send_response: js_sys::Function) -> JsValue {
	let message: Message = match serde_wasm_bindgen::from_value(message) {
		Ok(message) => message,
		Err(_) => return JsValue::FALSE,
	};
	let Some(plan) = plan_request(message, &OpenerConfig::default()) else {
		return JsValue::FALSE;
	};

	let response = OpenTabsResponse::scheduled(plan.len());
	schedule(plan);
	match to_js(&response) {
		Ok(value) => {
			if let Err(err) = send_response.call1(&JsValue::NULL, &value) {
				console::warn_2(&"mlo: reply failed".into(), &err);
			}
		}
		Err(err) => console::warn_2(&"mlo: reply failed".into(), &err),
	}
	// Replied synchronously; the channel can close.
	JsValue::FALSE
}

/// Plans an `OPEN_TABS` request. Other messages are not for this context.
fn plan_request(message: Message, config: &OpenerConfig) -> Option<TabPlan> {
	match message {
		Message::OpenTabs { urls } => Some(TabPlan::from_urls(urls, config)),
		_ => None,
	}
}

fn schedule(plan: TabPlan) {
	let scope: WorkerGlobalScope = js_sys::global().unchecked_into();
	for ScheduledTab { tab, offset } in plan {
		let callback = Closure::once_into_js(move || open_tab(tab));
		let delay = i32::try_from(offset.as_millis()).unwrap_or(i32::MAX);
		if let Err(err) = scope.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
			console::warn_2(&"mlo: could not schedule tab".into(), &err);
		}
	}
}

fn open_tab(tab: TabSpec) {
	let properties = match to_js(&tab) {
		Ok(properties) => properties,
		Err(err) => {
			console::warn_2(&"mlo: bad tab properties".into(), &err);
			return;
		}
	};
	match create_tab(&properties) {
		Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
			if let Err(err) = JsFuture::from(promise).await {
				console::warn_3(&"mlo: tab creation failed".into(), &tab.url.as_str().into(), &err);
			}
		}),
		Err(err) => console::warn_3(&"mlo: tab creation failed".into(), &tab.url.as_str().into(), &err),
	}
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
	value
		.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
		.map_err(JsValue::from)
}
