//! Extension messaging bindings.

use mlo_protocol::Message;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::console;

pub type MessageListener = dyn FnMut(JsValue, JsValue, js_sys::Function) -> JsValue;

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
	pub fn add_message_listener(listener: &Closure<MessageListener>);

	#[wasm_bindgen(js_namespace = ["chrome", "runtime"], js_name = sendMessage, catch)]
	fn send_message_raw(message: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

pub fn decode(message: JsValue) -> Option<Message> {
	serde_wasm_bindgen::from_value(message).ok()
}

/// Fire-and-forget send to the background worker. The reply is only logged.
pub fn send_message(message: &Message) {
	let value = match message.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
		Ok(value) => value,
		Err(err) => {
			console::warn_2(&"mlo: could not encode message".into(), &JsValue::from(err));
			return;
		}
	};

	match send_message_raw(&value) {
		Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
			match JsFuture::from(promise).await {
				Ok(reply) => console::debug_2(&"mlo: tab authority replied".into(), &reply),
				Err(err) => console::warn_2(&"mlo: tab authority unreachable".into(), &err),
			}
		}),
		Err(err) => console::warn_2(&"mlo: tab authority unreachable".into(), &err),
	}
}
