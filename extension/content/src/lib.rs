//! Content script: runs the selector engine inside each page.
//!
//! One engine per document, shared between the DOM listeners and the
//! runtime message listener. Listeners hold it weakly; the message listener
//! keeps it alive for the lifetime of the page.

mod chrome;
mod dom;
mod host;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use mlo::{EventKind, OpenerConfig, PanelAction, SelectorEngine};
use wasm_bindgen::prelude::*;
use web_sys::{console, Event};

pub use dom::DomPage;
pub use host::WebHost;

pub(crate) type Engine = SelectorEngine<DomPage>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	console_error_panic_hook::set_once();

	let document = web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let config = OpenerConfig::default();
	let engine: Rc<RefCell<Engine>> = Rc::new_cyclic(|weak| {
		let page = DomPage::new(document, weak.clone(), config.lasso_modifier);
		RefCell::new(SelectorEngine::new(page, config))
	});

	let listener = Closure::<chrome::MessageListener>::new(move |message: JsValue, _sender: JsValue, _reply: js_sys::Function| {
		if let Some(message) = chrome::decode(message) {
			with_engine(&engine, |engine, host| engine.handle_message(&message, host));
		}
		JsValue::FALSE
	});
	chrome::add_message_listener(&listener);
	listener.forget();
	Ok(())
}

/// Runs `f` against the engine unless it is already busy.
///
/// The engine is borrowed for the whole of an action. Events raised while it
/// runs (the synthetic click that starts an export download) are left to the
/// page.
fn with_engine(engine: &Rc<RefCell<Engine>>, f: impl FnOnce(&mut Engine, &mut WebHost)) {
	let Ok(mut engine) = engine.try_borrow_mut() else {
		return;
	};
	let Some(mut host) = WebHost::new() else {
		console::warn_1(&"mlo: no window".into());
		return;
	};
	f(&mut *engine, &mut host);
}

pub(crate) fn dispatch_event(engine: &Weak<RefCell<Engine>>, kind: EventKind, event: &Event) {
	let Some(engine) = engine.upgrade() else {
		return;
	};
	let Ok(mut engine) = engine.try_borrow_mut() else {
		return;
	};
	let Some(page_event) = dom::page_event(kind, event) else {
		return;
	};

	let disposition = engine.handle_event(page_event);
	if disposition.prevent_default {
		event.prevent_default();
	}
	if disposition.stop_propagation {
		event.stop_propagation();
	}
}

pub(crate) fn dispatch_panel(engine: &Weak<RefCell<Engine>>, action: PanelAction) {
	if let Some(engine) = engine.upgrade() {
		with_engine(&engine, |engine, host| engine.handle_panel(action, host));
	}
}
