//! [`Page`] over the live document.

use std::cell::RefCell;
use std::rc::Weak;

use mlo::{
	EventKind, GeometryOracle, LassoModifier, LinkInfo, Modifiers, MouseButton, Page, PageEvent, PanelAction, Point, Rect,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, HtmlAnchorElement, HtmlElement, KeyboardEvent, MouseEvent};

use crate::Engine;

pub const SELECTED_CLASS: &str = "mlo-selected";
pub const SELECTING_CLASS: &str = "mlo-selecting";
const PANEL_ID: &str = "mlo-ui";
const COUNT_ID: &str = "mlo-count";
const HINT_CLASS: &str = "mlo-hint";
const LASSO_CLASS: &str = "mlo-lasso";
const STYLE_ID: &str = "mlo-style";
const ANCHOR_SELECTOR: &str = "a[href]";

const PANEL_BUTTONS: [(PanelAction, &str); 4] = [
	(PanelAction::Open, "Open all"),
	(PanelAction::Export, "Export CSV"),
	(PanelAction::Clear, "Clear"),
	(PanelAction::Exit, "Exit"),
];

const COUNT_LABEL: &str = "Selected: ";

const STYLE: &str = "\
.mlo-selecting, .mlo-selecting a[href] { cursor: crosshair !important; }
.mlo-selected { outline: 2px solid #1a73e8 !important; outline-offset: 1px; background: rgba(26, 115, 232, 0.12) !important; }
.mlo-lasso { position: fixed; z-index: 2147483646; border: 1px dashed #1a73e8; background: rgba(26, 115, 232, 0.1); pointer-events: none; }
#mlo-ui { position: fixed; right: 16px; bottom: 16px; z-index: 2147483647; display: flex; gap: 6px; align-items: center; padding: 8px 10px; border-radius: 8px; background: #202124; color: #fff; font: 13px/1.2 system-ui, sans-serif; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.3); }
#mlo-ui .mlo-hint { opacity: 0.7; font-size: 11px; }
#mlo-ui button { font: inherit; padding: 4px 8px; border: 0; border-radius: 4px; cursor: pointer; }
";

type EventCallback = Closure<dyn FnMut(Event)>;

/// A capture-phase document listener. Dropping it frees the callback.
pub struct Listener {
	kind: EventKind,
	callback: EventCallback,
}

struct Panel {
	root: HtmlElement,
	count: Element,
	_buttons: Vec<EventCallback>,
}

pub struct DomPage {
	document: Document,
	engine: Weak<RefCell<Engine>>,
	panel: Option<Panel>,
	lasso: Option<HtmlElement>,
	lasso_modifier: LassoModifier,
}

impl DomPage {
	pub fn new(document: Document, engine: Weak<RefCell<Engine>>, lasso_modifier: LassoModifier) -> Self {
		Self {
			document,
			engine,
			panel: None,
			lasso: None,
			lasso_modifier,
		}
	}

	fn query_all(&self, selector: &str) -> Vec<Element> {
		let Ok(nodes) = self.document.query_selector_all(selector) else {
			return Vec::new();
		};
		(0..nodes.length())
			.filter_map(|i| nodes.item(i))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.collect()
	}

	fn create_html(&self, tag: &str) -> Result<HtmlElement, JsValue> {
		self.document
			.create_element(tag)?
			.dyn_into::<HtmlElement>()
			.map_err(JsValue::from)
	}

	fn ensure_style(&self) -> Result<(), JsValue> {
		if self.document.get_element_by_id(STYLE_ID).is_some() {
			return Ok(());
		}
		let style = self.document.create_element("style")?;
		style.set_id(STYLE_ID);
		style.set_text_content(Some(STYLE));
		let head = self
			.document
			.head()
			.map(Element::from)
			.or_else(|| self.document.document_element())
			.ok_or_else(|| JsValue::from_str("document has no root"))?;
		head.append_child(&style)?;
		Ok(())
	}

	fn build_panel(&self) -> Result<Panel, JsValue> {
		self.ensure_style()?;
		let root = self.create_html("div")?;
		root.set_id(PANEL_ID);

		let label = self.document.create_element("span")?;
		label.set_text_content(Some(COUNT_LABEL));
		let count = self.document.create_element("span")?;
		count.set_id(COUNT_ID);
		count.set_text_content(Some("0"));
		label.append_child(&count)?;
		root.append_child(&label)?;

		let hint = self.document.create_element("span")?;
		hint.set_class_name(HINT_CLASS);
		hint.set_text_content(Some(&drag_hint(self.lasso_modifier)));
		root.append_child(&hint)?;

		let mut buttons = Vec::with_capacity(PANEL_BUTTONS.len());
		for (action, label) in PANEL_BUTTONS {
			let button = self.document.create_element("button")?;
			button.set_attribute("type", "button")?;
			button.set_text_content(Some(label));

			let engine = self.engine.clone();
			let callback = EventCallback::new(move |event: Event| {
				event.prevent_default();
				crate::dispatch_panel(&engine, action);
			});
			button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
			root.append_child(&button)?;
			buttons.push(callback);
		}

		self.document
			.body()
			.ok_or_else(|| JsValue::from_str("document has no body"))?
			.append_child(&root)?;
		Ok(Panel {
			root,
			count,
			_buttons: buttons,
		})
	}

	fn draw_lasso_box(&mut self, area: &Rect) -> Result<(), JsValue> {
		if self.lasso.is_none() {
			let lasso = self.create_html("div")?;
			lasso.set_class_name(LASSO_CLASS);
			self.document
				.body()
				.ok_or_else(|| JsValue::from_str("document has no body"))?
				.append_child(&lasso)?;
			self.lasso = Some(lasso);
		}
		if let Some(lasso) = &self.lasso {
			lasso.set_attribute("style", &lasso_style(area))?;
		}
		Ok(())
	}
}

impl GeometryOracle<Element> for DomPage {
	fn bounding_box(&self, element: &Element) -> Rect {
		let rect = element.get_bounding_client_rect();
		Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
	}

	fn is_hidden_by_style(&self, element: &Element) -> bool {
		let Some(window) = self.document.default_view() else {
			return false;
		};
		let Ok(Some(style)) = window.get_computed_style(element) else {
			return false;
		};
		let display = style.get_property_value("display").unwrap_or_default();
		let visibility = style.get_property_value("visibility").unwrap_or_default();
		display == "none" || visibility == "hidden"
	}
}

impl Page for DomPage {
	type Element = Element;
	type Subscription = Listener;
	type Geometry = Self;

	fn geometry(&self) -> &Self {
		self
	}

	fn anchors(&self) -> Vec<Element> {
		self.query_all(ANCHOR_SELECTOR)
	}

	fn closest_anchor(&self, target: &Element) -> Option<Element> {
		target.closest(ANCHOR_SELECTOR).ok().flatten()
	}

	fn link_info(&self, anchor: &Element) -> Option<LinkInfo> {
		// `href` on the element is already resolved against the base URL.
		let href = anchor.dyn_ref::<HtmlAnchorElement>()?.href();
		let mut info = LinkInfo::new(href).with_text(anchor.text_content().unwrap_or_default());
		if let Some(label) = anchor.get_attribute("aria-label") {
			info = info.with_aria_label(label);
		}
		if let Some(title) = anchor.get_attribute("title") {
			info = info.with_title(title);
		}
		Some(info)
	}

	fn is_marked(&self, anchor: &Element) -> bool {
		anchor.class_list().contains(SELECTED_CLASS)
	}

	fn set_marked(&mut self, anchor: &Element, marked: bool) {
		let classes = anchor.class_list();
		let _ = if marked {
			classes.add_1(SELECTED_CLASS)
		} else {
			classes.remove_1(SELECTED_CLASS)
		};
	}

	fn marked_anchors(&self) -> Vec<Element> {
		self.query_all(&format!(".{SELECTED_CLASS}"))
	}

	fn surface_contains(&self, target: &Element) -> bool {
		self.panel.as_ref().is_some_and(|panel| panel.root.contains(Some(target.as_ref())))
	}

	fn show_surface(&mut self) {
		if self.panel.is_none() {
			match self.build_panel() {
				Ok(panel) => self.panel = Some(panel),
				Err(err) => {
					console::warn_2(&"mlo: could not build panel".into(), &err);
					return;
				}
			}
		}
		if let Some(panel) = &self.panel {
			let _ = panel.root.style().remove_property("display");
		}
	}

	fn hide_surface(&mut self) {
		if let Some(panel) = &self.panel {
			let _ = panel.root.style().set_property("display", "none");
		}
	}

	fn show_count(&mut self, count: usize) {
		if let Some(panel) = &self.panel {
			panel.count.set_text_content(Some(&count.to_string()));
		}
	}

	fn set_root_marker(&mut self, on: bool) {
		let Some(root) = self.document.document_element() else {
			return;
		};
		let classes = root.class_list();
		let _ = if on {
			classes.add_1(SELECTING_CLASS)
		} else {
			classes.remove_1(SELECTING_CLASS)
		};
	}

	fn draw_lasso(&mut self, area: &Rect) {
		if let Err(err) = self.draw_lasso_box(area) {
			console::warn_2(&"mlo: could not draw lasso".into(), &err);
		}
	}

	fn remove_lasso(&mut self) {
		if let Some(lasso) = self.lasso.take() {
			lasso.remove();
		}
	}

	fn subscribe(&mut self, kind: EventKind) -> Listener {
		let engine = self.engine.clone();
		let callback = EventCallback::new(move |event: Event| crate::dispatch_event(&engine, kind, &event));
		if let Err(err) =
			self.document
				.add_event_listener_with_callback_and_bool(kind.dom_name(), callback.as_ref().unchecked_ref(), true)
		{
			console::warn_2(&"mlo: could not listen".into(), &err);
		}
		Listener { kind, callback }
	}

	fn unsubscribe(&mut self, listener: Listener) {
		let _ = self.document.remove_event_listener_with_callback_and_bool(
			listener.kind.dom_name(),
			listener.callback.as_ref().unchecked_ref(),
			true,
		);
	}
}

/// Translates a DOM event into the engine's vocabulary.
pub fn page_event(kind: EventKind, event: &Event) -> Option<PageEvent<Element>> {
	match kind {
		EventKind::Click => {
			let target = event.target()?.dyn_into::<Element>().ok()?;
			Some(PageEvent::Click { target })
		}
		EventKind::KeyDown => {
			let key = event.dyn_ref::<KeyboardEvent>()?.key();
			Some(PageEvent::KeyDown { key })
		}
		EventKind::PointerDown => {
			let mouse = event.dyn_ref::<MouseEvent>()?;
			Some(PageEvent::PointerDown {
				point: client_point(mouse),
				button: MouseButton::from_dom(mouse.button()),
				modifiers: Modifiers {
					shift: mouse.shift_key(),
					alt: mouse.alt_key(),
					ctrl: mouse.ctrl_key(),
					meta: mouse.meta_key(),
				},
			})
		}
		EventKind::PointerMove => Some(PageEvent::PointerMove {
			point: client_point(event.dyn_ref::<MouseEvent>()?),
		}),
		EventKind::PointerUp => Some(PageEvent::PointerUp {
			point: client_point(event.dyn_ref::<MouseEvent>()?),
		}),
	}
}

fn client_point(mouse: &MouseEvent) -> Point {
	Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
}

fn drag_hint(modifier: LassoModifier) -> String {
	format!("{}+Drag to multi-select area", modifier.key_name())
}

fn lasso_style(area: &Rect) -> String {
	format!(
		"left:{}px;top:{}px;width:{}px;height:{}px",
		area.left,
		area.top,
		area.width(),
		area.height()
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lasso_style_is_fixed_box() {
		let area = Rect::from_corners(Point::new(40.0, 30.0), Point::new(10.0, 5.5));
		assert_eq!(lasso_style(&area), "left:10px;top:5.5px;width:30px;height:24.5px");
	}

	#[test]
	fn drag_hint_names_the_configured_key() {
		assert_eq!(drag_hint(LassoModifier::default()), "Shift+Drag to multi-select area");
		assert_eq!(drag_hint(LassoModifier::Alt), "Alt+Drag to multi-select area");
	}

	#[test]
	fn panel_offers_every_action_once() {
		let actions: Vec<_> = PANEL_BUTTONS.iter().map(|(action, _)| *action).collect();
		assert_eq!(
			actions,
			[PanelAction::Open, PanelAction::Export, PanelAction::Clear, PanelAction::Exit]
		);
	}
}
