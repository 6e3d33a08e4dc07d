//! In-memory page and host for exercising the selector engine without a
//! browser.
//!
//! ```ignore
//! let mut page = FakePage::new();
//! let link = page.add_link("https://example.com/", "Example", Rect::from_origin_size(0.0, 0.0, 80.0, 16.0));
//! let mut engine = SelectorEngine::new(page, OpenerConfig::default());
//! engine.enable();
//! engine.handle_event(PageEvent::Click { target: link });
//! assert!(engine.page().is_marked(&link));
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use mlo_protocol::Message;

use crate::error::{Error, Result};
use crate::export::ExportFile;
use crate::geometry::{GeometryOracle, Rect};
use crate::link::LinkInfo;
use crate::page::{EventKind, Page, PageHost};

/// Element handle in a [`FakePage`].
pub type ElementId = usize;

#[derive(Debug, Clone, Default)]
struct FakeElement {
	parent: Option<ElementId>,
	link: Option<LinkInfo>,
	bbox: Rect,
	hidden: bool,
	marked: bool,
	in_surface: bool,
}

/// Subscription token handed out by [`FakePage::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeSubscription {
	id: u64,
	kind: EventKind,
}

/// A tiny document tree with fixed geometry.
#[derive(Debug, Default)]
pub struct FakePage {
	elements: Vec<FakeElement>,
	surface_root: Option<ElementId>,
	surface_visible: bool,
	surface_builds: usize,
	root_marker: bool,
	count: Option<usize>,
	lasso: Option<Rect>,
	subscriptions: Vec<FakeSubscription>,
	next_subscription: u64,
}

impl FakePage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a plain element, optionally nested under `parent`.
	pub fn add_element(&mut self, parent: Option<ElementId>) -> ElementId {
		self.push(FakeElement {
			parent,
			..Default::default()
		})
	}

	/// Adds a top-level anchor with `href`, text content and bounding box.
	pub fn add_link(&mut self, href: &str, text: &str, bbox: Rect) -> ElementId {
		self.add_anchor(LinkInfo::new(href).with_text(text), bbox)
	}

	pub fn add_anchor(&mut self, link: LinkInfo, bbox: Rect) -> ElementId {
		self.push(FakeElement {
			link: Some(link),
			bbox,
			..Default::default()
		})
	}

	/// Adds a child element (e.g. a `<span>` inside a link) sharing the parent's box.
	pub fn add_child(&mut self, parent: ElementId) -> ElementId {
		let bbox = self.elements[parent].bbox;
		self.push(FakeElement {
			parent: Some(parent),
			bbox,
			..Default::default()
		})
	}

	/// Hides an element via style (`visibility: hidden`/`display: none`).
	pub fn hide(&mut self, element: ElementId) {
		self.elements[element].hidden = true;
	}

	pub fn set_bbox(&mut self, element: ElementId, bbox: Rect) {
		self.elements[element].bbox = bbox;
	}

	/// Drops the `href` of an anchor, turning it into a plain element.
	pub fn strip_href(&mut self, element: ElementId) {
		self.elements[element].link = None;
	}

	/// A button inside the control panel. Builds the panel if needed.
	pub fn surface_button(&mut self) -> ElementId {
		let root = self.ensure_surface();
		self.push(FakeElement {
			parent: Some(root),
			in_surface: true,
			..Default::default()
		})
	}

	pub fn surface_visible(&self) -> bool {
		self.surface_visible
	}

	/// How many times the panel was built. Showing it again must not rebuild it.
	pub fn surface_builds(&self) -> usize {
		self.surface_builds
	}

	pub fn root_marker(&self) -> bool {
		self.root_marker
	}

	/// Count last shown on the panel.
	pub fn shown_count(&self) -> Option<usize> {
		self.count
	}

	pub fn lasso(&self) -> Option<Rect> {
		self.lasso
	}

	/// Event kinds with a live listener.
	pub fn listening(&self) -> Vec<EventKind> {
		self.subscriptions.iter().map(|s| s.kind).collect()
	}

	fn push(&mut self, element: FakeElement) -> ElementId {
		self.elements.push(element);
		self.elements.len() - 1
	}

	fn ensure_surface(&mut self) -> ElementId {
		if let Some(root) = self.surface_root {
			return root;
		}
		let root = self.push(FakeElement {
			in_surface: true,
			..Default::default()
		});
		self.surface_root = Some(root);
		self.surface_builds += 1;
		root
	}
}

impl GeometryOracle<ElementId> for FakePage {
	fn bounding_box(&self, element: &ElementId) -> Rect {
		self.elements.get(*element).map(|e| e.bbox).unwrap_or_default()
	}

	fn is_hidden_by_style(&self, element: &ElementId) -> bool {
		self.elements.get(*element).is_some_and(|e| e.hidden)
	}
}

impl Page for FakePage {
	type Element = ElementId;
	type Subscription = FakeSubscription;
	type Geometry = Self;

	fn geometry(&self) -> &Self {
		self
	}

	fn anchors(&self) -> Vec<ElementId> {
		self.elements
			.iter()
			.enumerate()
			.filter(|(_, e)| e.link.is_some())
			.map(|(id, _)| id)
			.collect()
	}

	fn closest_anchor(&self, target: &ElementId) -> Option<ElementId> {
		let mut current = Some(*target);
		while let Some(id) = current {
			let element = self.elements.get(id)?;
			if element.link.is_some() {
				return Some(id);
			}
			current = element.parent;
		}
		None
	}

	fn link_info(&self, anchor: &ElementId) -> Option<LinkInfo> {
		self.elements.get(*anchor).and_then(|e| e.link.clone())
	}

	fn is_marked(&self, anchor: &ElementId) -> bool {
		self.elements.get(*anchor).is_some_and(|e| e.marked)
	}

	fn set_marked(&mut self, anchor: &ElementId, marked: bool) {
		if let Some(element) = self.elements.get_mut(*anchor) {
			element.marked = marked;
		}
	}

	fn marked_anchors(&self) -> Vec<ElementId> {
		self.elements
			.iter()
			.enumerate()
			.filter(|(_, e)| e.marked)
			.map(|(id, _)| id)
			.collect()
	}

	fn surface_contains(&self, target: &ElementId) -> bool {
		self.elements.get(*target).is_some_and(|e| e.in_surface)
	}

	fn show_surface(&mut self) {
		self.ensure_surface();
		self.surface_visible = true;
	}

	fn hide_surface(&mut self) {
		self.surface_visible = false;
	}

	fn show_count(&mut self, count: usize) {
		self.count = Some(count);
	}

	fn set_root_marker(&mut self, on: bool) {
		self.root_marker = on;
	}

	fn draw_lasso(&mut self, area: &Rect) {
		self.lasso = Some(*area);
	}

	fn remove_lasso(&mut self) {
		self.lasso = None;
	}

	fn subscribe(&mut self, kind: EventKind) -> FakeSubscription {
		let subscription = FakeSubscription {
			id: self.next_subscription,
			kind,
		};
		self.next_subscription += 1;
		self.subscriptions.push(subscription);
		subscription
	}

	fn unsubscribe(&mut self, subscription: FakeSubscription) {
		self.subscriptions.retain(|s| s.id != subscription.id);
	}
}

/// Host that records everything the engine asks of it.
#[derive(Debug)]
pub struct FakeHost {
	/// Answer given to every confirmation prompt.
	pub confirm_answer: bool,
	pub prompts: Vec<String>,
	pub sent: Vec<Message>,
	pub saved: Vec<ExportFile>,
	/// When set, every save fails with this reason.
	pub save_failure: Option<String>,
	pub now: NaiveDateTime,
}

impl FakeHost {
	pub fn new() -> Self {
		Self {
			confirm_answer: true,
			prompts: Vec::new(),
			sent: Vec::new(),
			saved: Vec::new(),
			save_failure: None,
			now: NaiveDate::from_ymd_opt(2024, 5, 17)
				.and_then(|d| d.and_hms_opt(9, 3, 7))
				.unwrap_or_default(),
		}
	}

	pub fn declining() -> Self {
		Self {
			confirm_answer: false,
			..Self::new()
		}
	}
}

impl Default for FakeHost {
	fn default() -> Self {
		Self::new()
	}
}

impl PageHost for FakeHost {
	fn confirm(&mut self, message: &str) -> bool {
		self.prompts.push(message.to_string());
		self.confirm_answer
	}

	fn send(&mut self, message: Message) {
		self.sent.push(message);
	}

	fn save(&mut self, file: ExportFile) -> Result<()> {
		if let Some(reason) = &self.save_failure {
			return Err(Error::save(file.filename, reason));
		}
		self.saved.push(file);
		Ok(())
	}

	fn now(&self) -> NaiveDateTime {
		self.now
	}
}
