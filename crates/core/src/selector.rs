//! Selection-mode state machine for one page context.
//!
//! The engine owns a [`SelectionContext`] (mode, store, in-progress drag) and
//! drives a [`Page`]. Every mutation of the store re-projects the `selected`
//! markers and the panel count in the same call, so the document never shows
//! a selection the store does not hold.

use mlo_protocol::Message;
use tracing::{debug, info, warn};

use crate::config::OpenerConfig;
use crate::export::encode_with_prefix;
use crate::geometry::{Point, Rect, is_lasso_hit};
use crate::link::normalize_url;
use crate::page::{EventDisposition, EventKind, Modifiers, MouseButton, Page, PageEvent, PageHost, PanelAction};
use crate::store::SelectionStore;

const ESCAPE_KEY: &str = "Escape";

/// Whether link clicks are being intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
	#[default]
	Inactive,
	Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
	origin: Point,
	current: Point,
}

impl Drag {
	fn area(&self) -> Rect {
		Rect::from_corners(self.origin, self.current)
	}
}

/// Per-page selection state. Exactly one exists per page context and it dies
/// with the page.
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
	mode: SelectionMode,
	store: SelectionStore,
	drag: Option<Drag>,
	/// Set when a lasso ends; the click the browser fires for that release
	/// must not toggle the anchor under the pointer.
	swallow_click: bool,
}

impl SelectionContext {
	pub fn mode(&self) -> SelectionMode {
		self.mode
	}

	pub fn is_active(&self) -> bool {
		self.mode == SelectionMode::Active
	}

	pub fn store(&self) -> &SelectionStore {
		&self.store
	}

	/// Current lasso area, if a drag is in progress.
	pub fn lasso(&self) -> Option<Rect> {
		self.drag.map(|d| d.area())
	}
}

/// Text of the confirmation asked before opening `count` tabs.
pub fn confirm_message(count: usize) -> String {
	format!("You're about to open {count} tabs. Continue?")
}

pub struct SelectorEngine<P: Page> {
	page: P,
	config: OpenerConfig,
	context: SelectionContext,
	subscriptions: Vec<P::Subscription>,
}

impl<P: Page> SelectorEngine<P> {
	pub fn new(page: P, config: OpenerConfig) -> Self {
		Self {
			page,
			config,
			context: SelectionContext::default(),
			subscriptions: Vec::new(),
		}
	}

	pub fn page(&self) -> &P {
		&self.page
	}

	pub fn page_mut(&mut self) -> &mut P {
		&mut self.page
	}

	pub fn config(&self) -> &OpenerConfig {
		&self.config
	}

	pub fn context(&self) -> &SelectionContext {
		&self.context
	}

	pub fn store(&self) -> &SelectionStore {
		&self.context.store
	}

	pub fn is_active(&self) -> bool {
		self.context.is_active()
	}

	/// Enters selection mode. No-op when already active.
	pub fn enable(&mut self) {
		if self.is_active() {
			return;
		}
		self.context.mode = SelectionMode::Active;

		self.page.show_surface();
		self.page.set_root_marker(true);
		if self.subscriptions.is_empty() {
			for kind in EventKind::ALL {
				let subscription = self.page.subscribe(kind);
				self.subscriptions.push(subscription);
			}
		}
		self.refresh_count();
		debug!(target = "mlo::selector", selected = self.store().len(), "selection mode on");
	}

	/// Leaves selection mode. No-op when already inactive.
	pub fn disable(&mut self) {
		if !self.is_active() {
			return;
		}
		self.context.mode = SelectionMode::Inactive;

		self.cancel_drag();
		self.context.swallow_click = false;
		self.page.set_root_marker(false);
		self.page.hide_surface();
		for subscription in self.subscriptions.drain(..) {
			self.page.unsubscribe(subscription);
		}
		debug!(target = "mlo::selector", selected = self.store().len(), "selection mode off");
	}

	pub fn toggle(&mut self) {
		if self.is_active() { self.disable() } else { self.enable() }
	}

	/// Dispatches an input event and reports what to do with it.
	pub fn handle_event(&mut self, event: PageEvent<P::Element>) -> EventDisposition {
		match event {
			PageEvent::Click { target } => self.on_click(&target),
			PageEvent::KeyDown { key } => self.on_key_down(&key),
			PageEvent::PointerDown { point, button, modifiers } => self.on_pointer_down(point, button, modifiers),
			PageEvent::PointerMove { point } => self.on_pointer_move(point),
			PageEvent::PointerUp { point } => self.on_pointer_up(point),
		}
	}

	/// Toggles the anchor under `target`.
	///
	/// Any click resolving to an anchor is consumed, including anchors whose
	/// href is not a web URL: selection clicks never navigate.
	pub fn on_click(&mut self, target: &P::Element) -> EventDisposition {
		if !self.is_active() || self.page.surface_contains(target) {
			return EventDisposition::PASS;
		}
		if std::mem::take(&mut self.context.swallow_click) {
			return EventDisposition::CONSUME;
		}
		let Some(anchor) = self.page.closest_anchor(target) else {
			return EventDisposition::PASS;
		};

		if let Some(link) = self.page.link_info(&anchor) {
			let store = &mut self.context.store;
			if store.contains(&link.href) {
				store.remove(&link.href);
				debug!(target = "mlo::selector", url = %link.href, "deselected");
			} else if store.add(&link.href, &link.display_text()) {
				debug!(target = "mlo::selector", url = %link.href, "selected");
			}
			self.project_markers();
			self.refresh_count();
		}

		EventDisposition::CONSUME
	}

	pub fn on_key_down(&mut self, key: &str) -> EventDisposition {
		if self.is_active() && key == ESCAPE_KEY {
			self.disable();
		}
		EventDisposition::PASS
	}

	/// Starts a lasso on a primary press with the configured modifier held.
	pub fn on_pointer_down(&mut self, point: Point, button: MouseButton, modifiers: Modifiers) -> EventDisposition {
		self.context.swallow_click = false;
		if !self.is_active() || button != MouseButton::Primary || !modifiers.holds(self.config.lasso_modifier) {
			return EventDisposition::PASS;
		}

		let drag = Drag {
			origin: point,
			current: point,
		};
		self.context.drag = Some(drag);
		self.page.draw_lasso(&drag.area());
		// Keeps the browser from starting a text selection under the lasso.
		EventDisposition::PREVENT
	}

	pub fn on_pointer_move(&mut self, point: Point) -> EventDisposition {
		if let Some(drag) = self.context.drag.as_mut() {
			drag.current = point;
			let area = drag.area();
			self.page.draw_lasso(&area);
		}
		EventDisposition::PASS
	}

	/// Finishes a lasso and adds every visible anchor it touches.
	pub fn on_pointer_up(&mut self, point: Point) -> EventDisposition {
		let Some(mut drag) = self.context.drag.take() else {
			return EventDisposition::PASS;
		};
		drag.current = point;
		self.page.remove_lasso();
		self.context.swallow_click = true;

		let added = self.select_in_rect(&drag.area());
		debug!(target = "mlo::selector", added, total = self.store().len(), "lasso selection");
		EventDisposition::PASS
	}

	/// Adds every visible anchor intersecting `area`. Never deselects.
	///
	/// Returns how many new URLs entered the store.
	pub fn select_in_rect(&mut self, area: &Rect) -> usize {
		let before = self.store().len();
		let geometry = self.page.geometry();
		let hits: Vec<_> = self
			.page
			.anchors()
			.into_iter()
			.filter(|anchor| is_lasso_hit(geometry, area, anchor))
			.filter_map(|anchor| self.page.link_info(&anchor))
			.collect();

		for link in hits {
			if !self.context.store.contains(&link.href) {
				self.context.store.add(&link.href, &link.display_text());
			}
		}
		self.project_markers();
		self.refresh_count();
		self.store().len() - before
	}

	/// Empties the selection and strips every marker.
	pub fn clear_selection(&mut self) {
		self.context.store.clear();
		self.project_markers();
		self.refresh_count();
		debug!(target = "mlo::selector", "selection cleared");
	}

	/// Handles a message from the launcher. Messages for other contexts are
	/// ignored.
	pub fn handle_message(&mut self, message: &Message, host: &mut impl PageHost) {
		match message {
			Message::ToggleSelect => self.toggle(),
			Message::RequestOpen => {
				self.open_all(host);
			}
			Message::RequestExport => {
				self.export(host);
			}
			Message::OpenTabs { .. } => {}
		}
	}

	pub fn handle_panel(&mut self, action: PanelAction, host: &mut impl PageHost) {
		match action {
			PanelAction::Open => {
				self.open_all(host);
			}
			PanelAction::Export => {
				self.export(host);
			}
			PanelAction::Clear => self.clear_selection(),
			PanelAction::Exit => self.disable(),
		}
	}

	/// Sends the selection to the tab authority, asking first when the batch
	/// exceeds the confirmation threshold. Returns the number of URLs sent.
	///
	/// The selection is kept either way.
	pub fn open_all(&mut self, host: &mut impl PageHost) -> Option<usize> {
		let urls = self.store().urls();
		if urls.is_empty() {
			return None;
		}

		let count = urls.len();
		if self.config.needs_confirmation(count) && !host.confirm(&confirm_message(count)) {
			info!(target = "mlo::selector", count, "open declined");
			return None;
		}

		host.send(Message::OpenTabs { urls });
		info!(target = "mlo::selector", count, "open requested");
		Some(count)
	}

	/// Encodes the selection and hands it to the host to save. Returns the
	/// filename on success; an empty selection exports nothing.
	pub fn export(&mut self, host: &mut impl PageHost) -> Option<String> {
		let file = encode_with_prefix(self.store(), host.now(), &self.config.export_prefix)?;
		let filename = file.filename.clone();

		match host.save(file) {
			Ok(()) => {
				info!(target = "mlo::selector", %filename, rows = self.store().len(), "exported selection");
				Some(filename)
			}
			Err(err) => {
				warn!(target = "mlo::selector", %filename, error = %err, "export failed");
				None
			}
		}
	}

	fn cancel_drag(&mut self) {
		if self.context.drag.take().is_some() {
			self.page.remove_lasso();
		}
	}

	/// Brings every marker in line with store membership.
	fn project_markers(&mut self) {
		for element in self.page.marked_anchors() {
			if !self.is_selected(&element) {
				self.page.set_marked(&element, false);
			}
		}
		for anchor in self.page.anchors() {
			if self.is_selected(&anchor) && !self.page.is_marked(&anchor) {
				self.page.set_marked(&anchor, true);
			}
		}
	}

	fn is_selected(&self, element: &P::Element) -> bool {
		self.page
			.link_info(element)
			.and_then(|link| normalize_url(&link.href))
			.is_some_and(|url| self.context.store.contains(&url))
	}

	fn refresh_count(&mut self) {
		self.page.show_count(self.context.store.len());
	}
}
