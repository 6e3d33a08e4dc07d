//! Collaborator interfaces between the selector engine and its environment.
//!
//! [`Page`] is the document the engine runs in: it enumerates anchors,
//! carries the selection markers, renders the control panel and lasso, and
//! owns event listener registration. [`PageHost`] is everything outside the
//! document: prompts, messaging to the tab authority, saving files, the clock.

use chrono::NaiveDateTime;
use mlo_protocol::Message;

use crate::config::LassoModifier;
use crate::error::Result;
use crate::export::ExportFile;
use crate::geometry::{GeometryOracle, Point, Rect};
use crate::link::LinkInfo;

/// Input events the engine subscribes to while selection mode is active.
///
/// All subscriptions are capture-phase so the engine sees clicks before page
/// scripts (client-side routers in particular) can act on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	Click,
	KeyDown,
	PointerDown,
	PointerMove,
	PointerUp,
}

impl EventKind {
	pub const ALL: [EventKind; 5] = [
		EventKind::Click,
		EventKind::KeyDown,
		EventKind::PointerDown,
		EventKind::PointerMove,
		EventKind::PointerUp,
	];

	/// DOM event type name.
	pub fn dom_name(self) -> &'static str {
		match self {
			EventKind::Click => "click",
			EventKind::KeyDown => "keydown",
			EventKind::PointerDown => "mousedown",
			EventKind::PointerMove => "mousemove",
			EventKind::PointerUp => "mouseup",
		}
	}
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
	pub shift: bool,
	pub alt: bool,
	pub ctrl: bool,
	pub meta: bool,
}

impl Modifiers {
	pub const NONE: Modifiers = Modifiers {
		shift: false,
		alt: false,
		ctrl: false,
		meta: false,
	};

	pub const SHIFT: Modifiers = Modifiers {
		shift: true,
		..Modifiers::NONE
	};

	pub fn holds(&self, modifier: LassoModifier) -> bool {
		match modifier {
			LassoModifier::Shift => self.shift,
			LassoModifier::Alt => self.alt,
			LassoModifier::Ctrl => self.ctrl,
			LassoModifier::Meta => self.meta,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
	Primary,
	Auxiliary,
	Secondary,
	Other(i16),
}

impl MouseButton {
	/// Maps `MouseEvent.button`.
	pub fn from_dom(button: i16) -> Self {
		match button {
			0 => MouseButton::Primary,
			1 => MouseButton::Auxiliary,
			2 => MouseButton::Secondary,
			other => MouseButton::Other(other),
		}
	}
}

/// An input event delivered to the engine. `E` is the page's element handle.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
	Click { target: E },
	KeyDown { key: String },
	PointerDown { point: Point, button: MouseButton, modifiers: Modifiers },
	PointerMove { point: Point },
	PointerUp { point: Point },
}

impl<E> PageEvent<E> {
	pub fn kind(&self) -> EventKind {
		match self {
			PageEvent::Click { .. } => EventKind::Click,
			PageEvent::KeyDown { .. } => EventKind::KeyDown,
			PageEvent::PointerDown { .. } => EventKind::PointerDown,
			PageEvent::PointerMove { .. } => EventKind::PointerMove,
			PageEvent::PointerUp { .. } => EventKind::PointerUp,
		}
	}
}

/// What the event source must do with the event after the engine saw it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
	pub prevent_default: bool,
	pub stop_propagation: bool,
}

impl EventDisposition {
	/// Let the event continue untouched.
	pub const PASS: EventDisposition = EventDisposition {
		prevent_default: false,
		stop_propagation: false,
	};

	/// Cancel the default action but keep propagating.
	pub const PREVENT: EventDisposition = EventDisposition {
		prevent_default: true,
		stop_propagation: false,
	};

	/// Cancel the default action and stop propagation.
	pub const CONSUME: EventDisposition = EventDisposition {
		prevent_default: true,
		stop_propagation: true,
	};
}

/// Buttons on the in-page control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
	Open,
	Export,
	Clear,
	Exit,
}

/// The document a selector engine runs in.
pub trait Page {
	/// Handle to a DOM element.
	type Element: Clone;
	/// Token returned by [`Page::subscribe`], handed back to [`Page::unsubscribe`].
	type Subscription;
	type Geometry: GeometryOracle<Self::Element>;

	fn geometry(&self) -> &Self::Geometry;

	/// Every anchor element that has an `href`, in document order.
	fn anchors(&self) -> Vec<Self::Element>;

	/// Nearest ancestor-or-self of `target` that is an anchor with an `href`.
	fn closest_anchor(&self, target: &Self::Element) -> Option<Self::Element>;

	/// Resolved href and label sources of an anchor.
	fn link_info(&self, anchor: &Self::Element) -> Option<LinkInfo>;

	fn is_marked(&self, anchor: &Self::Element) -> bool;

	/// Adds or removes the `selected` marker on an anchor.
	fn set_marked(&mut self, anchor: &Self::Element, marked: bool);

	/// Every element currently carrying the `selected` marker.
	fn marked_anchors(&self) -> Vec<Self::Element>;

	/// True when `target` is part of the control panel.
	fn surface_contains(&self, target: &Self::Element) -> bool;

	/// Shows the control panel, creating it on first use.
	fn show_surface(&mut self);

	fn hide_surface(&mut self);

	/// Updates the selection count shown on the panel.
	fn show_count(&mut self, count: usize);

	/// Adds or removes the `selecting` marker on the document root.
	fn set_root_marker(&mut self, on: bool);

	/// Draws the lasso overlay over `area`, creating it if needed.
	fn draw_lasso(&mut self, area: &Rect);

	fn remove_lasso(&mut self);

	/// Registers a capture-phase listener for `kind`.
	fn subscribe(&mut self, kind: EventKind) -> Self::Subscription;

	fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// Side effects outside the document.
pub trait PageHost {
	/// Asks the user a yes/no question. Returning false aborts the action.
	fn confirm(&mut self, message: &str) -> bool;

	/// Sends a message to the tab authority. Fire-and-forget.
	fn send(&mut self, message: Message);

	/// Persists an export under its synthesized filename.
	fn save(&mut self, file: ExportFile) -> Result<()>;

	/// Local wall-clock time, used to name exports.
	fn now(&self) -> NaiveDateTime;
}
