//! Selection engine, CSV export and tab planning for the multi-link opener.
//!
//! The crate is runtime-agnostic: the selector engine is a synchronous state
//! machine driven by [`PageEvent`]s, and side effects go through the
//! [`Page`], [`GeometryOracle`] and [`PageHost`] collaborator traits. The
//! browser content script implements them over the DOM, tests implement them
//! in memory with [`fake::FakePage`].
//!
//! ```ignore
//! let mut engine = SelectorEngine::new(page, OpenerConfig::default());
//! engine.enable();
//! let outcome = engine.handle_event(PageEvent::Click { target });
//! if outcome.prevent_default { /* cancel navigation */ }
//! engine.open_all(&mut host);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod fake;
pub mod geometry;
pub mod link;
pub mod page;
pub mod schedule;
pub mod selector;
pub mod store;

pub use config::{LassoModifier, OpenerConfig};
pub use error::{Error, Result};
pub use export::{CSV_MEDIA_TYPE, ExportFile, encode, export_filename};
pub use geometry::{GeometryOracle, Point, Rect};
pub use link::{LinkInfo, collapse_whitespace, is_web_url, normalize_url};
pub use mlo_protocol::{Message, OpenTabsResponse};
pub use page::{EventDisposition, EventKind, Modifiers, MouseButton, Page, PageEvent, PageHost, PanelAction};
pub use schedule::{ScheduledTab, TabPlan, TabSpec};
pub use selector::{SelectionContext, SelectionMode, SelectorEngine};
pub use store::{LinkRecord, SelectionStore};
