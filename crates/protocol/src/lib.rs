//! Wire types for the multi-link opener message contract.
//!
//! Three contexts talk to each other: the launcher surface (toolbar popup or
//! CLI), the page context running the selector engine, and the tab authority
//! that is allowed to create browser tabs. Every message is a JSON object
//! tagged by its `type` field.
//!
//! Types in this crate are pure data. Behavior lives in `mlo-core`.

pub mod message;

pub use message::*;
