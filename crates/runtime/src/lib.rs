//! Tokio side of the multi-link opener: executes [`mlo::TabPlan`]s with
//! fixed spacing and serves `OPEN_TABS` requests from a channel-fed worker.

pub mod authority;
pub mod creator;
pub mod error;
pub mod scheduler;

pub use authority::{AuthorityHandle, AuthorityTask, TabAuthority};
pub use creator::TabCreator;
pub use error::{Result, RuntimeError};
pub use scheduler::{ScheduledBatch, open_tabs, schedule};
