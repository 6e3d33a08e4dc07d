//! Executes tab plans on the tokio timer.

use std::sync::Arc;

use mlo::{OpenerConfig, ScheduledTab, TabPlan};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::creator::TabCreator;

/// A batch of tab creations running in the background.
///
/// The batch cannot be cancelled once scheduled. Dropping it detaches the
/// task; shutting down the runtime abandons creations that have not fired.
#[derive(Debug)]
pub struct ScheduledBatch {
	scheduled: usize,
	handle: JoinHandle<usize>,
}

impl ScheduledBatch {
	/// Number of tabs scheduled after filtering and capping.
	pub fn scheduled(&self) -> usize {
		self.scheduled
	}

	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}

	/// Waits for the last creation and returns how many succeeded.
	pub async fn finished(self) -> usize {
		match self.handle.await {
			Ok(created) => created,
			Err(err) => {
				warn!(target = "mlo::scheduler", error = %err, "tab batch aborted");
				0
			}
		}
	}
}

/// Plans and schedules `urls` in one step.
pub fn open_tabs<I, S>(urls: I, config: &OpenerConfig, creator: Arc<dyn TabCreator>) -> ScheduledBatch
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	schedule(TabPlan::from_urls(urls, config), creator)
}

/// Spawns a task creating each planned tab at its offset from now.
///
/// Deadlines are absolute, so a slow creation delays only the tabs that are
/// already due, not the spacing of the rest.
pub fn schedule(plan: TabPlan, creator: Arc<dyn TabCreator>) -> ScheduledBatch {
	let scheduled = plan.len();
	info!(target = "mlo::scheduler", scheduled, span_ms = plan.span().as_millis() as u64, "scheduling tabs");

	let handle = tokio::spawn(run_plan(plan, creator));
	ScheduledBatch { scheduled, handle }
}

async fn run_plan(plan: TabPlan, creator: Arc<dyn TabCreator>) -> usize {
	let start = Instant::now();
	let mut created = 0;

	for ScheduledTab { tab, offset } in plan {
		sleep_until(start + offset).await;
		match creator.create_tab(&tab).await {
			Ok(()) => {
				created += 1;
				debug!(target = "mlo::scheduler", url = %tab.url, offset_ms = offset.as_millis() as u64, "tab created");
			}
			Err(err) => {
				warn!(target = "mlo::scheduler", url = %tab.url, error = %err, "tab creation failed");
			}
		}
	}

	created
}
