//! Planning of throttled background-tab batches.
//!
//! A [`TabPlan`] is the pure half of the tab-open scheduler: it filters,
//! caps and spaces a request. Executing the plan is left to a driver (the
//! tokio scheduler in `mlo-runtime`, `setTimeout` in the browser worker).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::OpenerConfig;
use crate::link::is_web_url;

/// Properties of a tab to create, shaped like `chrome.tabs.create`'s argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSpec {
	pub url: String,
	/// Whether the new tab takes focus. Always false for planned tabs.
	pub active: bool,
}

impl TabSpec {
	pub fn background(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			active: false,
		}
	}
}

/// A tab together with its delay from the start of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTab {
	pub tab: TabSpec,
	pub offset: Duration,
}

/// Ordered, capped and spaced tab creations for one `OPEN_TABS` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPlan {
	tabs: Vec<ScheduledTab>,
}

impl TabPlan {
	/// Keeps web URLs (original spelling preserved), truncates to
	/// `config.max_tabs`, and spaces tab `i` at `i * open_spacing`.
	pub fn from_urls<I, S>(urls: I, config: &OpenerConfig) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let spacing = config.open_spacing();
		let tabs = urls
			.into_iter()
			.filter(|url| is_web_url(url.as_ref()))
			.take(config.max_tabs)
			.zip(0u32..)
			.map(|(url, i)| ScheduledTab {
				tab: TabSpec::background(url.as_ref()),
				offset: spacing.saturating_mul(i),
			})
			.collect();
		Self { tabs }
	}

	/// Number of tabs that will be created.
	pub fn len(&self) -> usize {
		self.tabs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tabs.is_empty()
	}

	pub fn tabs(&self) -> &[ScheduledTab] {
		&self.tabs
	}

	/// Delay of the last creation, i.e. how long the batch takes to drain.
	pub fn span(&self) -> Duration {
		self.tabs.last().map(|t| t.offset).unwrap_or_default()
	}
}

impl IntoIterator for TabPlan {
	type Item = ScheduledTab;
	type IntoIter = std::vec::IntoIter<ScheduledTab>;

	fn into_iter(self) -> Self::IntoIter {
		self.tabs.into_iter()
	}
}
