use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A message exchanged between the launcher, a page context and the tab authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
	/// Launcher → page: flip selection mode. Fire-and-forget.
	ToggleSelect,
	/// Launcher → page: open every selected link.
	RequestOpen,
	/// Launcher → page: export the selection as CSV.
	RequestExport,
	/// Page → tab authority: create background tabs for `urls`.
	///
	/// Answered with [`OpenTabsResponse`]. Entries that are not strings are
	/// dropped on decode; the array itself is required.
	OpenTabs {
		#[serde(deserialize_with = "string_entries")]
		urls: Vec<String>,
	},
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UrlEntry {
	Url(String),
	Other(IgnoredAny),
}

fn string_entries<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let entries = Vec::<UrlEntry>::deserialize(deserializer)?;
	Ok(entries
		.into_iter()
		.filter_map(|entry| match entry {
			UrlEntry::Url(url) => Some(url),
			UrlEntry::Other(_) => None,
		})
		.collect())
}

impl Message {
	/// Builds an `OPEN_TABS` request.
	pub fn open_tabs<I, S>(urls: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Message::OpenTabs {
			urls: urls.into_iter().map(Into::into).collect(),
		}
	}

	/// Wire name of the message, as found in the `type` field.
	pub fn kind(&self) -> &'static str {
		match self {
			Message::ToggleSelect => "TOGGLE_SELECT",
			Message::RequestOpen => "REQUEST_OPEN",
			Message::RequestExport => "REQUEST_EXPORT",
			Message::OpenTabs { .. } => "OPEN_TABS",
		}
	}

	/// Returns true for messages addressed to a page context.
	pub fn is_for_page(&self) -> bool {
		!matches!(self, Message::OpenTabs { .. })
	}
}

/// Acknowledgment of an `OPEN_TABS` request.
///
/// `opened` counts the tabs *scheduled* after filtering and capping. The tabs
/// themselves may still be materializing when this is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTabsResponse {
	pub ok: bool,
	pub opened: usize,
}

impl OpenTabsResponse {
	pub fn scheduled(opened: usize) -> Self {
		Self { ok: true, opened }
	}
}
