//! URL filtering and link text helpers.

use std::sync::LazyLock;

use regex_lite::Regex;
use url::Url;

static WEB_URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("WEB_URL_RE should compile"));

/// Returns true when `url` starts with `http://` or `https://`, ignoring case.
pub fn is_web_url(url: &str) -> bool {
	WEB_URL_RE.is_match(url)
}

/// Canonical absolute form of a web URL, or `None` when it is not one.
///
/// Uses WHATWG serialization, the same form a browser reports for
/// `HTMLAnchorElement.href`: lowercase scheme and host, explicit root path.
pub fn normalize_url(raw: &str) -> Option<String> {
	if !is_web_url(raw) {
		return None;
	}
	Url::parse(raw).ok().map(String::from)
}

/// Trims `text` and collapses every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// What the page knows about an anchor element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkInfo {
	/// Resolved absolute href.
	pub href: String,
	pub text: Option<String>,
	pub aria_label: Option<String>,
	pub title: Option<String>,
}

impl LinkInfo {
	pub fn new(href: impl Into<String>) -> Self {
		Self {
			href: href.into(),
			..Default::default()
		}
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
		self.aria_label = Some(label.into());
		self
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Label used in exports: text content, else `aria-label`, else `title`.
	///
	/// The first *non-empty* source wins before collapsing, so a whitespace-only
	/// text node yields an empty label rather than falling through.
	pub fn display_text(&self) -> String {
		[&self.text, &self.aria_label, &self.title]
			.into_iter()
			.flatten()
			.find(|s| !s.is_empty())
			.map(|s| collapse_whitespace(s))
			.unwrap_or_default()
	}
}
