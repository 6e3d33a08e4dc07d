//! Insertion-ordered set of selected links.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::link::{collapse_whitespace, normalize_url};

/// One selected link: canonical URL plus its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
	pub url: String,
	#[serde(default)]
	pub text: String,
}

impl LinkRecord {
	pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			text: text.into(),
		}
	}
}

/// Ground truth of what is selected in one page context.
///
/// Keys are canonical http(s) URLs, unique, kept in insertion order so exports
/// are deterministic. Every operation is total: input that is not a web URL
/// is dropped instead of reported.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
	records: Vec<LinkRecord>,
	index: HashMap<String, usize>,
}

impl SelectionStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `url` with `text`, returning whether the URL was accepted.
	///
	/// Re-adding a present URL refreshes its text and keeps its position.
	pub fn add(&mut self, url: &str, text: &str) -> bool {
		let Some(url) = normalize_url(url) else {
			trace!(target = "mlo::store", %url, "ignoring non-web url");
			return false;
		};
		let text = collapse_whitespace(text);

		match self.index.get(&url) {
			Some(&pos) => self.records[pos].text = text,
			None => {
				self.index.insert(url.clone(), self.records.len());
				self.records.push(LinkRecord { url, text });
			}
		}
		true
	}

	/// Removes `url` if present. Returns whether anything was removed.
	pub fn remove(&mut self, url: &str) -> bool {
		let Some(url) = normalize_url(url) else {
			return false;
		};
		let Some(pos) = self.index.remove(&url) else {
			return false;
		};

		self.records.remove(pos);
		for record in &self.records[pos..] {
			if let Some(slot) = self.index.get_mut(&record.url) {
				*slot -= 1;
			}
		}
		true
	}

	pub fn clear(&mut self) {
		self.records.clear();
		self.index.clear();
	}

	pub fn contains(&self, url: &str) -> bool {
		normalize_url(url).is_some_and(|url| self.index.contains_key(&url))
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Read-only snapshot of the selection in insertion order.
	pub fn entries(&self) -> &[LinkRecord] {
		&self.records
	}

	pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
		self.records.iter()
	}

	/// Selected URLs in insertion order.
	pub fn urls(&self) -> Vec<String> {
		self.records.iter().map(|r| r.url.clone()).collect()
	}
}

impl Extend<LinkRecord> for SelectionStore {
	fn extend<T: IntoIterator<Item = LinkRecord>>(&mut self, iter: T) {
		for record in iter {
			self.add(&record.url, &record.text);
		}
	}
}

impl FromIterator<LinkRecord> for SelectionStore {
	fn from_iter<T: IntoIterator<Item = LinkRecord>>(iter: T) -> Self {
		let mut store = Self::new();
		store.extend(iter);
		store
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn non_web_urls_leave_store_unchanged() {
		let mut store = SelectionStore::new();
		store.add("https://a.test/", "A");
		for url in ["ftp://x", "mailto:me@x.test", "javascript:alert(1)", "/local", "", "http://"] {
			assert!(!store.add(url, "nope"));
		}
		assert_eq!(store.entries(), &[LinkRecord::new("https://a.test/", "A")]);
	}

	#[test]
	fn keys_are_normalized() {
		let mut store = SelectionStore::new();
		store.add("HTTPS://A.test", "first");
		store.add("https://a.test/", "second");
		assert_eq!(store.len(), 1);
		assert_eq!(store.entries()[0], LinkRecord::new("https://a.test/", "second"));
		assert!(store.contains("https://A.TEST"));
	}

	#[test]
	fn text_is_collapsed_and_trimmed() {
		let mut store = SelectionStore::new();
		store.add("http://x/1", "\n  Hello \t  world  ");
		assert_eq!(store.entries()[0].text, "Hello world");
	}

	#[test]
	fn readding_keeps_position() {
		let mut store = SelectionStore::new();
		store.add("http://x/1", "one");
		store.add("http://x/2", "two");
		store.add("http://x/1", "uno");
		assert_eq!(store.urls(), vec!["http://x/1", "http://x/2"]);
		assert_eq!(store.entries()[0].text, "uno");
	}

	#[test]
	fn remove_preserves_order_of_the_rest() {
		let mut store = SelectionStore::new();
		for i in 1..=4 {
			store.add(&format!("http://x/{i}"), "");
		}
		assert!(store.remove("http://x/2"));
		assert!(!store.remove("http://x/2"));
		assert_eq!(store.urls(), vec!["http://x/1", "http://x/3", "http://x/4"]);

		assert!(store.remove("http://x/4"));
		store.add("http://x/5", "");
		assert!(store.remove("http://x/3"));
		assert_eq!(store.urls(), vec!["http://x/1", "http://x/5"]);
		assert!(store.contains("http://x/5"));
	}

	#[test]
	fn remove_of_absent_or_invalid_is_noop() {
		let mut store = SelectionStore::new();
		store.add("http://x/1", "");
		assert!(!store.remove("http://x/9"));
		assert!(!store.remove("not a url"));
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn clear_empties() {
		let mut store: SelectionStore = [LinkRecord::new("http://x/1", "a"), LinkRecord::new("ftp://x/2", "b")]
			.into_iter()
			.collect();
		assert_eq!(store.len(), 1);
		store.clear();
		assert!(store.is_empty());
		assert!(!store.contains("http://x/1"));
	}
}
