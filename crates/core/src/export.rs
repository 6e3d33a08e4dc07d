//! CSV export of a selection.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::config::DEFAULT_EXPORT_PREFIX;
use crate::store::SelectionStore;

/// Media type of the exported bytes.
pub const CSV_MEDIA_TYPE: &str = "text/csv;charset=utf-8";

const HEADER: [&str; 2] = ["Name", "URL"];

/// An encoded export ready to be saved by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
	pub filename: String,
	pub media_type: &'static str,
	pub bytes: Vec<u8>,
}

impl ExportFile {
	/// The payload as text. Exports are always UTF-8.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.bytes)
	}
}

/// Encodes `store` as CSV named after `at`, or `None` when there is nothing
/// to export.
pub fn encode(store: &SelectionStore, at: NaiveDateTime) -> Option<ExportFile> {
	encode_with_prefix(store, at, DEFAULT_EXPORT_PREFIX)
}

pub fn encode_with_prefix(store: &SelectionStore, at: NaiveDateTime, prefix: &str) -> Option<ExportFile> {
	if store.is_empty() {
		return None;
	}

	Some(ExportFile {
		filename: export_filename(prefix, at),
		media_type: CSV_MEDIA_TYPE,
		bytes: to_csv(store).into_bytes(),
	})
}

/// `<prefix>-YYYYMMDD-HHMMSS.csv`, using `at` as-is (no timezone conversion).
pub fn export_filename(prefix: &str, at: NaiveDateTime) -> String {
	format!("{prefix}-{}.csv", at.format("%Y%m%d-%H%M%S"))
}

/// `Name,URL` header plus one row per entry, rows separated by `\n`.
pub fn to_csv(store: &SelectionStore) -> String {
	let header = std::iter::once(HEADER.join(","));
	let rows = store
		.iter()
		.map(|record| format!("{},{}", escape_field(&record.text), escape_field(&record.url)));
	header.chain(rows).collect::<Vec<_>>().join("\n")
}

/// Quotes a field iff it contains a comma, a double quote or a newline,
/// doubling any inner quotes.
pub fn escape_field(field: &str) -> Cow<'_, str> {
	if field.contains([',', '"', '\n']) {
		Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
	} else {
		Cow::Borrowed(field)
	}
}
