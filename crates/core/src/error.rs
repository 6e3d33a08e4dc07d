//! Errors raised by collaborators of the core.
//!
//! The selection logic itself never fails: bad URLs are filtered and
//! oversized batches truncated. These variants cover the edges where the core
//! hands work to the outside world (saving a file, loading configuration).

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to save {filename}: {reason}")]
	Save { filename: String, reason: String },

	#[error("invalid config {}: {source}", path.display())]
	Config {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl Error {
	pub fn save(filename: impl Into<String>, reason: impl std::fmt::Display) -> Self {
		Error::Save {
			filename: filename.into(),
			reason: reason.to_string(),
		}
	}
}
