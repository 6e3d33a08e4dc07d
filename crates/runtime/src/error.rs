use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
	#[error("failed to open tab for {url}: {reason}")]
	TabCreate { url: String, reason: String },

	#[error("tab authority is no longer running")]
	AuthorityClosed,
}

impl RuntimeError {
	pub fn tab_create(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
		RuntimeError::TabCreate {
			url: url.into(),
			reason: reason.to_string(),
		}
	}
}
