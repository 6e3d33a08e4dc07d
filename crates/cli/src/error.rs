use thiserror::Error;

use crate::output::ErrorCode;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Core(#[from] mlo::Error),

	#[error(transparent)]
	Runtime(#[from] mlo_runtime::RuntimeError),

	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Core(mlo::Error::Config { .. }) => ErrorCode::ConfigError,
			CliError::Core(mlo::Error::Io(_)) | CliError::Io(_) => ErrorCode::IoError,
			CliError::Core(_) => ErrorCode::InternalError,
			CliError::Runtime(mlo_runtime::RuntimeError::TabCreate { .. }) => ErrorCode::TabOpenFailed,
			CliError::Runtime(_) => ErrorCode::InternalError,
			CliError::InvalidInput(_) | CliError::Json(_) => ErrorCode::InvalidInput,
		}
	}
}
