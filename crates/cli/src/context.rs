use std::path::Path;

use mlo::OpenerConfig;

use crate::error::Result;
use crate::output::OutputFormat;

/// State shared by every command invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
	pub config: OpenerConfig,
	pub format: OutputFormat,
}

impl CommandContext {
	pub fn new(config: OpenerConfig, format: OutputFormat) -> Self {
		Self { config, format }
	}

	/// Reads the config file if one was given, otherwise uses the defaults.
	pub fn load(config_path: Option<&Path>, format: OutputFormat) -> Result<Self> {
		let config = match config_path {
			Some(path) => OpenerConfig::load(path)?,
			None => OpenerConfig::default(),
		};
		Ok(Self::new(config, format))
	}
}
