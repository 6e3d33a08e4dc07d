//! Opening tabs by spawning the desktop URL opener.

use std::process::Stdio;

use async_trait::async_trait;
use mlo::TabSpec;
use mlo_runtime::{Result, RuntimeError, TabCreator};
use tokio::process::Command;
use tracing::debug;

/// Creates a tab by running `program [args..] <url>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTabCreator {
	program: String,
	args: Vec<String>,
}

impl CommandTabCreator {
	/// Splits `command` on whitespace. Returns `None` for an empty command.
	pub fn from_command_line(command: &str) -> Option<Self> {
		let mut parts = command.split_whitespace().map(String::from);
		let program = parts.next()?;
		Some(Self {
			program,
			args: parts.collect(),
		})
	}

	/// The platform opener. On macOS `open -g` keeps the browser in the
	/// background. On Windows the URL goes to `url.dll` directly so no shell
	/// ever parses it.
	pub fn platform_default() -> Self {
		let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
			("open", &["-g"])
		} else if cfg!(target_os = "windows") {
			("rundll32", &["url.dll,FileProtocolHandler"])
		} else {
			("xdg-open", &[])
		};
		Self {
			program: program.to_string(),
			args: args.iter().map(|arg| arg.to_string()).collect(),
		}
	}

	pub fn program(&self) -> &str {
		&self.program
	}

	/// The URL is always passed as one trailing argument.
	fn command(&self, url: &str) -> Command {
		let mut command = Command::new(&self.program);
		command
			.args(&self.args)
			.arg(url)
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null());
		command
	}
}

#[async_trait]
impl TabCreator for CommandTabCreator {
	async fn create_tab(&self, tab: &TabSpec) -> Result<()> {
		debug!(target = "mlo::browser", program = %self.program, url = %tab.url, "spawning opener");
		let status = self
			.command(&tab.url)
			.status()
			.await
			.map_err(|err| RuntimeError::tab_create(&tab.url, err))?;

		if status.success() {
			Ok(())
		} else {
			Err(RuntimeError::tab_create(&tab.url, status))
		}
	}
}
