use std::path::PathBuf;
use std::sync::Arc;

use mlo::is_web_url;
use mlo::selector::confirm_message;
use mlo_runtime::TabAuthority;
use serde::Serialize;
use tracing::info;

use crate::browser::CommandTabCreator;
use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::input::{confirm, read_urls};
use crate::output::{ResultBuilder, print_result};

pub struct OpenOptions {
	pub urls: Vec<String>,
	pub file: Option<PathBuf>,
	pub yes: bool,
	pub browser_cmd: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OpenData {
	ok: bool,
	opened: usize,
	created: usize,
	declined: bool,
}

pub async fn execute(options: OpenOptions, ctx: &CommandContext) -> Result<()> {
	let urls = read_urls(options.urls, options.file.as_deref())?;
	if urls.is_empty() {
		return Err(CliError::InvalidInput("no URLs given".into()));
	}

	let creator = match options.browser_cmd.as_deref() {
		Some(command) => CommandTabCreator::from_command_line(command)
			.ok_or_else(|| CliError::InvalidInput("--browser-cmd is empty".into()))?,
		None => CommandTabCreator::platform_default(),
	};

	let count = urls.iter().filter(|url| is_web_url(url)).count();
	if !options.yes && ctx.config.needs_confirmation(count) && !confirm(&confirm_message(count))? {
		info!(target = "mlo", count, "open declined");
		let data = OpenData {
			ok: true,
			opened: 0,
			created: 0,
			declined: true,
		};
		print_result(&ResultBuilder::new("open").data(data).build(), ctx.format);
		return Ok(());
	}

	let (handle, task) = TabAuthority::spawn(Arc::new(creator), ctx.config.clone());
	let response = handle.open_tabs(urls).await?;
	drop(handle);
	let created = task.join().await?;
	info!(target = "mlo", opened = response.opened, created, "batch finished");

	let data = OpenData {
		ok: response.ok,
		opened: response.opened,
		created,
		declined: false,
	};
	print_result(&ResultBuilder::new("open").data(data).build(), ctx.format);
	Ok(())
}
