//! URL and confirmation input for the command line.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::Confirm;
use tracing::warn;

use crate::error::Result;

/// Collects URLs from the arguments, then from `file` one per line.
///
/// Blank lines and lines starting with `#` are skipped. Nothing is filtered
/// by scheme here; the tab plan drops non-web URLs.
pub fn read_urls(args: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
	let mut urls = args;
	if let Some(path) = file {
		let content = fs::read_to_string(path)?;
		urls.extend(parse_url_lines(&content));
	}
	Ok(urls)
}

fn parse_url_lines(content: &str) -> impl Iterator<Item = String> + '_ {
	content
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(String::from)
}

/// Asks a yes/no question on the terminal, defaulting to "no".
///
/// Without a terminal on stdin there is nobody to ask, so the answer is
/// "no"; `--yes` is the non-interactive way through. Escape also declines.
pub fn confirm(prompt: &str) -> io::Result<bool> {
	if !io::stdin().is_terminal() {
		warn!(target = "mlo", prompt, "no terminal to confirm on, declining; pass --yes to skip the prompt");
		return Ok(false);
	}
	let answer = Confirm::new()
		.with_prompt(prompt)
		.default(false)
		.interact_opt()
		.map_err(io::Error::other)?;
	Ok(answer.unwrap_or(false))
}
