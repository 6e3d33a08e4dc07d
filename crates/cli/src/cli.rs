use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "mlo")]
#[command(about = "Multi-link opener - open or export many links at once")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Opener settings as JSON (maxTabs, confirmThreshold, openSpacingMs, ...)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Open links as background tabs, throttled and capped
	Open {
		/// URLs to open, in order
		urls: Vec<String>,
		/// Read further URLs from a file, one per line
		#[arg(long, value_name = "PATH")]
		file: Option<PathBuf>,
		/// Skip the confirmation prompt for large batches
		#[arg(short, long)]
		yes: bool,
		/// Command used to open one URL (the URL is appended)
		#[arg(long, value_name = "CMD")]
		browser_cmd: Option<String>,
	},

	/// Show which tabs would open and when, without opening anything
	Plan {
		urls: Vec<String>,
		#[arg(long, value_name = "PATH")]
		file: Option<PathBuf>,
	},

	/// Write link records to a timestamped CSV file
	Export {
		/// JSON array of {"url", "text"} records (stdin when omitted)
		#[arg(long, value_name = "PATH")]
		input: Option<PathBuf>,
		/// Directory the CSV is written to
		#[arg(long, value_name = "DIR", default_value = ".")]
		out_dir: PathBuf,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Open { .. } => "open",
			Commands::Plan { .. } => "plan",
			Commands::Export { .. } => "export",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_open_with_flags() {
		let cli = Cli::try_parse_from([
			"mlo",
			"-vv",
			"open",
			"https://a.test/",
			"https://b.test/",
			"--file",
			"links.txt",
			"--yes",
			"--browser-cmd",
			"firefox --new-tab",
		])
		.unwrap();

		assert_eq!(cli.verbose, 2);
		match cli.command {
			Commands::Open { urls, file, yes, browser_cmd } => {
				assert_eq!(urls, vec!["https://a.test/", "https://b.test/"]);
				assert_eq!(file, Some(PathBuf::from("links.txt")));
				assert!(yes);
				assert_eq!(browser_cmd.as_deref(), Some("firefox --new-tab"));
			}
			other => panic!("expected open, got {other:?}"),
		}
	}

	#[test]
	fn global_flags_after_subcommand() {
		let cli = Cli::try_parse_from(["mlo", "plan", "http://a/", "-f", "json", "--config", "mlo.json"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Json);
		assert_eq!(cli.config, Some(PathBuf::from("mlo.json")));
		assert_eq!(cli.command.name(), "plan");
	}

	#[test]
	fn export_defaults_to_current_dir() {
		let cli = Cli::try_parse_from(["mlo", "export"]).unwrap();
		match cli.command {
			Commands::Export { input, out_dir } => {
				assert!(input.is_none());
				assert_eq!(out_dir, PathBuf::from("."));
			}
			other => panic!("expected export, got {other:?}"),
		}
	}

	#[test]
	fn subcommand_is_required() {
		assert!(Cli::try_parse_from(["mlo"]).is_err());
	}
}
