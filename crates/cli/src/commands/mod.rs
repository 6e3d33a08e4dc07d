mod export;
mod open;
mod plan;

use crate::cli::Commands;
use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{CommandResult, OutputFormat, ResultBuilder, print_error_stderr, print_result};

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
	let name = command.name();
	let outcome = match command {
		Commands::Open { urls, file, yes, browser_cmd } => {
			open::execute(open::OpenOptions { urls, file, yes, browser_cmd }, ctx).await
		}
		Commands::Plan { urls, file } => plan::execute(urls, file.as_deref(), ctx),
		Commands::Export { input, out_dir } => export::execute(input.as_deref(), &out_dir, ctx),
	};

	if let Err(err) = &outcome {
		report_failure(name, err, ctx.format);
	}
	outcome
}

/// Emits the error envelope for a failed command.
pub fn report_failure(command: &str, err: &CliError, format: OutputFormat) {
	let result: CommandResult<()> = ResultBuilder::new(command).error(err.code(), err.to_string()).build();
	match format {
		OutputFormat::Text => {
			if let Some(error) = &result.error {
				print_error_stderr(error);
			}
		}
		OutputFormat::Json | OutputFormat::Ndjson => print_result(&result, format),
	}
}
