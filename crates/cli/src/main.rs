use clap::Parser;
use mlo_cli::cli::Cli;
use mlo_cli::context::CommandContext;
use mlo_cli::{commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let ctx = match CommandContext::load(cli.config.as_deref(), cli.format) {
		Ok(ctx) => ctx,
		Err(err) => {
			commands::report_failure("config", &err, cli.format);
			error!(target = "mlo", error = %err, "command failed");
			std::process::exit(1);
		}
	};

	if let Err(err) = commands::dispatch(cli.command, &ctx).await {
		error!(target = "mlo", error = %err, "command failed");
		std::process::exit(1);
	}
}
