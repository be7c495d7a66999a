use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vdife::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    // stdout carries reports and the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VDIFE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();

    if let Some(Command::Serve(cmd)) = &args.command {
        let result = vdife::cli::load_settings(&cmd.common).and_then(vdife::mcp::run_server);
        if let Err(err) = result {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match vdife::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
