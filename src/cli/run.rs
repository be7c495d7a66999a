use std::process::ExitCode;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{add::add, check::check, fix::fix, hover::hover, init::init, sync::sync},
    exit_status::ExitStatus,
};

/// Main entry point for the vdife CLI.
///
/// Dispatches to the command handler. `serve` is handled by the binary
/// before reaching here.
pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = match command {
        Some(Command::Check(cmd)) => check(cmd)?,
        Some(Command::Sync(cmd)) => sync(cmd)?,
        Some(Command::Add(cmd)) => add(cmd)?,
        Some(Command::Fix(cmd)) => fix(cmd)?,
        Some(Command::Hover(cmd)) => hover(cmd)?,
        Some(Command::Init) => init()?,
        Some(Command::Serve(_)) => {
            anyhow::bail!("Serve command should be handled before run_cli()")
        }
        None => ExitStatus::Success,
    };

    Ok(status.into())
}
