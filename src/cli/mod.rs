mod args;
mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, ServeCommand};
pub use commands::helper::load_settings;
pub use exit_status::ExitStatus;
pub use run::run_cli;
