//! `cashbook_cli` front end: one-shot commands, stdin scripts and an
//! interactive shell sharing one command table.

pub mod commands;
pub mod context;
pub mod error;
pub mod input;
pub mod output;
pub mod registry;
pub mod shell;
pub mod wizard;


pub use context::{CliMode, ShellContext};
pub use error::{CliError, CommandError, CommandResult};
pub use shell::run_cli;
