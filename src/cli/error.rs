use std::io;

use cashbook_config::SettingsError;
use cashbook_core::{FilterError, LoadError, ReadError, RecordError, WriteError};
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failure of a single command. In the shell these are reported and the loop
/// goes on; for a one-shot invocation they end the process.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`. Type `help` to see available commands.")]
    UnknownCommand(String),
    #[error("{0}")]
    Message(String),
    #[error("cannot record entry: {0}")]
    Record(#[from] RecordError),
    #[error("cannot read ledger: {0}")]
    Read(#[from] ReadError),
    #[error("cannot load configuration: {0}")]
    Load(#[from] LoadError),
    #[error("cannot write workbook: {0}")]
    Write(#[from] WriteError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Errors that stop the front end itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Command(#[from] CommandError),
}
