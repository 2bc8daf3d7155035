use std::path::{Path, PathBuf};

use cashbook_config::{Settings, SettingsManager};
use cashbook_core::LedgerService;
use dialoguer::theme::ColorfulTheme;

use crate::cli::commands;
use crate::cli::error::{CliError, CommandError};
use crate::cli::output::Formatter;
use crate::cli::registry::CommandRegistry;
use crate::open_service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    /// Arguments given on the command line; a single command runs.
    OneShot,
    /// Commands read line by line from stdin.
    Script,
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// State shared by every command handler.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) settings_manager: SettingsManager,
    pub(crate) settings: Settings,
    pub(crate) workbook_path: PathBuf,
    pub(crate) service: LedgerService,
    pub(crate) formatter: Formatter,
    pub(crate) theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_manager(mode, SettingsManager::from_env()?)
    }

    pub fn with_manager(mode: CliMode, settings_manager: SettingsManager) -> Result<Self, CliError> {
        let settings = settings_manager.load()?;
        crate::init_with_filter(&settings.log_filter);

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let workbook_path = settings_manager.workbook_path(&settings);
        let service = open_service(&workbook_path, &settings);
        let formatter = Formatter::new(settings.ui_color_enabled);

        Ok(Self {
            mode,
            registry,
            settings_manager,
            settings,
            workbook_path,
            service,
            formatter,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Persists `settings` and rebuilds everything derived from them.
    pub(crate) fn replace_settings(&mut self, settings: Settings) -> Result<(), CommandError> {
        self.settings_manager.save(&settings)?;
        self.workbook_path = self.settings_manager.workbook_path(&settings);
        self.service = open_service(&self.workbook_path, &settings);
        self.formatter = Formatter::new(settings.ui_color_enabled);
        self.settings = settings;
        Ok(())
    }

    /// Runs `command`; names are matched case-insensitively.
    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let name = command.to_lowercase();
        let Some(handler) = self.registry.handler(&name) else {
            return Err(CommandError::UnknownCommand(command.to_string()));
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Prints `err` without stopping the shell.
    pub(crate) fn report_error(&self, err: &CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                self.formatter.print_error(message);
                self.formatter
                    .print_hint("Use `help <command>` for usage details.");
            }
            CommandError::UnknownCommand(raw) => {
                self.formatter.print_warning(err);
                if let Some(best) = self.registry.suggest(raw) {
                    self.formatter.print_hint(format!("Suggestion: `{best}`?"));
                }
            }
            other => self.formatter.print_error(other),
        }
    }
}
