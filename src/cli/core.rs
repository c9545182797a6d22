//! Core CLI dispatch, error types and shell context helpers.

use std::io;

use rust_decimal::Decimal;
use rustyline::error::ReadlineError;

use crate::auth::AuthError;
use crate::core::ledger_manager::LedgerManager;
use crate::errors::LedgerError;

use super::formatters::format_money;
use super::io as cli_io;
use super::output;
use super::registry::CommandEntry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.ledger_manager {
            Some(manager) => format!("profit_core({})> ", manager.session().identity()),
            None => "profit_core> ".to_string(),
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn manager(&self) -> Result<&LedgerManager, CommandError> {
        self.ledger_manager.as_ref().ok_or(CommandError::NotLoggedIn)
    }

    pub(crate) fn manager_mut(&mut self) -> Result<&mut LedgerManager, CommandError> {
        self.ledger_manager.as_mut().ok_or(CommandError::NotLoggedIn)
    }

    pub(crate) fn money(&self, amount: Decimal) -> String {
        format_money(amount, &self.config.currency_symbol)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        if entry.requires_session && !self.is_signed_in() {
            return Err(CommandError::NotLoggedIn);
        }
        let handler = entry.handler;
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::NotLoggedIn => {
                output::error("Not signed in.");
                output::hint("Use `login <email>` or `register <email>` first.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&first.to_lowercase(), first, &args)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Not signed in. Use `login <email>` or `register <email>` first.")]
    NotLoggedIn,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(LedgerError::Io(err))
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    context: &mut ShellContext,
    lines: &[&str],
) -> Vec<Result<LoopControl, CommandError>> {
    let mut results = Vec::new();
    for line in lines {
        let result = context.process_line(line);
        let exit = matches!(result, Ok(LoopControl::Exit));
        results.push(result);
        if exit {
            break;
        }
    }
    results
}
