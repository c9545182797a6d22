//! Shared runtime state for CLI interactions and command execution.

use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;

use crate::{
    auth::CredentialStore,
    config::{Config, ConfigManager},
    core::{clock::Clock, ledger_manager::LedgerManager, utils::PathResolver, SystemClock},
    storage::JsonStorage,
};

use super::{commands, core::CliError, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub base_dir: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    /// Present while an account is signed in.
    pub ledger_manager: Option<LedgerManager>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base(mode, PathResolver::base_dir(), Arc::new(SystemClock))
    }

    /// Builds a context rooted at `base` instead of the default home.
    pub fn with_base(
        mode: CliMode,
        base: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::from_base(base.clone())?;
        let config = config_manager.load()?;

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            base_dir: base,
            config_manager,
            config,
            clock,
            ledger_manager: None,
            last_command: None,
            running: true,
        })
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::in_base(
            &self.base_dir,
            self.config.allowed_email_domain.as_deref(),
            Arc::clone(&self.clock),
        )
    }

    pub fn ledger_storage(&self) -> crate::errors::Result<JsonStorage> {
        JsonStorage::new(Some(self.base_dir.clone()))
    }

    pub fn is_signed_in(&self) -> bool {
        self.ledger_manager.is_some()
    }
}
