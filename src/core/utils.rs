use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".profit_core";
const HOME_ENV: &str = "PROFIT_CORE_HOME";
const LEDGER_DIR: &str = "ledgers";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const USERS_FILE: &str = "users.json";

/// Resolves the on-disk layout under the application home.
pub struct PathResolver;

impl PathResolver {
    /// `PROFIT_CORE_HOME` when set, otherwise `~/.profit_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn ledger_dir_in(base: &Path) -> PathBuf {
        base.join(LEDGER_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }

    pub fn users_file_in(base: &Path) -> PathBuf {
        base.join(USERS_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling path used to stage a write before renaming over `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Replaces `path` with `data` by staging to a temporary sibling first, so a
/// crash never leaves a truncated document behind.
pub fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}
