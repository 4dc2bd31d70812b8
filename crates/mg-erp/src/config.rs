//! Environment-driven configuration.
//!
//! Both the init binary and a running front end resolve the store location
//! through [`InventoryConfig::from_env`], so they always agree on the file.

use std::path::PathBuf;

use mg_erp_core::seed::is_negative_flag;
use mg_erp_core::SeedPolicy;

use crate::error::{AppError, Result};

/// Overrides the database location.
pub const DB_PATH_VAR: &str = "DB_PATH";
/// Seed toggle; an explicit negative disables seeding.
pub const SEED_DB_VAR: &str = "SEED_DB";
/// Secret used to key CSRF tokens.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
/// CSRF toggle; an explicit negative selects the no-op verifier.
pub const CSRF_VAR: &str = "CSRF_PROTECTION";

/// Database file name used when no override is set.
pub const DEFAULT_DB_FILE: &str = "erp.db";
/// Development-only secret.
pub const DEFAULT_SECRET_KEY: &str = "dev";

/// Which CSRF verifier to install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsrfMode {
    #[default]
    Enforce,
    Disabled,
}

/// Configuration for the inventory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Location of the SQLite database file.
    pub db_path: PathBuf,
    /// Whether an empty store gets example data.
    pub seed: SeedPolicy,
    /// Secret for keying CSRF tokens.
    pub secret_key: String,
    /// CSRF verifier selection.
    pub csrf: CsrfMode,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            seed: SeedPolicy::Enabled,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            csrf: CsrfMode::Enforce,
        }
    }
}

impl InventoryConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            db_path: get(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            seed: SeedPolicy::from_flag(get(SEED_DB_VAR).as_deref()),
            secret_key: get(SECRET_KEY_VAR).unwrap_or(defaults.secret_key),
            csrf: match get(CSRF_VAR) {
                Some(v) if is_negative_flag(&v) => CsrfMode::Disabled,
                _ => CsrfMode::Enforce,
            },
        }
    }

    /// Whether the development secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Reject configurations that cannot be served.
    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        if self.csrf == CsrfMode::Enforce && self.secret_key.is_empty() {
            return Err(AppError::Config(
                "CSRF protection requires a non-empty secret key".into(),
            ));
        }
        Ok(())
    }
}

/// `erp.db` next to the running executable, or in the working directory if
/// the executable cannot be located.
pub fn default_db_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DB_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}
