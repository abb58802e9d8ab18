use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to SQLite database file (default: "campcheck.db")
    pub db_path: PathBuf,
    /// Directory backups are written to (default: ".")
    pub backup_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CAMPCHECK_DB_PATH` - SQLite database path (default: "campcheck.db")
    /// - `CAMPCHECK_BACKUP_DIR` - Backup output directory (default: ".")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_path: lookup("CAMPCHECK_DB_PATH")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "campcheck.db".to_string())
                .into(),
            backup_dir: lookup("CAMPCHECK_BACKUP_DIR")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| ".".to_string())
                .into(),
        }
    }

    /// Overrides the database path when one is given.
    pub fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
