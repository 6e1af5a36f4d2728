use clap::ValueEnum;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{BuilderError, Result};
use crate::persist::storage::{is_valid_key, DynStorage, FileStorage, MemoryStorage, SqliteStorage};
use crate::persist::STORAGE_KEY;
use crate::prompt::PromptVariant;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[value(alias = "json")]
    File,
    #[value(alias = "sqlite3")]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: StorageBackend,
    /// Directory for `file`, database path for `sqlite`; unused by `memory`.
    pub data_path: String,
    pub key: String,
    pub history_debounce_ms: u64,
    pub autosave_debounce_ms: u64,
    pub prompt_variant: PromptVariant,
    pub catalog: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_path: ".bolt-builder".into(),
            key: STORAGE_KEY.into(),
            history_debounce_ms: 500,
            autosave_debounce_ms: 1000,
            prompt_variant: PromptVariant::Detailed,
            catalog: None,
        }
    }
}

impl Config {
    /// Reads a TOML file; keys it omits keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&raw).map_err(|e| BuilderError::Config(format!("{}: {e}", path.display())))?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(BuilderError::Config("storage key must not be empty".into()));
        }
        if !is_valid_key(&self.key) {
            return Err(BuilderError::Config(format!(
                "storage key `{}` may only contain ASCII letters, digits, `-` and `_`",
                self.key
            )));
        }
        if self.backend != StorageBackend::Memory && self.data_path.trim().is_empty() {
            return Err(BuilderError::Config(format!("{:?} backend needs a data_path", self.backend)));
        }
        Ok(())
    }

    pub fn history_delay(&self) -> Duration {
        Duration::from_millis(self.history_debounce_ms)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    pub fn open_storage(&self) -> Result<DynStorage> {
        let storage: DynStorage = match self.backend {
            StorageBackend::File => Box::new(FileStorage::new(PathBuf::from(&self.data_path))),
            StorageBackend::Sqlite => {
                let path = PathBuf::from(&self.data_path);
                let db = if path.extension().is_some() { path } else { path.join("projects.sqlite") };
                Box::new(SqliteStorage::open(&db)?)
            }
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
        };
        Ok(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "backend = \"sqlite\"\nautosave_debounce_ms = 250\nprompt_variant = \"basic\"").unwrap();
        let cfg = Config::load(f.path()).unwrap();
        assert_eq!(cfg.backend, StorageBackend::Sqlite);
        assert_eq!(cfg.autosave_delay(), Duration::from_millis(250));
        assert_eq!(cfg.history_delay(), Duration::from_millis(500));
        assert_eq!(cfg.prompt_variant, PromptVariant::Basic);
        assert_eq!(cfg.key, STORAGE_KEY);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "backend = [").unwrap();
        assert!(matches!(Config::load(f.path()), Err(BuilderError::Config(_))));
    }

    #[test]
    fn blank_key_is_rejected() {
        let cfg = Config { key: "  ".into(), ..Default::default() };
        assert!(cfg.check().is_err());
    }

    #[test]
    fn key_with_path_characters_is_rejected() {
        for key in ["a/b", "a b", "proj.v2", "../escape"] {
            let cfg = Config { key: key.into(), ..Default::default() };
            assert!(matches!(cfg.check(), Err(BuilderError::Config(_))), "{key}");
        }
        let cfg = Config { key: "client-site_2".into(), ..Default::default() };
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn sqlite_backend_opens_database_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            backend: StorageBackend::Sqlite,
            data_path: dir.path().join("state").display().to_string(),
            ..Default::default()
        };
        let mut storage = cfg.open_storage().unwrap();
        storage.set("k", "v").unwrap();
        assert!(dir.path().join("state").join("projects.sqlite").exists());
    }
}
