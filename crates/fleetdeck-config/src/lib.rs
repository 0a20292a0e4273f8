//! Configuration and session persistence for Fleetdeck.
//!
//! TOML config (defaults → file → `FLEETDECK_`-prefixed env vars) and a
//! file-backed [`SessionStore`] holding the durable client-side state:
//! token, user, display preferences, and integration credentials.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use fleetdeck_core::session::{SessionState, SessionStore};
use fleetdeck_core::CoreError;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Backend base URL; the client appends `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_timeout() -> u64 {
    30
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "fleetdeck")
}

/// Canonical config file path (`<config dir>/config.toml`).
pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("fleetdeck.toml"))
}

/// Canonical session file path, next to the config file.
pub fn session_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("session.toml"))
        .unwrap_or_else(|| PathBuf::from("fleetdeck-session.toml"))
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config: defaults, then the TOML file, then `FLEETDECK_*` env
/// vars (e.g. `FLEETDECK_API_BASE_URL`).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLEETDECK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── File session store ──────────────────────────────────────────────

/// [`SessionStore`] persisting the session as TOML next to the config
/// file. The browser-storage analog for a native client.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes concurrent saves; reads go straight to disk.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store at the canonical session path.
    pub fn new() -> Self {
        Self::at(session_path())
    }

    /// Store at an explicit path (tests use a temp dir).
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(err: &dyn std::fmt::Display) -> CoreError {
        CoreError::SessionStore {
            message: err.to_string(),
        }
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<SessionState, CoreError> {
        if !self.path.exists() {
            debug!("no session file at {}, starting fresh", self.path.display());
            return Ok(SessionState::default());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| Self::io_err(&e))?;
        toml::from_str(&raw).map_err(|e| Self::io_err(&e))
    }

    fn save(&self, state: &SessionState) -> Result<(), CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Self::io_err(&e))?;
        }
        let toml_str = toml::to_string_pretty(state).map_err(|e| Self::io_err(&e))?;
        std::fs::write(&self.path, toml_str).map_err(|e| Self::io_err(&e))
    }

    fn clear(&self) -> Result<(), CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdeck_core::model::User;

    #[test]
    fn config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://localhost:3000");
        assert_eq!(cfg.api.timeout_secs, 30);
    }

    #[test]
    fn config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            api: ApiSettings {
                base_url: "https://fleet.example.com".into(),
                timeout_secs: 10,
            },
        };
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://fleet.example.com");
        assert_eq!(loaded.api.timeout_secs, 10);
    }

    #[test]
    fn session_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("session.toml"));

        assert_eq!(store.load().unwrap(), SessionState::default());

        let state = SessionState {
            token: Some("tok".into()),
            user: Some(User {
                id: "u-1".into(),
                email: "ops@example.com".into(),
                role: "admin".into(),
                name: None,
                is_active: true,
            }),
            preferences: None,
            integration_keys: fleetdeck_core::session::IntegrationKeys::default(),
        };
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), SessionState::default());
        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }
}
