//! Application configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Unset or unparsable values fall back
//! to defaults.

use std::path::PathBuf;

use crate::error::{Result, RoomifyError};

/// Default byte quota for the store, matching a typical browser storage area.
pub const DEFAULT_STORE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Top-level application configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding one sub-directory per namespace.
    pub data_dir: PathBuf,

    /// Namespace isolating this application instance's keys.
    pub namespace: String,

    /// Maximum bytes the store may hold (0 = unlimited).
    pub store_quota_bytes: usize,

    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            namespace: "roomify".to_string(),
            store_quota_bytes: DEFAULT_STORE_QUOTA_BYTES,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// | Variable                    | Default    |
    /// |-----------------------------|------------|
    /// | `ROOMIFY_DATA_DIR`          | `./data`   |
    /// | `ROOMIFY_NAMESPACE`         | `roomify`  |
    /// | `ROOMIFY_STORE_QUOTA_BYTES` | 5 MiB      |
    /// | `ROOMIFY_LOG_JSON`          | `false`    |
    ///
    /// # Errors
    ///
    /// Returns [`RoomifyError::InvalidRequest`] if `ROOMIFY_NAMESPACE` is
    /// set to something that cannot be used as a key prefix.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let data_dir = lookup("ROOMIFY_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let namespace = lookup("ROOMIFY_NAMESPACE").unwrap_or(defaults.namespace);
        validate_namespace(&namespace)?;

        let store_quota_bytes = parse_var(
            &lookup,
            "ROOMIFY_STORE_QUOTA_BYTES",
            defaults.store_quota_bytes,
        );
        let log_json = parse_var_bool(&lookup, "ROOMIFY_LOG_JSON", defaults.log_json);

        Ok(Self {
            data_dir,
            namespace,
            store_quota_bytes,
            log_json,
        })
    }

    /// Returns the directory the file store should use.
    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join(&self.namespace)
    }

    /// Returns the quota as an option, `None` meaning unlimited.
    #[must_use]
    pub const fn store_quota(&self) -> Option<usize> {
        match self.store_quota_bytes {
            0 => None,
            n => Some(n),
        }
    }
}

fn validate_namespace(namespace: &str) -> Result<()> {
    let valid = !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(RoomifyError::InvalidRequest(format!(
            "ROOMIFY_NAMESPACE {namespace:?} must be non-empty ASCII letters, digits, '-' or '_'"
        )))
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_var_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
