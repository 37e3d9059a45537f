use std::env::vars;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use serde::Deserialize;

use crate::table::DEFAULT_NOTIFICATION_TTL;

/// Folder name used beneath the user's home directory for the log file.
const DATA_DIR_NAME: &str = ".employee-table";
const LOG_FILE_NAME: &str = "employee-table.log";

/// Prefix shared by every variable this application reads.
pub const ENV_PREFIX: &str = "EMPLOYEE_TABLE_";

/// Start-up settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long a notification stays visible.
    pub notification_ttl: Duration,
    /// File that receives the `tracing` output.
    pub log_path: PathBuf,
    /// `EnvFilter` directive, e.g. `info` or `employee_table=debug`.
    pub log_filter: String,
    /// Problems found while reading the environment. They are logged once
    /// logging is up, since the terminal belongs to the UI by then.
    pub warnings: Vec<String>,
}

// Variables as they arrive, with the `EMPLOYEE_TABLE_` prefix stripped. The
// lifetime stays a string so a malformed value can fall back to the default
// instead of failing start-up.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    notify_ms: Option<String>,
    log_path: Option<String>,
    log_level: Option<String>,
}

impl Config {
    /// Read `EMPLOYEE_TABLE_NOTIFY_MS`, `EMPLOYEE_TABLE_LOG_PATH` and
    /// `EMPLOYEE_TABLE_LOG_LEVEL` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(vars())
    }

    /// Build the configuration from any set of `(name, value)` pairs. Names
    /// without the application prefix are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let name = key.as_ref().strip_prefix(ENV_PREFIX)?;
                Some((name.to_string(), value.as_ref().to_string()))
            })
            .collect();
        let raw: RawConfig = serde_env::from_iter(scoped)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let RawConfig {
            notify_ms,
            log_path,
            log_level,
        } = raw;
        let mut warnings = Vec::new();

        let notification_ttl = match notify_ms {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    warnings.push(format!(
                        "{ENV_PREFIX}NOTIFY_MS={raw:?} is not a positive integer; using {:?}",
                        DEFAULT_NOTIFICATION_TTL
                    ));
                    DEFAULT_NOTIFICATION_TTL
                }
            },
            None => DEFAULT_NOTIFICATION_TTL,
        };

        let log_path = match log_path.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => PathBuf::from(raw),
            None => default_log_path()?,
        };

        let log_filter = log_level
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            notification_ttl,
            log_path,
            log_filter,
            warnings,
        })
    }
}

/// Resolve the default log location inside the user's home.
fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn raw_config_reads_unprefixed_names() {
        let raw: RawConfig = from_iter(vec![("NOTIFY_MS", "1500"), ("LOG_LEVEL", "debug")])
            .expect("RawConfig should deserialize");
        assert_eq!(raw.notify_ms.as_deref(), Some("1500"));
        assert_eq!(raw.log_level.as_deref(), Some("debug"));
        assert!(raw.log_path.is_none());
    }

    #[test]
    fn explicit_values_are_used() {
        let config = Config::from_vars(vec![
            ("EMPLOYEE_TABLE_NOTIFY_MS", "1500"),
            ("EMPLOYEE_TABLE_LOG_PATH", "/tmp/table.log"),
            ("EMPLOYEE_TABLE_LOG_LEVEL", "debug"),
            ("HOME", "/ignored"),
        ])
        .expect("config should build");
        assert_eq!(config.notification_ttl, Duration::from_millis(1500));
        assert_eq!(config.log_path, PathBuf::from("/tmp/table.log"));
        assert_eq!(config.log_filter, "debug");
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn bad_lifetime_falls_back_with_warning() {
        let raw: RawConfig = from_iter(vec![("NOTIFY_MS", "soon"), ("LOG_PATH", "/tmp/t.log")])
            .expect("RawConfig should deserialize");
        let config = Config::from_raw(raw).expect("config should build");
        assert_eq!(config.notification_ttl, DEFAULT_NOTIFICATION_TTL);
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].contains("NOTIFY_MS"));

        let raw: RawConfig = from_iter(vec![("NOTIFY_MS", "0"), ("LOG_PATH", "/tmp/t.log")])
            .expect("RawConfig should deserialize");
        let config = Config::from_raw(raw).expect("config should build");
        assert_eq!(config.notification_ttl, DEFAULT_NOTIFICATION_TTL);
    }

    #[test]
    fn log_level_defaults_to_info() {
        let raw: RawConfig =
            from_iter(vec![("LOG_PATH", "/tmp/t.log")]).expect("RawConfig should deserialize");
        let config = Config::from_raw(raw).expect("config should build");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.notification_ttl, Duration::from_millis(3000));
    }
}
