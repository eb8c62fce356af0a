//! Server configuration read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `CONTACTS_BIND_ADDR` | `127.0.0.1:3000` |
//! | `CONTACTS_DB_PATH` | `contacts.sqlite3` (`:memory:` for a throwaway store) |
//! | `CONTACTS_LOG_LEVEL` | `debug` in debug builds, `info` in release |
//! | `CONTACTS_LOG_DIR` | `<cwd>/logs` |
//! | `CONTACTS_SEED_DEMO` | `false` |

use contacts_core::{default_log_level, DbLocation};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_BIND_ADDR: &str = "CONTACTS_BIND_ADDR";
pub const ENV_DB_PATH: &str = "CONTACTS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CONTACTS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CONTACTS_LOG_DIR";
pub const ENV_SEED_DEMO: &str = "CONTACTS_SEED_DEMO";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "contacts.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_location: DbLocation,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
    pub seed_demo: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                name,
                value,
                reason,
            } => write!(f, "invalid {name}=`{value}`: {reason}"),
            Self::CurrentDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|name| std::env::var(name).ok(), cwd)
    }

    /// Reads configuration through `lookup`; relative paths resolve under `cwd`.
    pub fn from_lookup<F>(lookup: F, cwd: PathBuf) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = env_string(&lookup, ENV_BIND_ADDR, DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidValue {
                name: ENV_BIND_ADDR,
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let db_location = DbLocation::parse(&env_string(&lookup, ENV_DB_PATH, DEFAULT_DB_PATH));
        let db_location = match db_location {
            DbLocation::File(path) if path.is_relative() => DbLocation::File(cwd.join(path)),
            other => other,
        };

        let log_dir = lookup(ENV_LOG_DIR)
            .map(|raw| PathBuf::from(raw.trim()))
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR_NAME));
        let log_dir = if log_dir.is_relative() {
            cwd.join(log_dir)
        } else {
            log_dir
        };

        Ok(Self {
            bind_addr,
            db_location,
            log_level: env_string(&lookup, ENV_LOG_LEVEL, default_log_level()),
            log_dir,
            seed_demo: env_bool(&lookup, ENV_SEED_DEMO, false)?,
        })
    }
}

fn env_string<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_bool<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            name,
            value: other.to_string(),
            reason: "expected true|false|1|0|yes|no".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, ENV_BIND_ADDR, ENV_DB_PATH, ENV_SEED_DEMO};
    use contacts_core::DbLocation;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned(), PathBuf::from("/srv/app"))
    }

    #[test]
    fn defaults_resolve_under_working_directory() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.db_location,
            DbLocation::File(PathBuf::from("/srv/app/contacts.sqlite3"))
        );
        assert_eq!(config.log_dir, PathBuf::from("/srv/app/logs"));
        assert!(!config.seed_demo);
    }

    #[test]
    fn memory_store_and_seed_flag_are_honored() {
        let config = config_from(&[(ENV_DB_PATH, ":memory:"), (ENV_SEED_DEMO, "yes")]).unwrap();
        assert_eq!(config.db_location, DbLocation::Memory);
        assert!(config.seed_demo);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config_from(&[(ENV_BIND_ADDR, "localhost")]).unwrap_err();
        assert!(err.to_string().contains(ENV_BIND_ADDR));

        let err = config_from(&[(ENV_SEED_DEMO, "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == ENV_SEED_DEMO));
    }
}
