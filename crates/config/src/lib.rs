//! Configuration loading and validation.
//!
//! Values are layered, lowest priority first:
//! 1. built-in defaults;
//! 2. a config file, either given explicitly or `pantry.{toml,yaml,yml,json}`
//!    in the platform config directory;
//! 3. `PANTRY_`-prefixed environment variables, with nested keys separated by
//!    `__` (e.g. `PANTRY_DATABASE__PATH`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use pantry_recipe::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "PANTRY_";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const FILE_STEM: &str = "pantry";
const FILE_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const DATABASE_FILE: &str = "pantry.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", FILE_STEM)
}

/// The first `pantry.*` config file found in the platform config directory.
pub fn default_config_file() -> Option<PathBuf> {
    let dirs = project_dirs()?;
    FILE_EXTENSIONS
        .iter()
        .map(|ext| dirs.config_dir().join(format!("{FILE_STEM}.{ext}")))
        .find(|path| path.is_file())
}

/// `pantry.db` in the platform data directory, or in the working directory
/// when no home directory is known.
pub fn default_database_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(DATABASE_FILE),
        None => PathBuf::from(DATABASE_FILE),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub log: LogConfig,
    /// The config file the values were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file, created if it doesn't exist.
    pub path: PathBuf,
    pub max_connections: u32,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, used when `RUST_LOG` isn't set.
    pub level: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string() }
    }
}

impl Config {
    /// Load and validate the configuration.
    ///
    /// An explicit file must exist. Without one, the platform config
    /// directory is searched and a missing file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::Missing(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_config_file(),
        };
        let mut config: Self = Self::figment(file.as_deref())?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        config.source = file;
        Ok(config)
    }

    /// The layered sources, before extraction.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match file {
            None => figment,
            Some(path) => match path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => exn::bail!(ErrorKind::Invalid(format!(
                    "unsupported config file format: {}",
                    path.display()
                ))),
            },
        };
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Reject values that parse but can't be used.
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            exn::bail!(ErrorKind::Invalid("database.max_connections must be at least 1".to_string()));
        }
        if self.database.path.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("database.path must not be empty".to_string()));
        }
        if self.log.level.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("log.level must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn loaded(explicit: Option<&Path>) -> figment::error::Result<Config> {
        Config::load(explicit).map_err(|err| format!("{err:?}").into())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(config.database.path.ends_with(DATABASE_FILE));
        assert_eq!(config.search.match_mode, MatchMode::Token);
        assert_eq!(config.log.level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn test_load_without_sources_is_defaults() {
        Jail::expect_with(|_jail| {
            let config: Config = Config::figment(None).unwrap().extract()?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "pantry.toml",
                r#"
                    [database]
                    path = "kitchen.db"

                    [search]
                    match_mode = "substring"
                "#,
            )?;
            let config = loaded(Some(Path::new("pantry.toml")))?;
            assert_eq!(config.source.as_deref(), Some(Path::new("pantry.toml")));
            assert_eq!(config.database.path, PathBuf::from("kitchen.db"));
            // Keys the file leaves out keep their defaults.
            assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
            assert_eq!(config.search.match_mode, MatchMode::Substring);
            Ok(())
        });
    }

    #[test]
    fn test_load_yaml_file_from_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pantry.yml");
        std::fs::write(&path, "database:\n  max_connections: 2\nlog:\n  level: debug\n").unwrap();
        Jail::expect_with(|_jail| {
            let config = loaded(Some(&path))?;
            assert_eq!(config.database.max_connections, 2);
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("pantry.json", r#"{ "database": { "path": "file.db", "max_connections": 2 } }"#)?;
            jail.set_env("PANTRY_DATABASE__MAX_CONNECTIONS", "3");
            jail.set_env("PANTRY_SEARCH__MATCH_MODE", "substring");
            let config = loaded(Some(Path::new("pantry.json")))?;
            assert_eq!(config.database.path, PathBuf::from("file.db"));
            assert_eq!(config.database.max_connections, 3);
            assert_eq!(config.search.match_mode, MatchMode::Substring);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("PANTRY_DATABASE__MAX_CONNECTIONS", "0");
            let err = Config::load(None).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid(message) if message.contains("max_connections")));
            Ok(())
        });
    }

    #[test]
    fn test_unparseable_value_is_load_error() {
        Jail::expect_with(|jail| {
            jail.set_env("PANTRY_SEARCH__MATCH_MODE", "fuzzy");
            let err = Config::load(None).unwrap_err();
            assert_eq!(*err, ErrorKind::Load);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Missing(PathBuf::from("missing.toml")));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_file_format() {
        Jail::expect_with(|jail| {
            jail.create_file("pantry.ini", "[database]\n")?;
            let err = Config::load(Some(Path::new("pantry.ini"))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid(message) if message.contains("pantry.ini")));
            Ok(())
        });
    }

    #[rstest]
    #[case(0, "pantry.db", "info")]
    #[case(5, "", "info")]
    #[case(5, "pantry.db", "  ")]
    fn test_validate(#[case] max_connections: u32, #[case] path: &str, #[case] level: &str) {
        let config = Config {
            database: DatabaseConfig { path: PathBuf::from(path), max_connections },
            log: LogConfig { level: level.to_string() },
            ..Config::default()
        };
        assert!(matches!(&*config.validate().unwrap_err(), ErrorKind::Invalid(_)));
    }
}
