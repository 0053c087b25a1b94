use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys every configuration file is expected to carry.
const KNOWN_FIELDS: [&str; 5] = [
    "database",
    "default_shift",
    "history_limit",
    "hours_precision",
    "separator_char",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_shift")]
    pub default_shift: String,
    /// Attendance records pulled for the detail view.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Decimals when printing hours.
    #[serde(default = "default_hours_precision")]
    pub hours_precision: usize,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_shift() -> String {
    "morning".to_string()
}
fn default_history_limit() -> usize {
    50
}
fn default_hours_precision() -> usize {
    1
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db: PathBuf) -> Self {
        Self {
            database: db.to_string_lossy().to_string(),
            default_shift: default_shift(),
            history_limit: default_history_limit(),
            hours_precision: default_hours_precision(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("janitrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".janitrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("janitrack.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("janitrack.sqlite")
    }

    /// `--db` value: `~` expanded, relative names placed in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Fields absent from the YAML text (they fall back to defaults).
    pub fn missing_fields(yaml: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| AppError::Config(e.to_string()))?;

        let Some(map) = value.as_mapping() else {
            return Ok(KNOWN_FIELDS.to_vec());
        };

        Ok(KNOWN_FIELDS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        let config = Config::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        // Create empty DB file if not exists
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {:?}", db_path));

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.default_shift, "morning");
        assert_eq!(cfg.history_limit, 50);
        assert_eq!(cfg.hours_precision, 1);
        assert_eq!(cfg.separator_char, "-");
    }

    #[test]
    fn missing_fields_are_reported() {
        let missing =
            Config::missing_fields("database: /tmp/x.sqlite\nhistory_limit: 20\n").unwrap();
        assert_eq!(
            missing,
            vec!["default_shift", "hours_precision", "separator_char"]
        );
    }

    #[test]
    fn absolute_db_override_is_kept_verbatim() {
        let abs = std::env::temp_dir().join("janitrack_override.sqlite");
        assert_eq!(Config::resolve_db_path(abs.to_str().unwrap()), abs);
        assert_eq!(
            Config::resolve_db_path("custom.sqlite"),
            Config::config_dir().join("custom.sqlite")
        );
    }

    #[test]
    fn absent_file_yields_default_config() {
        let path = std::env::temp_dir().join("janitrack_no_such_config.conf");
        let _ = fs::remove_file(&path);
        let cfg = Config::load_from(&path).unwrap();
        assert!(cfg.database.ends_with("janitrack.sqlite"));
    }
}
