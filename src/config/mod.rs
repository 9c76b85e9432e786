use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Failed to read config file '{path}': {source}")]
  Read {
    path: String,
    source: std::io::Error,
  },
  #[error("Failed to parse config file '{path}': {source}")]
  Parse {
    path: String,
    source: toml::de::Error,
  },
}

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log level, default is "info". `RUST_LOG` takes precedence.
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}

/// Medicine store configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// HTTP listening address
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Path of the JSON medicine document
  #[serde(default = "default_data_path")]
  pub data_path: PathBuf,

  /// Seed `{"medicines": []}` at startup when the document is missing
  #[serde(default)]
  pub create_if_missing: bool,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,
}

fn default_server_addr() -> String {
  "0.0.0.0:8000".to_string()
}

fn default_data_path() -> PathBuf {
  PathBuf::from("data.json")
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      data_path: default_data_path(),
      create_if_missing: false,
      log: LogConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: &str) -> Result<Self, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_string(),
      source,
    })?;

    toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
      path: path.to_string(),
      source,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.server_addr, "0.0.0.0:8000");
    assert_eq!(config.data_path, PathBuf::from("data.json"));
    assert!(!config.create_if_missing);
    assert_eq!(config.log.level, "info");
  }

  #[test]
  fn test_full_config() {
    let config_str = r#"
server_addr = "127.0.0.1:9000"
data_path = "/var/lib/medstore/data.json"
create_if_missing = true

[log]
level = "debug"
"#;

    let config: Config = toml::from_str(config_str).unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:9000");
    assert_eq!(config.data_path, PathBuf::from("/var/lib/medstore/data.json"));
    assert!(config.create_if_missing);
    assert_eq!(config.log.level, "debug");
  }

  #[test]
  fn test_from_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(matches!(
      Config::from_file(missing.to_str().unwrap()),
      Err(ConfigError::Read { .. })
    ));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "server_addr = [").unwrap();
    assert!(matches!(
      Config::from_file(bad.to_str().unwrap()),
      Err(ConfigError::Parse { .. })
    ));
  }

  #[test]
  fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medstore.toml");
    fs::write(&path, "data_path = \"meds.json\"\n").unwrap();

    let config = Config::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config.data_path, PathBuf::from("meds.json"));
    assert_eq!(config.server_addr, "0.0.0.0:8000");
  }
}
