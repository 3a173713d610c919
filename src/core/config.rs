use crate::models::org::OrganizationState;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub organization: OrganizationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Keep the snapshot in memory only (nothing survives a restart)
    #[serde(default)]
    pub in_memory: bool,
}

/// Overrides applied to the seed data on first run
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    #[serde(default = "default_org_name")]
    pub org_name: String,
    #[serde(default = "default_seed_credits")]
    pub seed_credits: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            in_memory: false,
        }
    }
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            org_name: default_org_name(),
            seed_credits: default_seed_credits(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_org_name() -> String {
    "Default Corp".to_string()
}

fn default_seed_credits() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl OrganizationConfig {
    /// Seed fixture with the configured name and balance
    pub fn seed_state(&self) -> OrganizationState {
        OrganizationState {
            org_name: self.org_name.clone(),
            credits: self.seed_credits,
            ..OrganizationState::seed()
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate storage config
        if !self.storage.in_memory && self.storage.data_dir.as_os_str().is_empty() {
            bail!("data_dir must not be empty");
        }

        // Validate organization config
        if self.organization.org_name.trim().is_empty() {
            bail!("org_name must not be empty");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml("[server]\nport = 8080\n").unwrap();

        assert_eq!(config.server.port, Some(8080));
        assert!(config.server.num_threads > 0);
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert!(!config.storage.in_memory);
        assert_eq!(config.organization.org_name, "Default Corp");
        assert_eq!(config.organization.seed_credits, 100);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_full_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
unix_socket = "/tmp/recepto.sock"
num_threads = 2

[storage]
data_dir = "/var/lib/recepto"

[organization]
org_name = "Acme"
seed_credits = 10

[logging]
level = "debug"
format = "console"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.port, None);
        assert_eq!(config.server.unix_socket, Some(PathBuf::from("/tmp/recepto.sock")));
        assert_eq!(config.server.num_threads, 2);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/recepto"));
        assert_eq!(config.logging.format, "console");

        let seed = config.organization.seed_state();
        assert_eq!(seed.org_name, "Acme");
        assert_eq!(seed.credits, 10);
        assert_eq!(seed.leads.len(), 5);
    }

    #[test]
    fn test_missing_listener_rejected() {
        let err = Config::from_toml("[server]\nnum_threads = 1\n").unwrap_err();
        assert!(err.to_string().contains("port or unix_socket"));
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(Config::from_toml("[server]\nport = 0\n").is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let toml = "[server]\nport = 1\n[logging]\nlevel = \"loud\"\n";
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let toml = "[server]\nport = 1\n[logging]\nformat = \"xml\"\n";
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file(Path::new("/nonexistent/recepto.toml")).is_err());
    }
}
