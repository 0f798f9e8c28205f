//! Application configuration.
//!
//! The configuration lives in `config.json` inside the data directory resolved
//! by [`DataStorage`]:
//! - **Windows**: `%LOCALAPPDATA%\lacodda\tasklane\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/tasklane/config.json`
//! - **Linux**: `~/.local/share/lacodda/tasklane/config.json`
//!
//! Every section is optional. Missing sections fall back to defaults, and the
//! `TASKLANE_HOST`, `TASKLANE_PORT`, `TASKLANE_DB` and `TASKLANE_API_URL`
//! environment variables (also read from `.env`) win over the file.
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 8080 },
//!   "database": { "path": "/var/lib/tasklane/tasklane.db" },
//!   "client": { "api_url": "http://tasks.local:8080" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_HOST: &str = "TASKLANE_HOST";
pub const ENV_PORT: &str = "TASKLANE_PORT";
pub const ENV_DB: &str = "TASKLANE_DB";
pub const ENV_API_URL: &str = "TASKLANE_API_URL";

/// A section the setup wizard offers.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Where the HTTP server listens.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// SQLite file location. Without a path the database sits next to the config.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Server the command-line client talks to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

impl Config {
    /// Reads `config.json`, or returns the defaults when there is none.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// The file configuration with environment overrides applied.
    pub fn load() -> Result<Config> {
        let mut config = Self::read()?;
        config.apply_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. Returns `false` when there was nothing to remove.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    /// Unparsable values are reported and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).filter(|value| !value.is_empty()) {
            self.server.get_or_insert_with(ServerConfig::default).host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(port) => self.server.get_or_insert_with(ServerConfig::default).port = port,
                Err(_) => msg_warning!(Message::InvalidEnvValue(ENV_PORT.to_string(), port)),
            }
        }
        if let Some(path) = lookup(ENV_DB).filter(|value| !value.is_empty()) {
            self.database.get_or_insert_with(DatabaseConfig::default).path = Some(PathBuf::from(path));
        }
        if let Some(api_url) = lookup(ENV_API_URL).filter(|value| !value.is_empty()) {
            self.client.get_or_insert_with(ClientConfig::default).api_url = api_url;
        }
    }

    /// `host:port` the server binds to.
    pub fn server_address(&self) -> String {
        let server = self.server.clone().unwrap_or_default();
        format!("{}:{}", server.host, server.port)
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match self.database.as_ref().and_then(|database| database.path.clone()) {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> String {
        let client = self.client.clone().unwrap_or_default();
        client.api_url.trim_end_matches('/').to_string()
    }

    /// Interactive setup. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: "Server".to_string(),
            },
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ConfigModule {
                key: "client".to_string(),
                name: "Client".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        host: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerHost.to_string())
                            .default(default.host)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerPort.to_string())
                            .default(default.port)
                            .interact_text()?,
                    });
                }
                "database" => {
                    let default = config.db_path()?;
                    msg_print!(Message::ConfigModuleDatabase);
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(default.to_string_lossy().into_owned())
                        .interact_text()?;
                    config.database = Some(DatabaseConfig {
                        path: Some(PathBuf::from(path)),
                    });
                }
                "client" => {
                    let default = config.client.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleClient);
                    config.client = Some(ClientConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptClientApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
