/// Server configuration loaded from a JSON file
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Bearer token table: token -> identity. Tokens are opaque; role
    /// assignments live in each identity's metadata bag.
    #[serde(default)]
    pub api_tokens: HashMap<String, TokenIdentity>,
}

/// Identity behind one configured API token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub user_id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_path() -> String {
    "routine.db".to_string()
}

impl ServerConfig {
    /// Loads configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` - Parsed configuration
    /// * `Err` - If the file doesn't exist or can't be parsed
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Creates a configuration with defaults and no API tokens
    pub fn empty() -> Self {
        ServerConfig {
            address: default_address(),
            port: default_port(),
            db_path: default_db_path(),
            api_tokens: HashMap::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{ "port": 9090 }"#).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.db_path, "routine.db");
        assert!(config.api_tokens.is_empty());
    }

    #[test]
    fn test_token_table_parses_metadata() {
        let config: ServerConfig = serde_json::from_str(
            r#"{
                "api_tokens": {
                    "tok": { "user_id": "admin", "metadata": { "role": "admin" } }
                }
            }"#,
        )
        .unwrap();
        let identity = &config.api_tokens["tok"];
        assert_eq!(identity.user_id, "admin");
        assert_eq!(identity.metadata["role"], "admin");
    }
}
