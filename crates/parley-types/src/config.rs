//! Server configuration for Parley.
//!
//! `ServerConfig` represents the optional TOML config file. Every field
//! has a default so an absent or empty file yields a working server.
//! CLI flags override file values in the application layer.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Parley server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host used when rendering shared coordinates into a maps URL.
    #[serde(default = "default_maps_host")]
    pub maps_host: String,

    /// Words rejected by the built-in profanity filter.
    #[serde(default = "default_blocked_words")]
    pub blocked_words: Vec<String>,

    /// Directory of client assets to serve at `/`. Skipped if absent.
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_maps_host() -> String {
    "google.com".to_string()
}

fn default_blocked_words() -> Vec<String> {
    ["damn", "hell", "crap"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            maps_host: default_maps_host(),
            blocked_words: default_blocked_words(),
            static_dir: None,
        }
    }
}
