//! Configuration for apps service module

use serde::{Deserialize, Serialize};

/// Apps service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path prefix the REST routes are nested under
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

fn default_base_path() -> String {
    "/dify".to_string()
}
