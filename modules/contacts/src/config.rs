use serde::{Deserialize, Serialize};

/// Configuration for the contacts module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactsConfig {
    /// Show an info notice after a successful add, update or delete.
    #[serde(default = "default_show_success_notices")]
    pub show_success_notices: bool,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            show_success_notices: default_show_success_notices(),
        }
    }
}

impl ContactsConfig {
    /// Build from the raw `contacts` section of the application config.
    /// A missing (null) section yields the defaults.
    pub fn from_value(value: &serde_json::Value) -> anyhow::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }
}

fn default_show_success_notices() -> bool {
    true
}
