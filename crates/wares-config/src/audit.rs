//! Audit log configuration.

use serde::{Deserialize, Serialize};

fn default_log_path() -> String {
    "logs.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Path to the JSON audit document. Created on first access if absent.
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}
