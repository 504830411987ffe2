//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for item listings.
const fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size applied when a list request does not supply one.
    /// No upper bound is enforced on caller-supplied sizes.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}
