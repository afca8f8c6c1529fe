//! Studio configuration supplied by the hosting page.
//!
//! Every field has a default, so `{}` is a valid configuration.
//!
//! ```
//! use emoticon_studio::StudioConfig;
//!
//! let config = StudioConfig::from_json(r#"{ "downloadSize": 256 }"#).unwrap();
//! assert_eq!(config.download_size, 256);
//! assert_eq!(config.composer_size, 240);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    /// Edge length of the square PNG produced for a library emoji.
    pub download_size: u32,

    /// Edge length of the square composer surface.
    pub composer_size: u32,

    pub toast_show_delay_ms: u64,
    pub toast_visible_ms: u64,

    pub emoji_copied_message: String,
    pub custom_copied_message: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            download_size: 512,
            composer_size: 240,
            toast_show_delay_ms: 10,
            toast_visible_ms: 2500,
            emoji_copied_message: "Emoji copied to clipboard".to_string(),
            custom_copied_message: "Custom emoji copied to clipboard".to_string(),
        }
    }
}

impl StudioConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn toast_show_delay(&self) -> Duration {
        Duration::from_millis(self.toast_show_delay_ms)
    }

    pub fn toast_visible_for(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }
}
