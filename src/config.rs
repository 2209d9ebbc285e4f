//! Page configuration.
//!
//! The server may embed a JSON block `<script type="application/json"
//! id="musicbot-config">` to override the element ids or defaults; every field is
//! optional.

use crate::error::Result;
use dioxus::logger::tracing::Level;
use serde::Deserialize;

/// Id of the JSON block holding the page configuration.
#[cfg(target_arch = "wasm32")]
pub const CONFIG_ELEMENT_ID: &str = "musicbot-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// The media element, or a container holding one
    pub player_id: String,
    /// Container of the `li > a` track entries
    pub playlist_id: String,
    /// Class toggled on the entry being played
    pub active_class: String,
    /// Volume percentage used when the URL has no `volume`
    pub default_volume: u32,
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            player_id: "player".to_string(),
            playlist_id: "playlist".to_string(),
            active_class: "active".to_string(),
            default_volume: 100,
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse the embedded JSON. An empty block means defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    /// Selector matching the track anchors.
    pub fn track_selector(&self) -> String {
        format!("#{} li a", self.playlist_id)
    }
}

/// Read the configuration block from the current document.
///
/// Runs before the logger exists, so a malformed block is returned to the caller
/// rather than logged here.
#[cfg(target_arch = "wasm32")]
pub fn load_page_config() -> Result<PageConfig> {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    PageConfig::from_json(&raw)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_page_config() -> Result<PageConfig> {
    Ok(PageConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;

    #[test]
    fn missing_block_gives_defaults() {
        let config = PageConfig::from_json("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.track_selector(), "#playlist li a");
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            PageConfig::from_json(r#"{"default_volume": 70, "log_level": "debug"}"#).unwrap();
        assert_eq!(config.default_volume, 70);
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.player_id, "player");
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = PageConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, PlayerError::Config(_)));
    }

    #[test]
    fn unknown_level_is_info() {
        let config = PageConfig {
            log_level: "chatty".into(),
            ..PageConfig::default()
        };
        assert_eq!(config.level(), Level::INFO);
    }
}
