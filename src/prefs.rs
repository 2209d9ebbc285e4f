//! Playback preferences carried in the page's query string.

use crate::query::QueryUrl;
use dioxus::logger::tracing::{debug, warn};
use std::collections::BTreeSet;

/// Keyword whose exclusion is surfaced as the `#lives` checkbox.
pub const LIVE_KEYWORD: &str = "live";

/// Highest value accepted for `volume`.
pub const MAX_VOLUME: u32 = 100;

/// The query keys the player pages understand. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Shuffle,
    Loop,
    Autoplay,
    NoKeywords,
    Limit,
    Volume,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::Shuffle => "shuffle",
            PreferenceKey::Loop => "loop",
            PreferenceKey::Autoplay => "autoplay",
            PreferenceKey::NoKeywords => "no_keywords",
            PreferenceKey::Limit => "limit",
            PreferenceKey::Volume => "volume",
        }
    }
}

/// Preference Set parsed from a URL. Absent keys mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub shuffle: bool,
    pub loop_enabled: bool,
    pub autoplay: bool,
    pub no_keywords: BTreeSet<String>,
    pub limit: Option<u32>,
    pub volume: Option<u32>,
    /// `limit` and `volume` exactly as written in the URL, for the inputs
    pub limit_input: Option<String>,
    pub volume_input: Option<String>,
}

impl Preferences {
    pub fn from_url(url: &QueryUrl) -> Self {
        let mut prefs = Self {
            shuffle: url.has(PreferenceKey::Shuffle.as_str()),
            loop_enabled: url.has(PreferenceKey::Loop.as_str()),
            autoplay: url.has(PreferenceKey::Autoplay.as_str()),
            ..Self::default()
        };

        prefs.no_keywords = url
            .values(PreferenceKey::NoKeywords.as_str())
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect();

        prefs.limit_input = raw(url, PreferenceKey::Limit);
        prefs.volume_input = raw(url, PreferenceKey::Volume);
        prefs.limit = numeric(url, PreferenceKey::Limit).filter(|limit| *limit > 0);
        prefs.volume = numeric(url, PreferenceKey::Volume).map(|volume| volume.min(MAX_VOLUME));

        debug!("Resolved preferences from {url}: {prefs:?}");
        prefs
    }

    /// Parse just a query string such as `shuffle=1&limit=10` (leading `?` allowed).
    #[cfg(test)]
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        match QueryUrl::parse(&format!("http://localhost/?{query}")) {
            Ok(url) => Self::from_url(&url),
            Err(err) => {
                warn!("Ignoring unparsable query {query:?}: {err}");
                Self::default()
            }
        }
    }

    pub fn excludes_live(&self) -> bool {
        self.no_keywords.contains(LIVE_KEYWORD)
    }

    /// Volume for a media element, 0.0 to 1.0.
    pub fn volume_ratio_or(&self, default_percent: u32) -> f64 {
        f64::from(self.volume.unwrap_or(default_percent).min(MAX_VOLUME)) / 100.0
    }
}

fn raw(url: &QueryUrl, key: PreferenceKey) -> Option<String> {
    url.first(key.as_str())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn numeric(url: &QueryUrl, key: PreferenceKey) -> Option<u32> {
    let raw = raw(url, key)?;
    match raw.parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring malformed {}={raw:?}", key.as_str());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_all_defaults() {
        let prefs = Preferences::from_query("");
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.volume_ratio_or(MAX_VOLUME), 1.0);
    }

    #[test]
    fn flags_are_set_by_presence() {
        let prefs = Preferences::from_query("?shuffle=1&loop&autoplay=0");
        assert!(prefs.shuffle);
        assert!(prefs.loop_enabled);
        assert!(prefs.autoplay);
    }

    #[test]
    fn volume_fifty_is_half() {
        let prefs = Preferences::from_query("volume=50");
        assert_eq!(prefs.volume, Some(50));
        assert_eq!(prefs.volume_ratio_or(MAX_VOLUME), 0.5);
    }

    #[test]
    fn volume_is_clamped() {
        let prefs = Preferences::from_query("volume=250");
        assert_eq!(prefs.volume_ratio_or(MAX_VOLUME), 1.0);
    }

    #[test]
    fn malformed_numbers_fall_back_to_default() {
        let prefs = Preferences::from_query("limit=abc&volume=");
        assert_eq!(prefs.limit, None);
        assert_eq!(prefs.volume, None);
        assert_eq!(prefs.volume_ratio_or(MAX_VOLUME), 1.0);
    }

    #[test]
    fn zero_limit_means_no_limit() {
        assert_eq!(Preferences::from_query("limit=0").limit, None);
        assert_eq!(Preferences::from_query("limit=25").limit, Some(25));
    }

    #[test]
    fn live_exclusion_from_any_keyword_value() {
        let prefs = Preferences::from_query("no_keywords=demo&no_keywords=live,intro");
        assert!(prefs.excludes_live());
        assert_eq!(prefs.no_keywords.len(), 3);

        let prefs = Preferences::from_query("no_keywords=lively");
        assert!(!prefs.excludes_live());
    }

    #[test]
    fn raw_numeric_values_are_kept_for_inputs() {
        let prefs = Preferences::from_query("limit=0&volume=%2040%20");
        assert_eq!(prefs.limit, None);
        assert_eq!(prefs.limit_input.as_deref(), Some("0"));
        assert_eq!(prefs.volume_input.as_deref(), Some("40"));

        let prefs = Preferences::from_query("limit=");
        assert_eq!(prefs.limit_input, None);
    }
}
