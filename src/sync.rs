//! Two-way binding between the preference controls and the page URL.
//!
//! Changing a control rebuilds the current URL and the page reloads with it, and every
//! link followed from the page carries the active preferences along.

use crate::error::{PlayerError, Result};
use crate::prefs::{PreferenceKey, Preferences, LIVE_KEYWORD, MAX_VOLUME};
use crate::query::QueryUrl;
use dioxus::logger::tracing::debug;

/// Value written for a checked boolean preference.
const FLAG_VALUE: &str = "1";

/// The form controls bound to query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Shuffle,
    Loop,
    Autoplay,
    Lives,
    Limit,
    Volume,
}

impl Control {
    pub const CHECKBOXES: [Control; 4] = [
        Control::Shuffle,
        Control::Loop,
        Control::Autoplay,
        Control::Lives,
    ];
    pub const NUMERIC: [Control; 2] = [Control::Limit, Control::Volume];

    pub fn dom_id(self) -> &'static str {
        match self {
            Control::Shuffle => "shuffle",
            Control::Loop => "loop",
            Control::Autoplay => "autoplay",
            Control::Lives => "lives",
            Control::Limit => "limit",
            Control::Volume => "volume",
        }
    }

    pub fn key(self) -> PreferenceKey {
        match self {
            Control::Shuffle => PreferenceKey::Shuffle,
            Control::Loop => PreferenceKey::Loop,
            Control::Autoplay => PreferenceKey::Autoplay,
            Control::Lives => PreferenceKey::NoKeywords,
            Control::Limit => PreferenceKey::Limit,
            Control::Volume => PreferenceKey::Volume,
        }
    }

    pub fn is_checkbox(self) -> bool {
        Self::CHECKBOXES.contains(&self)
    }
}

/// Snapshot of the bound controls as the page currently shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub shuffle: bool,
    pub loop_enabled: bool,
    pub autoplay: bool,
    pub lives: bool,
    /// Raw input text, `None` when the input is left untouched.
    pub limit: Option<String>,
    pub volume: Option<String>,
}

impl ControlState {
    /// What the controls should show for a freshly loaded page.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            shuffle: prefs.shuffle,
            loop_enabled: prefs.loop_enabled,
            autoplay: prefs.autoplay,
            lives: prefs.excludes_live(),
            limit: prefs.limit_input.clone(),
            volume: prefs.volume_input.clone(),
        }
    }

    pub fn checked(&self, control: Control) -> bool {
        match control {
            Control::Shuffle => self.shuffle,
            Control::Loop => self.loop_enabled,
            Control::Autoplay => self.autoplay,
            Control::Lives => self.lives,
            Control::Limit | Control::Volume => false,
        }
    }

    pub fn value(&self, control: Control) -> Option<&str> {
        match control {
            Control::Limit => self.limit.as_deref(),
            Control::Volume => self.volume.as_deref(),
            _ => None,
        }
    }
}

/// A change event coming from one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChange {
    Toggled(Control, bool),
    Numeric(Control, String),
}

/// Resolve a numeric control value. `None` is the "no value" sentinel: an empty input
/// or anything numerically equal to zero.
pub fn numeric_value(control: Control, raw: &str) -> Result<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw
        .parse::<u32>()
        .map_err(|_| PlayerError::InvalidNumber {
            key: control.key().as_str(),
            value: raw.to_string(),
        })?;
    if value == 0 {
        return Ok(None);
    }
    Ok(Some(match control {
        Control::Volume => value.min(MAX_VOLUME),
        _ => value,
    }))
}

/// Compute the URL to navigate to after a control changed, or `None` when the URL
/// already reflects the change.
pub fn persist_change(current: &QueryUrl, change: &ControlChange) -> Result<Option<QueryUrl>> {
    let mut next = current.clone();
    match change {
        ControlChange::Toggled(Control::Lives, checked) => {
            let key = PreferenceKey::NoKeywords.as_str();
            if *checked {
                if current.values(key).iter().any(|v| v == LIVE_KEYWORD) {
                    return Ok(None);
                }
                next.append(key, LIVE_KEYWORD);
            } else {
                next.remove_value(key, LIVE_KEYWORD);
            }
        }
        ControlChange::Toggled(control, checked) => {
            let key = control.key().as_str();
            if *checked {
                next.set(key, FLAG_VALUE);
            } else {
                next.remove(key);
            }
        }
        ControlChange::Numeric(control, raw) => {
            let key = control.key().as_str();
            match numeric_value(*control, raw)? {
                Some(value) => {
                    let value = value.to_string();
                    if current.first(key).as_deref() == Some(value.as_str()) {
                        return Ok(None);
                    }
                    next.set(key, &value);
                }
                None => next.remove(key),
            }
        }
    }

    if next.pairs() == current.pairs() {
        debug!("Control change {change:?} leaves {current} untouched");
        return Ok(None);
    }
    Ok(Some(next))
}

/// Carry the active preferences onto a link target.
///
/// `page` is the URL of the page holding the link. Returns `None` for targets that are
/// not web pages (mailto:, javascript: and the like).
pub fn rewrite_link(
    href: &str,
    controls: &ControlState,
    page: &QueryUrl,
) -> Result<Option<QueryUrl>> {
    let mut next = QueryUrl::parse(href)?;
    if !matches!(next.scheme(), "http" | "https") {
        return Ok(None);
    }

    for control in [Control::Shuffle, Control::Autoplay] {
        if controls.checked(control) {
            next.set(control.key().as_str(), FLAG_VALUE);
        }
    }

    for control in Control::NUMERIC {
        let key = control.key().as_str();
        let Some(raw) = controls.value(control) else {
            continue;
        };
        let on_page = page.first(key).is_some_and(|v| !v.is_empty());
        match numeric_value(control, raw)? {
            Some(value) if on_page => next.set(key, &value.to_string()),
            Some(_) => {}
            // An explicit zero clears the key; an empty input only does when the
            // page itself carries it.
            None if on_page || !raw.trim().is_empty() => next.remove(key),
            None => {}
        }
    }

    Ok(Some(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(href: &str) -> QueryUrl {
        QueryUrl::parse(href).unwrap()
    }

    #[test]
    fn controls_follow_flag_presence() {
        let state = ControlState::from_preferences(&Preferences::from_query(
            "shuffle=1&autoplay=1&no_keywords=live&limit=25",
        ));
        assert!(state.checked(Control::Shuffle));
        assert!(!state.checked(Control::Loop));
        assert!(state.checked(Control::Autoplay));
        assert!(state.checked(Control::Lives));
        assert_eq!(state.value(Control::Limit), Some("25"));
        assert_eq!(state.value(Control::Volume), None);

        let state = ControlState::from_preferences(&Preferences::default());
        for control in Control::CHECKBOXES {
            assert!(!state.checked(control), "{control:?} should start unchecked");
        }
    }

    #[test]
    fn zero_in_url_is_still_written_to_the_input() {
        let state = ControlState::from_preferences(&Preferences::from_query("limit=0"));
        assert_eq!(state.value(Control::Limit), Some("0"));
    }

    #[test]
    fn checking_and_unchecking_a_flag() {
        let page = url("http://host/collection/player?limit=10");
        let next = persist_change(&page, &ControlChange::Toggled(Control::Loop, true))
            .unwrap()
            .unwrap();
        assert_eq!(next.href(), "http://host/collection/player?limit=10&loop=1");

        let back = persist_change(&next, &ControlChange::Toggled(Control::Loop, false))
            .unwrap()
            .unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn lives_checkbox_edits_only_the_live_keyword() {
        let page = url("http://host/player?no_keywords=demo");
        let next = persist_change(&page, &ControlChange::Toggled(Control::Lives, true))
            .unwrap()
            .unwrap();
        assert_eq!(next.values("no_keywords"), vec!["demo", "live"]);

        let back = persist_change(&next, &ControlChange::Toggled(Control::Lives, false))
            .unwrap()
            .unwrap();
        assert_eq!(back.values("no_keywords"), vec!["demo"]);
    }

    #[test]
    fn numeric_zero_removes_parameter() {
        let page = url("http://host/player?shuffle=1&limit=25");
        for zero in ["0", "00", " 0 ", ""] {
            let next = persist_change(
                &page,
                &ControlChange::Numeric(Control::Limit, zero.to_string()),
            )
            .unwrap()
            .unwrap();
            assert!(!next.has("limit"), "{zero:?} should clear limit");
            assert!(next.has("shuffle"));
        }
    }

    #[test]
    fn numeric_zero_without_parameter_is_noop() {
        let page = url("http://host/player?shuffle=1");
        let next =
            persist_change(&page, &ControlChange::Numeric(Control::Volume, "0".into())).unwrap();
        assert!(next.is_none());
    }

    #[test]
    fn numeric_value_set_once() {
        let page = url("http://host/player");
        let change = ControlChange::Numeric(Control::Limit, "40".into());
        let next = persist_change(&page, &change).unwrap().unwrap();
        assert_eq!(next.first("limit").as_deref(), Some("40"));
        assert_eq!(next.values("limit").len(), 1);

        // Same value again: nothing to navigate to.
        assert!(persist_change(&next, &change).unwrap().is_none());
    }

    #[test]
    fn malformed_numeric_is_rejected() {
        let page = url("http://host/player");
        let err = persist_change(&page, &ControlChange::Numeric(Control::Limit, "ten".into()))
            .unwrap_err();
        assert!(matches!(err, PlayerError::InvalidNumber { key: "limit", .. }));
    }

    #[test]
    fn volume_above_hundred_is_clamped() {
        let page = url("http://host/player");
        let next = persist_change(&page, &ControlChange::Numeric(Control::Volume, "180".into()))
            .unwrap()
            .unwrap();
        assert_eq!(next.first("volume").as_deref(), Some("100"));
    }

    #[test]
    fn link_carries_shuffle_and_limit() {
        let page = url("http://host/collection/player?shuffle=1&limit=10");
        let controls = ControlState {
            shuffle: true,
            limit: Some("25".into()),
            ..ControlState::default()
        };
        let next = rewrite_link("http://host/collection/musics?artists=Buckethead", &controls, &page)
            .unwrap()
            .unwrap();
        assert_eq!(next.first("shuffle").as_deref(), Some("1"));
        assert_eq!(next.first("limit").as_deref(), Some("25"));
        assert_eq!(next.first("artists").as_deref(), Some("Buckethead"));
        assert!(!next.has("autoplay"));
    }

    #[test]
    fn link_omits_limit_at_sentinel() {
        let page = url("http://host/collection/player?shuffle=1&limit=25");
        let controls = ControlState {
            shuffle: true,
            limit: Some("0".into()),
            ..ControlState::default()
        };
        let next = rewrite_link("http://host/collection/m3u?limit=25", &controls, &page)
            .unwrap()
            .unwrap();
        assert!(!next.has("limit"));
        assert!(next.has("shuffle"));
    }

    #[test]
    fn empty_limit_keeps_link_limit_when_page_has_none() {
        let page = url("http://host/collection/musics");
        let controls = ControlState {
            limit: Some(String::new()),
            ..ControlState::default()
        };
        let next = rewrite_link("http://host/collection/player?limit=10", &controls, &page)
            .unwrap()
            .unwrap();
        assert_eq!(next.first("limit").as_deref(), Some("10"));
    }

    #[test]
    fn unchecking_absent_flag_with_odd_encoding_is_noop() {
        let page = url("http://host/player?lives&artists=Pink%20Floyd");
        for change in [
            ControlChange::Toggled(Control::Lives, false),
            ControlChange::Toggled(Control::Loop, false),
        ] {
            assert!(persist_change(&page, &change).unwrap().is_none());
        }
    }

    #[test]
    fn rechecking_present_flag_is_noop() {
        let page = url("http://host/player?artists=Pink%20Floyd&shuffle=1");
        let change = ControlChange::Toggled(Control::Shuffle, true);
        assert!(persist_change(&page, &change).unwrap().is_none());
    }

    #[test]
    fn link_ignores_numeric_absent_from_page() {
        let page = url("http://host/collection/player");
        let controls = ControlState {
            volume: Some("30".into()),
            ..ControlState::default()
        };
        let next = rewrite_link("http://host/collection/albums", &controls, &page)
            .unwrap()
            .unwrap();
        assert!(!next.has("volume"));
    }

    #[test]
    fn link_does_not_carry_loop_or_keywords() {
        let page = url("http://host/player?loop=1&no_keywords=live");
        let controls = ControlState {
            loop_enabled: true,
            lives: true,
            ..ControlState::default()
        };
        let next = rewrite_link("http://host/genres", &controls, &page)
            .unwrap()
            .unwrap();
        assert_eq!(next.href(), "http://host/genres");
    }

    #[test]
    fn non_web_links_are_left_alone() {
        let controls = ControlState {
            shuffle: true,
            ..ControlState::default()
        };
        let page = url("http://host/player");
        assert!(rewrite_link("mailto:me@example.com", &controls, &page)
            .unwrap()
            .is_none());
    }
}
