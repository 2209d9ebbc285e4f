use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::dom;
#[cfg(target_arch = "wasm32")]
use crate::error::Result;
#[cfg(target_arch = "wasm32")]
use crate::prefs::Preferences;
#[cfg(target_arch = "wasm32")]
use crate::query::QueryUrl;
#[cfg(target_arch = "wasm32")]
use crate::sync::{persist_change, rewrite_link, ControlChange, ControlState};
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{debug, warn};
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAnchorElement;

/// Preference sync - keeps the inputs and every outgoing link in step with the URL
#[component]
pub fn PreferenceSync() -> Element {
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        if let Err(err) = bind_preferences() {
            warn!("Preference sync disabled: {err}");
        }
    });

    rsx! {}
}

#[cfg(target_arch = "wasm32")]
fn bind_preferences() -> Result<()> {
    let page = dom::current_url()?;
    let prefs = Preferences::from_url(&page);
    dom::apply_controls(&ControlState::from_preferences(&prefs))?;

    for (control, input) in dom::control_inputs()? {
        let el = input.clone();
        dom::listen(&input, "change", false, move |_| {
            let change = if control.is_checkbox() {
                ControlChange::Toggled(control, el.checked())
            } else {
                ControlChange::Numeric(control, el.value())
            };
            if let Err(err) = persist(&change) {
                warn!("Ignoring {} change: {err}", control.dom_id());
            }
        })?;
    }

    // Capture phase, so the href is rewritten before the browser follows it.
    let doc = dom::document()?;
    for event in ["click", "contextmenu"] {
        let page = page.clone();
        dom::listen(&doc, event, true, move |evt| {
            if let Some(anchor) = dom::closest_anchor(&evt) {
                if let Err(err) = rewrite(&anchor, &page) {
                    warn!("Link left as is: {err}");
                }
            }
        })?;
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn persist(change: &ControlChange) -> Result<()> {
    let current = dom::current_url()?;
    match persist_change(&current, change)? {
        Some(next) => dom::navigate(&next),
        None => {
            debug!("{current} already reflects {change:?}");
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn rewrite(anchor: &HtmlAnchorElement, page: &QueryUrl) -> Result<()> {
    let controls = dom::read_controls()?;
    if let Some(next) = rewrite_link(&anchor.href(), &controls, page)? {
        anchor.set_href(&next.href());
    }
    Ok(())
}
