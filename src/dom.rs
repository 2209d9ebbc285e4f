//! Browser bindings for the player page: the media element, the playlist entries,
//! the preference inputs and navigation.

use crate::config::PageConfig;
use crate::error::{PlayerError, Result};
use crate::player::{MediaElement, PageSurface, Playlist, Track};
use crate::query::QueryUrl;
use crate::sync::{Control, ControlState};
use dioxus::logger::tracing::{info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlInputElement,
    HtmlMediaElement,
};

fn dom_err(err: JsValue) -> PlayerError {
    PlayerError::Dom(format!("{err:?}"))
}

pub fn document() -> Result<Document> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| PlayerError::MissingElement("document".to_string()))
}

pub fn current_href() -> Result<String> {
    let win = window().ok_or_else(|| PlayerError::MissingElement("window".to_string()))?;
    win.location().href().map_err(dom_err)
}

pub fn current_url() -> Result<QueryUrl> {
    QueryUrl::parse(&current_href()?)
}

/// Full page load of `url`.
pub fn navigate(url: &QueryUrl) -> Result<()> {
    let win = window().ok_or_else(|| PlayerError::MissingElement("window".to_string()))?;
    info!("Navigating to {url}");
    win.location().set_href(&url.href()).map_err(dom_err)
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, capture: bool, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback_and_bool(
            event,
            closure.as_ref().unchecked_ref(),
            capture,
        )
        .map_err(dom_err)?;
    closure.forget();
    Ok(())
}

/// The page's media element: `#player` itself, or the first `audio` inside it.
pub fn find_media(config: &PageConfig) -> Result<HtmlMediaElement> {
    let doc = document()?;
    let container = doc
        .get_element_by_id(&config.player_id)
        .ok_or_else(|| PlayerError::MissingElement(format!("#{}", config.player_id)))?;
    if let Some(media) = container.dyn_ref::<HtmlMediaElement>() {
        return Ok(media.clone());
    }
    container
        .query_selector("audio")
        .map_err(dom_err)?
        .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
        .ok_or_else(|| PlayerError::MissingElement(format!("#{} audio", config.player_id)))
}

/// Track anchors of the playlist, in page order.
pub fn track_anchors(config: &PageConfig) -> Result<Vec<HtmlAnchorElement>> {
    let nodes = document()?
        .query_selector_all(&config.track_selector())
        .map_err(dom_err)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlAnchorElement>().ok())
        .collect())
}

/// Build the playlist from the anchors. The raw `href` attribute is kept so relative
/// sources resolve against the page the same way the markup does.
pub fn harvest_playlist(anchors: &[HtmlAnchorElement]) -> Playlist {
    anchors
        .iter()
        .map(|anchor| {
            let src = anchor.get_attribute("href").unwrap_or_default();
            let label = anchor.text_content().unwrap_or_default().trim().to_string();
            Track::new(label, src)
        })
        .collect()
}

fn input(doc: &Document, control: Control) -> Option<HtmlInputElement> {
    doc.get_element_by_id(control.dom_id())?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Every bound input that exists on this page.
pub fn control_inputs() -> Result<Vec<(Control, HtmlInputElement)>> {
    let doc = document()?;
    Ok(Control::CHECKBOXES
        .into_iter()
        .chain(Control::NUMERIC)
        .filter_map(|control| input(&doc, control).map(|el| (control, el)))
        .collect())
}

/// Read what the inputs currently show. Missing inputs count as unchecked / empty.
pub fn read_controls() -> Result<ControlState> {
    let doc = document()?;
    let checked = |control| input(&doc, control).is_some_and(|el| el.checked());
    let value = |control| input(&doc, control).map(|el| el.value());
    Ok(ControlState {
        shuffle: checked(Control::Shuffle),
        loop_enabled: checked(Control::Loop),
        autoplay: checked(Control::Autoplay),
        lives: checked(Control::Lives),
        limit: value(Control::Limit),
        volume: value(Control::Volume),
    })
}

/// Reflect the preferences into the inputs. Every checkbox is written, so boxes the
/// markup or form restore left checked are cleared; numeric inputs are only written
/// when a value is present.
pub fn apply_controls(state: &ControlState) -> Result<()> {
    let doc = document()?;
    for control in Control::CHECKBOXES {
        if let Some(el) = input(&doc, control) {
            el.set_checked(state.checked(control));
        }
    }
    for control in Control::NUMERIC {
        if let (Some(value), Some(el)) = (state.value(control), input(&doc, control)) {
            el.set_value(value);
        }
    }
    Ok(())
}

/// The closest anchor around an event target, if the event happened inside one.
pub fn closest_anchor(event: &Event) -> Option<HtmlAnchorElement> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target
        .closest("a")
        .ok()
        .flatten()?
        .dyn_into::<HtmlAnchorElement>()
        .ok()
}

/// `MediaElement` over the page's audio element.
pub struct AudioElement(pub HtmlMediaElement);

impl MediaElement for AudioElement {
    fn set_src(&self, src: &str) {
        self.0.set_src(src);
    }

    fn load(&self) {
        self.0.load();
    }

    fn play(&self) {
        match self.0.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => info!("Autoplay is ok"),
                    Err(err) => warn!("Autoplay issue: {err:?}"),
                }
            }),
            Err(err) => warn!("Autoplay issue: {err:?}"),
        }
    }

    fn pause(&self) {
        if let Err(err) = self.0.pause() {
            warn!("Pause failed: {err:?}");
        }
    }

    fn set_volume(&self, volume: f64) {
        self.0.set_volume(volume.clamp(0.0, 1.0));
    }
}

/// `PageSurface` over `document.title` and the playlist list items.
pub struct DocumentSurface {
    document: Document,
    items: Vec<Element>,
    active_class: String,
}

impl DocumentSurface {
    pub fn new(document: Document, anchors: &[HtmlAnchorElement], active_class: &str) -> Self {
        let items = anchors
            .iter()
            .filter_map(|anchor| anchor.parent_element())
            .collect();
        Self {
            document,
            items,
            active_class: active_class.to_string(),
        }
    }
}

impl PageSurface for DocumentSurface {
    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn mark_active(&self, index: usize) {
        for (i, item) in self.items.iter().enumerate() {
            if let Err(err) = item
                .class_list()
                .toggle_with_force(&self.active_class, i == index)
            {
                warn!("Could not update entry {i}: {err:?}");
            }
        }
    }
}
