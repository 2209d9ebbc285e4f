use crate::config::PageConfig;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::dom::{self, AudioElement, DocumentSurface};
#[cfg(target_arch = "wasm32")]
use crate::error::Result;
#[cfg(target_arch = "wasm32")]
use crate::player::PlayerSession;
#[cfg(target_arch = "wasm32")]
use crate::prefs::Preferences;
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{debug, info, warn};
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};

#[cfg(target_arch = "wasm32")]
type WebSession = PlayerSession<AudioElement, DocumentSurface>;

/// Playlist player - drives the page's audio element from the playlist entries
#[component]
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
pub fn PlaylistPlayer(config: PageConfig) -> Element {
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        if let Err(err) = start_player(&config) {
            warn!("Player disabled: {err}");
        }
    });

    rsx! {}
}

#[cfg(target_arch = "wasm32")]
fn start_player(config: &PageConfig) -> Result<()> {
    let prefs = Preferences::from_url(&dom::current_url()?);
    let media = dom::find_media(config)?;
    let anchors = dom::track_anchors(config)?;
    let playlist = dom::harvest_playlist(&anchors);
    info!("Playlist has {} tracks", playlist.len());

    let surface = DocumentSurface::new(dom::document()?, &anchors, &config.active_class);
    let session = Rc::new(RefCell::new(PlayerSession::new(
        playlist,
        AudioElement(media.clone()),
        surface,
    )));
    session
        .borrow_mut()
        .initialize(&prefs, config.default_volume);

    for (index, anchor) in anchors.iter().enumerate() {
        let session = session.clone();
        dom::listen(anchor, "click", false, move |evt| {
            evt.prevent_default();
            with_session(&session, |s| {
                s.select(index);
            });
        })?;
    }

    let on_ended = session.clone();
    dom::listen(&media, "ended", false, move |_| {
        with_session(&on_ended, |s| s.on_ended());
    })?;

    let on_playing = session.clone();
    dom::listen(&media, "playing", false, move |_| {
        with_session(&on_playing, |s| s.on_playing());
    })?;

    let on_pause = session;
    dom::listen(&media, "pause", false, move |_| {
        with_session(&on_pause, |s| s.on_paused());
    })?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn with_session(session: &Rc<RefCell<WebSession>>, f: impl FnOnce(&mut WebSession)) {
    match session.try_borrow_mut() {
        Ok(mut session) => {
            f(&mut session);
            debug!("Player {:?} at track {}", session.state(), session.current());
        }
        Err(_) => warn!("Player busy, dropping event"),
    }
}
