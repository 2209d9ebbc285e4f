use super::{MediaElement, PageSurface, PlayerState, Playlist};
use crate::prefs::Preferences;
use dioxus::logger::tracing::{debug, info, warn};

/// Playback session for one page view.
///
/// Owns the media element, the playlist cursor and the loop flag. All transitions go
/// through `select`, `on_ended` and the media notifications, one event at a time.
pub struct PlayerSession<M, S> {
    playlist: Playlist,
    current: usize,
    loop_enabled: bool,
    state: PlayerState,
    media: M,
    surface: S,
}

impl<M: MediaElement, S: PageSurface> PlayerSession<M, S> {
    pub fn new(playlist: Playlist, media: M, surface: S) -> Self {
        Self {
            playlist,
            current: 0,
            loop_enabled: false,
            state: PlayerState::Idle,
            media,
            surface,
        }
    }

    /// Apply the page preferences once, at load.
    ///
    /// `default_volume` is the percentage used when the URL carries no `volume`.
    pub fn initialize(&mut self, prefs: &Preferences, default_volume: u32) {
        let volume = prefs.volume_ratio_or(default_volume);
        if prefs.volume.is_some() {
            info!("Custom volume {volume}");
        } else {
            info!("Default volume {volume}");
        }
        self.media.set_volume(volume);

        self.loop_enabled = prefs.loop_enabled;
        info!(
            "{} loop",
            if self.loop_enabled { "Enable" } else { "Disable" }
        );

        if let Some(first) = self.playlist.first() {
            info!("Setting title to {}", first.label);
            self.surface.set_title(&first.label);
        }

        if prefs.autoplay && !self.select(0) {
            debug!("Autoplay requested with an empty playlist");
        }
    }

    /// Load and play the track at `index`. Returns false when there is no such track.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.get(index) else {
            warn!(
                "No track at index {index} (playlist has {})",
                self.playlist.len()
            );
            return false;
        };

        self.state = PlayerState::Loading;
        self.current = index;
        self.media.set_src(&track.src);
        info!("Setting title to {}", track.label);
        self.surface.set_title(&track.label);
        self.surface.mark_active(index);
        self.media.load();
        self.media.play();
        self.state = PlayerState::Playing;
        true
    }

    /// The media element finished the current track.
    pub fn on_ended(&mut self) {
        if self.playlist.is_empty() {
            return;
        }

        let next = self.current + 1;
        if next < self.playlist.len() {
            self.select(next);
            return;
        }

        self.media.pause();
        info!("Last song ended");
        if self.loop_enabled {
            info!("Loop enabled, return to first song");
            self.select(0);
        } else {
            self.state = PlayerState::EndedTerminal;
        }
    }

    /// The media element reports playback actually running.
    pub fn on_playing(&mut self) {
        self.state = PlayerState::Playing;
    }

    /// The media element reports a pause (native controls, end of stream).
    pub fn on_paused(&mut self) {
        if matches!(self.state, PlayerState::Playing | PlayerState::Loading) {
            self.state = PlayerState::Paused;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[cfg(test)]
    fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    #[cfg(test)]
    fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    fn surface(&self) -> &S {
        &self.surface
    }
}
