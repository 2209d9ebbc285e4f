//! Playlist player: an ordered list of tracks played through one media element.

mod session;

pub use session::PlayerSession;

/// One entry of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub label: String,
    pub src: String,
}

impl Track {
    pub fn new(label: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            src: src.into(),
        }
    }
}

/// Tracks in page order. Fixed for the lifetime of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// Source assigned, play requested
    Loading,
    Playing,
    Paused,
    /// Last track finished with loop disabled
    EndedTerminal,
}

/// The playable resource the session drives.
///
/// `play` only requests playback. Implementations report a refused start (autoplay
/// policy, missing user gesture) through logging and never back into the session.
pub trait MediaElement {
    fn set_src(&self, src: &str);
    fn load(&self);
    fn play(&self);
    fn pause(&self);
    fn set_volume(&self, volume: f64);
}

/// The parts of the page that mirror the current track.
pub trait PageSurface {
    fn set_title(&self, title: &str);
    /// Highlight the entry at `index` and clear every other entry.
    fn mark_active(&self, index: usize);
}
