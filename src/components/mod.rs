//! Headless controllers mounted on the player page. They render nothing and bind to
//! the server-rendered markup instead.

mod playlist_player;
mod preference_sync;

pub use playlist_player::*;
pub use preference_sync::*;
