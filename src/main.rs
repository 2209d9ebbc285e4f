use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

mod components;
mod config;
#[cfg(target_arch = "wasm32")]
mod dom;
mod error;
// Only the wasm controllers drive these outside of tests.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod player;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod prefs;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod query;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod sync;

use components::{PlaylistPlayer, PreferenceSync};
use config::{load_page_config, PageConfig};

fn main() {
    let loaded = load_page_config();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => PageConfig::default(),
    };
    if let Err(err) = dioxus::logger::init(config.level()) {
        eprintln!("Failed to initialize logger: {err}");
    }
    if let Err(err) = loaded {
        warn!("Ignoring page configuration: {err}");
    }

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<PageConfig>();

    rsx! {
        PreferenceSync {}
        PlaylistPlayer { config }
    }
}
