//! Browser host: the `GalaxyField` wasm-bindgen class and the DOM plumbing
//! it needs (animation frames and event listeners as drop-to-release handles).

mod animation_loop;
mod galaxy_field;
mod listeners;

use wasm_bindgen::prelude::*;

pub use animation_loop::AnimationLoop;
pub use galaxy_field::GalaxyField;
pub use listeners::EventListener;

/// Module start hook: panic messages and `log` output go to the console
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"galaxy-field: logger already initialized".into());
    }
    log::info!("galaxy-field {} loaded", env!("CARGO_PKG_VERSION"));
}
