//! Storefront WASM frontend
//!
//! Browser side of the shop pages: the web-sys `Dom`, the fetch transport,
//! event wiring and the functions templates call directly. Behaviors
//! themselves live in `sf-ui-core`.

pub mod api;
pub mod bridge;
pub mod dom;
pub mod events;
pub mod logging;
pub mod state;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let app = state::app();
    if let Err(e) = app.storefront.install_styles() {
        warn!(error = %e, "animation styles not installed");
    }
    events::on_ready(app, |app| {
        events::bind_events(app);
        info!("storefront ready");
    });
    Ok(())
}
