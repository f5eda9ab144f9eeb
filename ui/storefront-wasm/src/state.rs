//! Page-wide application handle.
//!
//! Built on first use and kept in a `thread_local!` (WASM is single-threaded),
//! so JS-called exports and event listeners share one `Storefront`.

use std::cell::RefCell;

use sf_ui_core::{Dom, Storefront, StorefrontConfig};
use tracing::{info, warn};

use crate::api::HttpTransport;
use crate::dom::BrowserDom;
use crate::logging;

/// Id of the optional `<script type="application/json">` holding the config.
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

#[derive(Clone)]
pub struct App {
    pub storefront: Storefront<BrowserDom>,
    pub transport: HttpTransport,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn read_config(dom: &BrowserDom) -> Result<StorefrontConfig, serde_json::Error> {
    match dom.by_id(CONFIG_ELEMENT_ID) {
        Some(el) => StorefrontConfig::from_json(&el.text_content().unwrap_or_default()),
        None => Ok(StorefrontConfig::default()),
    }
}

/// The shared handle, created (config read, logging installed) on first call.
pub fn app() -> App {
    if let Some(app) = APP.with(|a| a.borrow().clone()) {
        return app;
    }

    let dom = BrowserDom::new();
    let (config, problem) = match read_config(&dom) {
        Ok(config) => (config, None),
        Err(e) => (StorefrontConfig::default(), Some(e)),
    };
    logging::init(&config.log_level);
    if let Some(e) = problem {
        warn!(error = %e, "ignoring malformed #{}", CONFIG_ELEMENT_ID);
    }
    info!(log_level = %config.log_level, "storefront configured");

    let app = App {
        storefront: Storefront::new(dom, config),
        transport: HttpTransport,
    };
    APP.with(|a| *a.borrow_mut() = Some(app.clone()));
    app
}
