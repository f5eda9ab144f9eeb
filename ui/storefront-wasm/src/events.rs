//! Event binding.
//!
//! Wires the page's listeners once the document is parsed. Handlers only
//! translate browser events into `Storefront` calls; all decisions live in
//! `sf-ui-core`.

use sf_ui_core::Dom;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, MouseEvent};

use crate::state::App;

/// Helper: attach a typed listener and leak the closure for the page lifetime.
macro_rules! listen {
    ($target:expr, $event:expr, $ty:ty, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut($ty)>);
        if let Err(e) = $target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())
        {
            warn!(event = $event, "could not attach listener: {:?}", e);
        }
        cb.forget();
    }};
}

/// Bind all page listeners. Call once after the DOM is ready.
pub fn bind_events(app: &App) {
    let sf = &app.storefront;
    let dom = sf.dom();
    let selectors = &sf.config().selectors;

    // ── Required fields ──
    let forms = dom.query_all(&selectors.form);
    for form in &forms {
        let sf2 = sf.clone();
        let form2 = form.clone();
        listen!(form, "submit", Event, move |e: Event| {
            if !sf2.validate_form(&form2) {
                e.prevent_default();
            }
        });
    }

    // ── Category filter ──
    if let Some(select) = dom.by_id(&selectors.category_id) {
        let sf2 = sf.clone();
        listen!(select, "change", Event, move |_: Event| {
            if let Err(err) = sf2.on_category_change() {
                warn!(error = %err, "category filter not applied");
            }
        });
    }

    // ── Destructive actions ──
    let danger = dom.query_all(&selectors.danger_button);
    for button in &danger {
        let sf2 = sf.clone();
        listen!(button, "click", MouseEvent, move |e: MouseEvent| {
            if !sf2.confirm_destructive() {
                e.prevent_default();
            }
        });
    }

    // ── Escape closes modals ──
    {
        let sf2 = sf.clone();
        listen!(dom.document(), "keydown", KeyboardEvent, move |e: KeyboardEvent| {
            sf2.handle_escape(&e.key());
        });
    }

    // ── Keyboard activation ──
    let activatable = dom.query_all(&selectors.keyboard_activatable);
    for el in &activatable {
        let sf2 = sf.clone();
        let el2 = el.clone();
        listen!(el, "keydown", KeyboardEvent, move |e: KeyboardEvent| {
            if sf2.handle_keyboard_navigation(&e.key(), &el2) {
                e.prevent_default();
            }
        });
    }

    // ── Mobile menu ──
    let toggles = dom.query_all(&selectors.mobile_menu_toggle);
    for toggle in &toggles {
        let sf2 = sf.clone();
        listen!(toggle, "click", MouseEvent, move |_: MouseEvent| {
            sf2.toggle_mobile_menu();
        });
    }

    debug!(
        forms = forms.len(),
        danger = danger.len(),
        activatable = activatable.len(),
        toggles = toggles.len(),
        "listeners bound"
    );
}

/// Run `f` once the document is parsed: immediately if it already is,
/// otherwise on `DOMContentLoaded`.
pub fn on_ready<F>(app: App, f: F)
where
    F: FnOnce(&App) + 'static,
{
    let document = app.storefront.dom().document().clone();
    if document.ready_state() != "loading" {
        f(&app);
        return;
    }
    let cb = Closure::once(move |_: Event| f(&app));
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
    {
        warn!("could not wait for DOMContentLoaded: {:?}", e);
    }
    cb.forget();
}
