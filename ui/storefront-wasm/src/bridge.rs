//! Functions callable from page templates (`onclick="..."`, inline scripts).

use sf_api_types::{FileMeta, OrderId, Severity, UploadKind};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, KeyboardEvent};

use crate::state;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn severity(tag: Option<String>) -> Severity {
    tag.as_deref().map(Severity::from_tag).unwrap_or_default()
}

fn file_meta(file: &File) -> FileMeta {
    FileMeta {
        name: file.name(),
        mime: file.type_(),
        size: file.size() as u64,
    }
}

#[wasm_bindgen]
pub fn show_alert(message: &str, severity_tag: Option<String>) -> Result<(), JsValue> {
    state::app()
        .storefront
        .show_alert(message, severity(severity_tag))
        .map(|_| ())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn show_notification(
    message: &str,
    severity_tag: Option<String>,
    duration_ms: Option<u32>,
) -> Result<(), JsValue> {
    state::app()
        .storefront
        .show_notification(message, severity(severity_tag), duration_ms)
        .map(|_| ())
        .map_err(to_js)
}

/// Returns whether a navigation was started.
#[wasm_bindgen]
pub fn update_cart_quantity(item_id: u32, quantity: i32) -> bool {
    state::app()
        .storefront
        .update_cart_quantity(u64::from(item_id), i64::from(quantity))
        .is_some()
}

/// Resolves to `true` when the backend accepted the new status. Failures are
/// already shown to the user, so the promise never rejects.
#[wasm_bindgen]
pub async fn update_order_status(order_id: u32, status: String) -> Result<bool, JsValue> {
    let app = state::app();
    let outcome = app
        .storefront
        .update_order_status(&app.transport, OrderId(u64::from(order_id)), &status)
        .await;
    Ok(outcome.is_ok())
}

/// Upload the `file` entries of `form_data`. Resolves to the backend reply
/// (`{success, filename}` or `{error}`); rejects when a file fails
/// client-side validation or the request cannot be made.
#[wasm_bindgen]
pub async fn upload_file(form_data: FormData) -> Result<JsValue, JsValue> {
    let entries: js_sys::Array = form_data.get_all("file");
    let files: Vec<FileMeta> = entries
        .iter()
        .filter_map(|v| v.dyn_into::<File>().ok())
        .map(|f| file_meta(&f))
        .collect();
    let kind = UploadKind::from_field(&form_data.get("file_type").as_string().unwrap_or_default());
    debug!(files = files.len(), kind = kind.as_str(), "upload requested");

    let app = state::app();
    let reply = app
        .storefront
        .upload_file(&app.transport, kind, form_data, &files)
        .await
        .map_err(to_js)?;
    serde_wasm_bindgen::to_value(&reply).map_err(Into::into)
}

#[wasm_bindgen]
pub fn validate_image(file: File) -> bool {
    state::app().storefront.validate_image(&file_meta(&file))
}

#[wasm_bindgen]
pub fn search_products(query: &str) -> Result<(), JsValue> {
    state::app()
        .storefront
        .search_products(query)
        .map(|_| ())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn go_to_page(page: u32) -> Result<(), JsValue> {
    state::app()
        .storefront
        .go_to_page(page)
        .map(|_| ())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn sort_products(sort_by: &str) -> Result<(), JsValue> {
    state::app()
        .storefront
        .sort_products(sort_by)
        .map(|_| ())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn apply_filters() -> Result<(), JsValue> {
    state::app()
        .storefront
        .apply_filters()
        .map(|_| ())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn toggle_mobile_menu() -> bool {
    state::app().storefront.toggle_mobile_menu()
}

/// Keydown handler for custom controls: Enter or space clicks the target.
#[wasm_bindgen]
pub fn handle_keyboard_navigation(event: KeyboardEvent) -> bool {
    let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    else {
        return false;
    };
    state::app()
        .storefront
        .handle_keyboard_navigation(&event.key(), &target)
}
