//! Page configuration.
//!
//! Every field has a default matching the server-rendered templates, so a
//! page without a config block behaves exactly like one with `{}`. A partial
//! JSON document overrides only the fields it names.

use serde::{Deserialize, Serialize};
use sf_api_types::OrderId;

pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorefrontConfig {
    /// `EnvFilter` directive used by the console subscriber.
    pub log_level: String,
    /// Prefix for admin endpoints. Empty means same origin.
    pub api_base: String,
    pub selectors: Selectors,
    pub timing: Timing,
    pub uploads: UploadPolicy,
    pub endpoints: Endpoints,
    pub messages: Messages,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            api_base: String::new(),
            selectors: Selectors::default(),
            timing: Timing::default(),
            uploads: UploadPolicy::default(),
            endpoints: Endpoints::default(),
            messages: Messages::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

/// CSS selectors and element ids of the markup this script attaches to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Selectors {
    pub alert_container: String,
    pub form: String,
    pub required_field: String,
    pub danger_button: String,
    pub modal: String,
    pub navbar: String,
    pub mobile_menu_toggle: String,
    pub keyboard_activatable: String,
    /// Element ids, not selectors.
    pub category_id: String,
    pub min_price_id: String,
    pub max_price_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            alert_container: ".container".to_owned(),
            form: "form".to_owned(),
            required_field: "[required]".to_owned(),
            danger_button: ".btn-danger".to_owned(),
            modal: ".modal".to_owned(),
            navbar: ".navbar-nav".to_owned(),
            mobile_menu_toggle: r#"[data-toggle="mobile-menu"]"#.to_owned(),
            keyboard_activatable: r#"[role="button"]"#.to_owned(),
            category_id: "category".to_owned(),
            min_price_id: "minPrice".to_owned(),
            max_price_id: "maxPrice".to_owned(),
        }
    }
}

/// Banner lifetimes, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    pub alert_ms: u32,
    pub notification_ms: u32,
    /// Length of the `slideOut` animation played before a notification is removed.
    pub notification_exit_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            alert_ms: 5_000,
            notification_ms: 3_000,
            notification_exit_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadPolicy {
    pub allowed_types: Vec<String>,
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: vec![
                "image/jpeg".to_owned(),
                "image/png".to_owned(),
                "image/gif".to_owned(),
            ],
            max_bytes: 16 * MIB,
        }
    }
}

/// Path templates. `{id}` and `{quantity}` are substituted at call time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub order_status: String,
    pub upload: String,
    pub update_cart: String,
    pub remove_from_cart: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            order_status: "/admin/orders/{id}/status".to_owned(),
            upload: "/admin/files/upload".to_owned(),
            update_cart: "/update_cart/{id}/{quantity}".to_owned(),
            remove_from_cart: "/remove_from_cart/{id}".to_owned(),
        }
    }
}

impl Endpoints {
    pub fn order_status_path(&self, order: &OrderId) -> String {
        self.order_status.replace("{id}", &order.to_string())
    }

    pub fn update_cart_path(&self, item_id: u64, quantity: i64) -> String {
        self.update_cart
            .replace("{id}", &item_id.to_string())
            .replace("{quantity}", &quantity.to_string())
    }

    pub fn remove_from_cart_path(&self, item_id: u64) -> String {
        self.remove_from_cart.replace("{id}", &item_id.to_string())
    }
}

/// User-facing texts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Messages {
    pub required_fields: String,
    pub confirm_delete: String,
    pub confirm_remove_cart_item: String,
    pub order_status_updated: String,
    pub order_status_failed: String,
    pub connection_error: String,
    pub file_type_rejected: String,
    pub file_too_large: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required_fields: "Please fill in all required fields".to_owned(),
            confirm_delete: "Are you sure you want to delete this item?".to_owned(),
            confirm_remove_cart_item: "Remove this product from the cart?".to_owned(),
            order_status_updated: "Order status updated".to_owned(),
            order_status_failed: "Could not update the order status".to_owned(),
            connection_error: "Connection error".to_owned(),
            file_type_rejected: "File type not allowed. Only JPG, PNG and GIF are accepted."
                .to_owned(),
            file_too_large: "The file is too large. Maximum 16MB.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = StorefrontConfig::from_json("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.uploads.max_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn partial_override_keeps_sibling_defaults() {
        let config = StorefrontConfig::from_json(
            r#"{"timing":{"alert_ms":1000},"messages":{"connection_error":"Error de conexión"}}"#,
        )
        .unwrap();
        assert_eq!(config.timing.alert_ms, 1000);
        assert_eq!(config.timing.notification_ms, 3000);
        assert_eq!(config.messages.connection_error, "Error de conexión");
        assert_eq!(
            config.messages.required_fields,
            Messages::default().required_fields
        );
    }

    #[test]
    fn endpoint_templates_are_filled() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.order_status_path(&OrderId(42)),
            "/admin/orders/42/status"
        );
        assert_eq!(endpoints.update_cart_path(7, 3), "/update_cart/7/3");
        assert_eq!(endpoints.remove_from_cart_path(7), "/remove_from_cart/7");
    }

    #[test]
    fn api_base_is_joined_without_double_slash() {
        let config = StorefrontConfig {
            api_base: "https://shop.example/".to_owned(),
            ..StorefrontConfig::default()
        };
        assert_eq!(
            config.url_for("/admin/files/upload"),
            "https://shop.example/admin/files/upload"
        );
    }
}
