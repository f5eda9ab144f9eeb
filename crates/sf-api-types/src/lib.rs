use serde::{Deserialize, Serialize};
use std::fmt;

/// Banner severity. Rendered as the CSS suffix of `alert-*` / `notification-*`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Lenient parse for tags coming from templates; anything unknown is `Info`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "success" => Severity::Success,
            "error" | "danger" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-string keys understood by the product listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Category,
    Search,
    Page,
    Sort,
    MinPrice,
    MaxPrice,
}

impl FilterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Category => "category",
            FilterKey::Search => "search",
            FilterKey::Page => "page",
            FilterKey::Sort => "sort",
            FilterKey::MinPrice => "minPrice",
            FilterKey::MaxPrice => "maxPrice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusRequest {
    pub status: String,
}

/// Reply of `POST /admin/orders/{id}/status`.
///
/// The backend answers `{"success": true}` on success and `{"error": "..."}`
/// (403) when the caller is not an admin, so both fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Destination folder of an uploaded file, sent as the `file_type` form field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    ProductImage,
    PriceList,
    #[default]
    Other,
}

impl UploadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadKind::ProductImage => "product_image",
            UploadKind::PriceList => "price_list",
            UploadKind::Other => "other",
        }
    }

    pub fn from_field(value: &str) -> Self {
        match value {
            "product_image" => UploadKind::ProductImage,
            "price_list" => UploadKind::PriceList,
            _ => UploadKind::Other,
        }
    }
}

/// Reply of `POST /admin/files/upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Metadata of a picked file, enough for client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}
