use async_trait::async_trait;
use serde::Serialize;

use crate::error::TransportError;

/// A decoded JSON reply. Non-2xx statuses are not errors at this level: the
/// backend reports refusals as JSON bodies (`{"error": ...}`) and callers
/// interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

/// HTTP seam for the admin actions.
///
/// `?Send`: in the browser every future runs on the single UI thread.
#[async_trait(?Send)]
pub trait Transport {
    /// Whatever the platform uses to carry a multipart body.
    type Upload;

    async fn post_json<B>(&self, url: &str, body: &B) -> Result<Reply, TransportError>
    where
        B: Serialize + ?Sized;

    async fn post_upload(&self, url: &str, upload: Self::Upload) -> Result<Reply, TransportError>;
}
