//! HTTP transport.
//!
//! Wraps `fetch` (through `gloo-net`) for the admin endpoints. Replies are
//! read as text and parsed as JSON whatever the status code: the backend
//! reports refusals as JSON bodies.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use sf_ui_core::{Reply, Transport, TransportError};
use tracing::debug;
use web_sys::FormData;

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

async fn read_json(resp: Response) -> Result<Reply, TransportError> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| TransportError::Network(format!("text error: {}", e)))?;
    debug!(status, bytes = text.len(), "reply received");

    let body = serde_json::from_str(&text).map_err(|e| TransportError::Decode {
        status,
        reason: format!("{}; raw: {}", e, text),
    })?;
    Ok(Reply { status, body })
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    type Upload = FormData;

    async fn post_json<B>(&self, url: &str, body: &B) -> Result<Reply, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let resp = Request::post(url)
            .json(body)
            .map_err(|e| TransportError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("fetch error: {}", e)))?;
        read_json(resp).await
    }

    async fn post_upload(&self, url: &str, upload: FormData) -> Result<Reply, TransportError> {
        let resp = Request::post(url)
            .body(upload)
            .map_err(|e| TransportError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("fetch error: {}", e)))?;
        read_json(resp).await
    }
}
