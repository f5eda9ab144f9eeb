//! Admin panel actions: order status changes and file uploads.
//!
//! Each action is a single request. Outcomes are shown to the user through
//! alerts and also returned, so callers can react further.

use sf_api_types::{
    FileMeta, OrderId, OrderStatusRequest, OrderStatusResponse, Severity, UploadKind,
    UploadResponse,
};
use tracing::{info, warn};

use crate::config::UploadPolicy;
use crate::error::{AdminError, FileRejection, TransportError};
use crate::transport::{Reply, Transport};
use crate::{Dom, Storefront};

/// Client-side check applied before any upload.
pub fn check_image(policy: &UploadPolicy, file: &FileMeta) -> Result<(), FileRejection> {
    if !policy.allowed_types.iter().any(|t| t == &file.mime) {
        return Err(FileRejection::UnsupportedType(file.mime.clone()));
    }
    if file.size > policy.max_bytes {
        return Err(FileRejection::TooLarge {
            size: file.size,
            max: policy.max_bytes,
        });
    }
    Ok(())
}

/// Check applied to each file of an upload. The size limit holds for every
/// kind; only product images are restricted to image types.
pub fn check_upload(
    policy: &UploadPolicy,
    kind: UploadKind,
    file: &FileMeta,
) -> Result<(), FileRejection> {
    match kind {
        UploadKind::ProductImage => check_image(policy, file),
        UploadKind::PriceList | UploadKind::Other if file.size > policy.max_bytes => {
            Err(FileRejection::TooLarge {
                size: file.size,
                max: policy.max_bytes,
            })
        }
        UploadKind::PriceList | UploadKind::Other => Ok(()),
    }
}

/// Replies are JSON objects; anything else (`null`, arrays, scalars) means
/// the response was not what the endpoint sends.
fn decode<T: serde::de::DeserializeOwned>(reply: Reply) -> Result<T, TransportError> {
    let status = reply.status;
    if !reply.body.is_object() {
        return Err(TransportError::Decode {
            status,
            reason: format!("expected a JSON object, got {}", reply.body),
        });
    }
    serde_json::from_value(reply.body).map_err(|e| TransportError::Decode {
        status,
        reason: e.to_string(),
    })
}

impl<D: Dom> Storefront<D> {
    /// Validate a picked file, alerting the user when it is rejected.
    pub fn validate_image(&self, file: &FileMeta) -> bool {
        match check_image(&self.config.uploads, file) {
            Ok(()) => true,
            Err(rejection) => {
                self.report_rejection(file, &rejection);
                false
            }
        }
    }

    fn report_rejection(&self, file: &FileMeta, rejection: &FileRejection) {
        warn!(file = %file.name, %rejection, "file rejected");
        let messages = &self.config.messages;
        let message = match rejection {
            FileRejection::UnsupportedType(_) => &messages.file_type_rejected,
            FileRejection::TooLarge { .. } => &messages.file_too_large,
        };
        self.report(message, Severity::Error);
    }

    /// `POST /admin/orders/{id}/status`.
    ///
    /// `Ok` only for a `{"success": true}` reply. Any other JSON reply is a
    /// backend refusal, anything that did not produce JSON is a transport
    /// failure; each shows its own alert.
    pub async fn update_order_status<T: Transport>(
        &self,
        transport: &T,
        order: OrderId,
        status: &str,
    ) -> Result<(), AdminError> {
        let url = self
            .config
            .url_for(&self.config.endpoints.order_status_path(&order));
        let body = OrderStatusRequest {
            status: status.to_owned(),
        };

        let outcome = match transport.post_json(&url, &body).await {
            Ok(reply) => {
                let status_code = reply.status;
                match decode::<OrderStatusResponse>(reply) {
                    Ok(parsed) if parsed.success => Ok(()),
                    Ok(parsed) => Err(AdminError::Backend(parsed.error.unwrap_or_else(|| {
                        format!("status update not accepted (HTTP {status_code})")
                    }))),
                    Err(err) => Err(AdminError::Transport(err)),
                }
            }
            Err(err) => Err(AdminError::Transport(err)),
        };

        let messages = &self.config.messages;
        match &outcome {
            Ok(()) => {
                info!(%order, status, "order status updated");
                self.report(&messages.order_status_updated, Severity::Success);
            }
            Err(AdminError::Transport(err)) => {
                warn!(%order, error = %err, "order status request failed");
                self.report(&messages.connection_error, Severity::Error);
            }
            Err(err) => {
                warn!(%order, error = %err, "order status update refused");
                self.report(&messages.order_status_failed, Severity::Error);
            }
        }
        outcome
    }

    /// `POST /admin/files/upload`.
    ///
    /// Every file in `files` is checked against `kind` first; the first
    /// rejection aborts without touching the network. The decoded reply is
    /// returned as is, `success: false` included, for the caller to interpret.
    pub async fn upload_file<T: Transport>(
        &self,
        transport: &T,
        kind: UploadKind,
        upload: T::Upload,
        files: &[FileMeta],
    ) -> Result<UploadResponse, AdminError> {
        for file in files {
            if let Err(rejection) = check_upload(&self.config.uploads, kind, file) {
                self.report_rejection(file, &rejection);
                return Err(rejection.into());
            }
        }

        let url = self.config.url_for(&self.config.endpoints.upload);
        let reply = transport.post_upload(&url, upload).await.inspect_err(|err| {
            warn!(error = %err, "upload request failed");
        })?;
        let response: UploadResponse = decode(reply)?;
        info!(
            kind = kind.as_str(),
            success = response.success,
            filename = response.filename.as_deref().unwrap_or(""),
            "upload finished"
        );
        Ok(response)
    }
}
