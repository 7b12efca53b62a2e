//! Mail transport seam

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::SendEmailRequest;

/// Delivery receipt from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    pub message_id: String,
}

/// Something that can deliver a [`SendEmailRequest`]
///
/// Implementations send at most once per call and never retry: the remote
/// side may have accepted a message even when the call reports failure.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_mail(&self, request: &SendEmailRequest) -> Result<MailReceipt, TransportError>;
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for Arc<T> {
    async fn send_mail(&self, request: &SendEmailRequest) -> Result<MailReceipt, TransportError> {
        (**self).send_mail(request).await
    }
}

/// Transport failures, carrying the underlying message
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build email: {0}")]
    BuildError(String),

    #[error("Send failed: {0}")]
    SendFailed(String),
}
