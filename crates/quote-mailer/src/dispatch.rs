//! Quotation dispatch: validate, compose, send once, report the new status

use pricing_engine::PricingSummary;
use quote_types::{QuotationRecord, QuotationStatus};
use tracing::{info, instrument, warn};

use crate::config::MailerConfig;
use crate::template::QuotationEmail;
use crate::transport::{MailReceipt, MailTransport, TransportError};
use crate::types::{is_bare_address, Attachment, SendEmailRequest, ValidationError};

/// Result of a successful dispatch
///
/// `status` is what the caller should persist on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub receipt: MailReceipt,
    pub status: QuotationStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// Bad input from the caller rather than a delivery failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, DispatchError::Validation(_))
    }
}

/// Emails rendered quotations through a [`MailTransport`]
pub struct Dispatcher<T> {
    transport: T,
    config: MailerConfig,
}

impl<T: MailTransport> Dispatcher<T> {
    pub fn new(transport: T, config: MailerConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &MailerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `pdf` to `recipient` and return the record's post-send status
    ///
    /// The transport is called at most once. Nothing is sent when the
    /// recipient is not a single bare address or the composed request fails
    /// validation.
    #[instrument(
        skip(self, record, pdf),
        fields(quote_number = %record.quote_number, pdf_bytes = pdf.len())
    )]
    pub async fn send(
        &self,
        record: &QuotationRecord,
        recipient: &str,
        pdf: &[u8],
    ) -> Result<DispatchOutcome, DispatchError> {
        let recipient = recipient.trim();
        if !is_bare_address(recipient) {
            warn!(recipient = ?recipient, "Rejected quotation recipient");
            return Err(ValidationError::InvalidEmail(recipient.to_string()).into());
        }

        let request = self.compose(record, recipient, pdf);
        request.validate()?;

        let receipt = self.transport.send_mail(&request).await?;
        let status = record.status.mark_sent();
        info!(message_id = %receipt.message_id, status = %status, "Quotation dispatched");

        Ok(DispatchOutcome { receipt, status })
    }

    /// Build the outbound request for one quotation
    pub fn compose(&self, record: &QuotationRecord, recipient: &str, pdf: &[u8]) -> SendEmailRequest {
        let summary = PricingSummary::for_record(record);
        let email = QuotationEmail {
            customer_name: record.customer_name.clone(),
            quote_number: record.quote_number.clone(),
            company_name: self.config.company_name.clone(),
            grand_total: summary.totals.launch_grand_total,
        };

        let mut request =
            SendEmailRequest::simple(&self.config.from, recipient, &email.subject(), &email.html())
                .with_text(&email.text())
                .with_header(
                    "X-Entity-Ref-ID",
                    &uuid::Uuid::new_v4().simple().to_string(),
                )
                .with_tag("type", "quotation")
                .with_attachment(Attachment::pdf(&record.pdf_filename(), pdf));
        request.configuration_set = self.config.configuration_set.clone();
        request
    }
}
