//! Quotation email dispatch
//!
//! Composes the quotation email around a rendered PDF and hands it to a
//! [`MailTransport`]. [`SesTransport`] delivers through AWS SES v2; tests and
//! other deployments plug in their own transport.

pub mod config;
pub mod dispatch;
pub mod ses;
pub mod template;
pub mod transport;
pub mod types;

pub use config::MailerConfig;
pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher};
pub use ses::SesTransport;
pub use template::QuotationEmail;
pub use transport::{MailReceipt, MailTransport, TransportError};
pub use types::{is_bare_address, is_valid_email, Attachment, SendEmailRequest, ValidationError};
