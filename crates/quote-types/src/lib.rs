//! Shared quotation data model
//!
//! The record consumed by the renderer and the dispatch adapter, plus the two
//! pieces of lifecycle logic that belong to the record itself: quote-number
//! sequencing and the status state machine.

pub mod loose;
pub mod numbering;
pub mod status;
pub mod types;

pub use numbering::{next_quote_number, parse_quote_number, QUOTE_PREFIX};
pub use status::{QuotationStatus, StatusError};
pub use types::{
    BankDetails, PaymentTerm, PricingLineItem, QuotationRecord, TechnicalSpecs,
    DEFAULT_GST_RATE,
};
