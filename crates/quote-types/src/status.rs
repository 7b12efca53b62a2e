//! Quotation status state machine
//!
//! ```text
//! draft ──dispatch──▶ sent ──decide──▶ approved
//!                      │  ▲       └──▶ rejected
//!                      └──┘ (re-send)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotationStatus::Draft => write!(f, "draft"),
            QuotationStatus::Sent => write!(f, "sent"),
            QuotationStatus::Approved => write!(f, "approved"),
            QuotationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("Cannot move quotation from {from} to {to}")]
    InvalidTransition {
        from: QuotationStatus,
        to: QuotationStatus,
    },
}

impl QuotationStatus {
    /// Status after a successful email dispatch
    ///
    /// Draft and sent quotations become sent. A decided quotation keeps its
    /// decision when its PDF is mailed again.
    pub fn mark_sent(self) -> QuotationStatus {
        match self {
            QuotationStatus::Draft | QuotationStatus::Sent => QuotationStatus::Sent,
            decided => decided,
        }
    }

    /// Explicit approve/reject, only valid once the quotation was sent
    pub fn decide(self, approved: bool) -> Result<QuotationStatus, StatusError> {
        let to = if approved {
            QuotationStatus::Approved
        } else {
            QuotationStatus::Rejected
        };
        match self {
            QuotationStatus::Sent => Ok(to),
            from => Err(StatusError::InvalidTransition { from, to }),
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, QuotationStatus::Approved | QuotationStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_becomes_sent() {
        assert_eq!(QuotationStatus::Draft.mark_sent(), QuotationStatus::Sent);
        assert_eq!(QuotationStatus::Sent.mark_sent(), QuotationStatus::Sent);
    }

    #[test]
    fn test_resend_keeps_decision() {
        assert_eq!(
            QuotationStatus::Approved.mark_sent(),
            QuotationStatus::Approved
        );
        assert_eq!(
            QuotationStatus::Rejected.mark_sent(),
            QuotationStatus::Rejected
        );
    }

    #[test]
    fn test_decide_only_from_sent() {
        assert_eq!(
            QuotationStatus::Sent.decide(true),
            Ok(QuotationStatus::Approved)
        );
        assert_eq!(
            QuotationStatus::Sent.decide(false),
            Ok(QuotationStatus::Rejected)
        );
        assert_eq!(
            QuotationStatus::Draft.decide(true),
            Err(StatusError::InvalidTransition {
                from: QuotationStatus::Draft,
                to: QuotationStatus::Approved,
            })
        );
        assert!(QuotationStatus::Approved.decide(false).is_err());
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&QuotationStatus::Sent).unwrap();
        assert_eq!(json, "\"sent\"");
        let status: QuotationStatus = serde_json::from_str("\"approved\"").unwrap();
        assert!(status.is_final());
    }
}
