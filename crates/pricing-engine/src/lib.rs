//! Pricing reconciliation and legal-total wording
//!
//! Maps a free-form list of priced items onto the fixed 11-row schedule,
//! computes the standard and launch tiers with GST, and spells the total in
//! Indian-numbering words.

pub mod canonical;
pub mod reconcile;
pub mod totals;
pub mod words;

pub use canonical::CanonicalLineLabel;
pub use reconcile::{reconcile, ReconciledLineItem};
pub use totals::PricingTotals;
pub use words::to_words;

/// Reconciled rows plus the totals derived from them
#[derive(Debug, Clone, serde::Serialize)]
pub struct PricingSummary {
    pub items: Vec<ReconciledLineItem>,
    pub totals: PricingTotals,
    pub gst_rate: f64,
}

impl PricingSummary {
    /// Reconcile the record's items and compute both tiers
    pub fn for_record(record: &quote_types::QuotationRecord) -> Self {
        let items = reconcile(&record.pricing_items);
        let gst_rate = record.gst_rate();
        let totals = PricingTotals::compute(&items, gst_rate);
        Self {
            items,
            totals,
            gst_rate,
        }
    }

    /// The legal total line, spelled from the launch grand total
    pub fn total_in_words(&self) -> String {
        to_words(self.totals.launch_grand_total)
    }
}
