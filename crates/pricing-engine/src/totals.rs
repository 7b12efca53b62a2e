//! Tier subtotals, GST and grand totals

use serde::Serialize;

use crate::reconcile::ReconciledLineItem;

/// Derived totals for both price tiers
///
/// Recomputed from the reconciled rows on every generation and never stored.
/// No rounding is applied here; amounts are rounded only when formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PricingTotals {
    pub standard_subtotal: f64,
    pub launch_subtotal: f64,
    pub standard_tax: f64,
    pub launch_tax: f64,
    pub standard_grand_total: f64,
    pub launch_grand_total: f64,
}

impl PricingTotals {
    pub fn compute(items: &[ReconciledLineItem], gst_rate: f64) -> Self {
        let standard_subtotal: f64 = items
            .iter()
            .map(ReconciledLineItem::standard_contribution)
            .sum();
        let launch_subtotal: f64 = items
            .iter()
            .map(ReconciledLineItem::launch_contribution)
            .sum();

        let standard_tax = standard_subtotal * gst_rate / 100.0;
        let launch_tax = launch_subtotal * gst_rate / 100.0;

        Self {
            standard_subtotal,
            launch_subtotal,
            standard_tax,
            launch_tax,
            standard_grand_total: standard_subtotal + standard_tax,
            launch_grand_total: launch_subtotal + launch_tax,
        }
    }

    /// What the launch offer saves against the standard tier
    pub fn launch_savings(&self) -> f64 {
        self.standard_grand_total - self.launch_grand_total
    }
}
