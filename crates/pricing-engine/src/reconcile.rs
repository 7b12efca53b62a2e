//! Free-form items → canonical schedule

use quote_types::PricingLineItem;
use serde::Serialize;
use tracing::warn;

use crate::canonical::CanonicalLineLabel;

/// One row of the rendered pricing table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledLineItem {
    pub label: CanonicalLineLabel,
    pub description: String,
    pub standard: f64,
    pub launch: f64,
    /// Contributes to neither tier
    pub is_na: bool,
    /// Billed in the standard tier, waived in the launch tier
    pub is_complimentary: bool,
}

impl ReconciledLineItem {
    fn supplied(label: CanonicalLineLabel, item: &PricingLineItem) -> Self {
        Self {
            label,
            description: label.as_str().to_string(),
            standard: item.standard,
            launch: item.launch,
            is_na: false,
            is_complimentary: false,
        }
    }

    fn inferred(label: CanonicalLineLabel) -> Self {
        Self {
            label,
            description: label.as_str().to_string(),
            standard: 0.0,
            launch: 0.0,
            is_na: label.default_is_na(),
            is_complimentary: label.default_is_complimentary(),
        }
    }

    /// Amount counted in the standard subtotal
    pub fn standard_contribution(&self) -> f64 {
        if self.is_na {
            0.0
        } else {
            self.standard
        }
    }

    /// Amount counted in the launch subtotal
    pub fn launch_contribution(&self) -> f64 {
        if self.is_na || self.is_complimentary {
            0.0
        } else {
            self.launch
        }
    }
}

/// Map free-form items onto the canonical schedule
///
/// Always returns eleven rows in canonical order. A label with a matching
/// item takes that item's amounts and clears both flags; a label without
/// one becomes a zero row whose flags are inferred from the label text, so
/// sparse legacy records still print a complete table.
pub fn reconcile(items: &[PricingLineItem]) -> Vec<ReconciledLineItem> {
    let rows: Vec<ReconciledLineItem> = CanonicalLineLabel::ALL
        .into_iter()
        .map(|label| {
            items
                .iter()
                .find(|item| item.names().any(|name| label.matches(name)))
                .map(|item| ReconciledLineItem::supplied(label, item))
                .unwrap_or_else(|| ReconciledLineItem::inferred(label))
        })
        .collect();

    for item in items {
        if !item
            .names()
            .any(|name| CanonicalLineLabel::match_label(name).is_some())
        {
            warn!(names = ?item.names().collect::<Vec<_>>(), "Dropping pricing item that matches no canonical label");
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_yields_inferred_schedule() {
        let rows = reconcile(&[]);
        assert_eq!(rows.len(), 11);
        for (row, label) in rows.iter().zip(CanonicalLineLabel::ALL) {
            assert_eq!(row.label, label);
            assert_eq!(row.description, label.as_str());
            assert_eq!(row.standard, 0.0);
            assert_eq!(row.launch, 0.0);
            assert_eq!(row.is_na, label.default_is_na());
            assert_eq!(row.is_complimentary, label.default_is_complimentary());
        }
    }

    #[test]
    fn test_supplied_item_clears_flags() {
        let items = vec![PricingLineItem::new("additional door cost", 25000.0, 20000.0)];
        let rows = reconcile(&items);
        let door = &rows[2];
        assert_eq!(door.label, CanonicalLineLabel::AdditionalDoorCost);
        assert_eq!(door.standard, 25000.0);
        assert_eq!(door.launch, 20000.0);
        assert!(!door.is_na);
        assert!(!door.is_complimentary);
        assert_eq!(door.description, "Additional Door Cost");
    }

    #[test]
    fn test_matches_description_and_item_name() {
        let items = vec![
            PricingLineItem {
                description: Some("Installation".to_string()),
                standard: 30000.0,
                launch: 25000.0,
                ..Default::default()
            },
            PricingLineItem {
                label: Some("Something else".to_string()),
                item_name: Some("Transportation".to_string()),
                standard: 8000.0,
                launch: 0.0,
                ..Default::default()
            },
        ];
        let rows = reconcile(&items);
        assert_eq!(rows[1].standard, 30000.0);
        assert_eq!(rows[8].standard, 8000.0);
        assert!(!rows[8].is_complimentary);
    }

    #[test]
    fn test_first_match_wins() {
        let items = vec![
            PricingLineItem::new("Basic Cost", 100.0, 90.0),
            PricingLineItem::new("BASIC COST", 999.0, 999.0),
        ];
        let rows = reconcile(&items);
        assert_eq!(rows[0].standard, 100.0);
    }

    #[test]
    fn test_unmatched_items_are_ignored() {
        let items = vec![PricingLineItem::new("Civil Work", 50000.0, 50000.0)];
        let rows = reconcile(&items);
        assert!(rows.iter().all(|r| r.standard == 0.0 && r.launch == 0.0));
    }

    #[test]
    fn test_contributions() {
        let rows = reconcile(&[]);
        let door = &rows[2];
        assert!(door.is_na && door.is_complimentary);
        assert_eq!(door.standard_contribution(), 0.0);

        let mut cabin = rows[3].clone();
        cabin.standard = 5000.0;
        cabin.launch = 4000.0;
        assert_eq!(cabin.standard_contribution(), 5000.0);
        assert_eq!(cabin.launch_contribution(), 0.0);
    }
}
