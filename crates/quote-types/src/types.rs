//! Quotation record and its nested parts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loose;
use crate::status::QuotationStatus;

/// GST percentage applied when the record does not carry one
pub const DEFAULT_GST_RATE: f64 = 18.0;

/// A quotation as stored by the surrounding application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRecord {
    /// `QT-<year>-<seq>`, assigned once at creation
    #[serde(default)]
    pub quote_number: String,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default)]
    pub company_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// Site address, free text
    #[serde(default)]
    pub address: String,

    #[serde(default, deserialize_with = "loose::date")]
    pub quote_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "loose::date")]
    pub valid_until: Option<NaiveDate>,

    /// Free-form pricing rows, reconciled against the canonical schedule at render time
    #[serde(default)]
    pub pricing_items: Vec<PricingLineItem>,

    #[serde(default, alias = "technicalSpecs")]
    pub technical: TechnicalSpecs,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_terms: Vec<PaymentTerm>,

    #[serde(
        default,
        deserialize_with = "loose::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub gst_rate: Option<f64>,

    #[serde(default)]
    pub status: QuotationStatus,
}

impl QuotationRecord {
    /// GST percentage, falling back to [`DEFAULT_GST_RATE`]
    pub fn gst_rate(&self) -> f64 {
        self.gst_rate.unwrap_or(DEFAULT_GST_RATE)
    }

    /// Filename used when the rendered PDF is attached or saved
    pub fn pdf_filename(&self) -> String {
        format!("Quotation_{}.pdf", self.quote_number)
    }
}

/// One caller-supplied pricing row
///
/// Legacy records name the row under `label`, `description` or `itemName`;
/// all three are kept and matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingLineItem {
    #[serde(default, deserialize_with = "loose::text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "loose::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "loose::text", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    #[serde(default, deserialize_with = "loose::amount")]
    pub standard: f64,

    #[serde(default, deserialize_with = "loose::amount")]
    pub launch: f64,
}

impl PricingLineItem {
    pub fn new(label: &str, standard: f64, launch: f64) -> Self {
        Self {
            label: Some(label.to_string()),
            standard,
            launch,
            ..Default::default()
        }
    }

    /// Every name this row was given, in `label`, `description`, `itemName` order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.label, &self.description, &self.item_name]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }
}

/// Technical specification of the quoted elevator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSpecs {
    #[serde(deserialize_with = "loose::text")]
    pub model: Option<String>,
    #[serde(deserialize_with = "loose::text", alias = "stops")]
    pub stop_count: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub elevator_type: Option<String>,
    #[serde(deserialize_with = "loose::text", alias = "capacity")]
    pub rated_load: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub speed: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub travel_height: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub drive_system: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub control_system: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub cabin_walls: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub cabin_flooring: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub ceiling: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub handrail: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub door_type: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub door_opening: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub door_finish: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub cop_lop: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub power_supply: Option<String>,
}

/// Bank account printed on the pricing page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    #[serde(deserialize_with = "loose::text")]
    pub account_number: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub ifsc: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub bank_name: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub gstin: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub account_name: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub account_type: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub branch: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub pan: Option<String>,
}

/// One instalment of the payment schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentTerm {
    #[serde(deserialize_with = "loose::text")]
    pub sequence_number: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose::text", alias = "rate")]
    pub rate_percent_text: Option<String>,
}

impl PaymentTerm {
    pub fn new(sequence: u32, description: &str, rate: &str) -> Self {
        Self {
            sequence_number: Some(sequence.to_string()),
            description: Some(description.to_string()),
            rate_percent_text: Some(rate.to_string()),
        }
    }
}
