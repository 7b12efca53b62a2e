//! The fixed pricing schedule
//!
//! The pricing table always shows these eleven rows in this order, whatever
//! the record supplied.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CanonicalLineLabel {
    BasicCost,
    Installation,
    AdditionalDoorCost,
    CabinUpgrade,
    FalseCeiling,
    GlassDoor,
    CustomCabinSize,
    RalColourFinish,
    Transportation,
    ExtendedWarranty,
    LopCop,
}

/// Substrings marking a row that does not apply when the record omits it
const NA_MARKERS: [&str; 2] = ["Door Cost", "RAL Colour"];

/// Substrings marking a row waived in the launch tier when the record omits it
const COMPLIMENTARY_MARKERS: [&str; 6] =
    ["Cabin", "Ceiling", "Door", "Size", "Transportation", "LOP"];

impl CanonicalLineLabel {
    pub const ALL: [CanonicalLineLabel; 11] = [
        CanonicalLineLabel::BasicCost,
        CanonicalLineLabel::Installation,
        CanonicalLineLabel::AdditionalDoorCost,
        CanonicalLineLabel::CabinUpgrade,
        CanonicalLineLabel::FalseCeiling,
        CanonicalLineLabel::GlassDoor,
        CanonicalLineLabel::CustomCabinSize,
        CanonicalLineLabel::RalColourFinish,
        CanonicalLineLabel::Transportation,
        CanonicalLineLabel::ExtendedWarranty,
        CanonicalLineLabel::LopCop,
    ];

    /// Row text as printed in the pricing table
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalLineLabel::BasicCost => "Basic Cost",
            CanonicalLineLabel::Installation => "Installation",
            CanonicalLineLabel::AdditionalDoorCost => "Additional Door Cost",
            CanonicalLineLabel::CabinUpgrade => "Cabin Upgrade",
            CanonicalLineLabel::FalseCeiling => "False Ceiling",
            CanonicalLineLabel::GlassDoor => "Glass Door",
            CanonicalLineLabel::CustomCabinSize => "Custom Cabin Size",
            CanonicalLineLabel::RalColourFinish => "RAL Colour Finish",
            CanonicalLineLabel::Transportation => "Transportation",
            CanonicalLineLabel::ExtendedWarranty => "Extended Warranty",
            CanonicalLineLabel::LopCop => "LOP - COP",
        }
    }

    /// Case-insensitive, trimmed exact match of a free-form row name
    pub fn match_label(freeform: &str) -> Option<CanonicalLineLabel> {
        let needle = freeform.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(needle))
    }

    pub fn matches(self, freeform: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(freeform.trim())
    }

    /// Inferred NA flag for a row the record did not supply
    pub fn default_is_na(self) -> bool {
        let text = self.as_str();
        NA_MARKERS.iter().any(|marker| text.contains(marker))
    }

    /// Inferred complimentary flag for a row the record did not supply
    pub fn default_is_complimentary(self) -> bool {
        let text = self.as_str();
        COMPLIMENTARY_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
    }
}

impl std::fmt::Display for CanonicalLineLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
