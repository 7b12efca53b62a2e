//! Per-page overlays
//!
//! Only three template pages carry drawn content. Every other page is the
//! template background alone.

mod chrome;
mod cover;
mod pricing;
mod specs;

use pricing_engine::PricingSummary;
use quote_types::QuotationRecord;

use crate::canvas::PageCanvas;
use crate::config::Branding;
use crate::logo::LogoImage;
use crate::template::PageGeometry;

/// Left and right page margin shared by every overlay
pub(crate) const MARGIN: f32 = 45.0;

/// Row spacing of the specification and pricing tables
pub(crate) const ROW_HEIGHT: f32 = 16.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRole {
    Cover,
    TechnicalSpecification,
    Pricing,
}

impl PageRole {
    /// Role of 1-based template page `number`, if it has one
    pub fn for_page(number: u32) -> Option<PageRole> {
        match number {
            1 => Some(PageRole::Cover),
            4 => Some(PageRole::TechnicalSpecification),
            9 => Some(PageRole::Pricing),
            _ => None,
        }
    }

    /// Draw this role's overlay
    pub fn render(self, ctx: &PageContext<'_>) -> PageCanvas {
        let mut canvas = PageCanvas::new(ctx.geometry.width, ctx.geometry.height);
        match self {
            PageRole::Cover => cover::draw(ctx, &mut canvas),
            PageRole::TechnicalSpecification => specs::draw(ctx, &mut canvas),
            PageRole::Pricing => pricing::draw(ctx, &mut canvas),
        }
        canvas
    }
}

/// Everything an overlay may read; computed once per generation
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub number: u32,
    pub geometry: PageGeometry,
    pub record: &'a QuotationRecord,
    pub pricing: &'a PricingSummary,
    pub total_in_words: &'a str,
    pub branding: &'a Branding,
    pub logo: &'a LogoImage,
}

impl PageContext<'_> {
    pub(crate) fn content_width(&self) -> f32 {
        self.geometry.width - 2.0 * MARGIN
    }
}

/// Missing free-text values print as a dash
pub(crate) fn or_dash(value: Option<&String>) -> String {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
