//! Quotation PDF rendering
//!
//! Overlays computed text and vector graphics onto a fixed nine-page
//! template using lopdf. Each template page is re-embedded as a Form XObject
//! background; pages 1, 4 and 9 get drawn content on top.

pub mod assemble;
pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod logo;
pub mod pages;
pub mod template;
pub mod text;

pub use assemble::QuotationRenderer;
pub use config::{Branding, RendererConfig, TemplateAssets};
pub use error::RenderError;
pub use pages::PageRole;
pub use text::{format_currency, format_date, wrap_two_lines};

/// Pages the base template must have
pub const TEMPLATE_PAGE_COUNT: usize = 9;

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<usize, RenderError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| RenderError::TemplateParse(e.to_string()))?;
    Ok(doc.get_pages().len())
}
