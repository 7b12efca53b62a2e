//! Document assembly
//!
//! Reconciles and totals the record once, embeds the template, draws each
//! page that has a role and serializes the result.

use pricing_engine::PricingSummary;
use quote_types::QuotationRecord;
use tracing::{debug, info, instrument};

use crate::config::{Branding, RendererConfig, TemplateAssets};
use crate::error::RenderError;
use crate::logo::LogoImage;
use crate::pages::{PageContext, PageRole};
use crate::template::EmbeddedTemplate;

/// Renders quotation records against one template and logo
///
/// Holds only immutable assets, so one renderer can be shared across threads.
#[derive(Debug, Clone)]
pub struct QuotationRenderer {
    assets: TemplateAssets,
    branding: Branding,
}

impl QuotationRenderer {
    pub fn new(assets: TemplateAssets, branding: Branding) -> Self {
        Self { assets, branding }
    }

    /// Load assets from the paths in `config`
    pub fn from_config(config: &RendererConfig) -> Result<Self, RenderError> {
        Ok(Self::new(
            TemplateAssets::from_config(config)?,
            config.branding.clone(),
        ))
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Produce the finished quotation PDF
    #[instrument(skip(self, record), fields(quote_number = %record.quote_number))]
    pub fn generate(&self, record: &QuotationRecord) -> Result<Vec<u8>, RenderError> {
        let pricing = PricingSummary::for_record(record);
        let total_in_words = pricing.total_in_words();

        let logo = LogoImage::decode_png(&self.assets.logo)?;
        let mut template = EmbeddedTemplate::from_bytes(&self.assets.template)?;
        template.add_logo(&logo)?;

        for number in 1..=template.page_count() as u32 {
            let Some(role) = PageRole::for_page(number) else {
                continue;
            };
            let geometry = template.page_geometry(number).ok_or_else(|| {
                RenderError::OperationError(format!("Missing geometry for page {}", number))
            })?;

            let ctx = PageContext {
                number,
                geometry,
                record,
                pricing: &pricing,
                total_in_words: &total_in_words,
                branding: &self.branding,
                logo: &logo,
            };
            template.set_overlay(number, role.render(&ctx))?;
            debug!(page = number, ?role, "Drew page overlay");
        }

        let bytes = template.finish()?;
        info!(
            bytes = bytes.len(),
            launch_grand_total = pricing.totals.launch_grand_total,
            "Generated quotation PDF"
        );
        Ok(bytes)
    }
}
