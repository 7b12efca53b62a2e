//! Renderer configuration and template assets

use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// Text printed in the page chrome
#[derive(Debug, Clone)]
pub struct Branding {
    /// Footer company name
    pub company_name: String,

    /// Footer confidentiality marker
    pub confidentiality_label: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "Skyline Elevators Pvt Ltd".to_string(),
            confidentiality_label: "Confidential".to_string(),
        }
    }
}

/// Where the renderer finds its assets
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Nine-page base PDF
    pub template_path: PathBuf,

    /// PNG logo drawn in the page header
    pub logo_path: PathBuf,

    pub branding: Branding,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("assets/quotation-template.pdf"),
            logo_path: PathBuf::from("assets/logo.png"),
            branding: Branding::default(),
        }
    }
}

impl RendererConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            template_path: std::env::var("QUOTE_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_path),
            logo_path: std::env::var("QUOTE_LOGO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.logo_path),
            branding: Branding {
                company_name: std::env::var("COMPANY_NAME")
                    .unwrap_or(defaults.branding.company_name),
                confidentiality_label: defaults.branding.confidentiality_label,
            },
        }
    }
}

/// Raw template and logo bytes
///
/// Passed into the renderer explicitly so tests and callers can supply
/// in-memory assets instead of files.
#[derive(Debug, Clone)]
pub struct TemplateAssets {
    pub template: Vec<u8>,
    pub logo: Vec<u8>,
}

impl TemplateAssets {
    pub fn new(template: Vec<u8>, logo: Vec<u8>) -> Self {
        Self { template, logo }
    }

    /// Read both assets from disk
    pub fn load(template_path: &Path, logo_path: &Path) -> Result<Self, RenderError> {
        Ok(Self {
            template: read_asset(template_path)?,
            logo: read_asset(logo_path)?,
        })
    }

    pub fn from_config(config: &RendererConfig) -> Result<Self, RenderError> {
        Self::load(&config.template_path, &config.logo_path)
    }
}

fn read_asset(path: &Path) -> Result<Vec<u8>, RenderError> {
    std::fs::read(path).map_err(|source| RenderError::MissingAsset {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RendererConfig::default();
        assert!(config.template_path.ends_with("quotation-template.pdf"));
        assert_eq!(config.branding.confidentiality_label, "Confidential");
    }

    #[test]
    fn test_missing_asset_is_configuration_error() {
        let err = TemplateAssets::load(
            Path::new("/nonexistent/template.pdf"),
            Path::new("/nonexistent/logo.png"),
        )
        .unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("/nonexistent/template.pdf"));
    }
}
