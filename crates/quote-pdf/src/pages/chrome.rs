//! Branded header and footer shared by the full-page overlays

use super::{PageContext, MARGIN};
use crate::canvas::{Align, Color, PageCanvas};
use crate::font::StandardFont;

const LOGO_MAX_WIDTH: f32 = 90.0;
const LOGO_MAX_HEIGHT: f32 = 40.0;
const FOOTER_RULE_Y: f32 = 45.0;
const FOOTER_TEXT_Y: f32 = 30.0;

/// Header text for one page
#[derive(Debug, Clone)]
pub struct Chrome {
    pub title: String,
    pub subtitle: String,
}

impl Chrome {
    /// Draw header and footer; returns the y where page content may start
    pub fn draw(&self, ctx: &PageContext<'_>, canvas: &mut PageCanvas) -> f32 {
        let width = canvas.width();
        let right = width - MARGIN;

        canvas.hline(0.0, width, canvas.from_top(6.0), 4.0, Color::GOLD);

        let (logo_w, logo_h) = ctx.logo.fit_within(LOGO_MAX_WIDTH, LOGO_MAX_HEIGHT);
        canvas.logo(right - logo_w, canvas.from_top(18.0) - logo_h, logo_w, logo_h);

        canvas.text(
            MARGIN,
            canvas.from_top(45.0),
            &self.title,
            StandardFont::HelveticaBold,
            18.0,
            Color::DARK,
        );
        canvas.text(
            MARGIN,
            canvas.from_top(62.0),
            &self.subtitle,
            StandardFont::Helvetica,
            10.0,
            Color::GREY,
        );
        canvas.hline(MARGIN, right, canvas.from_top(74.0), 1.0, Color::GOLD);

        canvas.hline(MARGIN, right, FOOTER_RULE_Y, 0.5, Color::RULE);
        canvas.text(
            MARGIN,
            FOOTER_TEXT_Y,
            &format!("Page {}", ctx.number),
            StandardFont::Helvetica,
            8.0,
            Color::GREY,
        );
        canvas.text_aligned(
            MARGIN,
            right - MARGIN,
            FOOTER_TEXT_Y,
            &ctx.branding.confidentiality_label,
            StandardFont::HelveticaBold,
            8.0,
            Color::GREY,
            Align::Center,
        );
        canvas.text_aligned(
            MARGIN,
            right - MARGIN,
            FOOTER_TEXT_Y,
            &ctx.branding.company_name,
            StandardFont::Helvetica,
            8.0,
            Color::GREY,
            Align::Right,
        );

        canvas.from_top(92.0)
    }
}
