//! Content-stream drawing surface for one overlay page

use crate::font::{StandardFont, TextMeasure};

/// Resource name of the embedded template page
pub const BACKGROUND_RESOURCE: &str = "Bg";

/// Resource name of the header logo
pub const LOGO_RESOURCE: &str = "Logo";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const DARK: Color = Color::rgb(0.13, 0.15, 0.2);
    pub const GREY: Color = Color::rgb(0.42, 0.45, 0.5);
    pub const RULE: Color = Color::rgb(0.8, 0.82, 0.85);
    pub const GOLD: Color = Color::rgb(0.79, 0.64, 0.25);
    pub const GOLD_TINT: Color = Color::rgb(0.98, 0.95, 0.87);
    pub const HEADER_FILL: Color = Color::rgb(0.16, 0.19, 0.26);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Escape special characters for PDF string literals
pub fn escape_pdf_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '(' => "\\(".to_string(),
            ')' => "\\)".to_string(),
            '\\' => "\\\\".to_string(),
            _ if c.is_ascii() && !c.is_ascii_control() => c.to_string(),
            _ => "?".to_string(), // Standard-14 fonts only cover WinAnsi
        })
        .collect()
}

/// Drawing operations for one page, in PDF user space (origin bottom-left)
#[derive(Debug, Clone)]
pub struct PageCanvas {
    width: f32,
    height: f32,
    ops: String,
    uses_logo: bool,
}

impl PageCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: String::new(),
            uses_logo: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Y coordinate `offset` units below the top edge
    pub fn from_top(&self, offset: f32) -> f32 {
        self.height - offset
    }

    pub fn uses_logo(&self) -> bool {
        self.uses_logo
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ops.push_str(&format!(
            "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re f\nQ\n",
            color.r, color.g, color.b, x, y, width, height
        ));
    }

    /// Paint the whole page white, hiding the template underneath
    pub fn white_out(&mut self) {
        self.fill_rect(0.0, 0.0, self.width, self.height, Color::WHITE);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color) {
        self.ops.push_str(&format!(
            "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
            color.r, color.g, color.b, thickness, x1, y1, x2, y2
        ));
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, thickness: f32, color: Color) {
        self.line(x1, y, x2, y, thickness, color);
    }

    pub fn vline(&mut self, x: f32, y1: f32, y2: f32, thickness: f32, color: Color) {
        self.line(x, y1, x, y2, thickness, color);
    }

    /// Text with its baseline starting at `(x, y)`
    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        self.ops.push_str(&format!(
            "BT\n{:.3} {:.3} {:.3} rg\n/{} {:.2} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            color.r,
            color.g,
            color.b,
            font.resource_name(),
            size,
            x,
            y,
            escape_pdf_string(text)
        ));
    }

    /// Text aligned within `[x, x + width]`
    #[allow(clippy::too_many_arguments)]
    pub fn text_aligned(
        &mut self,
        x: f32,
        width: f32,
        y: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        color: Color,
        align: Align,
    ) {
        let text_width = font.text_width(text, size);
        let start = match align {
            Align::Left => x,
            Align::Center => x + (width - text_width) / 2.0,
            Align::Right => x + width - text_width,
        };
        self.text(start, y, text, font, size, color);
    }

    /// Draw the embedded template page at full size
    pub fn background(&mut self) {
        self.ops
            .push_str(&format!("q\n/{} Do\nQ\n", BACKGROUND_RESOURCE));
    }

    /// Draw the logo image scaled into `width` x `height` at `(x, y)`
    pub fn logo(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.uses_logo = true;
        self.ops.push_str(&format!(
            "q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/{} Do\nQ\n",
            width, height, x, y, LOGO_RESOURCE
        ));
    }

    pub fn into_content(self) -> Vec<u8> {
        self.ops.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pdf_string_basic() {
        assert_eq!(escape_pdf_string("Hello"), "Hello");
        assert_eq!(escape_pdf_string("(test)"), "\\(test\\)");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_pdf_string("₹ 500"), "? 500");
    }

    #[test]
    fn test_text_emits_font_and_string() {
        let mut canvas = PageCanvas::new(595.0, 842.0);
        canvas.text(45.0, 700.0, "Quote (A)", StandardFont::HelveticaBold, 12.0, Color::DARK);
        let content = String::from_utf8(canvas.into_content()).unwrap();
        assert!(content.contains("/F2 12.00 Tf"));
        assert!(content.contains("45.00 700.00 Td"));
        assert!(content.contains("(Quote \\(A\\)) Tj"));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut canvas = PageCanvas::new(595.0, 842.0);
        canvas.text(0.0, 0.0, "", StandardFont::Helvetica, 9.0, Color::BLACK);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_right_aligned_text_ends_at_edge() {
        let mut canvas = PageCanvas::new(595.0, 842.0);
        let width = StandardFont::Helvetica.text_width("1,000", 10.0);
        canvas.text_aligned(100.0, 200.0, 50.0, "1,000", StandardFont::Helvetica, 10.0, Color::BLACK, Align::Right);
        let content = String::from_utf8(canvas.into_content()).unwrap();
        assert!(content.contains(&format!("{:.2} 50.00 Td", 300.0 - width)));
    }

    #[test]
    fn test_white_out_covers_page() {
        let mut canvas = PageCanvas::new(595.0, 842.0);
        canvas.white_out();
        let content = String::from_utf8(canvas.into_content()).unwrap();
        assert!(content.contains("1.000 1.000 1.000 rg"));
        assert!(content.contains("0.00 0.00 595.00 842.00 re f"));
    }

    #[test]
    fn test_logo_marks_usage() {
        let mut canvas = PageCanvas::new(595.0, 842.0);
        assert!(!canvas.uses_logo());
        canvas.logo(460.0, 780.0, 90.0, 30.0);
        assert!(canvas.uses_logo());
        assert_eq!(canvas.from_top(42.0), 800.0);
    }
}
