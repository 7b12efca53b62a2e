//! Declarative table layout
//!
//! Page modules describe tables as column geometry plus a fixed row height
//! and hand rows of cells to [`TableLayout::draw_row`]. The row height never
//! adapts to content: a table with more rows than the page has room for
//! simply runs over whatever is below it.

use crate::canvas::{Align, Color, PageCanvas};
use crate::font::{StandardFont, TextMeasure};
use crate::text::wrap_two_lines;

/// Approximate cap height of Helvetica as a fraction of the font size
const CAP_HEIGHT: f32 = 0.7;

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(x: f32, width: f32, align: Align) -> Self {
        Self { x, width, align }
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub font: StandardFont,
    pub color: Color,
    /// Wrap to two lines instead of overflowing the column
    pub wrap: bool,
    /// Overrides the layout font size
    pub size: Option<f32>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: StandardFont::Helvetica,
            color: Color::DARK,
            wrap: false,
            size: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            font: StandardFont::HelveticaBold,
            ..Self::plain(text)
        }
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Row decoration
#[derive(Debug, Clone, Copy, Default)]
pub struct RowStyle {
    pub fill: Option<Color>,
}

impl RowStyle {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color) }
    }
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    pub columns: Vec<Column>,
    pub row_height: f32,
    pub font_size: f32,
    /// Horizontal inset of text inside a column
    pub padding: f32,
    /// Draw horizontal and vertical rules around every cell
    pub grid: bool,
}

impl TableLayout {
    pub fn left(&self) -> f32 {
        self.columns.first().map_or(0.0, |c| c.x)
    }

    pub fn right(&self) -> f32 {
        self.columns.last().map_or(0.0, |c| c.x + c.width)
    }

    /// Usable text width of column `index`
    pub fn text_width(&self, index: usize) -> f32 {
        self.columns
            .get(index)
            .map_or(0.0, |c| (c.width - 2.0 * self.padding).max(0.0))
    }

    /// Draw one row whose top edge is at `top`; returns the next row's top
    pub fn draw_row(
        &self,
        canvas: &mut PageCanvas,
        top: f32,
        cells: &[Cell],
        style: RowStyle,
    ) -> f32 {
        let bottom = top - self.row_height;

        if let Some(fill) = style.fill {
            canvas.fill_rect(
                self.left(),
                bottom,
                self.right() - self.left(),
                self.row_height,
                fill,
            );
        }

        for (index, (column, cell)) in self.columns.iter().zip(cells).enumerate() {
            self.draw_cell(canvas, top, index, column, cell);
        }

        if self.grid {
            canvas.hline(self.left(), self.right(), top, 0.5, Color::RULE);
            canvas.hline(self.left(), self.right(), bottom, 0.5, Color::RULE);
            for column in &self.columns {
                canvas.vline(column.x, bottom, top, 0.5, Color::RULE);
            }
            canvas.vline(self.right(), bottom, top, 0.5, Color::RULE);
        }

        bottom
    }

    fn draw_cell(
        &self,
        canvas: &mut PageCanvas,
        top: f32,
        index: usize,
        column: &Column,
        cell: &Cell,
    ) {
        let size = cell.size.unwrap_or(self.font_size);
        let available = self.text_width(index);
        let x = column.x + self.padding;

        let lines = if cell.wrap && cell.font.text_width(&cell.text, size) > available {
            wrap_two_lines(&cell.text, &cell.font, size, available)
        } else {
            vec![cell.text.clone()]
        };

        match lines.as_slice() {
            [first, second] => {
                // Two lines share the row at a slightly smaller size
                let size = size - 1.0;
                let leading = size + 1.0;
                let block = leading + CAP_HEIGHT * size;
                let baseline = top - (self.row_height - block) / 2.0 - CAP_HEIGHT * size;
                for (offset, line) in [(0.0, first), (leading, second)] {
                    canvas.text_aligned(
                        x,
                        available,
                        baseline - offset,
                        line,
                        cell.font,
                        size,
                        cell.color,
                        column.align,
                    );
                }
            }
            lines => {
                let baseline = top - (self.row_height + CAP_HEIGHT * size) / 2.0;
                if let Some(line) = lines.first() {
                    canvas.text_aligned(
                        x,
                        available,
                        baseline,
                        line,
                        cell.font,
                        size,
                        cell.color,
                        column.align,
                    );
                }
            }
        }
    }
}
