//! Page 1: prepared-for block and quote reference over a white bottom band

use super::{PageContext, MARGIN};
use crate::canvas::{Align, Color, PageCanvas};
use crate::font::StandardFont;
use crate::layout::{Cell, Column, RowStyle, TableLayout};
use crate::text::{format_date, wrap_two_lines};

/// Height of the band cleared at the bottom of the cover
pub(crate) const BAND_HEIGHT: f32 = 180.0;

const ADDRESS_WIDTH: f32 = 250.0;
const REFERENCE_WIDTH: f32 = 190.0;

pub(super) fn draw(ctx: &PageContext<'_>, canvas: &mut PageCanvas) {
    let record = ctx.record;

    // Upper artwork stays untouched
    canvas.fill_rect(0.0, 0.0, canvas.width(), BAND_HEIGHT, Color::WHITE);
    canvas.hline(MARGIN, canvas.width() - MARGIN, BAND_HEIGHT - 12.0, 1.0, Color::GOLD);

    canvas.text(MARGIN, 148.0, "PREPARED FOR", StandardFont::HelveticaBold, 9.0, Color::GOLD);
    canvas.text(
        MARGIN,
        131.0,
        &record.customer_name.to_uppercase(),
        StandardFont::HelveticaBold,
        14.0,
        Color::DARK,
    );

    let mut y = 116.0;
    for line in [&record.company_name, &record.email, &record.phone] {
        if !line.trim().is_empty() {
            canvas.text(MARGIN, y, line.trim(), StandardFont::Helvetica, 10.0, Color::DARK);
            y -= 13.0;
        }
    }
    for line in wrap_two_lines(&record.address, &StandardFont::Helvetica, 9.0, ADDRESS_WIDTH) {
        canvas.text(MARGIN, y, &line, StandardFont::Helvetica, 9.0, Color::GREY);
        y -= 11.0;
    }

    let left = canvas.width() - MARGIN - REFERENCE_WIDTH;
    let reference = TableLayout {
        columns: vec![
            Column::new(left, 80.0, Align::Left),
            Column::new(left + 80.0, REFERENCE_WIDTH - 80.0, Align::Right),
        ],
        row_height: 18.0,
        font_size: 10.0,
        padding: 0.0,
        grid: false,
    };

    let rows = [
        ("Quote No.", record.quote_number.clone()),
        ("Date", format_date(record.quote_date)),
        ("Valid Until", format_date(record.valid_until)),
    ];
    let mut top = 160.0;
    for (label, value) in rows {
        top = reference.draw_row(
            canvas,
            top,
            &[Cell::plain(label).color(Color::GREY).size(9.0), Cell::bold(value)],
            RowStyle::default(),
        );
    }
}
