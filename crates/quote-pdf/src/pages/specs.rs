//! Page 4: technical specification table and safety features

use quote_types::TechnicalSpecs;

use super::chrome::Chrome;
use super::{or_dash, PageContext, MARGIN, ROW_HEIGHT};
use crate::canvas::{Align, Color, PageCanvas};
use crate::font::StandardFont;
use crate::layout::{Cell, Column, RowStyle, TableLayout};

/// Value column width; values wider than this less padding wrap
const VALUE_COLUMN_WIDTH: f32 = 310.0;
const BULLET_SPACING: f32 = 14.0;

pub(crate) const SAFETY_FEATURES: [&str; 9] = [
    "Automatic rescue device bringing the car to the nearest landing on power failure",
    "Overspeed governor with progressive safety gear",
    "Full-height infrared door curtain for obstruction detection",
    "Emergency alarm bell and two-way intercom in the car",
    "Battery-backed emergency light in the car",
    "Overload warning with buzzer and door hold",
    "Fireman switch for priority operation",
    "Door lock monitoring on every landing",
    "Emergency stop switches in the pit and on the car top",
];

/// Label and value of every specification row, in print order
pub(crate) fn spec_rows(specs: &TechnicalSpecs) -> [(&'static str, String); 17] {
    [
        ("Model", or_dash(specs.model.as_ref())),
        ("Number of Stops", or_dash(specs.stop_count.as_ref())),
        ("Elevator Type", or_dash(specs.elevator_type.as_ref())),
        ("Rated Load", or_dash(specs.rated_load.as_ref())),
        ("Speed", or_dash(specs.speed.as_ref())),
        ("Travel Height", or_dash(specs.travel_height.as_ref())),
        ("Drive System", or_dash(specs.drive_system.as_ref())),
        ("Control System", or_dash(specs.control_system.as_ref())),
        ("Cabin Walls", or_dash(specs.cabin_walls.as_ref())),
        ("Cabin Flooring", or_dash(specs.cabin_flooring.as_ref())),
        ("Ceiling", or_dash(specs.ceiling.as_ref())),
        ("Handrail", or_dash(specs.handrail.as_ref())),
        ("Door Type", or_dash(specs.door_type.as_ref())),
        ("Door Opening", or_dash(specs.door_opening.as_ref())),
        ("Door Finish", or_dash(specs.door_finish.as_ref())),
        ("COP / LOP", or_dash(specs.cop_lop.as_ref())),
        ("Power Supply", or_dash(specs.power_supply.as_ref())),
    ]
}

pub(super) fn draw(ctx: &PageContext<'_>, canvas: &mut PageCanvas) {
    canvas.white_out();

    let chrome = Chrome {
        title: "Technical Specifications".to_string(),
        subtitle: format!("Quotation {}", ctx.record.quote_number),
    };
    let mut top = chrome.draw(ctx, canvas);

    let label_width = ctx.content_width() - VALUE_COLUMN_WIDTH;
    let table = TableLayout {
        columns: vec![
            Column::new(MARGIN, label_width, Align::Left),
            Column::new(MARGIN + label_width, VALUE_COLUMN_WIDTH, Align::Left),
        ],
        row_height: ROW_HEIGHT,
        font_size: 9.5,
        padding: 5.0,
        grid: true,
    };

    top = table.draw_row(
        canvas,
        top,
        &[
            Cell::bold("Specification").color(Color::WHITE),
            Cell::bold("Details").color(Color::WHITE),
        ],
        RowStyle::filled(Color::HEADER_FILL),
    );
    for (label, value) in spec_rows(&ctx.record.technical) {
        top = table.draw_row(
            canvas,
            top,
            &[Cell::bold(label), Cell::plain(value).wrapped()],
            RowStyle::default(),
        );
    }

    let mut y = top - 28.0;
    canvas.text(
        MARGIN,
        y,
        "Safety & Emergency Features",
        StandardFont::HelveticaBold,
        12.0,
        Color::DARK,
    );
    y -= 8.0;
    for feature in SAFETY_FEATURES {
        y -= BULLET_SPACING;
        canvas.fill_rect(MARGIN + 2.0, y + 1.5, 4.0, 4.0, Color::GOLD);
        canvas.text(MARGIN + 14.0, y, feature, StandardFont::Helvetica, 9.5, Color::DARK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seventeen_rows_with_dashes() {
        let specs = TechnicalSpecs {
            model: Some("SkyLift 630".to_string()),
            ..Default::default()
        };
        let rows = spec_rows(&specs);
        assert_eq!(rows.len(), 17);
        assert_eq!(rows[0], ("Model", "SkyLift 630".to_string()));
        assert!(rows[1..].iter().all(|(_, value)| value == "-"));
    }
}
