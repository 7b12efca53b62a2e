//! Page 9: commercial offer
//!
//! Reconciled price table, totals, amount in words, validity, payment
//! schedule and bank details. Every table has a fixed row height and no
//! overflow handling.

use pricing_engine::ReconciledLineItem;
use quote_types::{BankDetails, PaymentTerm};

use super::chrome::Chrome;
use super::{or_dash, PageContext, MARGIN, ROW_HEIGHT};
use crate::canvas::{Align, Color, PageCanvas};
use crate::font::StandardFont;
use crate::layout::{Cell, Column, RowStyle, TableLayout};
use crate::text::{format_currency, format_date, format_rate, wrap_two_lines};

const AMOUNT_COLUMN_WIDTH: f32 = 120.0;
const BANK_ROW_HEIGHT: f32 = 14.0;

/// Applied when the record carries no payment terms
pub(crate) fn default_payment_terms() -> Vec<PaymentTerm> {
    vec![
        PaymentTerm::new(1, "On order confirmation", "30%"),
        PaymentTerm::new(2, "On approval of drawings", "20%"),
        PaymentTerm::new(3, "Before dispatch of material", "40%"),
        PaymentTerm::new(4, "After testing & commissioning", "10%"),
    ]
}

/// Standard and launch column text for one reconciled row
pub(crate) fn amount_cells(item: &ReconciledLineItem) -> (String, String) {
    if item.is_na {
        ("NA".to_string(), "NA".to_string())
    } else if item.is_complimentary {
        (format_currency(item.standard), "Complimentary".to_string())
    } else {
        (format_currency(item.standard), format_currency(item.launch))
    }
}

pub(super) fn draw(ctx: &PageContext<'_>, canvas: &mut PageCanvas) {
    canvas.white_out();

    let chrome = Chrome {
        title: "Commercial Offer".to_string(),
        subtitle: format!(
            "Quotation {} for {}",
            ctx.record.quote_number, ctx.record.customer_name
        ),
    };
    let top = chrome.draw(ctx, canvas);

    let top = price_table(ctx, canvas, top);
    let top = words_and_validity(ctx, canvas, top - 14.0);
    let top = payment_terms(ctx, canvas, top - 16.0);
    if let Some(bank) = &ctx.record.bank_details {
        bank_block(bank, canvas, top - 18.0);
    }
}

fn price_table(ctx: &PageContext<'_>, canvas: &mut PageCanvas, top: f32) -> f32 {
    let description_width = ctx.content_width() - 2.0 * AMOUNT_COLUMN_WIDTH;
    let standard_x = MARGIN + description_width;
    let table = TableLayout {
        columns: vec![
            Column::new(MARGIN, description_width, Align::Left),
            Column::new(standard_x, AMOUNT_COLUMN_WIDTH, Align::Right),
            Column::new(standard_x + AMOUNT_COLUMN_WIDTH, AMOUNT_COLUMN_WIDTH, Align::Right),
        ],
        row_height: ROW_HEIGHT,
        font_size: 9.0,
        padding: 6.0,
        grid: true,
    };

    let mut top = table.draw_row(
        canvas,
        top,
        &[
            Cell::bold("Description").color(Color::WHITE),
            Cell::bold("Standard").color(Color::WHITE),
            Cell::bold("Launch Offer").color(Color::WHITE),
        ],
        RowStyle::filled(Color::HEADER_FILL),
    );

    for item in &ctx.pricing.items {
        let (standard, launch) = amount_cells(item);
        let launch = if item.is_complimentary && !item.is_na {
            Cell::plain(launch).color(Color::GOLD)
        } else {
            Cell::plain(launch)
        };
        top = table.draw_row(
            canvas,
            top,
            &[Cell::plain(&item.description), Cell::plain(standard), launch],
            RowStyle::default(),
        );
    }

    let totals = &ctx.pricing.totals;
    top = table.draw_row(
        canvas,
        top,
        &[
            Cell::bold("Total"),
            Cell::bold(format_currency(totals.standard_subtotal)),
            Cell::bold(format_currency(totals.launch_subtotal)),
        ],
        RowStyle::default(),
    );
    top = table.draw_row(
        canvas,
        top,
        &[
            Cell::plain(format!("GST @ {}%", format_rate(ctx.pricing.gst_rate))),
            Cell::plain(format_currency(totals.standard_tax)),
            Cell::plain(format_currency(totals.launch_tax)),
        ],
        RowStyle::default(),
    );
    table.draw_row(
        canvas,
        top,
        &[
            Cell::bold("Grand Total"),
            Cell::plain(format_currency(totals.standard_grand_total)).color(Color::GREY),
            Cell::bold(format_currency(totals.launch_grand_total)).size(10.5),
        ],
        RowStyle::filled(Color::GOLD_TINT),
    )
}

fn words_and_validity(ctx: &PageContext<'_>, canvas: &mut PageCanvas, top: f32) -> f32 {
    let mut y = top;
    let text = format!("Amount in words: {}", ctx.total_in_words);
    for line in wrap_two_lines(&text, &StandardFont::HelveticaBold, 9.0, ctx.content_width()) {
        canvas.text(MARGIN, y, &line, StandardFont::HelveticaBold, 9.0, Color::DARK);
        y -= 12.0;
    }

    let validity = match ctx.record.valid_until {
        Some(date) => format!(
            "This quotation is valid until {}.",
            format_date(Some(date))
        ),
        None => "This quotation is valid for 30 days from the date of issue.".to_string(),
    };
    y -= 2.0;
    canvas.text(MARGIN, y, &validity, StandardFont::Helvetica, 9.0, Color::GREY);
    y
}

fn payment_terms(ctx: &PageContext<'_>, canvas: &mut PageCanvas, top: f32) -> f32 {
    canvas.text(MARGIN, top, "Payment Terms", StandardFont::HelveticaBold, 11.0, Color::DARK);

    let terms = if ctx.record.payment_terms.is_empty() {
        default_payment_terms()
    } else {
        ctx.record.payment_terms.clone()
    };

    let table = TableLayout {
        columns: vec![
            Column::new(MARGIN, 40.0, Align::Center),
            Column::new(MARGIN + 40.0, ctx.content_width() - 120.0, Align::Left),
            Column::new(MARGIN + ctx.content_width() - 80.0, 80.0, Align::Right),
        ],
        row_height: ROW_HEIGHT,
        font_size: 9.0,
        padding: 6.0,
        grid: true,
    };

    let mut top = table.draw_row(
        canvas,
        top - 8.0,
        &[
            Cell::bold("No.").color(Color::WHITE),
            Cell::bold("Milestone").color(Color::WHITE),
            Cell::bold("Payment").color(Color::WHITE),
        ],
        RowStyle::filled(Color::HEADER_FILL),
    );
    for term in &terms {
        top = table.draw_row(
            canvas,
            top,
            &[
                Cell::plain(or_dash(term.sequence_number.as_ref())),
                Cell::plain(or_dash(term.description.as_ref())),
                Cell::bold(or_dash(term.rate_percent_text.as_ref())),
            ],
            RowStyle::default(),
        );
    }
    top
}

fn bank_block(bank: &BankDetails, canvas: &mut PageCanvas, top: f32) {
    canvas.text(MARGIN, top, "Bank Details", StandardFont::HelveticaBold, 11.0, Color::DARK);

    let half = (canvas.width() - 2.0 * MARGIN) / 2.0;
    let table = TableLayout {
        columns: vec![
            Column::new(MARGIN, 85.0, Align::Left),
            Column::new(MARGIN + 85.0, half - 85.0, Align::Left),
            Column::new(MARGIN + half, 85.0, Align::Left),
            Column::new(MARGIN + half + 85.0, half - 85.0, Align::Left),
        ],
        row_height: BANK_ROW_HEIGHT,
        font_size: 9.0,
        padding: 0.0,
        grid: false,
    };

    let rows = [
        ("Account No.", &bank.account_number, "Account Name", &bank.account_name),
        ("IFSC", &bank.ifsc, "Account Type", &bank.account_type),
        ("Bank", &bank.bank_name, "Branch", &bank.branch),
        ("GSTIN", &bank.gstin, "PAN", &bank.pan),
    ];
    let mut top = top - 6.0;
    for (left_label, left, right_label, right) in rows {
        top = table.draw_row(
            canvas,
            top,
            &[
                Cell::plain(left_label).color(Color::GREY),
                Cell::bold(or_dash(left.as_ref())),
                Cell::plain(right_label).color(Color::GREY),
                Cell::bold(or_dash(right.as_ref())),
            ],
            RowStyle::default(),
        );
    }
}
