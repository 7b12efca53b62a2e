//! Text layout primitives: wrapping, currency and date formatting

use chrono::NaiveDate;

use crate::font::TextMeasure;

/// Wrap `text` into at most two lines of `max_width`
///
/// Words are packed greedily into the first line; every remaining word goes
/// on the second line, which is never wrapped again and may overflow. A
/// single word wider than the budget stays on one line.
pub fn wrap_two_lines<M: TextMeasure>(
    text: &str,
    font: &M,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let joined = words.join(" ");
    if font.text_width(&joined, size) <= max_width {
        return vec![joined];
    }

    let mut first = words[0].to_string();
    let mut split_at = words.len();
    for (i, word) in words.iter().enumerate().skip(1) {
        let candidate = format!("{} {}", first, word);
        if font.text_width(&candidate, size) > max_width {
            split_at = i;
            break;
        }
        first = candidate;
    }

    if split_at == words.len() {
        return vec![first];
    }
    vec![first, words[split_at..].join(" ")]
}

/// Indian digit grouping, no decimals: `1234567.4` → `"12,34,567"`
///
/// Zero and non-finite amounts print as `"0"`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() || amount == 0.0 {
        return "0".to_string();
    }

    let rounded = amount.round();
    let grouped = group_indian(&format!("{}", rounded.abs() as u64));
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// `DD Mon YYYY`, empty when absent
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default()
}

/// GST rate as printed: `18`, `12.5`
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        let text = format!("{:.2}", rate);
        text.trim_end_matches('0').to_string()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::font::StandardFont;
    use proptest::prelude::*;

    proptest! {
        /// Property: wrapping never drops, duplicates or reorders words
        #[test]
        fn wrap_preserves_words(words in proptest::collection::vec("[A-Za-z0-9,.]{1,12}", 1..30), width in 40.0f32..400.0) {
            let text = words.join(" ");
            let lines = wrap_two_lines(&text, &StandardFont::Helvetica, 9.0, width);
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
        }

        /// Property: one line iff the text fits, two lines otherwise
        #[test]
        fn wrap_line_count_matches_fit(words in proptest::collection::vec("[a-z]{1,10}", 2..30), width in 40.0f32..400.0) {
            let text = words.join(" ");
            let fits = StandardFont::Helvetica.text_width(&text, 9.0) <= width;
            let lines = wrap_two_lines(&text, &StandardFont::Helvetica, 9.0, width);
            prop_assert_eq!(lines.len(), if fits { 1 } else { 2 });
        }

        /// Property: the grouped string has the same digits as the rounded amount
        #[test]
        fn currency_keeps_digits(amount in 1.0f64..1e12) {
            let formatted = format_currency(amount);
            let digits: String = formatted.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(digits, format!("{}", amount.round() as u64));
        }
    }
}
