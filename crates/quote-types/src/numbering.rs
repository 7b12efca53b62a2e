//! Quote number sequencing
//!
//! Numbers look like `QT-2025-007`. The next number for a year is derived from
//! the lexicographically greatest existing number with that year's prefix.
//! Nothing here is transactional: two callers reading the same maximum will
//! both produce the same next number.

use tracing::warn;

pub const QUOTE_PREFIX: &str = "QT";

fn year_prefix(year: i32) -> String {
    format!("{}-{}-", QUOTE_PREFIX, year)
}

/// Next quote number for `year`, given every number assigned so far
///
/// Numbers from other years are ignored. When the year has none, or the
/// greatest one has an unreadable suffix, the sequence starts at 001.
/// Past 999 the suffix grows to four digits, which no longer sorts after
/// three-digit suffixes. A suffix at `u32::MAX` restarts the sequence.
pub fn next_quote_number<'a, I>(existing: I, year: i32) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = year_prefix(year);

    let latest = existing
        .into_iter()
        .filter(|number| number.starts_with(&prefix))
        .max();

    let next = match latest.and_then(|number| number[prefix.len()..].parse::<u32>().ok()) {
        Some(sequence) => sequence.checked_add(1).unwrap_or_else(|| {
            warn!(year, sequence, "Quote sequence exhausted, restarting at 001");
            1
        }),
        None => 1,
    };

    format!("{}{:03}", prefix, next)
}

/// Split a quote number into `(year, sequence)`
pub fn parse_quote_number(number: &str) -> Option<(i32, u32)> {
    let mut parts = number.trim().splitn(3, '-');
    if parts.next()? != QUOTE_PREFIX {
        return None;
    }
    let year = parts.next()?.parse().ok()?;
    let sequence = parts.next()?.parse().ok()?;
    Some((year, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increments_greatest() {
        let existing = ["QT-2025-001", "QT-2025-002"];
        assert_eq!(next_quote_number(existing, 2025), "QT-2025-003");
    }

    #[test]
    fn test_first_of_year() {
        assert_eq!(next_quote_number(std::iter::empty::<&str>(), 2025), "QT-2025-001");
        let other_year = ["QT-2024-118"];
        assert_eq!(next_quote_number(other_year, 2025), "QT-2025-001");
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let existing = ["QT-2025-010", "QT-2025-002", "QT-2026-001", "QT-2025-009"];
        assert_eq!(next_quote_number(existing, 2025), "QT-2025-011");
    }

    #[test]
    fn test_unreadable_suffix_restarts() {
        let existing = ["QT-2025-draft"];
        assert_eq!(next_quote_number(existing, 2025), "QT-2025-001");
    }

    #[test]
    fn test_exhausted_sequence_restarts() {
        let existing = ["QT-2025-4294967295"];
        assert_eq!(next_quote_number(existing, 2025), "QT-2025-001");

        let existing = ["QT-2025-4294967294"];
        assert_eq!(next_quote_number(existing, 2025), "QT-2025-4294967295");
    }

    #[test]
    fn test_parse_quote_number() {
        assert_eq!(parse_quote_number("QT-2025-042"), Some((2025, 42)));
        assert_eq!(parse_quote_number("INV-2025-042"), None);
        assert_eq!(parse_quote_number("QT-2025"), None);
    }

    proptest! {
        #[test]
        fn next_number_is_one_past_max(seqs in proptest::collection::vec(1u32..999, 1..20)) {
            let numbers: Vec<String> = seqs.iter().map(|s| format!("QT-2025-{:03}", s)).collect();
            let next = next_quote_number(numbers.iter().map(String::as_str), 2025);
            let max = seqs.iter().max().copied().unwrap_or(0);
            prop_assert_eq!(parse_quote_number(&next), Some((2025, max + 1)));
        }
    }
}
