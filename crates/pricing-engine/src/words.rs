//! Indian-numbering amount in words
//!
//! `123_45_678` reads "One Crore Twenty Three Lakh Forty Five Thousand Six
//! Hundred Seventy Eight".

use tracing::warn;

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;
const HUNDRED: u64 = 100;

/// `"Rupees <Words> Only"` for the floored amount
///
/// Paise are dropped, not rounded. Negative and non-finite amounts are
/// clamped to zero.
pub fn to_words(amount: f64) -> String {
    let rupees = if amount.is_finite() && amount >= 0.0 {
        amount.floor() as u64
    } else {
        warn!(amount, "Amount cannot be spelled, using zero");
        0
    };

    if rupees == 0 {
        return "Rupees Zero Only".to_string();
    }
    format!("Rupees {} Only", spell(rupees))
}

fn spell(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < HUNDRED {
        let tens = TENS[(n / 10) as usize];
        return match n % 10 {
            0 => tens.to_string(),
            unit => format!("{} {}", tens, ONES[unit as usize]),
        };
    }

    let (divisor, unit) = if n < THOUSAND {
        (HUNDRED, "Hundred")
    } else if n < LAKH {
        (THOUSAND, "Thousand")
    } else if n < CRORE {
        (LAKH, "Lakh")
    } else {
        (CRORE, "Crore")
    };

    let head = format!("{} {}", spell(n / divisor), unit);
    match n % divisor {
        0 => head,
        rest => format!("{} {}", head, spell(rest)),
    }
}
