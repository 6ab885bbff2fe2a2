//! Display formatting for prices.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount the way `en-US` number formatting does with 0–2
/// fraction digits: comma thousands separators, trailing zeros dropped,
/// half-away-from-zero rounding of the decimal value as written
/// (`1.005` → `"1.01"`).
///
/// `None` and NaN format as `"0"`; infinities as `"∞"` / `"-∞"`. Never
/// fails.
///
/// ```
/// use costfinders_api::format::format_money;
///
/// assert_eq!(format_money(Some(1000.0)), "1,000");
/// assert_eq!(format_money(Some(1000.5)), "1,000.5");
/// assert_eq!(format_money(Some(1.005)), "1.01");
/// assert_eq!(format_money(None), "0");
/// ```
#[must_use]
pub fn format_money(amount: Option<f64>) -> String {
    let Some(value) = amount.filter(|v| !v.is_nan()) else {
        return "0".to_string();
    };
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let magnitude = value.abs();
    let (integer, fraction) = match to_decimal(magnitude) {
        Some(exact) => {
            let rounded = exact
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
                .to_string();
            match rounded.split_once('.') {
                Some((int, frac)) => (int.to_string(), frac.to_string()),
                None => (rounded, String::new()),
            }
        }
        // Beyond `Decimal` range only whole units are significant.
        None => (format!("{magnitude:.0}"), String::new()),
    };

    if integer == "0" && fraction.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(integer.len() + integer.len() / 3 + fraction.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(&integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

/// Shortest decimal that round-trips to `value`, so `1.005` is taken as
/// written rather than as its binary expansion `1.00499…`.
fn to_decimal(value: f64) -> Option<Decimal> {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// Inserts `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
