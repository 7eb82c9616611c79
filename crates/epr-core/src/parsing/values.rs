use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::debug;

/// Largest magnitude accepted from a single cell. Larger values are treated
/// as junk so that sums and products over a sheet stay inside `Decimal`.
pub const MAX_CELL_MAGNITUDE: u64 = 1_000_000_000_000_000;

/// Parse a numeric cell from an uploaded sheet.
///
/// Handles formats like:
/// - "68" -> 68
/// - "1,200.50" -> 1200.50 (thousands separators are dropped)
/// - "30%" -> 30
/// - "12.5 MT" -> 12.5 (trailing unit text is ignored)
/// - "1.5e3" -> 1500
/// - "", "-", "abc", "N/A" -> None
/// - "5e28", "1e40" -> None (beyond [`MAX_CELL_MAGNITUDE`])
pub fn parse_number(s: &str) -> Option<Decimal> {
    let compact: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let compact = compact.strip_prefix('+').unwrap_or(&compact);

    let literal = numeric_prefix(compact)?;
    let parsed = if literal.contains('e') {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };

    match parsed {
        Ok(v) if v.abs() <= Decimal::from(MAX_CELL_MAGNITUDE) => Some(v),
        Ok(v) => {
            debug!(cell = s, value = %v, "numeric cell beyond accepted magnitude, read as 0");
            None
        }
        Err(e) => {
            debug!(cell = s, error = %e, "numeric cell out of decimal range, read as 0");
            None
        }
    }
}

/// Numeric coercion applied to every quantity, percent, rate and amount.
/// Empty or non-numeric input is 0, never an error.
pub fn parse_quantity(s: &str) -> Decimal {
    parse_number(s).unwrap_or(Decimal::ZERO)
}

/// [`parse_quantity`] for an optional field; absent is 0.
pub fn quantity_of(field: Option<&str>) -> Decimal {
    field.map(parse_quantity).unwrap_or(Decimal::ZERO)
}

/// `base * percent / 100`, or 0 when the product does not fit a `Decimal`.
pub fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    match base.checked_mul(percent) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => {
            debug!(%base, %percent, "percentage product overflowed, read as 0");
            Decimal::ZERO
        }
    }
}

/// Round for display to 2 decimal places (cube cells and rollups).
pub fn round2(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round for display to 4 decimal places (projection columns).
pub fn round4(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Longest leading `-?digits[.digits][e[+-]digits]` run, normalized so that
/// `Decimal` can parse it. Returns None when no digit is found.
fn numeric_prefix(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    if chars.first() == Some(&'-') {
        out.push('-');
        i += 1;
    }

    let int_start = out.len();
    while i < chars.len() && chars[i].is_ascii_digit() {
        out.push(chars[i]);
        i += 1;
    }
    let mut digits = out.len() - int_start;

    if i < chars.len() && chars[i] == '.' {
        let frac: String = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if !frac.is_empty() {
            if digits == 0 {
                out.push('0');
            }
            out.push('.');
            out.push_str(&frac);
            digits += frac.len();
            i += 1 + frac.len();
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it: "5e" is just 5.
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        let mut exp = String::from("e");
        if j < chars.len() && (chars[j] == '-' || chars[j] == '+') {
            exp.push(chars[j]);
            j += 1;
        }
        let exp_digits: String = chars[j..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if !exp_digits.is_empty() {
            out.push_str(&exp);
            out.push_str(&exp_digits);
        }
    }

    Some(out)
}
