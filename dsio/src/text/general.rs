//! `%g`-style number formatting
//!
//! Six significant digits; fixed notation when the decimal exponent lies in
//! `[-4, 6)`, scientific otherwise; trailing zeros removed.

use dsio_core::constants::text::SIGNIFICANT_DIGITS;
use std::fmt::Write;

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Append `value` formatted like C's `%g` to `out`
pub fn write_general(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("nan");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
        return;
    }
    if value == 0.0 {
        out.push_str(if value.is_sign_negative() { "-0" } else { "0" });
        return;
    }

    let precision = SIGNIFICANT_DIGITS - 1;
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        out.push_str(&scientific);
        return;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        out.push_str(&scientific);
        return;
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs());
    } else {
        let decimals = (precision as i32 - exponent) as usize;
        let fixed = format!("{value:.decimals$}");
        out.push_str(trim_fraction(&fixed));
    }
}

/// Format `value` like C's `%g`
pub fn format_general(value: f64) -> String {
    let mut out = String::new();
    write_general(&mut out, value);
    out
}
