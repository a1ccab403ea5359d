//! Display rounding for monetary figures
//!
//! Settlement accumulates in `f64` at full precision. Rounding happens only
//! when figures are presented, using `Decimal` so that half-way values round
//! away from zero instead of following binary floating point artefacts.

use rust_decimal::prelude::*;

/// Currency symbol used by the console
pub const CURRENCY_SYMBOL: &str = "₹";

/// Convert f64 to Decimal, mapping non-finite input to zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary figure, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to `dp` decimal places, half away from zero
#[inline]
pub fn round_decimal(value: f64, dp: u32) -> Decimal {
    to_decimal(value).round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a figure for display
pub fn round_for_display(value: f64, dp: u32) -> f64 {
    round_decimal(value, dp).to_f64().unwrap_or(0.0)
}

/// Whole-unit currency string with thousands separators, e.g. `₹12,346`
pub fn format_currency(value: f64) -> String {
    let rounded = round_decimal(value, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, CURRENCY_SYMBOL, grouped)
}
