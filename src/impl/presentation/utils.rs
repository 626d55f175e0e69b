use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};
use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, EUR = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Format cash amount with currency symbol, correct number of decimal places
/// and thousands separators (en locale, i.e. 1,000.00 €).
pub(crate) fn format_amount(amount: Decimal, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let rounded =
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let integer_part = rounded
        .abs()
        .trunc()
        .to_i64()
        .unwrap_or_default()
        .to_formatted_string(&Locale::en);
    if decimal_places == 0 {
        return format!("{}{} {}", sign, integer_part, currency.symbol());
    }
    let fractional_part = format!("{:.*}", decimal_places as usize, rounded.abs().fract());
    format!(
        "{}{}.{} {}",
        sign,
        integer_part,
        fractional_part.split('.').nth(1).unwrap_or_default(),
        currency.symbol(),
    )
}

/// Plain 2-decimal number as a spreadsheet cell, without thousands
/// separators.
pub(crate) fn format_cell_amount(amount: Decimal, decimal_comma: bool) -> String {
    let s = format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    );
    if decimal_comma {
        s.replace('.', ",")
    } else {
        s
    }
}
