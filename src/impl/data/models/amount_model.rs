use std::{str::FromStr, sync::LazyLock};

use fractic_server_error::ServerError;
use regex::Regex;
use rust_decimal::{prelude::FromPrimitive as _, Decimal};

use crate::{domain::logic::utils::round_cents, entities::RawCell, errors::InvalidAmount};

/// Currency markers and every kind of whitespace (including the non-breaking
/// and narrow non-breaking spaces used as thousands separators), plus the
/// apostrophe used the same way.
static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s|'|€|\$|£|eur|usd|gbp|chf")
        .expect("hardcoded regex should be valid")
});

/// Largest magnitude accepted for a single amount (10^15). Sums and rate
/// ratios over such amounts stay well inside the `Decimal` range.
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Monetary amount rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AmountModel(pub Decimal);

impl AmountModel {
    fn bounded(amount: Decimal, raw: &str) -> Result<Self, ServerError> {
        let amount = round_cents(amount);
        if amount.abs() > MAX_AMOUNT {
            return Err(InvalidAmount::new(raw));
        }
        Ok(AmountModel(amount))
    }
}

impl FromStr for AmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = NOISE.replace_all(s, "");
        let is_parenthesized = raw.starts_with('(') && raw.ends_with(')');
        let unsigned = raw
            .trim_matches(|c| c == '(' || c == ')')
            .trim_start_matches('+');
        let numeric_part = normalize_separators(unsigned);
        let amount =
            Decimal::from_str(&numeric_part).map_err(|_| InvalidAmount::new(s.trim()))?;
        let signed = if is_parenthesized { -amount } else { amount };
        AmountModel::bounded(signed, s.trim())
    }
}

impl TryFrom<&RawCell> for AmountModel {
    type Error = ServerError;
    fn try_from(cell: &RawCell) -> Result<Self, Self::Error> {
        match cell {
            RawCell::Empty => Ok(AmountModel(Decimal::ZERO)),
            RawCell::Text(s) if s.trim().is_empty() => Ok(AmountModel(Decimal::ZERO)),
            RawCell::Text(s) => AmountModel::from_str(s),
            RawCell::Number(n) => Decimal::from_f64(*n)
                .ok_or_else(|| InvalidAmount::new(&n.to_string()))
                .and_then(|d| AmountModel::bounded(d, &n.to_string())),
            other => Err(InvalidAmount::new(&other.display())),
        }
    }
}

impl Into<Decimal> for AmountModel {
    fn into(self) -> Decimal {
        self.0
    }
}

/// Rewrites the digits so that '.' is the only (decimal) separator. When both
/// ',' and '.' occur, the last one is the decimal mark; a separator repeated
/// several times can only be a thousands separator.
fn normalize_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');
    match (last_comma, last_dot) {
        (Some(c), Some(d)) if c > d => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) if s.matches(',').count() > 1 => s.replace(',', ""),
        (Some(_), None) => s.replace(',', "."),
        (None, Some(_)) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}

/// Lenient amount parsing: anything unparseable counts as zero.
pub fn clean_amount(raw: &RawCell) -> Decimal {
    match AmountModel::try_from(raw) {
        Ok(amount) => amount.into(),
        Err(_) => {
            log::debug!("unparseable amount {:?}, using 0.00", raw);
            Decimal::ZERO
        }
    }
}
