use std::str::FromStr;

use fractic_server_error::ServerError;
use rust_decimal::{prelude::FromPrimitive as _, Decimal};

use crate::{entities::RawCell, errors::InvalidVatRate};

/// Explicit VAT rate, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VatRateModel(pub Decimal);

impl VatRateModel {
    /// Spreadsheets store "20 %" as 0.2: values strictly between 0 and 1 are
    /// fractions.
    fn from_value(value: Decimal) -> Self {
        if value > Decimal::ZERO && value < Decimal::ONE {
            VatRateModel(value * Decimal::ONE_HUNDRED)
        } else {
            VatRateModel(value)
        }
    }
}

impl FromStr for VatRateModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let is_percent = trimmed.ends_with('%');
        let numeric_part: String = trimmed
            .trim_end_matches('%')
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        let value = Decimal::from_str(&numeric_part).map_err(|_| InvalidVatRate::new(trimmed))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(InvalidVatRate::new(trimmed));
        }
        Ok(if is_percent {
            VatRateModel(value)
        } else {
            VatRateModel::from_value(value)
        })
    }
}

impl TryFrom<&RawCell> for VatRateModel {
    type Error = ServerError;
    fn try_from(cell: &RawCell) -> Result<Self, Self::Error> {
        match cell {
            RawCell::Text(s) => VatRateModel::from_str(s),
            RawCell::Number(n) if *n >= 0.0 => Decimal::from_f64(*n)
                .map(|d| VatRateModel::from_value(d.round_dp(4)))
                .ok_or_else(|| InvalidVatRate::new(&n.to_string())),
            other => Err(InvalidVatRate::new(&other.display())),
        }
    }
}

impl Into<Decimal> for VatRateModel {
    fn into(self) -> Decimal {
        self.0
    }
}

/// Lenient rate parsing: blank or unparseable input means "no explicit rate",
/// and the rate is inferred from the amounts instead.
pub fn parse_vat_rate(raw: &RawCell) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    match VatRateModel::try_from(raw) {
        Ok(r) => Some(r.into()),
        Err(_) => {
            log::debug!("unparseable VAT rate {:?}, inferring from amounts", raw);
            None
        }
    }
}
