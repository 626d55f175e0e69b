use std::fmt;

use rust_decimal::Decimal;
use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VatRate {
    /// 5.5 % (taux réduit).
    Reduced,
    /// 10 % (taux intermédiaire).
    Intermediate,
    /// 20 % (taux normal).
    Standard,
    /// 0 %: exports, exempt sales.
    Exempt,
    /// Blended rate, not attributable to a single legal rate.
    Mixed,
    /// Explicit rate read from the source that is not a legal rate.
    Other(Decimal),
}

impl VatRate {
    pub const LEGAL: [VatRate; 4] = [
        VatRate::Exempt,
        VatRate::Reduced,
        VatRate::Intermediate,
        VatRate::Standard,
    ];

    /// Rate in percent, if it is a single known rate.
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            VatRate::Reduced => Some(Decimal::new(55, 1)),
            VatRate::Intermediate => Some(Decimal::new(10, 0)),
            VatRate::Standard => Some(Decimal::new(20, 0)),
            VatRate::Exempt => Some(Decimal::ZERO),
            VatRate::Mixed => None,
            VatRate::Other(r) => Some(*r),
        }
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(p) => write!(f, "{}%", p.normalize()),
            None => write!(f, "mixed"),
        }
    }
}
