use rust_decimal::{Decimal, RoundingStrategy};

/// One cent: tolerance for balance checks and "is there any VAT" tests.
pub(crate) const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds to 2 decimal places using half-up (commercial rounding).
pub(crate) fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Same as `round_cents`, at 1 decimal place.
pub(crate) fn round_tenths(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
