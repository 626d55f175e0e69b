use rust_decimal::Decimal;

use crate::entities::VatRate;

use super::utils::{round_tenths, CENT};

/// Tolerance band around a legal rate, in percentage points. Bands widen with
/// the rate since per-unit rounding on multi-unit invoices drifts further on
/// higher rates.
#[derive(Debug, Clone, Copy)]
struct Band {
    rate: VatRate,
    center: Decimal,
    tolerance: Decimal,
}

const BANDS: [Band; 3] = [
    Band {
        rate: VatRate::Reduced,
        center: Decimal::from_parts(55, 0, 0, false, 1),
        tolerance: Decimal::from_parts(25, 0, 0, false, 2),
    },
    Band {
        rate: VatRate::Intermediate,
        center: Decimal::from_parts(10, 0, 0, false, 0),
        tolerance: Decimal::from_parts(35, 0, 0, false, 2),
    },
    Band {
        rate: VatRate::Standard,
        center: Decimal::from_parts(20, 0, 0, false, 0),
        tolerance: Decimal::from_parts(6, 0, 0, false, 1),
    },
];

/// Explicit rates further than this from every legal rate are kept as-is.
const SNAP_DISTANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Infers the VAT rate from the net (HT) and gross (TTC) amounts.
///
/// A zero net with a non-zero gross, any ratio outside the bands, and amounts
/// too large to compare are `Mixed`: no single rate explains them.
pub fn classify(net: Decimal, gross: Decimal) -> VatRate {
    if net.is_zero() {
        return if gross.is_zero() {
            VatRate::Exempt
        } else {
            VatRate::Mixed
        };
    }
    let Some(implied_rate) = gross
        .checked_div(net)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_tenths)
    else {
        return VatRate::Mixed;
    };
    if let Some(band) = BANDS.iter().find(|b| {
        implied_rate
            .checked_sub(b.center)
            .is_some_and(|d| d.abs() < b.tolerance)
    }) {
        return band.rate;
    }
    match gross.checked_sub(net) {
        Some(vat) if vat.abs() < CENT => VatRate::Exempt,
        _ => VatRate::Mixed,
    }
}

/// Maps an explicit rate (in percent) to the nearest legal rate, or keeps it
/// as `Other` when no legal rate is close.
pub fn from_explicit(percent: Decimal) -> VatRate {
    VatRate::LEGAL
        .iter()
        .filter_map(|r| r.percent().map(|p| (*r, (p - percent).abs())))
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .filter(|(_, distance)| *distance <= SNAP_DISTANCE)
        .map(|(r, _)| r)
        .unwrap_or(VatRate::Other(percent.normalize()))
}

/// Rate of a single source line: the explicit rate when the source has one,
/// inferred from the amounts otherwise.
pub fn classify_line(net: Decimal, gross: Decimal, explicit: Option<Decimal>) -> VatRate {
    match explicit {
        Some(percent) => from_explicit(percent),
        None => classify(net, gross),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn infers_legal_rates() {
        assert_eq!(classify(dec!(100), dec!(105.50)), VatRate::Reduced);
        assert_eq!(classify(dec!(100), dec!(110)), VatRate::Intermediate);
        assert_eq!(classify(dec!(100), dec!(120)), VatRate::Standard);
        assert_eq!(classify(dec!(100), dec!(100)), VatRate::Exempt);
    }

    #[test]
    fn tolerates_rounding_drift() {
        assert_eq!(classify(dec!(100), dec!(105.70)), VatRate::Reduced);
        assert_eq!(classify(dec!(100), dec!(110.30)), VatRate::Intermediate);
        assert_eq!(classify(dec!(100), dec!(120.50)), VatRate::Standard);
        assert_eq!(classify(dec!(100), dec!(119.50)), VatRate::Standard);
    }

    #[test]
    fn outside_bands_is_mixed() {
        assert_eq!(classify(dec!(100), dec!(115)), VatRate::Mixed);
        assert_eq!(classify(dec!(100), dec!(121)), VatRate::Mixed);
        assert_eq!(classify(dec!(100), dec!(105.80)), VatRate::Mixed);
    }

    #[test]
    fn zero_net() {
        assert_eq!(classify(Decimal::ZERO, Decimal::ZERO), VatRate::Exempt);
        assert_eq!(classify(Decimal::ZERO, dec!(12)), VatRate::Mixed);
    }

    #[test]
    fn huge_ratios_are_mixed() {
        assert_eq!(classify(dec!(0.01), dec!(70000000000000000000000000000)), VatRate::Mixed);
        assert_eq!(classify(Decimal::MIN, Decimal::MAX), VatRate::Mixed);
    }

    #[test]
    fn credit_notes_classify_like_invoices() {
        assert_eq!(classify(dec!(-100), dec!(-120)), VatRate::Standard);
        assert_eq!(classify(dec!(-50), dec!(-52.75)), VatRate::Reduced);
    }

    #[test]
    fn explicit_rates_snap_to_nearest_legal_rate() {
        assert_eq!(from_explicit(dec!(20)), VatRate::Standard);
        assert_eq!(from_explicit(dec!(19.6)), VatRate::Standard);
        assert_eq!(from_explicit(dec!(5.5)), VatRate::Reduced);
        assert_eq!(from_explicit(dec!(7)), VatRate::Other(dec!(7)));
        assert_eq!(from_explicit(dec!(2.1)), VatRate::Other(dec!(2.1)));
        assert_eq!(from_explicit(dec!(0)), VatRate::Exempt);
    }

    #[test]
    fn explicit_rate_takes_precedence() {
        assert_eq!(
            classify_line(dec!(100), dec!(120), Some(dec!(10))),
            VatRate::Intermediate
        );
        assert_eq!(classify_line(dec!(100), dec!(120), None), VatRate::Standard);
    }
}
