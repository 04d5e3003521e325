//! Core pricing calculation functions.
//!
//! Pure functions for the estimate math - no I/O, no shared state.
//! Everything is computed in `Decimal`; floats never reach a price.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::rates::{EstimateSpread, GuestTiers, RateTable};
use super::requests::{Booking, BookingType, YesNo};

/// Round to specified decimal places, halves rounding away from zero.
///
/// For the non-negative totals the estimator produces this is plain
/// half-up rounding.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use soft_pricing_estimator::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1377.5), 0), dec!(1378));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Straight-line value between two `(hours, rate)` points.
///
/// Multiplies before dividing so both end points are reproduced exactly.
fn interpolate(from: (u32, Decimal), to: (u32, Decimal), hours: u32) -> Option<Decimal> {
    let (from_hours, from_rate) = from;
    let (to_hours, to_rate) = to;
    let span = Decimal::from(to_hours - from_hours);
    let climb = to_rate
        .checked_sub(from_rate)?
        .checked_mul(Decimal::from(hours - from_hours))?
        .checked_div(span)?;
    from_rate.checked_add(climb)
}

/// `base + hours * hourly`, or `None` on overflow
fn hourly_past(base: Decimal, hours: u32, hourly: Decimal) -> Option<Decimal> {
    base.checked_add(Decimal::from(hours).checked_mul(hourly)?)
}

/// Price of the primary photographer for `total_hours` of coverage.
///
/// Flat up to the first checkpoint, linear between checkpoints, and past
/// the last checkpoint the tier's hourly rate applies. `None` when the
/// rate table's amounts overflow `Decimal`.
pub fn primary_coverage(
    total_hours: u32,
    booking_type: BookingType,
    rates: &RateTable,
) -> Option<Decimal> {
    let checkpoints = &rates.checkpoints;
    let first = checkpoints[0];
    if total_hours <= first.hours {
        return Some(first.rate);
    }

    for pair in checkpoints.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if total_hours <= hi.hours {
            return interpolate((lo.hours, lo.rate), (hi.hours, hi.rate), total_hours);
        }
    }

    let last = rates.last_checkpoint();
    hourly_past(
        last.rate,
        total_hours - last.hours,
        rates.post_checkpoint_rate(booking_type),
    )
}

/// Second shooter: flat fee, plus the hourly add-on for hours past the last checkpoint.
pub fn second_shooter_cost(
    second_shooter: bool,
    total_hours: u32,
    rates: &RateTable,
) -> Option<Decimal> {
    if !second_shooter {
        return Some(Decimal::ZERO);
    }

    let flat = rates.options.second_shooter;
    let last = rates.last_checkpoint();
    if total_hours > last.hours {
        hourly_past(
            flat,
            total_hours - last.hours,
            rates.post_checkpoint.second_shooter,
        )
    } else {
        Some(flat)
    }
}

/// Sum of add-on options. Each option is independent of the others.
pub fn options_total(booking: &Booking, rates: &RateTable) -> Option<Decimal> {
    let options = &rates.options;
    let flat = |choice: YesNo, price: Decimal| {
        if choice.is_yes() {
            price
        } else {
            Decimal::ZERO
        }
    };

    [
        flat(booking.album, options.album),
        Decimal::from(booking.locations).checked_mul(options.location)?,
        flat(booking.engagement, options.engagement),
        flat(booking.rehearsal, options.rehearsal),
        flat(booking.second_day, options.second_day),
        flat(booking.drone, options.drone),
    ]
    .into_iter()
    .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Step-function multiplier for guest count. Unknown counts pay no surcharge.
pub fn guest_factor(guest_count: Option<u32>, tiers: &GuestTiers) -> Option<Decimal> {
    match guest_count {
        Some(guests) if guests > tiers.level2 => Decimal::ONE.checked_add(tiers.pct2),
        Some(guests) if guests > tiers.level1 => Decimal::ONE.checked_add(tiers.pct1),
        _ => Some(Decimal::ONE),
    }
}

/// Apply the quoted spread to a surcharged total and round each bound on its own.
pub fn price_range(total: Decimal, spread: &EstimateSpread) -> Option<(Decimal, Decimal)> {
    Some((
        round_money(total.checked_mul(spread.low)?, 0),
        round_money(total.checked_mul(spread.high)?, 0),
    ))
}

/// Full surcharged total for a sanitized booking, or `None` if it overflows.
pub fn calculate_total(booking: &Booking, rates: &RateTable) -> Option<Decimal> {
    let total_hours = booking.total_hours();
    let booking_type = booking.booking_type(rates.micro_max_guests);

    let pre_surcharge = primary_coverage(total_hours, booking_type, rates)?
        .checked_add(second_shooter_cost(booking.second_shooter, total_hours, rates)?)?
        .checked_add(options_total(booking, rates)?)?;

    pre_surcharge
        .checked_mul(guest_factor(booking.guest_count, &rates.guest_tiers)?)?
        .checked_mul(rates.timeline.multiplier(booking.timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::requests::Timeline;
    use rust_decimal_macros::dec;

    fn traditional(hours: u32) -> Decimal {
        primary_coverage(hours, BookingType::Traditional, &RateTable::default()).unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(4.4999), 0), dec!(4));
        assert_eq!(round_money(dec!(1667.5), 0), dec!(1668));
    }

    #[test]
    fn test_round_money_decimal_places() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== primary_coverage tests ====================

    #[test]
    fn test_primary_flat_up_to_first_checkpoint() {
        assert_eq!(traditional(0), dec!(1450));
        assert_eq!(traditional(2), dec!(1450));
        assert_eq!(traditional(3), dec!(1450));
    }

    #[test]
    fn test_primary_bridges_between_checkpoints() {
        // (2800 - 1450) / 2 = 675 per hour
        assert_eq!(traditional(4), dec!(2125));
        assert_eq!(traditional(5), dec!(2800));
        // (3800 - 2800) / 3 per hour
        assert_eq!(round_money(traditional(6), 2), dec!(3133.33));
        assert_eq!(round_money(traditional(7), 2), dec!(3466.67));
        assert_eq!(traditional(8), dec!(3800));
    }

    #[test]
    fn test_primary_post_checkpoint_depends_on_tier() {
        let rates = RateTable::default();
        assert_eq!(traditional(10), dec!(4300));
        assert_eq!(primary_coverage(10, BookingType::Micro, &rates), Some(dec!(4100)));
        assert_eq!(traditional(48), dec!(3800) + dec!(40) * dec!(250));
    }

    #[test]
    fn test_primary_tier_ignored_up_to_last_checkpoint() {
        let rates = RateTable::default();
        for hours in 0..=8 {
            assert_eq!(
                primary_coverage(hours, BookingType::Micro, &rates),
                primary_coverage(hours, BookingType::Traditional, &rates)
            );
        }
    }

    #[test]
    fn test_primary_continuous_at_checkpoints() {
        let rates = RateTable::default();
        for checkpoint in rates.checkpoints {
            // Left-hand formula at the checkpoint equals the anchor rate.
            assert_eq!(traditional(checkpoint.hours), checkpoint.rate);
        }
        // Right-hand formula past the last checkpoint starts from its rate.
        let last = rates.last_checkpoint();
        assert_eq!(
            traditional(last.hours + 1) - rates.post_checkpoint.traditional,
            last.rate
        );
    }

    #[test]
    fn test_primary_non_decreasing() {
        let rates = RateTable::default();
        for booking_type in [BookingType::Micro, BookingType::Traditional] {
            let mut previous = Decimal::ZERO;
            for hours in 0..=48 {
                let price = primary_coverage(hours, booking_type, &rates).unwrap();
                assert!(price >= previous, "price dropped at {}h", hours);
                previous = price;
            }
        }
    }

    // ==================== second_shooter_cost tests ====================

    #[test]
    fn test_second_shooter_cost() {
        let rates = RateTable::default();
        assert_eq!(second_shooter_cost(false, 12, &rates), Some(dec!(0)));
        assert_eq!(second_shooter_cost(true, 3, &rates), Some(dec!(500)));
        assert_eq!(second_shooter_cost(true, 8, &rates), Some(dec!(500)));
        assert_eq!(second_shooter_cost(true, 10, &rates), Some(dec!(750)));
    }

    // ==================== options_total tests ====================

    #[test]
    fn test_options_total_none_selected() {
        assert_eq!(
            options_total(&Booking::default(), &RateTable::default()),
            Some(dec!(0))
        );
    }

    #[test]
    fn test_options_total_all_selected() {
        let booking = Booking {
            album: YesNo::Yes,
            locations: 3,
            engagement: YesNo::Yes,
            rehearsal: YesNo::Yes,
            second_day: YesNo::Yes,
            drone: YesNo::Yes,
            ..Booking::default()
        };
        // 350 + 3*250 + 495 + 750 + 1250 + 300
        assert_eq!(options_total(&booking, &RateTable::default()), Some(dec!(3895)));
    }

    // ==================== guest_factor tests ====================

    #[test]
    fn test_guest_factor_tiers() {
        let tiers = RateTable::default().guest_tiers;
        assert_eq!(guest_factor(None, &tiers), Some(dec!(1)));
        assert_eq!(guest_factor(Some(0), &tiers), Some(dec!(1)));
        assert_eq!(guest_factor(Some(300), &tiers), Some(dec!(1)));
        assert_eq!(guest_factor(Some(301), &tiers), Some(dec!(1.10)));
        assert_eq!(guest_factor(Some(500), &tiers), Some(dec!(1.10)));
        assert_eq!(guest_factor(Some(501), &tiers), Some(dec!(1.15)));
        assert_eq!(guest_factor(Some(2000), &tiers), Some(dec!(1.15)));
    }

    // ==================== price_range / calculate_total tests ====================

    #[test]
    fn test_price_range_rounds_bounds_independently() {
        let spread = RateTable::default().spread;
        assert_eq!(price_range(dec!(1450), &spread), Some((dec!(1378), dec!(1668))));
        assert_eq!(price_range(dec!(0), &spread), Some((dec!(0), dec!(0))));
    }

    #[test]
    fn test_calculate_total_applies_factors_multiplicatively() {
        let booking = Booking {
            coverage_hours: 5,
            guest_count: Some(600),
            timeline: Timeline::FourWeeks,
            ..Booking::default()
        };
        // 2800 * 1.15 * 1.35
        assert_eq!(
            calculate_total(&booking, &RateTable::default()),
            Some(dec!(4347.00))
        );
    }

    #[test]
    fn test_calculate_total_ten_hours_with_second_shooter() {
        let booking = Booking {
            coverage_hours: 8,
            extra_hours: 2,
            second_shooter: true,
            ..Booking::default()
        };
        // Traditional: 3800 + 2*250, then 500 + 2*125
        assert_eq!(
            calculate_total(&booking, &RateTable::default()),
            Some(dec!(5050))
        );
    }

    #[test]
    fn test_calculate_total_overflow_is_none() {
        let mut rates = RateTable::default();
        rates.options.drone = Decimal::MAX;
        let booking = Booking {
            drone: YesNo::Yes,
            timeline: Timeline::FourWeeks,
            ..Booking::default()
        };
        assert_eq!(calculate_total(&booking, &rates), None);

        rates.options.drone = dec!(0);
        rates.post_checkpoint.traditional = Decimal::MAX;
        assert_eq!(primary_coverage(9, BookingType::Traditional, &rates), None);
    }

    #[test]
    fn test_price_range_overflow_is_none() {
        let spread = RateTable::default().spread;
        assert_eq!(price_range(Decimal::MAX, &spread), None);
    }
}
