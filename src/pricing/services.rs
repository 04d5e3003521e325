//! Estimate service: sanitize, price, and derive the quoted range.
//!
//! Stateless. The rate table is only ever borrowed, so concurrent calls
//! share it without any locking.

use rust_decimal::prelude::*;

use super::calculators::{calculate_total, price_range};
use super::rates::RateTable;
use super::requests::{Booking, BookingRequest};
use super::responses::{Checklist, PriceEstimate};

/// Pricing calculation error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("Estimate {bound} overflows the representable range")]
    Overflow { bound: &'static str },
}

/// Price an untrusted booking request.
///
/// Never rejects input: every field is sanitized first. The only failure
/// is a bound that cannot be represented, which callers report as a
/// generic server error.
pub fn estimate(request: &BookingRequest, rates: &RateTable) -> Result<PriceEstimate, PricingError> {
    quote(&request.sanitize(), rates)
}

/// Price an already sanitized booking
pub fn quote(booking: &Booking, rates: &RateTable) -> Result<PriceEstimate, PricingError> {
    let total = calculate_total(booking, rates).ok_or(PricingError::Overflow { bound: "total" })?;
    let (low, high) =
        price_range(total, &rates.spread).ok_or(PricingError::Overflow { bound: "range" })?;

    let min = low
        .to_i64()
        .ok_or(PricingError::Overflow { bound: "lower" })?;
    let max = high
        .to_i64()
        .ok_or(PricingError::Overflow { bound: "upper" })?;

    Ok(PriceEstimate {
        min,
        max,
        checklist: Checklist::from_booking(booking, rates.micro_max_guests),
    })
}
