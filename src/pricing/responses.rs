//! Response DTOs for the estimate endpoint.
//!
//! Nothing in here may carry a rate, subtotal or factor: the client only
//! ever sees the range bounds and an echo of its own sanitized inputs.

use serde::Serialize;

use super::requests::{Booking, YesNo};

/// Shown in place of values the client did not provide
pub const NOT_PROVIDED: &str = "—";

/// Quoted price range with the checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceEstimate {
    pub min: i64,
    pub max: i64,
    pub checklist: Checklist,
}

/// Display-only echo of the sanitized booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub coverage: String,
    pub total_coverage: String,
    pub second_shooter: &'static str,
    pub guest_count: String,
    #[serde(rename = "type")]
    pub booking_type: &'static str,
    pub timeline: &'static str,
    pub album: &'static str,
    pub locs: String,
    pub engagement: &'static str,
    pub rehearsal: &'static str,
    pub second_day: &'static str,
    pub drone: &'static str,
}

impl Checklist {
    pub fn from_booking(booking: &Booking, micro_max_guests: u32) -> Self {
        let coverage_label = if booking.coverage_hours == 8 {
            "8+ hours".to_string()
        } else {
            format!("{} hours", booking.coverage_hours)
        };

        let (guest_count, booking_type) = match booking.guest_count {
            Some(guests) => (
                guests.to_string(),
                booking.booking_type(micro_max_guests).label(),
            ),
            None => (NOT_PROVIDED.to_string(), NOT_PROVIDED),
        };

        Self {
            coverage: format!("{} + Extra: {}h", coverage_label, booking.extra_hours),
            total_coverage: format!("{} hours", booking.total_hours()),
            second_shooter: YesNo::from(booking.second_shooter).label(),
            guest_count,
            booking_type,
            timeline: booking.timeline.label(),
            album: booking.album.label(),
            locs: booking.locations.to_string(),
            engagement: booking.engagement.label(),
            rehearsal: booking.rehearsal.label(),
            second_day: booking.second_day.label(),
            drone: booking.drone.label(),
        }
    }
}

/// Error body returned for every rejected request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}
