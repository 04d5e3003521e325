//! Request DTOs for the estimate endpoint.

use serde::Deserialize;
use serde_json::Value;

/// Raw booking parameters exactly as the client sent them.
///
/// Every field is kept as an untyped JSON value so that malformed input
/// never fails deserialization; [`BookingRequest::sanitize`] coerces it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub coverage_hours: Option<Value>,
    #[serde(default)]
    pub extra_hours: Option<Value>,
    #[serde(default)]
    pub guest_count: Option<Value>,
    #[serde(default)]
    pub second_shooter: Option<Value>,
    #[serde(default)]
    pub album: Option<Value>,
    #[serde(default)]
    pub locs: Option<Value>,
    #[serde(default)]
    pub engagement: Option<Value>,
    #[serde(default)]
    pub rehearsal: Option<Value>,
    #[serde(default)]
    pub second_day: Option<Value>,
    #[serde(default)]
    pub drone: Option<Value>,
    #[serde(default)]
    pub timeline: Option<Value>,
}

impl BookingRequest {
    /// Build a request from any JSON document.
    ///
    /// Non-object documents carry no fields and behave like `{}`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// A "No"/"Yes" option as offered on the estimator form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YesNo {
    #[default]
    No,
    Yes,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::No, YesNo::Yes];

    pub fn label(self) -> &'static str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Yes",
        }
    }

    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

/// How far ahead of the event the booking is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeline {
    #[default]
    OneYear,
    SixMonths,
    ThreeMonths,
    FourWeeks,
}

impl Timeline {
    pub const ALL: [Timeline; 4] = [
        Timeline::OneYear,
        Timeline::SixMonths,
        Timeline::ThreeMonths,
        Timeline::FourWeeks,
    ];

    /// Label shown on the form and echoed in the checklist
    pub fn label(self) -> &'static str {
        match self {
            Timeline::OneYear => "One year (no surcharge)",
            Timeline::SixMonths => "Six months (no surcharge)",
            Timeline::ThreeMonths => "Three months (+15% surcharge)",
            Timeline::FourWeeks => "Four weeks (+35% surcharge)",
        }
    }
}

/// Service tier, decided by guest count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingType {
    Micro,
    Traditional,
}

impl BookingType {
    pub fn label(self) -> &'static str {
        match self {
            BookingType::Micro => "Micro Wedding",
            BookingType::Traditional => "Traditional Wedding",
        }
    }
}

/// Booking parameters after sanitization. Every value is in range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Booking {
    pub coverage_hours: u32,
    pub extra_hours: u32,
    /// `None` when the client gave no usable guest count.
    pub guest_count: Option<u32>,
    pub second_shooter: bool,
    pub album: YesNo,
    pub locations: u32,
    pub engagement: YesNo,
    pub rehearsal: YesNo,
    pub second_day: YesNo,
    pub drone: YesNo,
    pub timeline: Timeline,
}

impl Booking {
    pub fn total_hours(&self) -> u32 {
        self.coverage_hours + self.extra_hours
    }

    /// Micro when a known guest count is at or below `micro_max_guests`.
    /// Unknown guest counts are priced as Traditional.
    pub fn booking_type(&self, micro_max_guests: u32) -> BookingType {
        match self.guest_count {
            Some(guests) if guests <= micro_max_guests => BookingType::Micro,
            _ => BookingType::Traditional,
        }
    }
}
