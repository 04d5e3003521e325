//! Coercion of untrusted booking fields into safe typed values.
//!
//! Every function here is total: malformed input falls back to a default
//! and nothing is ever rejected.

use serde_json::Value;

use super::requests::{Booking, BookingRequest, Timeline, YesNo};

const MAX_HOURS: i64 = 24;
const MAX_GUESTS: i64 = 2000;
const MAX_LOCATIONS: i64 = 10;

/// Loose numeric reading of a JSON value.
///
/// Returns NaN where no number can be read; callers treat any non-finite
/// result as missing.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        // Literals outside the f64 range have no finite value
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            // A one-element list reads as its element, except booleans.
            [Value::Bool(_)] => f64::NAN,
            [single] => to_number(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn parse_numeric_str(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // Rust accepts "inf"/"nan" spellings that are not numbers here.
    if trimmed
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Floor a finite number into `[min, max]`; anything unreadable becomes `default`.
pub fn clamp_int(value: Option<&Value>, min: i64, max: i64, default: i64) -> i64 {
    let n = match value {
        Some(v) => to_number(v),
        None => return default,
    };
    if !n.is_finite() {
        return default;
    }
    let floored = n.floor();
    if floored <= min as f64 {
        min
    } else if floored >= max as f64 {
        max
    } else {
        floored as i64
    }
}

/// Accept an option only on an exact, case-sensitive label match.
pub fn pick_yes_no(value: Option<&Value>) -> YesNo {
    pick(value, &YesNo::ALL, YesNo::label)
}

pub fn pick_timeline(value: Option<&Value>) -> Timeline {
    pick(value, &Timeline::ALL, Timeline::label)
}

fn pick<T: Copy + Default>(value: Option<&Value>, allowed: &[T], label: fn(T) -> &'static str) -> T {
    match value {
        Some(Value::String(s)) => allowed
            .iter()
            .copied()
            .find(|candidate| label(*candidate) == s)
            .unwrap_or_default(),
        _ => T::default(),
    }
}

/// Boolean coercion: only missing, null, false, 0 and "" are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn clamp_count(value: Option<&Value>, max: i64) -> u32 {
    // Bounded by `max`, which always fits.
    clamp_int(value, 0, max, 0) as u32
}

fn guest_count(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    if !to_number(value).is_finite() {
        return None;
    }
    Some(clamp_count(Some(value), MAX_GUESTS))
}

impl BookingRequest {
    /// Coerce every field into range. Never fails.
    pub fn sanitize(&self) -> Booking {
        Booking {
            coverage_hours: clamp_count(self.coverage_hours.as_ref(), MAX_HOURS),
            extra_hours: clamp_count(self.extra_hours.as_ref(), MAX_HOURS),
            guest_count: guest_count(self.guest_count.as_ref()),
            second_shooter: is_truthy(self.second_shooter.as_ref()),
            album: pick_yes_no(self.album.as_ref()),
            locations: clamp_count(self.locs.as_ref(), MAX_LOCATIONS),
            engagement: pick_yes_no(self.engagement.as_ref()),
            rehearsal: pick_yes_no(self.rehearsal.as_ref()),
            second_day: pick_yes_no(self.second_day.as_ref()),
            drone: pick_yes_no(self.drone.as_ref()),
            timeline: pick_timeline(self.timeline.as_ref()),
        }
    }
}
