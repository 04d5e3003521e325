//! Private rate table for the estimator.
//!
//! The table is loaded once at startup and shared read-only behind an `Arc`.
//! It implements `Deserialize` so it can come from a JSON file, but never
//! `Serialize`: nothing in this crate is able to write it into a response.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::config::ConfigError;

use super::requests::{BookingType, Timeline};

/// Fixed coverage price at a given number of hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateCheckpoint {
    pub hours: u32,
    pub rate: Decimal,
}

/// Hourly rates charged past the last checkpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PostCheckpointRates {
    pub traditional: Decimal,
    pub micro: Decimal,
    pub second_shooter: Decimal,
}

/// Flat and per-unit add-on prices
#[derive(Debug, Clone, Deserialize)]
pub struct OptionRates {
    pub second_shooter: Decimal,
    pub album: Decimal,
    pub location: Decimal,
    pub engagement: Decimal,
    pub rehearsal: Decimal,
    pub second_day: Decimal,
    pub drone: Decimal,
}

/// Guest-count surcharge tiers.
///
/// `level1 < guests <= level2` pays `pct1`, `guests > level2` pays `pct2`.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestTiers {
    pub level1: u32,
    pub pct1: Decimal,
    pub level2: u32,
    pub pct2: Decimal,
}

/// Multipliers keyed by booking lead time
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineSurcharges {
    pub one_year: Decimal,
    pub six_months: Decimal,
    pub three_months: Decimal,
    pub four_weeks: Decimal,
}

impl TimelineSurcharges {
    pub fn multiplier(&self, timeline: Timeline) -> Decimal {
        match timeline {
            Timeline::OneYear => self.one_year,
            Timeline::SixMonths => self.six_months,
            Timeline::ThreeMonths => self.three_months,
            Timeline::FourWeeks => self.four_weeks,
        }
    }
}

/// Factors applied to the surcharged total to produce the quoted range
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateSpread {
    pub low: Decimal,
    pub high: Decimal,
}

/// Complete pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// Coverage checkpoints, ascending by hours.
    pub checkpoints: [RateCheckpoint; 3],
    pub post_checkpoint: PostCheckpointRates,
    pub options: OptionRates,
    pub guest_tiers: GuestTiers,
    pub timeline: TimelineSurcharges,
    pub spread: EstimateSpread,
    /// Largest guest count still booked as a micro wedding.
    pub micro_max_guests: u32,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            checkpoints: [
                RateCheckpoint { hours: 3, rate: dec!(1450) },
                RateCheckpoint { hours: 5, rate: dec!(2800) },
                RateCheckpoint { hours: 8, rate: dec!(3800) },
            ],
            post_checkpoint: PostCheckpointRates {
                traditional: dec!(250),
                micro: dec!(150),
                second_shooter: dec!(125),
            },
            options: OptionRates {
                second_shooter: dec!(500),
                album: dec!(350),
                location: dec!(250),
                engagement: dec!(495),
                rehearsal: dec!(750),
                second_day: dec!(1250),
                drone: dec!(300),
            },
            guest_tiers: GuestTiers {
                level1: 300,
                pct1: dec!(0.10),
                level2: 500,
                pct2: dec!(0.15),
            },
            timeline: TimelineSurcharges {
                one_year: dec!(1.00),
                six_months: dec!(1.00),
                three_months: dec!(1.15),
                four_weeks: dec!(1.35),
            },
            spread: EstimateSpread {
                low: dec!(0.95),
                high: dec!(1.15),
            },
            micro_max_guests: 50,
        }
    }
}

impl RateTable {
    /// Load a rate table from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let table: RateTable = serde_json::from_str(&raw)?;
        table.validate()?;
        Ok(table)
    }

    /// Reject tables that would break the ordering or sign guarantees of an estimate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        for pair in self.checkpoints.windows(2) {
            if pair[0].hours >= pair[1].hours {
                errors.push(format!(
                    "checkpoint hours must ascend ({}h then {}h)",
                    pair[0].hours, pair[1].hours
                ));
            }
        }

        let amounts = [
            ("checkpoint rate", self.checkpoints[0].rate),
            ("checkpoint rate", self.checkpoints[1].rate),
            ("checkpoint rate", self.checkpoints[2].rate),
            ("post_checkpoint.traditional", self.post_checkpoint.traditional),
            ("post_checkpoint.micro", self.post_checkpoint.micro),
            ("post_checkpoint.second_shooter", self.post_checkpoint.second_shooter),
            ("options.second_shooter", self.options.second_shooter),
            ("options.album", self.options.album),
            ("options.location", self.options.location),
            ("options.engagement", self.options.engagement),
            ("options.rehearsal", self.options.rehearsal),
            ("options.second_day", self.options.second_day),
            ("options.drone", self.options.drone),
            ("guest_tiers.pct1", self.guest_tiers.pct1),
            ("guest_tiers.pct2", self.guest_tiers.pct2),
            ("timeline.one_year", self.timeline.one_year),
            ("timeline.six_months", self.timeline.six_months),
            ("timeline.three_months", self.timeline.three_months),
            ("timeline.four_weeks", self.timeline.four_weeks),
            ("spread.low", self.spread.low),
        ];
        for (name, amount) in amounts {
            if amount < Decimal::ZERO {
                errors.push(format!("{} must not be negative", name));
            }
        }

        if self.guest_tiers.level1 > self.guest_tiers.level2 {
            errors.push("guest_tiers.level1 must not exceed level2".to_string());
        }
        if self.spread.low > self.spread.high {
            errors.push("spread.low must not exceed spread.high".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidRates(errors.join("; ")))
        }
    }

    /// Hourly rate past the last checkpoint for the given tier
    pub fn post_checkpoint_rate(&self, booking_type: BookingType) -> Decimal {
        match booking_type {
            BookingType::Traditional => self.post_checkpoint.traditional,
            BookingType::Micro => self.post_checkpoint.micro,
        }
    }

    pub fn last_checkpoint(&self) -> RateCheckpoint {
        self.checkpoints[self.checkpoints.len() - 1]
    }
}
