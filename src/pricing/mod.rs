//! Pricing engine module for the booking estimator.
//!
//! Turns untrusted booking parameters into a price range and a checklist.
//! The rate table never leaves this module in any response.

pub mod calculators;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod sanitize;
pub mod services;

// Re-export commonly used items
pub use calculators::round_money;
pub use rates::RateTable;
pub use requests::{Booking, BookingRequest};
pub use responses::{Checklist, PriceEstimate};
pub use routes::router;
pub use services::{estimate, quote, PricingError};
