//! Domain calculations that need no I/O: slot availability, subsidized
//! pricing and pledge statistics.

pub mod availability;
pub mod pledge_stats;
pub mod pricing;

pub use availability::{Availability, ALL_TIME_SLOTS};
pub use pledge_stats::PledgeStats;
pub use pricing::{PriceQuote, RateCard};
