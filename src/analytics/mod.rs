//! Fuel and maintenance analytics.
//!
//! Every computation here is a pure function over in-memory records. Nothing
//! reads the clock: date windows are anchored on a caller-supplied `now`.
//! [`aggregate::compute_analytics`] runs them all and assembles the report.

pub mod aggregate;
pub mod behavior;
pub mod efficiency;
pub mod environment;
pub mod maintenance;
pub mod optimization;
pub mod periods;
pub mod savings;
pub mod trends;
pub mod types;
pub mod utility;

#[cfg(test)]
mod test_support;

pub use aggregate::compute_analytics;
pub use types::AnalyticsReport;
