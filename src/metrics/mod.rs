// Derived views over canonical pitch records: summary stats, leaderboards,
// chart-ready comparison series, and trend estimation.

pub mod aggregate;
pub mod charts;
pub mod ranking;
pub mod trend;
