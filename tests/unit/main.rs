//! Unit test modules.

mod points_test;
mod redemption_test;
mod stats_test;
