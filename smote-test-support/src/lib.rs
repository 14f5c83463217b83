//! Shared test utilities used across smote crates.

pub mod fixtures;
pub mod proptest_profile;
pub mod tracing;
