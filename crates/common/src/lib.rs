//! Shared types used across the order intake crates.

mod types;

pub use types::OrderId;
