//! Shared building blocks for Tally.
//!
//! This crate holds the pieces every other crate depends on:
//! typed identifiers and money rounding. No domain logic lives here.

pub mod types;
