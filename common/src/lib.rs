//! Shared data model for the Nifty pre-open sentiment workspace
//!
//! The engine crate depends on these types for its inputs and reports; the
//! presentation side (CLI, or any other front end) only needs this crate to
//! build an input record and read a report back.

mod input;
mod types;

pub use input::IndicatorInput;
pub use types::{Factor, GapTag, InstitutionRole, Outcome, SentimentLabel, Track};
