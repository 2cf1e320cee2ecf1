//! Decoding Strategy Module
//!
//! The core decoder handles one document on one thread. Strategies here
//! drive it over many documents.

pub mod parallel;

pub use parallel::{open_all, parse_all};
