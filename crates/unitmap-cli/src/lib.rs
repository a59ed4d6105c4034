//! Unit map CLI library.
//!
//! This crate provides command-line interface utilities for the unit map
//! engine, including terminal styling and output formatting.

pub mod output;
pub mod terminal;
