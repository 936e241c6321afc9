//! Integration test suite for Coinsign.
//!
//! Pins the end-to-end transfer vector, checks algebraic laws of the coin
//! set with property tests, and feeds malformed input through every public
//! entry point.

pub mod helpers;
