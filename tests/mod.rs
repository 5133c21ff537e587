//! Test module organization.
//!
//! This module organizes all integration tests for the memory reference model.

/// Address, bit-mask and status tests.
mod common_tests;

/// Configuration parsing and validation tests.
mod config_tests;


/// Randomised engine property tests.
mod property_tests;
