//! Shared helpers for the hackathon backend test suites.
//!
//! Kept outside the backend crate so that every integration-test binary can
//! install the same subscriber and generate collision-free fixtures.

pub mod logging;
pub mod unique_helpers;
