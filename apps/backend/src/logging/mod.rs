//! Logging helpers shared by services and adapters.

pub mod pii;
