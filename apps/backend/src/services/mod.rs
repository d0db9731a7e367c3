//! Business rules. Every mutating entrypoint takes the caller's
//! `&DatabaseTransaction` and starts by locking the stage catalogue.

pub mod notifications;
pub mod registration_trigger;
pub mod stages;
pub mod teams;
pub mod users;
