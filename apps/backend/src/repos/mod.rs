//! Repository functions: domain models over the SeaORM adapters.

pub mod memberships;
pub mod stages;
pub mod teams;
pub mod users;
