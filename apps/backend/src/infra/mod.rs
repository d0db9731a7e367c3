//! Infrastructure layer - database bootstrap, seeding, state assembly and error mapping.

pub mod db;
pub mod db_errors;
pub mod seed;
pub mod state;
