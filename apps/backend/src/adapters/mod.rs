//! SeaORM adapters. Every function here returns `DbErr`; repos map it.

pub mod memberships_sea;
pub mod stages_sea;
pub mod teams_sea;
pub mod users_sea;
