//! Domain layer: pure team-formation and stage rules.

pub mod actor;
pub mod membership_rules;
pub mod stage_rules;
pub mod team_status;

pub use actor::Actor;
pub use stage_rules::GatedOperation;
pub use team_status::{RosterMember, StatusDetails, TeamStatus, TeamStatusReport};

#[cfg(test)]
mod tests_props_stage_rules;
