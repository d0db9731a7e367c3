pub mod stages;
pub mod team_members;
pub mod teams;
pub mod users;

pub use stages::Entity as Stages;
pub use stages::Model as Stage;
pub use team_members::Entity as TeamMembers;
pub use team_members::Model as TeamMember;
pub use teams::Entity as Teams;
pub use teams::Model as Team;
pub use users::Entity as Users;
pub use users::Model as User;
