//! DTOs for teams_sea adapter.

#[derive(Debug, Clone)]
pub struct TeamCreate {
    pub name: String,
    pub motto: String,
    pub leader_id: i64,
}

impl TeamCreate {
    pub fn new(name: impl Into<String>, motto: impl Into<String>, leader_id: i64) -> Self {
        Self {
            name: name.into(),
            motto: motto.into(),
            leader_id,
        }
    }
}
