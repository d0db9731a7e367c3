//! DTOs for stages_sea adapter.

use crate::entities::stages::StageType;

#[derive(Debug, Clone)]
pub struct StageCreate {
    pub name: String,
    pub stage_type: StageType,
    pub stage_order: i32,
    pub is_active: bool,
    pub activation_seq: i64,
}

impl StageCreate {
    /// Catalogue entry for `stage_type`, named and ordered by the type itself.
    ///
    /// The initially active stage counts as the first activation.
    pub fn from_type(stage_type: StageType, is_active: bool) -> Self {
        Self {
            name: stage_type.display_name().to_string(),
            stage_type,
            stage_order: stage_type.ordinal(),
            is_active,
            activation_seq: i64::from(is_active),
        }
    }
}
