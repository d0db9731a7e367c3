use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Competition stages in the order they run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    #[sea_orm(string_value = "registration")]
    Registration,
    #[sea_orm(string_value = "registration_closed")]
    RegistrationClosed,
    #[sea_orm(string_value = "task_distribution")]
    TaskDistribution,
    #[sea_orm(string_value = "solution_submission")]
    SolutionSubmission,
    #[sea_orm(string_value = "solution_review")]
    SolutionReview,
    #[sea_orm(string_value = "online_defense")]
    OnlineDefense,
    #[sea_orm(string_value = "results_publication")]
    ResultsPublication,
    #[sea_orm(string_value = "award_ceremony")]
    AwardCeremony,
}

impl StageType {
    /// Seeding order; a stage's ordinal is its index here plus one.
    pub const ALL: [StageType; 8] = [
        StageType::Registration,
        StageType::RegistrationClosed,
        StageType::TaskDistribution,
        StageType::SolutionSubmission,
        StageType::SolutionReview,
        StageType::OnlineDefense,
        StageType::ResultsPublication,
        StageType::AwardCeremony,
    ];

    pub fn ordinal(self) -> i32 {
        match self {
            StageType::Registration => 1,
            StageType::RegistrationClosed => 2,
            StageType::TaskDistribution => 3,
            StageType::SolutionSubmission => 4,
            StageType::SolutionReview => 5,
            StageType::OnlineDefense => 6,
            StageType::ResultsPublication => 7,
            StageType::AwardCeremony => 8,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StageType::Registration => "Registration",
            StageType::RegistrationClosed => "Registration closed",
            StageType::TaskDistribution => "Task distribution",
            StageType::SolutionSubmission => "Solution submission",
            StageType::SolutionReview => "Solution review",
            StageType::OnlineDefense => "Online defense",
            StageType::ResultsPublication => "Results publication",
            StageType::AwardCeremony => "Award ceremony",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_name = "stage_type", unique)]
    pub stage_type: StageType,
    #[sea_orm(column_name = "stage_order", unique)]
    pub stage_order: i32,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    /// Bumped on every activation, under the stage-row lock.
    #[sea_orm(column_name = "activation_seq")]
    pub activation_seq: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
