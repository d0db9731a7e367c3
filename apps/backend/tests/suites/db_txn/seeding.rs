use hackathon_backend::config::db::DbProfile;
use hackathon_backend::entities::stages::StageType;
use hackathon_backend::infra::state::build_state;
use hackathon_backend::{AppError, ErrorCode, HackathonApi};
use sea_orm::ConnectionTrait;

#[tokio::test]
async fn reopening_a_store_keeps_the_catalogue() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let profile = DbProfile::SqliteFile(dir.path().join("hackathon.db"));

    let first = HackathonApi::new(build_state().with_db(profile.clone()).build().await?);
    let seeded = first.list_stages().await?;
    assert_eq!(seeded.len(), StageType::ALL.len());
    drop(first);

    let second = HackathonApi::new(build_state().with_db(profile).build().await?);
    let reopened = second.list_stages().await?;
    assert_eq!(reopened, seeded);
    assert_eq!(
        second.get_current_stage().await?.stage_type,
        StageType::Registration
    );
    Ok(())
}

#[tokio::test]
async fn broken_catalogue_refuses_to_boot() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let profile = DbProfile::SqliteFile(dir.path().join("hackathon.db"));

    let state = build_state().with_db(profile.clone()).build().await?;
    state
        .db()
        .execute_unprepared("UPDATE stages SET is_active = 0")
        .await?;
    drop(state);

    let err: AppError = build_state()
        .with_db(profile)
        .build()
        .await
        .expect_err("no active stage must fail the bootstrap");
    assert_eq!(err.code(), ErrorCode::DataCorruption);
    Ok(())
}
