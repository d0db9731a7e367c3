use std::process::ExitCode;

use hackathon_backend::config::competition::CompetitionConfig;
use hackathon_backend::config::db::DbProfile;
use hackathon_backend::infra::state::build_state;
use hackathon_backend::telemetry;
use hackathon_backend::HackathonApi;
use tracing::{error, info};

/// Bootstraps the store: connect, migrate, seed the stage catalogue and report
/// the active stage. Transport layers embed `HackathonApi` themselves.
#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the runtime environment may set everything.
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let competition = match CompetitionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid competition configuration");
            return ExitCode::FAILURE;
        }
    };

    let state = match build_state()
        .with_db(DbProfile::Prod)
        .with_competition(competition)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, code = %e.code(), "failed to build application state");
            return ExitCode::FAILURE;
        }
    };

    let api = HackathonApi::new(state);
    match api.get_current_stage().await {
        Ok(stage) => {
            info!(
                stage = ?stage.stage_type,
                roster_size = competition.roster_size,
                activation_threshold = competition.activation_threshold,
                "hackathon core ready"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "no active stage after bootstrap");
            ExitCode::FAILURE
        }
    }
}
