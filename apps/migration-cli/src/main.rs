use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hackathon_backend::config::db::DbProfile;
use hackathon_backend::connect_db;
use migration::{migrate, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    /// `DATABASE_URL`
    Prod,
    /// `TEST_DATABASE_URL`; the database name must end in `_test`
    Test,
    /// SQLite file given by `--path`
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Hackathon database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database to migrate
    #[arg(short, long, value_enum, default_value = "test")]
    target: Target,

    /// SQLite file, required with `--target sqlite-file`
    #[arg(long)]
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match (args.target, args.path) {
        (Target::Prod, _) => DbProfile::Prod,
        (Target::Test, _) => DbProfile::Test,
        (Target::SqliteFile, Some(path)) => DbProfile::SqliteFile(path),
        (Target::SqliteFile, None) => {
            eprintln!("--path is required with --target sqlite-file");
            return ExitCode::from(2);
        }
    };

    let command = match args.command {
        Command::Up => MigrationCommand::Up,
        Command::Down => MigrationCommand::Down,
        Command::Fresh => MigrationCommand::Fresh,
        Command::Status => MigrationCommand::Status,
    };

    let conn = match connect_db(&profile).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Could not connect: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = migrate(&conn, command).await {
        eprintln!("Migration failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
