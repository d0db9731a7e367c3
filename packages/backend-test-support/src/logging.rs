//! Test logging bootstrap shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Quiet by default; SQL statement logging stays off unless asked for.
const DEFAULT_FILTER: &str = "warn,sqlx=error,sea_orm=warn";

/// Install the test subscriber once per process.
///
/// Filter precedence is `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
/// Output goes through the test writer so cargo captures it per test, and
/// timestamps are dropped to keep captured output diffable.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .ok();
    });
}
