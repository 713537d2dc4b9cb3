use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Thread-local subscriber printing through the test harness writer.
///
/// Uses `set_default` rather than a global subscriber so every test can
/// install its own.
pub struct TestTracing {
    _guard: DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::new("gof=debug"))
            .with_test_writer()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self { _guard: guard }
    }
}
