//! Shared helpers for strata test binaries.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a tracing subscriber for test binaries.
///
/// Safe to call from every test; only the first call installs. The filter
/// comes from `RUST_LOG` when set and defaults to `info` otherwise, and
/// output goes through the test writer so it interleaves with captured
/// test output.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}
