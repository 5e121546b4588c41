pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global `fmt` subscriber; `RUST_LOG` directives extend the
/// default `bill_reminder=info` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive(
            "bill_reminder=info"
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        );

        // Another subscriber may already be installed by an embedding application.
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}
