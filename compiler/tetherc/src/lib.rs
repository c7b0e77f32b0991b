//! Tether driver library.
//!
//! The `tether` binary is a thin argument parser over this crate: the
//! built-in demonstration programs live in [`demos`], and [`run`] evaluates
//! one of them with the options given on the command line.

pub mod demos;
pub mod run;

use std::sync::Once;

pub use demos::{find_demo, Demo, DEMOS};
pub use run::{parse_run_args, run_demo, RunOptions};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for diagnostic output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tether_eval=debug`
/// to see closure creation and calls, or `RUST_LOG=tether_eval=trace` to
/// also see every frame definition and write.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
