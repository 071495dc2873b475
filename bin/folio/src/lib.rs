//! Folio CLI Library
//!
//! Command implementations for the Folio binary, exposed as a library so they
//! can be documented and tested on their own.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, list/scenes/journey, new, serve)
//! - [`server`] - Preview server for the build output and the live model API
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! cmd::build::run(Path::new("folio.toml"), None).unwrap();
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use folio_core::{Collection, CollectionMeta, Config};
pub use folio_generator::{BuildStats, Builder, Portfolio};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
