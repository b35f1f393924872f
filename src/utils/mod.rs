/// TOML + environment configuration.
pub mod config;
/// Tracing subscriber initialisation.
#[cfg(feature = "native")]
pub mod logging;
