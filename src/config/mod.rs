//! Configuration loading and layering.
//!
//! Handles `.compose-setup.toml` loading and environment variable
//! resolution. CLI flags are merged on top by the binary.

pub mod loader;

pub use loader::{BlockConfig, Config, ConfigError, LicenseConfig, PathsConfig};
