//! compose-setup — JWT public key and license injection for Docker Compose
//! (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod backup;
pub mod config;
pub mod constants;
pub mod env;
pub mod inject;
pub mod license;
pub mod report;
pub mod setup;
