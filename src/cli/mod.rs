//! CLI argument parsing and diagnostics setup.
//!
//! Uses clap derive macros for the (all-optional) flags.

pub mod args;

/// Help text shown by `--help`.
pub const ABOUT: &str = "Inject the JWT public key (and optionally the Nutrient license key) into docker-compose.yml";

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` enables debug output for
/// this crate and everything else stays at warn.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose {
        "compose_setup=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_twice_does_not_panic() {
        init_tracing(true);
        init_tracing(false);
    }

    #[test]
    fn about_is_non_empty() {
        assert!(ABOUT.contains("docker-compose.yml"));
    }
}
