//! Clap argument types and config overrides.

use clap::Parser;
use std::path::PathBuf;

use compose_setup::config::Config;
use compose_setup::setup::SetupOptions;

/// Inject the JWT public key and license key into docker-compose.yml.
#[derive(Parser, Debug)]
#[command(
    name = "compose-setup",
    version = compose_setup::constants::VERSION,
    about = super::ABOUT,
)]
pub struct Cli {
    /// Path to the PEM public key (default: server/keys/public_key.pem).
    #[arg(long, value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// Path to the compose file to update (default: docker-compose.yml).
    #[arg(long, value_name = "PATH")]
    pub compose_file: Option<PathBuf>,

    /// License key to substitute without prompting.
    #[arg(long, value_name = "KEY")]
    pub license_key: Option<String>,

    /// Never prompt for the license key; leave the placeholder if none is configured.
    #[arg(long, default_value_t = false)]
    pub no_prompt: bool,

    /// Show what would change without writing any file.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Config file to use instead of ./.compose-setup.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr.
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Apply flag values on top of the layered config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref path) = self.key_file {
            config.paths.public_key = path.clone();
        }
        if let Some(ref path) = self.compose_file {
            config.paths.compose_file = path.clone();
        }
        if let Some(ref key) = self.license_key {
            let key = key.trim();
            if !key.is_empty() {
                config.license.key = Some(key.to_string());
            }
        }
    }

    pub fn options(&self) -> SetupOptions {
        SetupOptions {
            dry_run: self.dry_run,
            prompt: !self.no_prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_keeps_defaults() {
        let cli = Cli::try_parse_from(["compose-setup"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.paths.public_key, PathBuf::from("server/keys/public_key.pem"));
        assert_eq!(config.paths.compose_file, PathBuf::from("docker-compose.yml"));
        assert!(config.license.key.is_none());
        let opts = cli.options();
        assert!(opts.prompt);
        assert!(!opts.dry_run);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "compose-setup",
            "--key-file",
            "k.pem",
            "--compose-file",
            "stack.yml",
            "--license-key",
            "ABC-123",
        ])
        .unwrap();
        let mut config = Config::default();
        config.license.key = Some("from-config".to_string());
        cli.apply_overrides(&mut config);

        assert_eq!(config.paths.public_key, PathBuf::from("k.pem"));
        assert_eq!(config.paths.compose_file, PathBuf::from("stack.yml"));
        assert_eq!(config.license.key.as_deref(), Some("ABC-123"));
    }

    #[test]
    fn blank_license_flag_is_ignored() {
        let cli = Cli::try_parse_from(["compose-setup", "--license-key", " "]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(config.license.key.is_none());
    }

    #[test]
    fn no_prompt_and_dry_run() {
        let cli = Cli::try_parse_from(["compose-setup", "--no-prompt", "--dry-run", "-v"]).unwrap();
        let opts = cli.options();
        assert!(!opts.prompt);
        assert!(opts.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["compose-setup", "extra"]).is_err());
    }
}
