//! The setup run: key injection followed by the license step.
//!
//! A strict top-to-bottom sequence. Every failure before the license step
//! is fatal and leaves the backup as the only recovery path.

pub mod key;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backup;
use crate::config::Config;
use crate::constants;
use crate::inject::{self, InjectStatus};
use crate::license::{self, LicenseOutcome, LicensePrompt, LicenseState, PromptError};
use crate::report::Reporter;

pub use key::PublicKey;

/// Fatal setup failures. Each maps to exit status 1.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Public key not found at {}", .path.display())]
    MissingKeyFile { path: PathBuf },

    #[error("{} not found", .path.display())]
    MissingComposeFile { path: PathBuf },

    #[error("Failed to read public key: {source}")]
    ReadKey { path: PathBuf, source: io::Error },

    #[error("Failed to create backup of {}: {source}", .path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadCompose { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteCompose { path: PathBuf, source: io::Error },

    #[error("Setup interrupted")]
    Interrupted,

    #[error("Failed to read license key: {0}")]
    Prompt(io::Error),
}

impl SetupError {
    /// Remediation hint printed under the failure line, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SetupError::MissingKeyFile { .. } => {
                Some("Please run ./setup.sh first to generate JWT keys.")
            }
            SetupError::WriteCompose { .. } => {
                Some("Restore the previous file from the .backup copy before retrying.")
            }
            _ => None,
        }
    }
}

impl From<PromptError> for SetupError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => SetupError::Interrupted,
            PromptError::Io(e) => SetupError::Prompt(e),
        }
    }
}

/// Run-time switches that are not part of the layered config.
#[derive(Debug, Clone, Copy)]
pub struct SetupOptions {
    /// Report what would change without writing anything.
    pub dry_run: bool,
    /// Ask for the license key on stdin when none was configured.
    pub prompt: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            prompt: true,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct SetupOutcome {
    /// Backup location; `None` on a dry run.
    pub backup: Option<PathBuf>,
    pub inject: InjectStatus,
    pub license: LicenseOutcome,
}

/// Injects the public key (and optionally the license key) into the
/// compose file.
pub struct ConfigInjector {
    config: Config,
    key_path: PathBuf,
    compose_path: PathBuf,
    options: SetupOptions,
}

impl ConfigInjector {
    /// Create an injector. Relative paths in `config` resolve against `base_dir`.
    pub fn new(config: &Config, base_dir: &Path, options: SetupOptions) -> Self {
        Self {
            key_path: base_dir.join(&config.paths.public_key),
            compose_path: base_dir.join(&config.paths.compose_file),
            config: config.clone(),
            options,
        }
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    pub fn compose_path(&self) -> &Path {
        &self.compose_path
    }

    /// Execute the whole setup sequence.
    pub async fn run<W: Write>(
        &self,
        prompt: &dyn LicensePrompt,
        report: &mut Reporter<W>,
    ) -> Result<SetupOutcome, SetupError> {
        report.step("🔧", "Setting up Docker Compose configuration...");
        report.blank();

        self.check_inputs()?;

        report.step("📝", "Reading public key...");
        let key = PublicKey::read(&self.key_path).map_err(|e| SetupError::ReadKey {
            path: self.key_path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %self.key_path.display(), lines = key.line_count(), "read public key");
        report.ok("Public key read successfully");
        let block = &self.config.block;
        if !key.has_armor(&block.begin_marker, &block.end_marker) {
            report.warn(&format!(
                "{} does not look like a PEM public key",
                self.key_path.display()
            ));
        }
        report.blank();

        report.step("📝", &format!("Updating {}...", self.compose_name()));
        let backup = if self.options.dry_run {
            None
        } else {
            let path = backup::create_backup(&self.compose_path).map_err(|e| {
                SetupError::Backup {
                    path: self.compose_path.clone(),
                    source: e,
                }
            })?;
            report.ok(&format!("Backup created at {}", path.display()));
            Some(path)
        };

        let original = self.read_compose()?;

        let injection = inject::inject_key(&original, key.as_str(), block);
        match injection.status {
            InjectStatus::Replaced { .. } => {
                if self.options.dry_run {
                    report.ok("Public key would be injected");
                } else {
                    report.ok("Public key injected successfully");
                }
            }
            InjectStatus::AlreadyConfigured | InjectStatus::MarkerNotFound => {
                report.warn(&format!(
                    "{} section not found or already configured",
                    block.marker.trim_end_matches(':')
                ));
            }
        }

        if !self.options.dry_run {
            self.write_compose(&injection.content)?;
            if injection.status.is_replaced() {
                self.check_structure(&injection.content, backup.as_deref(), report);
            }
        }
        report.blank();

        let license = self.license_step(&injection.content, prompt, report).await?;

        if self.options.dry_run {
            report.blank();
            report.warn("Dry run: no files were written");
        } else {
            report.next_steps();
        }

        Ok(SetupOutcome {
            backup,
            inject: injection.status,
            license,
        })
    }

    fn check_inputs(&self) -> Result<(), SetupError> {
        if !self.key_path.exists() {
            return Err(SetupError::MissingKeyFile {
                path: self.key_path.clone(),
            });
        }
        if !self.compose_path.exists() {
            return Err(SetupError::MissingComposeFile {
                path: self.compose_path.clone(),
            });
        }
        Ok(())
    }

    fn read_compose(&self) -> Result<String, SetupError> {
        std::fs::read_to_string(&self.compose_path).map_err(|e| SetupError::ReadCompose {
            path: self.compose_path.clone(),
            source: e,
        })
    }

    fn write_compose(&self, content: &str) -> Result<(), SetupError> {
        std::fs::write(&self.compose_path, content).map_err(|e| SetupError::WriteCompose {
            path: self.compose_path.clone(),
            source: e,
        })
    }

    /// Parse-only sanity check of the rewritten file.
    fn check_structure<W: Write>(
        &self,
        content: &str,
        backup: Option<&Path>,
        report: &mut Reporter<W>,
    ) {
        if let Err(e) = serde_yaml_ng::from_str::<serde_yaml_ng::Value>(content) {
            tracing::debug!(error = %e, "rewritten compose file failed to parse");
            report.warn(&format!(
                "{} no longer parses as YAML: {e}",
                self.compose_name()
            ));
            if let Some(path) = backup {
                report.note(3, &format!("The original is saved at {}", path.display()));
            }
        }
    }

    async fn license_step<W: Write>(
        &self,
        content: &str,
        prompt: &dyn LicensePrompt,
        report: &mut Reporter<W>,
    ) -> Result<LicenseOutcome, SetupError> {
        let cfg = &self.config.license;

        match license::license_state(content, cfg) {
            LicenseState::Configured => {
                report.ok("License key already configured");
                return Ok(LicenseOutcome::AlreadyConfigured);
            }
            LicenseState::Absent => return Ok(LicenseOutcome::NotApplicable),
            LicenseState::Placeholder => {}
        }

        report.warn("License key not configured");
        report.blank();
        report.note(0, &format!("You need a license key from: {}", cfg.portal_url));
        report.blank();

        let answer = if let Some(ref key) = cfg.key {
            tracing::debug!("using configured license key");
            key.trim().to_string()
        } else if self.options.prompt && !self.options.dry_run {
            report.flush();
            match prompt.ask(constants::LICENSE_PROMPT).await {
                Ok(answer) => answer.trim().to_string(),
                Err(e) => {
                    let err = SetupError::from(e);
                    report.blank();
                    if matches!(err, SetupError::Interrupted) {
                        report.warn("Setup interrupted");
                    }
                    return Err(err);
                }
            }
        } else {
            String::new()
        };

        if answer.is_empty() {
            report.blank();
            report.warn("Skipped license key setup");
            report.note(
                3,
                &format!(
                    "You'll need to manually add it to {} before starting",
                    self.compose_name()
                ),
            );
            return Ok(LicenseOutcome::Skipped);
        }

        if self.options.dry_run {
            let occurrences = content.matches(cfg.placeholder.as_str()).count();
            report.ok("License key would be updated");
            return Ok(LicenseOutcome::Updated { occurrences });
        }

        let current = self.read_compose()?;
        let occurrences = current.matches(cfg.placeholder.as_str()).count();
        let updated = license::substitute(&current, &cfg.placeholder, &answer);
        self.write_compose(&updated)?;
        tracing::debug!(occurrences, "license placeholder replaced");
        report.ok("License key updated");

        Ok(LicenseOutcome::Updated { occurrences })
    }

    fn compose_name(&self) -> String {
        self.compose_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.compose_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_has_hint() {
        let err = SetupError::MissingKeyFile {
            path: PathBuf::from("server/keys/public_key.pem"),
        };
        assert_eq!(
            err.to_string(),
            "Public key not found at server/keys/public_key.pem"
        );
        assert!(err.hint().unwrap().contains("setup.sh"));
    }

    #[test]
    fn missing_compose_message() {
        let err = SetupError::MissingComposeFile {
            path: PathBuf::from("docker-compose.yml"),
        };
        assert_eq!(err.to_string(), "docker-compose.yml not found");
        assert!(err.hint().is_none());
    }

    #[test]
    fn prompt_interrupt_maps_to_interrupted() {
        let err: SetupError = PromptError::Interrupted.into();
        assert!(matches!(err, SetupError::Interrupted));
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let injector = ConfigInjector::new(
            &Config::default(),
            Path::new("/srv/app"),
            SetupOptions::default(),
        );
        assert_eq!(
            injector.key_path(),
            Path::new("/srv/app/server/keys/public_key.pem")
        );
        assert_eq!(injector.compose_path(), Path::new("/srv/app/docker-compose.yml"));
        assert_eq!(injector.compose_name(), "docker-compose.yml");
    }

    #[test]
    fn compose_io_failures_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected makes both calls fail.
        std::fs::write(dir.path().join("deploy"), "not a directory").unwrap();
        let mut config = Config::default();
        config.paths.compose_file = PathBuf::from("deploy/docker-compose.yml");
        let injector = ConfigInjector::new(&config, dir.path(), SetupOptions::default());

        let err = injector.read_compose().unwrap_err();
        assert!(matches!(err, SetupError::ReadCompose { .. }));
        assert!(err.to_string().starts_with("Failed to read"));

        let err = injector.write_compose("services: {}\n").unwrap_err();
        assert!(matches!(err, SetupError::WriteCompose { .. }));
        assert!(err.hint().unwrap().contains(".backup"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let mut config = Config::default();
        config.paths.compose_file = PathBuf::from("/etc/stack/compose.yml");
        let injector = ConfigInjector::new(&config, Path::new("/srv/app"), SetupOptions::default());
        assert_eq!(injector.compose_path(), Path::new("/etc/stack/compose.yml"));
    }
}
