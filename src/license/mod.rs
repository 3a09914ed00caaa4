//! License placeholder detection and substitution.
//!
//! The compose template ships with a literal placeholder token where the
//! Document Engine activation key belongs. This module classifies written
//! content and performs the literal, whole-file replacement.

pub mod prompt;

use crate::config::LicenseConfig;

pub use prompt::{LicensePrompt, PromptError, StdinPrompt};

/// What the compose content says about the license key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseState {
    /// The placeholder token is still present.
    Placeholder,
    /// No placeholder, but the activation key entry exists.
    Configured,
    /// Neither; nothing to report.
    Absent,
}

/// Classify `content` against the configured placeholder and marker.
pub fn license_state(content: &str, cfg: &LicenseConfig) -> LicenseState {
    if content.contains(&cfg.placeholder) {
        LicenseState::Placeholder
    } else if content.contains(&cfg.activation_marker) {
        LicenseState::Configured
    } else {
        LicenseState::Absent
    }
}

/// Replace every occurrence of `placeholder` in `content` with `key`.
pub fn substitute(content: &str, placeholder: &str, key: &str) -> String {
    content.replace(placeholder, key)
}

/// How the license step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseOutcome {
    /// Placeholder replaced in this many places.
    Updated { occurrences: usize },
    /// Placeholder present but no key was given.
    Skipped,
    AlreadyConfigured,
    /// No placeholder and no activation entry.
    NotApplicable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detects_placeholder() {
        let cfg = LicenseConfig::default();
        let content = "      ACTIVATION_KEY: YOUR_LICENSE_KEY_HERE\n";
        assert_eq!(license_state(content, &cfg), LicenseState::Placeholder);
    }

    #[test]
    fn detects_configured_key() {
        let cfg = LicenseConfig::default();
        assert_eq!(
            license_state("      ACTIVATION_KEY: abc\n", &cfg),
            LicenseState::Configured
        );
    }

    #[test]
    fn nothing_to_report() {
        let cfg = LicenseConfig::default();
        assert_eq!(license_state("services: {}\n", &cfg), LicenseState::Absent);
    }

    #[test]
    fn substitute_replaces_every_occurrence_only() {
        let content = "A: YOUR_LICENSE_KEY_HERE\n# YOUR_LICENSE_KEY_HERE again\nB: keep\n";
        assert_eq!(
            substitute(content, "YOUR_LICENSE_KEY_HERE", "ABC-123"),
            "A: ABC-123\n# ABC-123 again\nB: keep\n"
        );
    }

    #[test]
    fn substitute_is_unanchored() {
        assert_eq!(
            substitute("x=YOUR_LICENSE_KEY_HEREy", "YOUR_LICENSE_KEY_HERE", "K"),
            "x=Ky"
        );
    }
}
