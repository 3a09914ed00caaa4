//! The public key text read from disk.

use std::io;
use std::path::Path;

/// Trimmed contents of the PEM public key file.
///
/// No structure is imposed; the text is inserted verbatim, line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn read(path: &Path) -> io::Result<Self> {
        std::fs::read_to_string(path).map(|text| Self::new(&text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }

    /// Whether the text carries both PEM armor lines.
    pub fn has_armor(&self, begin: &str, end: &str) -> bool {
        !self.0.is_empty() && self.0.contains(begin) && self.0.contains(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let key = PublicKey::new("\n  -----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----\n\n");
        assert!(key.as_str().starts_with("-----BEGIN"));
        assert!(key.as_str().ends_with("-----"));
        assert_eq!(key.line_count(), 3);
    }

    #[test]
    fn armor_check() {
        let good = PublicKey::new("-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----");
        assert!(good.has_armor("BEGIN PUBLIC KEY", "END PUBLIC KEY"));
        assert!(!PublicKey::new("abc").has_armor("BEGIN PUBLIC KEY", "END PUBLIC KEY"));
        assert!(!PublicKey::new("  ").has_armor("BEGIN PUBLIC KEY", "END PUBLIC KEY"));
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PublicKey::read(&dir.path().join("none.pem")).is_err());
    }
}
