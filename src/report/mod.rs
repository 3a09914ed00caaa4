//! Human-readable status output.
//!
//! Emoji-prefixed progress lines and the closing next-step guide. Output is
//! informational only; write errors are ignored the same way terminal
//! progress output is ignored elsewhere.

use std::io::{self, Write};

use colored::Colorize;

use crate::constants;

/// Writes setup progress to a sink (stdout in production, a buffer in tests).
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// A step about to start (`🔧`/`📝` style header).
    pub fn step(&mut self, icon: &str, text: &str) {
        let _ = writeln!(self.out, "{icon} {}", text.bold());
    }

    pub fn ok(&mut self, text: &str) {
        let _ = writeln!(self.out, "{} {text}", "✓".green().bold());
    }

    pub fn warn(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}  {}", "⚠️".yellow(), text.yellow());
    }

    /// Plain text line, indented by `indent` spaces.
    pub fn note(&mut self, indent: usize, text: &str) {
        let _ = writeln!(self.out, "{:indent$}{text}", "");
    }

    /// Flush pending output (before a prompt takes over the terminal).
    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }

    /// Closing banner with the commands to bring the stack up.
    pub fn next_steps(&mut self) {
        self.blank();
        let _ = writeln!(self.out, "✅ {}", "Docker Compose setup complete!".green().bold());
        self.blank();
        self.step("📋", "Next steps:");
        self.blank();
        self.note(0, "1. Start Document Engine:");
        self.note(3, &"docker-compose up -d".cyan().to_string());
        self.blank();
        self.note(0, "2. Verify it's running:");
        self.note(3, &"docker-compose ps".cyan().to_string());
        self.note(3, &format!("curl {}", constants::HEALTH_URL).cyan().to_string());
        self.blank();
        self.note(0, "3. Check dashboard (if enabled):");
        self.note(3, constants::DASHBOARD_URL);
        self.note(3, &format!("Username: {}", constants::DASHBOARD_USER));
        self.note(3, &format!("Password: {}", constants::DASHBOARD_PASSWORD));
        self.blank();
    }
}

/// Print a fatal failure line to stderr.
pub fn print_failure(message: &str) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "❌ {}", message.red());
    let _ = handle.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn note_indents_text() {
        let out = render(|r| r.note(3, "docker-compose ps"));
        assert_eq!(out, "   docker-compose ps\n");
    }

    #[test]
    fn warn_and_ok_carry_text() {
        let out = render(|r| {
            r.ok("Backup created");
            r.warn("License key not configured");
        });
        assert!(out.contains("Backup created"));
        assert!(out.contains("License key not configured"));
    }

    #[test]
    fn next_steps_lists_commands_and_credentials() {
        let out = render(|r| r.next_steps());
        assert!(out.contains("Docker Compose setup complete!"));
        assert!(out.contains("docker-compose up -d"));
        assert!(out.contains("http://localhost:5000/health"));
        assert!(out.contains("http://localhost:5000/dashboard"));
        assert!(out.contains("Username: dashboard"));
        assert!(out.contains("Password: secret"));
    }

    #[test]
    fn print_failure_does_not_panic() {
        print_failure("docker-compose.yml not found");
    }
}
