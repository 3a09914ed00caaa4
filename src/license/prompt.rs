//! Interactive license key prompt.
//!
//! The blocking stdin read runs on `spawn_blocking` so it can be raced
//! against Ctrl-C; an interrupt or end of input aborts the setup.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the license prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,

    #[error("failed to read from stdin: {0}")]
    Io(#[from] io::Error),
}

/// Source of the operator's license key answer.
///
/// Implementations return the raw answer; trimming and the empty check are
/// done by the caller.
#[async_trait]
pub trait LicensePrompt: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, PromptError>;
}

/// Prompt on the controlling terminal via stdout/stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

#[async_trait]
impl LicensePrompt for StdinPrompt {
    async fn ask(&self, question: &str) -> Result<String, PromptError> {
        {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{question}")?;
            handle.flush()?;
        }

        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            let n = io::stdin().lock().read_line(&mut line)?;
            Ok::<_, io::Error>((n, line))
        });

        tokio::select! {
            _ = tokio::signal::ctrl_c() => Err(PromptError::Interrupted),
            joined = read => {
                let (n, line) = joined.map_err(io::Error::other)??;
                if n == 0 {
                    // EOF (Ctrl-D) is treated like an interrupt.
                    return Err(PromptError::Interrupted);
                }
                Ok(line)
            }
        }
    }
}
