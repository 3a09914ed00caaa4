//! Line-oriented key block replacement.
//!
//! Locates the `JWT_PUBLIC_KEY: |` anchor in a compose file and swaps the
//! indented block under it for the new key. The file is never parsed as
//! YAML here; every line outside the replaced range is copied through
//! byte-for-byte, including its original line terminator.

use crate::config::BlockConfig;

/// Outcome of a block replacement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectStatus {
    /// The block under the first anchor was replaced.
    Replaced {
        /// Number of old block lines dropped.
        removed: usize,
        /// Number of key lines inserted.
        inserted: usize,
    },
    /// The first anchor's block already holds key material; nothing changed.
    AlreadyConfigured,
    /// No anchor line exists; nothing changed.
    MarkerNotFound,
}

impl InjectStatus {
    pub fn is_replaced(&self) -> bool {
        matches!(self, InjectStatus::Replaced { .. })
    }
}

/// Result of [`inject_key`]: the new file content plus what happened.
#[derive(Debug, Clone)]
pub struct Injection {
    pub content: String,
    pub status: InjectStatus,
}

/// Split text into lines, each keeping its trailing `\n` (if any).
///
/// Concatenating the result yields the input unchanged.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Whether `line` is the anchor introducing the key block.
pub fn is_anchor(line: &str, rules: &BlockConfig) -> bool {
    line.contains(&rules.marker) && line.contains(&rules.indicator)
}

/// Classification of one line following the anchor.
#[derive(Debug, PartialEq, Eq)]
enum BlockLine {
    /// Leftover of the previous key (armor line or placeholder). Dropped.
    Remnant { placeholder: bool },
    /// Blank line inside the block. Dropped.
    Blank,
    /// Indented content that is not a known remnant. Ends the block.
    Foreign,
    /// Non-indented content. Ends the block.
    Outside,
}

fn classify(line: &str, rules: &BlockConfig) -> BlockLine {
    let blank = line.trim().is_empty();
    if !blank && !line.starts_with(&rules.indent) {
        return BlockLine::Outside;
    }

    let placeholder = line.contains(&rules.placeholder);
    if placeholder || line.contains(&rules.begin_marker) || line.contains(&rules.end_marker) {
        return BlockLine::Remnant { placeholder };
    }

    if blank {
        BlockLine::Blank
    } else {
        BlockLine::Foreign
    }
}

/// Replace the key block under the first anchor with `key`.
///
/// Each line of `key` is emitted as `indent + line + "\n"` at the position
/// where the old block ended. Only the first anchor is considered; later
/// anchors pass through untouched. When the old block ends on indented
/// content that is not a known remnant and held no placeholder, it already
/// carries a key and is left alone.
pub fn inject_key(content: &str, key: &str, rules: &BlockConfig) -> Injection {
    let lines = split_lines(content);

    let Some(anchor) = lines.iter().position(|line| is_anchor(line, rules)) else {
        tracing::debug!(marker = %rules.marker, "no anchor line found");
        return Injection {
            content: content.to_string(),
            status: InjectStatus::MarkerNotFound,
        };
    };

    let body_start = anchor + 1;
    let mut end = body_start;
    let mut saw_placeholder = false;
    let mut ended_on_foreign = false;

    while end < lines.len() {
        match classify(lines[end], rules) {
            BlockLine::Remnant { placeholder } => {
                saw_placeholder |= placeholder;
                end += 1;
            }
            BlockLine::Blank => end += 1,
            BlockLine::Foreign => {
                ended_on_foreign = true;
                break;
            }
            BlockLine::Outside => break,
        }
    }

    if ended_on_foreign && !saw_placeholder {
        tracing::debug!(line = anchor + 1, "key block already holds content");
        return Injection {
            content: content.to_string(),
            status: InjectStatus::AlreadyConfigured,
        };
    }

    let mut out = String::with_capacity(content.len() + key.len());
    for line in &lines[..=anchor] {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }

    let mut inserted = 0;
    for key_line in key.lines() {
        out.push_str(&rules.indent);
        out.push_str(key_line);
        out.push('\n');
        inserted += 1;
    }

    for line in &lines[end..] {
        out.push_str(line);
    }

    let removed = end - body_start;
    tracing::debug!(line = anchor + 1, removed, inserted, "replaced key block");

    Injection {
        content: out,
        status: InjectStatus::Replaced { removed, inserted },
    }
}
