//! Line source for slurm.conf text
//!
//! Drops blank lines and full-line `#` comments, keeps everything else in
//! order together with its 1-based line number. Inline comments are left
//! in place; each directive strips its own.

use std::collections::VecDeque;

/// A retained configuration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the original text
    pub number: usize,
    /// Line text with surrounding whitespace trimmed
    pub text: String,
}

/// Ordered queue of meaningful configuration lines
#[derive(Debug, Clone, Default)]
pub struct LineSource {
    lines: VecDeque<Line>,
}

impl LineSource {
    /// Build a line source from raw configuration text
    pub fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(Line {
                        number: idx + 1,
                        text: trimmed.to_string(),
                    })
                }
            })
            .collect();
        Self { lines }
    }

    /// Look at the next line without consuming it
    pub fn peek(&self) -> Option<&Line> {
        self.lines.front()
    }

    /// Consume the next line
    pub fn pop(&mut self) -> Option<Line> {
        self.lines.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
