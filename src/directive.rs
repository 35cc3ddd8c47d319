//! `Key=Value` tokenizing for slurm.conf directive lines
//!
//! A line is split into whitespace-separated `Key=Value` tokens after the
//! inline comment (`# ...`) and the trailing continuation marker (`\`) are
//! removed. Double-quoted values may contain whitespace and `#`.

use crate::error::ParseError;
use crate::lines::Line;

/// Line continuation marker
pub const CONTINUATION: char = '\\';

/// Directive families recognized by the dispatch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    ClusterName,
    Node,
    Partition,
    /// Any other directive; dropped without error
    Other,
}

impl DirectiveKind {
    /// Classify a line by the key of its first token (case-insensitive)
    pub fn classify(text: &str) -> Self {
        let end = text
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(text.len());
        let key = &text[..end];
        if key.eq_ignore_ascii_case("ClusterName") {
            DirectiveKind::ClusterName
        } else if key.eq_ignore_ascii_case("NodeName") {
            DirectiveKind::Node
        } else if key.eq_ignore_ascii_case("PartitionName") {
            DirectiveKind::Partition
        } else {
            DirectiveKind::Other
        }
    }
}

/// One `Key=Value` pair with the key in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub value: String,
}

/// A tokenized configuration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Source line number
    pub line: usize,
    pub tokens: Vec<Token>,
    /// True when the line ends with the continuation marker
    pub continues: bool,
}

/// Remove an inline `#` comment and trailing whitespace
///
/// A `#` inside a double-quoted value does not start a comment.
pub fn strip_inline_comment(text: &str) -> &str {
    let mut quoted = false;
    for (idx, c) in text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return text[..idx].trim_end(),
            _ => {}
        }
    }
    text.trim_end()
}

/// Upper-case the first character of a key, leaving the rest unchanged
pub fn canonical_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a line into `Key=Value` tokens
///
/// # Errors
/// Returns `ParseError::MalformedDirective` for any field that is not of the
/// form `Key=Value` with a non-empty key.
pub fn tokenize(line: &Line) -> Result<Directive, ParseError> {
    let mut content = strip_inline_comment(&line.text).trim();
    let continues = content.ends_with(CONTINUATION);
    if continues {
        content = content.trim_end_matches(CONTINUATION).trim_end();
    }

    let tokens = split_fields(content)
        .into_iter()
        .map(|field| {
            let Some((key, value)) = field.split_once('=').filter(|(key, _)| !key.is_empty())
            else {
                return Err(ParseError::MalformedDirective {
                    line: line.number,
                    token: field.clone(),
                });
            };
            Ok(Token {
                key: canonical_key(key),
                value: value.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Directive {
        line: line.number,
        tokens,
        continues,
    })
}

/// Whitespace split that keeps double-quoted runs together
fn split_fields(text: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in text.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    fields.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}
