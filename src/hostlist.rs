//! Node-name expansion for compressed hostlist expressions
//!
//! Supports:
//! - Literal names: `login1`
//! - Numeric ranges in brackets: `gpu-[21-23]`
//! - Numeric lists in brackets: `gpu-[21,23]`, mixed with ranges: `n[1-3,7]`
//! - Several bracket groups per name: `x-[1-2][5,6]`
//! - Top-level alternation with commas: `login1,gpu-[1-4]`
//!
//! `[`/`]` and `{`/`}` are interchangeable. An opening bracket left open at
//! the end of a name is closed implicitly. Numbers are printed without
//! padding, so zero-padded inputs such as `n[01-04]` are rejected instead of
//! being silently renamed.

use crate::error::ExpandError;
use std::collections::HashSet;

/// Largest number of names a single range, or a single token, may produce
pub const MAX_EXPANSION: u64 = 65_536;

/// One piece of a node-name token
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text copied into every name
    Literal(String),
    /// Options from one bracket group, in written order
    Group(Vec<u64>),
}

/// Expand a node-name expression into concrete node names
///
/// Names are returned in encounter order with duplicates removed (first
/// occurrence wins).
///
/// # Example
/// ```
/// use slurm2json::hostlist::expand;
///
/// let names = expand("gpu-[21-23]").unwrap();
/// assert_eq!(names, vec!["gpu-21", "gpu-22", "gpu-23"]);
/// ```
pub fn expand(expr: &str) -> Result<Vec<String>, ExpandError> {
    let normalized: String = expr
        .chars()
        .filter(|c| *c != '\\' && !c.is_whitespace())
        .map(|c| match c {
            '[' => '{',
            ']' => '}',
            other => other,
        })
        .collect();

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for token in split_top_level(&normalized) {
        if token.is_empty() {
            continue;
        }
        for name in expand_token(token, expr)? {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    Ok(names)
}

/// Split on commas that sit outside any bracket group
fn split_top_level(expr: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in expr.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&expr[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    tokens.push(&expr[start..]);
    tokens
}

/// Expand one top-level token into every name it denotes
fn expand_token(token: &str, expr: &str) -> Result<Vec<String>, ExpandError> {
    let segments = scan_segments(token, expr)?;

    let mut names = vec![String::new()];
    for segment in &segments {
        names = match segment {
            Segment::Literal(text) => names.into_iter().map(|name| name + text).collect(),
            Segment::Group(values) => {
                let total = names.len().saturating_mul(values.len()) as u64;
                if total > MAX_EXPANSION {
                    return Err(ExpandError::ExpansionTooLarge {
                        expr: expr.to_string(),
                        max: MAX_EXPANSION,
                    });
                }
                names
                    .iter()
                    .flat_map(|name| values.iter().map(move |value| format!("{name}{value}")))
                    .collect()
            }
        };
    }
    Ok(names)
}

/// Break a token into alternating literal and bracket segments
fn scan_segments(token: &str, expr: &str) -> Result<Vec<Segment>, ExpandError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut group: Option<String> = None;

    for c in token.chars() {
        let Some(body) = group.as_mut() else {
            match c {
                '{' => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    group = Some(String::new());
                }
                '}' => {
                    return Err(ExpandError::UnmatchedClose {
                        expr: expr.to_string(),
                    })
                }
                _ => literal.push(c),
            }
            continue;
        };

        match c {
            '{' => {
                return Err(ExpandError::NestedBracket {
                    expr: expr.to_string(),
                })
            }
            '}' => {
                let body = std::mem::take(body);
                group = None;
                segments.push(Segment::Group(parse_group(&body, expr)?));
            }
            _ => body.push(c),
        }
    }

    // An unterminated group runs to the end of the token
    if let Some(body) = group {
        segments.push(Segment::Group(parse_group(&body, expr)?));
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Parse bracket content: comma-separated numbers and `N-M` ranges
fn parse_group(body: &str, expr: &str) -> Result<Vec<u64>, ExpandError> {
    let mut values = Vec::new();
    for item in body.split(',') {
        match item.split_once('-') {
            Some((start, end)) => {
                let start = parse_number(start, item, expr)?;
                let end = parse_number(end, item, expr)?;
                if start > end {
                    return Err(ExpandError::DescendingRange {
                        expr: expr.to_string(),
                        start,
                        end,
                    });
                }
                if end - start >= MAX_EXPANSION {
                    return Err(ExpandError::RangeTooLarge {
                        expr: expr.to_string(),
                        start,
                        end,
                        max: MAX_EXPANSION,
                    });
                }
                values.extend(start..=end);
            }
            None => values.push(parse_number(item, item, expr)?),
        }
    }
    Ok(values)
}

fn parse_number(text: &str, item: &str, expr: &str) -> Result<u64, ExpandError> {
    if text.is_empty() {
        return Err(ExpandError::EmptyItem {
            expr: expr.to_string(),
        });
    }
    let non_numeric = || ExpandError::NonNumeric {
        expr: expr.to_string(),
        item: item.to_string(),
    };
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(ExpandError::ZeroPadded {
            expr: expr.to_string(),
            item: item.to_string(),
        });
    }
    text.parse::<u64>().map_err(|_| non_numeric())
}
