//! Error types for slurm.conf parsing
//!
//! Expression errors come from the node-name expander and carry no position;
//! the parser wraps them with the source line they appeared on.

use thiserror::Error;

/// Errors raised while expanding a compressed node-name expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("descending range {start}-{end} in '{expr}'")]
    DescendingRange { expr: String, start: u64, end: u64 },

    #[error("non-numeric item '{item}' inside brackets in '{expr}'")]
    NonNumeric { expr: String, item: String },

    #[error("empty bracket item in '{expr}'")]
    EmptyItem { expr: String },

    #[error("zero-padded number '{item}' in '{expr}' is not supported")]
    ZeroPadded { expr: String, item: String },

    #[error("unmatched closing bracket in '{expr}'")]
    UnmatchedClose { expr: String },

    #[error("nested bracket in '{expr}'")]
    NestedBracket { expr: String },

    #[error("range {start}-{end} in '{expr}' exceeds {max} names")]
    RangeTooLarge {
        expr: String,
        start: u64,
        end: u64,
        max: u64,
    },

    #[error("'{expr}' expands to more than {max} names")]
    ExpansionTooLarge { expr: String, max: u64 },
}

/// Errors raised while parsing a slurm.conf text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed directive token '{token}' (expected Key=Value)")]
    MalformedDirective { line: usize, token: String },

    #[error("line {line}: {source}")]
    MalformedExpression {
        line: usize,
        #[source]
        source: ExpandError,
    },

    #[error("no ClusterName directive found")]
    MissingClusterName,
}
