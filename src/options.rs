//! Parser configuration

/// Options that control how a slurm.conf is read
///
/// # Example
/// ```
/// use slurm2json::options::ParseOptions;
///
/// let options = ParseOptions::default();
/// assert!(options.is_skipped("DEFAULT"));
/// assert!(options.is_skipped("test-queue"));
/// assert!(!options.is_skipped("gpu"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Node and partition names starting with any of these prefixes are
    /// consumed but produce no records
    ///
    /// Default: `DEFAULT` (slurm's template entries) and `test`
    pub skip_prefixes: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            skip_prefixes: vec!["DEFAULT".to_string(), "test".to_string()],
        }
    }
}

impl ParseOptions {
    /// Replace the skip prefixes
    pub fn with_skip_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a node or partition name is filtered out
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}
