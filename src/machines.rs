//! machines.json output
//!
//! The output file is a JSON object keyed by cluster name. Updating an
//! existing file replaces whole cluster entries and leaves the others alone.

use crate::cluster::ClusterRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Indentation used for the written file
const INDENT: &[u8] = b"    ";

/// Cluster descriptions keyed by cluster name, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Machines {
    clusters: Map<String, Value>,
}

impl Machines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing machines file
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't JSON, or isn't a JSON object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read machines file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse machines file: {}", path.display()))
    }

    /// Parse machines JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        match serde_json::from_str(content)? {
            Value::Object(clusters) => Ok(Self { clusters }),
            other => anyhow::bail!(
                "expected a JSON object keyed by cluster name, found {}",
                kind_of(&other)
            ),
        }
    }

    /// Add a cluster, replacing any entry with the same name
    pub fn insert(&mut self, cluster: &ClusterRecord) -> Result<()> {
        let body = serde_json::to_value(cluster)
            .with_context(|| format!("Failed to serialize cluster {}", cluster.name))?;
        self.clusters.insert(cluster.name.clone(), body);
        Ok(())
    }

    /// Cluster names in file order
    pub fn cluster_names(&self) -> impl Iterator<Item = &str> {
        self.clusters.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.clusters.get(name)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Render as pretty JSON with 4-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.clusters.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write the machines file, replacing its previous content
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut content = self.to_pretty_string()?;
        content.push('\n');
        fs::write(path, content)
            .with_context(|| format!("Failed to write machines file: {}", path.display()))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
