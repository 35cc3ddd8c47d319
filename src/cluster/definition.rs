use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute key marking a node or partition as a default
pub const DEFAULT_KEY: &str = "Default";

/// Attribute key holding a node's comma-separated feature list
pub const FEATURE_KEY: &str = "Feature";

/// Attribute keys kept from Node continuation lines
pub const NODE_KEYS: &[&str] = &["RealMemory", "Gres", "Weight", "Feature", "Default"];

/// Attribute keys kept from Partition continuation lines
pub const PARTITION_KEYS: &[&str] = &[
    "DefaultTime",
    "Default",
    "DefMemPerCPU",
    "MaxMemPerCPU",
    "AllowQos",
    "Nodes",
];

/// Canonical attribute key → raw value, in first-seen order
pub type Attributes = IndexMap<String, String>;

/// A compute node
///
/// # Example JSON
/// ```json
/// "gpu-21": {
///     "RealMemory": "192000",
///     "Feature": "\"gpu,ssd\"",
///     "partitions": ["gpu", "owners"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(flatten)]
    pub attributes: Attributes,

    /// Partitions this node belongs to, unique, in registration order
    #[serde(default)]
    pub partitions: Vec<String>,
}

impl NodeRecord {
    /// Add or overwrite attributes; existing keys not in `updates` are kept
    pub fn merge_attributes(&mut self, updates: &Attributes) {
        for (key, value) in updates {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    /// Register membership in a partition; returns false if already present
    pub fn add_partition(&mut self, partition: &str) -> bool {
        if self.partitions.iter().any(|p| p == partition) {
            return false;
        }
        self.partitions.push(partition.to_string());
        true
    }

    /// Atomic feature tokens from the `Feature` attribute
    pub fn features(&self) -> Vec<String> {
        self.attributes
            .get(FEATURE_KEY)
            .map(|raw| split_features(raw))
            .unwrap_or_default()
    }

    pub fn is_default(&self) -> bool {
        marks_default(&self.attributes)
    }
}

/// A scheduling partition
///
/// The raw node list is not kept; `maxNodes` records how many distinct
/// nodes it named.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionRecord {
    #[serde(flatten)]
    pub attributes: Attributes,

    #[serde(default)]
    pub max_nodes: usize,
}

impl PartitionRecord {
    pub fn merge_attributes(&mut self, updates: &Attributes) {
        for (key, value) in updates {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    pub fn is_default(&self) -> bool {
        marks_default(&self.attributes)
    }
}

/// `Default=NO` is an explicit opt-out, any other value marks a default
fn marks_default(attributes: &Attributes) -> bool {
    attributes
        .get(DEFAULT_KEY)
        .is_some_and(|value| !value.trim_matches('"').eq_ignore_ascii_case("NO"))
}

/// Split a feature value such as `"ssd,fast"` into `["ssd", "fast"]`
pub fn split_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().trim_matches('"').trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
