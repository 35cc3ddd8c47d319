use crate::cluster::{derive_defaults, derive_features, Defaults, NodeRecord, PartitionRecord};
use crate::error::ParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Everything known about one cluster after a full parse
///
/// The cluster name is not part of the serialized body; the machines file
/// uses it as the key.
///
/// # Example Usage
/// ```
/// use slurm2json::parse_config;
///
/// let cluster = parse_config("ClusterName=alpha\nNodeName=n[1-2] Weight=1\n")?;
/// assert_eq!(cluster.name, "alpha");
/// assert_eq!(cluster.nodes.len(), 2);
/// # Ok::<(), slurm2json::error::ParseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    #[serde(skip)]
    pub name: String,

    pub nodes: IndexMap<String, NodeRecord>,

    pub partitions: IndexMap<String, PartitionRecord>,

    /// Partition name → feature tokens of its nodes
    pub features: IndexMap<String, Vec<String>>,

    pub defaults: Defaults,
}

impl ClusterRecord {
    /// Freeze parsed nodes and partitions into a cluster, running the derivers
    ///
    /// # Errors
    /// Returns `ParseError::MissingClusterName` when no cluster name was seen.
    pub fn assemble(
        name: Option<String>,
        nodes: IndexMap<String, NodeRecord>,
        partitions: IndexMap<String, PartitionRecord>,
    ) -> Result<Self, ParseError> {
        let name = name.ok_or(ParseError::MissingClusterName)?;
        let features = derive_features(&nodes);
        let defaults = derive_defaults(&nodes, &partitions);
        Ok(Self {
            name,
            nodes,
            partitions,
            features,
            defaults,
        })
    }

    /// Drop partitions by name everywhere they appear
    ///
    /// Removes them from the partition and feature mappings, from every
    /// node's membership list, and from the default partition names.
    /// Nodes themselves are kept.
    pub fn exclude_partitions<S: AsRef<str>>(&mut self, excluded: &[S]) {
        let is_excluded = |name: &str| excluded.iter().any(|e| e.as_ref() == name);

        self.partitions.retain(|name, _| !is_excluded(name));
        self.features.retain(|name, _| !is_excluded(name));
        for node in self.nodes.values_mut() {
            node.partitions.retain(|name| !is_excluded(name));
        }
        self.defaults.partitions.retain(|name| !is_excluded(name));
    }

    /// Get a node by name
    pub fn node(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes.get(name)
    }

    /// Get a partition by name
    pub fn partition(&self, name: &str) -> Option<&PartitionRecord> {
        self.partitions.get(name)
    }
}
