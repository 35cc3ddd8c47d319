use crate::cluster::{NodeRecord, PartitionRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Names of the nodes and partitions marked `Default`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    pub nodes: Vec<String>,
    pub partitions: Vec<String>,
}

/// Union node features into the feature list of every partition they belong to
///
/// Lists keep first-seen order and hold no duplicates. Partitions whose nodes
/// carry no features get no entry.
pub fn derive_features(nodes: &IndexMap<String, NodeRecord>) -> IndexMap<String, Vec<String>> {
    let mut features: IndexMap<String, Vec<String>> = IndexMap::new();
    for node in nodes.values() {
        let tokens = node.features();
        if tokens.is_empty() {
            continue;
        }
        for partition in &node.partitions {
            let list = features.entry(partition.clone()).or_default();
            for token in &tokens {
                if !list.contains(token) {
                    list.push(token.clone());
                }
            }
        }
    }
    features
}

/// Collect default-marked node and partition names in collection order
pub fn derive_defaults(
    nodes: &IndexMap<String, NodeRecord>,
    partitions: &IndexMap<String, PartitionRecord>,
) -> Defaults {
    Defaults {
        nodes: nodes
            .iter()
            .filter(|(_, node)| node.is_default())
            .map(|(name, _)| name.clone())
            .collect(),
        partitions: partitions
            .iter()
            .filter(|(_, partition)| partition.is_default())
            .map(|(name, _)| name.clone())
            .collect(),
    }
}
