// Cluster records built from a slurm.conf
//
// Nodes and partitions are kept in first-seen order so that the same input
// always serializes to the same bytes. Derived data (per-partition features,
// default markers) is computed once, when the parse is frozen into a
// ClusterRecord.

mod definition;
mod derive;
mod registry;

pub use definition::{
    split_features, Attributes, NodeRecord, PartitionRecord, DEFAULT_KEY, FEATURE_KEY, NODE_KEYS,
    PARTITION_KEYS,
};
pub use derive::{derive_defaults, derive_features, Defaults};
pub use registry::ClusterRecord;
