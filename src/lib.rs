//! slurm2json - convert a slurm.conf into a structured cluster description
//!
//! This library reads the line-oriented slurm configuration format, expands
//! compressed node names such as `gpu-[21-23]`, links nodes to the
//! partitions that reference them, and derives per-partition feature lists
//! and default markers.

pub mod cli;
pub mod cluster;
pub mod directive;
pub mod error;
pub mod hostlist;
pub mod lines;
pub mod machines;
pub mod options;
pub mod parser;

pub use cluster::ClusterRecord;
pub use error::{ExpandError, ParseError};
pub use options::ParseOptions;
pub use parser::{parse_config, parse_config_with};
