//! CLI argument parsing for slurm2json

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slurm2json")]
#[command(version)]
#[command(about = "Convert slurm.conf to a machines.json description of the cluster", long_about = None)]
pub struct Cli {
    /// Path to a slurm config file (repeat for several clusters)
    #[arg(long = "config", value_name = "PATH", default_value = "slurm.conf")]
    pub config: Vec<PathBuf>,

    /// Output JSON file
    #[arg(long = "outfile", value_name = "PATH", default_value = "machines.json")]
    pub outfile: PathBuf,

    /// Print to screen instead of saving to the output file
    #[arg(long = "print")]
    pub print: bool,

    /// Force overwrite of the output file, if it exists
    #[arg(long = "force")]
    pub force: bool,

    /// Merge into an existing output file, replacing only the parsed clusters
    #[arg(long = "update")]
    pub update: bool,

    /// Partitions to leave out of the output (comma-separated or repeated)
    #[arg(long = "exclude", value_name = "PARTITION", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Name prefixes of node and partition blocks to skip (replaces DEFAULT,test)
    #[arg(long = "skip-prefix", value_name = "PREFIX")]
    pub skip_prefix: Vec<String>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
