use anyhow::{Context, Result};
use clap::Parser;
use slurm2json::{cli::Cli, machines::Machines, options::ParseOptions, parse_config_with};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` forces TRACE, otherwise RUST_LOG (default warn)
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Refuse to clobber an existing output file unless asked to
fn check_outfile(outfile: &Path, force: bool, update: bool) -> Result<()> {
    if outfile.exists() && !force && !update {
        anyhow::bail!(
            "{} already exists! Use --force to force overwrite, or --update to merge.",
            outfile.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    for path in &args.config {
        if !path.exists() {
            anyhow::bail!(
                "Cannot find {}. Did you specify the right path?",
                path.display()
            );
        }
    }

    if !args.print {
        check_outfile(&args.outfile, args.force, args.update)?;
    }

    let mut machines = if args.update && args.outfile.exists() {
        Machines::load(&args.outfile)?
    } else {
        Machines::new()
    };

    let options = if args.skip_prefix.is_empty() {
        ParseOptions::default()
    } else {
        ParseOptions::with_skip_prefixes(args.skip_prefix.iter().cloned())
    };

    for path in &args.config {
        info!("Parsing {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut cluster = parse_config_with(&text, &options)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        cluster.exclude_partitions(&args.exclude);
        info!(
            "Cluster {}: {} nodes, {} partitions",
            cluster.name,
            cluster.nodes.len(),
            cluster.partitions.len()
        );
        machines.insert(&cluster)?;
    }

    if args.print {
        println!("{}", machines.to_pretty_string()?);
    } else {
        machines.write(&args.outfile)?;
        info!("Wrote {}", args.outfile.display());
    }

    Ok(())
}
