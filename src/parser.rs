//! slurm.conf parser
//!
//! The parse is a sequence of steps over one explicit [`ParserState`]:
//! the dispatch loop looks at the next line and hands the state to the
//! cluster-name, node-block or partition-block step, each of which consumes
//! its lines. When the queue is empty the state is frozen into a
//! [`ClusterRecord`].
//!
//! A block is a directive line plus the continuation lines that follow a
//! trailing `\`:
//!
//! ```text
//! PartitionName=gpu Default=NO \
//!     Nodes=gpu-[21-23] \
//!     MaxMemPerCPU=8000
//! ```

use crate::cluster::{
    Attributes, ClusterRecord, NodeRecord, PartitionRecord, NODE_KEYS, PARTITION_KEYS,
};
use crate::directive::{tokenize, DirectiveKind};
use crate::error::ParseError;
use crate::hostlist;
use crate::lines::LineSource;
use crate::options::ParseOptions;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace, warn};

/// Attribute key carrying a partition's node list
const NODES_KEY: &str = "Nodes";

/// Parse a slurm.conf text with default options
pub fn parse_config(text: &str) -> Result<ClusterRecord, ParseError> {
    parse_config_with(text, &ParseOptions::default())
}

/// Parse a slurm.conf text
///
/// # Errors
/// Fails on malformed directives or node expressions, and when the text has
/// no `ClusterName` directive.
pub fn parse_config_with(
    text: &str,
    options: &ParseOptions,
) -> Result<ClusterRecord, ParseError> {
    let mut state = ParserState::new(text);
    while state.step(options)? {}
    state.finish()
}

/// Mutable state threaded through every parsing step
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    lines: LineSource,
    cluster_name: Option<String>,
    nodes: IndexMap<String, NodeRecord>,
    partitions: IndexMap<String, PartitionRecord>,
}

impl ParserState {
    pub fn new(text: &str) -> Self {
        Self {
            lines: LineSource::new(text),
            ..Self::default()
        }
    }

    /// Dispatch the line at the front of the queue
    ///
    /// Returns `Ok(false)` once the queue is empty.
    pub fn step(&mut self, options: &ParseOptions) -> Result<bool, ParseError> {
        let Some(kind) = self
            .lines
            .peek()
            .map(|line| DirectiveKind::classify(&line.text))
        else {
            return Ok(false);
        };

        match kind {
            DirectiveKind::ClusterName => parse_cluster_name(self)?,
            DirectiveKind::Partition => parse_partition_block(self, options)?,
            DirectiveKind::Node => parse_node_block(self, options)?,
            DirectiveKind::Other => {
                if let Some(line) = self.lines.pop() {
                    trace!(line = line.number, "ignoring directive: {}", line.text);
                }
            }
        }
        Ok(true)
    }

    /// Freeze the state into a cluster record
    pub fn finish(self) -> Result<ClusterRecord, ParseError> {
        ClusterRecord::assemble(self.cluster_name, self.nodes, self.partitions)
    }

    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref()
    }

    pub fn nodes(&self) -> &IndexMap<String, NodeRecord> {
        &self.nodes
    }

    pub fn partitions(&self) -> &IndexMap<String, PartitionRecord> {
        &self.partitions
    }

    /// Number of lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

/// Consume one `ClusterName=` line; the first name seen wins
pub fn parse_cluster_name(state: &mut ParserState) -> Result<(), ParseError> {
    let Some(line) = state.lines.pop() else {
        return Ok(());
    };
    let directive = tokenize(&line)?;
    let Some(token) = directive
        .tokens
        .into_iter()
        .next()
        .filter(|token| !token.value.is_empty())
    else {
        return Err(ParseError::MalformedDirective {
            line: line.number,
            token: line.text,
        });
    };

    match state.cluster_name.as_deref() {
        None => {
            info!("Found cluster {}", token.value);
            state.cluster_name = Some(token.value);
        }
        Some(existing) if existing != token.value => {
            warn!(
                line = line.number,
                "ignoring ClusterName={}, already parsing cluster {}", token.value, existing
            );
        }
        Some(_) => {}
    }
    Ok(())
}

/// Consume a `NodeName=` block and create or merge its node records
pub fn parse_node_block(state: &mut ParserState, options: &ParseOptions) -> Result<(), ParseError> {
    let Some(block) = read_block(&mut state.lines, BlockKind::Node)? else {
        return Ok(());
    };
    if options.is_skipped(&block.name) {
        debug!(line = block.line, "skipping node block {}", block.name);
        return Ok(());
    }

    let names = expand_at(&block.name, block.line)?;
    debug!(line = block.line, "node block {} -> {} nodes", block.name, names.len());
    for name in names {
        state
            .nodes
            .entry(name)
            .or_default()
            .merge_attributes(&block.attributes);
    }
    Ok(())
}

/// Consume a `PartitionName=` block, create its record and cross-register nodes
pub fn parse_partition_block(
    state: &mut ParserState,
    options: &ParseOptions,
) -> Result<(), ParseError> {
    let Some(block) = read_block(&mut state.lines, BlockKind::Partition)? else {
        return Ok(());
    };
    if options.is_skipped(&block.name) {
        debug!(line = block.line, "skipping partition block {}", block.name);
        return Ok(());
    }

    let mut members = IndexSet::new();
    for (line, expr) in &block.node_lists {
        members.extend(expand_at(expr, *line)?);
    }
    for node in &members {
        state
            .nodes
            .entry(node.clone())
            .or_default()
            .add_partition(&block.name);
    }

    // A repeated partition accumulates members across its blocks
    let max_nodes = state
        .nodes
        .values()
        .filter(|node| node.partitions.contains(&block.name))
        .count();
    debug!(
        line = block.line,
        "partition block {} -> {} nodes",
        block.name,
        max_nodes
    );
    let partition = state.partitions.entry(block.name).or_default();
    partition.merge_attributes(&block.attributes);
    partition.max_nodes = max_nodes;
    Ok(())
}

fn expand_at(expr: &str, line: usize) -> Result<Vec<String>, ParseError> {
    hostlist::expand(expr).map_err(|source| ParseError::MalformedExpression { line, source })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Node,
    Partition,
}

impl BlockKind {
    /// Keys accepted from continuation lines
    fn allowed_keys(self) -> &'static [&'static str] {
        match self {
            BlockKind::Node => NODE_KEYS,
            BlockKind::Partition => PARTITION_KEYS,
        }
    }

    fn collects_node_lists(self) -> bool {
        self == BlockKind::Partition
    }
}

/// Progress through a block's lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    ReadingDirective,
    Continuing,
    Done,
}

/// Raw content of one block before it is applied to the state
#[derive(Debug, Default)]
struct Block {
    name: String,
    /// Line of the directive
    line: usize,
    attributes: Attributes,
    /// Unexpanded `Nodes=` values with their lines
    node_lists: Vec<(usize, String)>,
}

/// Consume a directive line and its continuation lines
///
/// Every token on the directive line is kept; continuation lines only
/// contribute keys from the block's allow-list.
fn read_block(lines: &mut LineSource, kind: BlockKind) -> Result<Option<Block>, ParseError> {
    let mut block = Block::default();
    let mut state = BlockState::ReadingDirective;

    while state != BlockState::Done {
        let Some(line) = lines.pop() else {
            break;
        };
        let directive = tokenize(&line)?;
        let mut tokens = directive.tokens.into_iter();

        if state == BlockState::ReadingDirective {
            let name = tokens.next().map(|token| token.value).unwrap_or_default();
            if name.is_empty() {
                return Err(ParseError::MalformedDirective {
                    line: line.number,
                    token: line.text,
                });
            }
            block.name = name;
            block.line = line.number;
        }

        for token in tokens {
            if kind.collects_node_lists() && token.key == NODES_KEY {
                block.node_lists.push((line.number, token.value));
            } else if state == BlockState::ReadingDirective
                || kind.allowed_keys().contains(&token.key.as_str())
            {
                block.attributes.insert(token.key, token.value);
            } else {
                trace!(line = line.number, "dropping {}={}", token.key, token.value);
            }
        }

        state = if directive.continues {
            BlockState::Continuing
        } else {
            BlockState::Done
        };
    }

    if block.name.is_empty() {
        return Ok(None);
    }
    Ok(Some(block))
}
