//! Subcommands run against a built ring.

use clap::Subcommand;
use corelib::HashRing;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the owner of each key.
    Get {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Route synthetic keys and report each node's share.
    Dist {
        #[arg(long, default_value_t = 10_000)]
        samples: usize,
    },
    /// List distinct nodes clockwise from a key, owner first.
    Successors {
        key: String,
        #[arg(long, short = 'c', default_value_t = 3)]
        count: usize,
    },
}

/// Output of a command, printable as text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CommandResult {
    Owners {
        /// `None` when no node is reachable.
        owners: Vec<(String, Option<String>)>,
    },
    Distribution {
        samples: usize,
        /// Keys routed per node; unreachable nodes report 0.
        counts: BTreeMap<String, usize>,
        unrouted: usize,
    },
    Successors {
        key: String,
        nodes: Vec<String>,
    },
}

impl Command {
    pub fn execute(&self, ring: &HashRing) -> CommandResult {
        match self {
            Command::Get { keys } => CommandResult::Owners {
                owners: keys.iter().map(|k| (k.clone(), ring.get(k))).collect(),
            },
            Command::Dist { samples } => {
                let mut counts: BTreeMap<String, usize> =
                    ring.nodes().into_iter().map(|n| (n, 0)).collect();
                let mut unrouted = 0;
                for i in 0..*samples {
                    match ring.get(&format!("sample-{i}")) {
                        Some(node) => *counts.entry(node).or_default() += 1,
                        None => unrouted += 1,
                    }
                }
                CommandResult::Distribution {
                    samples: *samples,
                    counts,
                    unrouted,
                }
            }
            Command::Successors { key, count } => CommandResult::Successors {
                key: key.clone(),
                nodes: ring.get_n(key, *count),
            },
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Owners { owners } => {
                for (key, owner) in owners {
                    match owner {
                        Some(node) => writeln!(f, "{key}\t{node}")?,
                        None => writeln!(f, "{key}\tnot found")?,
                    }
                }
            }
            CommandResult::Distribution {
                samples,
                counts,
                unrouted,
            } => {
                for (node, count) in counts {
                    let share = if *samples == 0 {
                        0.0
                    } else {
                        *count as f64 * 100.0 / *samples as f64
                    };
                    writeln!(f, "{node}\t{count}\t{share:.2}%")?;
                }
                if *unrouted > 0 {
                    writeln!(f, "(not found)\t{unrouted}")?;
                }
            }
            CommandResult::Successors { key, nodes } => {
                writeln!(f, "{key}\t{}", nodes.join(" -> "))?;
            }
        }
        Ok(())
    }
}
