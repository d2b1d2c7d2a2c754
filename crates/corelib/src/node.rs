//! Node abstractions for the consistent hash ring.
//!
//! Physical nodes are opaque identifiers. The ring compares them for
//! membership and hashes their display form to derive vnode positions, and
//! hands back the exact value it was given on lookup.

use crate::error::{Error, Result};
use crate::ring::TOP_WEIGHT;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// A value that can be stored on the ring as a physical node.
///
/// Blanket-implemented for every type with the required bounds, so plain
/// `String`s, `&'static str`s and small newtypes all qualify. The display
/// form must be distinct for distinct nodes; it is what gets hashed.
pub trait RingNode: Clone + Eq + Hash + fmt::Display + Send + Sync + 'static {}

impl<T> RingNode for T where T: Clone + Eq + Hash + fmt::Display + Send + Sync + 'static {}

/// Textual node description: `name` or `name:weight`.
///
/// Weight is a percentage of the ring's replica count, `100` when omitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    /// Node identifier placed on the ring.
    pub name: String,
    /// Weight in percent of the configured replica count.
    pub weight: u32,
}

impl NodeSpec {
    /// Construct a spec at full weight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: TOP_WEIGHT,
        }
    }

    pub fn with_weight(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

impl FromStr for NodeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Split on the last ':' so names like "10.0.0.1:6379" keep their port
        // when a weight follows: "10.0.0.1:6379:50".
        let (name, weight) = match s.rsplit_once(':') {
            Some((name, weight)) if is_weight(weight) => {
                let weight = weight
                    .parse::<u32>()
                    .map_err(|e| Error::InvalidNode(format!("{s}: {e}")))?;
                (name, weight)
            }
            _ => (s, TOP_WEIGHT),
        };

        if name.trim().is_empty() {
            return Err(Error::InvalidNode(format!("{s:?}: empty node name")));
        }

        Ok(Self::with_weight(name, weight))
    }
}

fn is_weight(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.weight)
    }
}
