// License: MIT
// Copyright © 2026 The router-topology Authors

//! A graph representation of the routers in a network topology and the
//! undirected links between them.

mod creation;
pub mod iterators;
mod mutation;
mod retrieval;
mod snapshot;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use snapshot::TopologySnapshot;

use crate::TopologyConfig;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Routers stored in the `StableUnGraph` can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for every router name,
/// so that routers in the graph can be retrieved by name.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A stable identifier for a link, assigned when the link is created.
///
/// Ids are never reused within a topology, so an id held by a caller keeps
/// referring to the same link no matter how the link sequence shifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(u64);

impl LinkId {
    /// Returns the raw numeric value of the id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for LinkId {
    fn from(value: u64) -> Self {
        LinkId(value)
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected link between two distinct routers.
///
/// The endpoints are kept in the order they were given when the link was
/// added, but `(a, b)` and `(b, a)` denote the same link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    id: LinkId,
    a: String,
    b: String,
}

impl Link {
    pub(crate) fn new(id: LinkId, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            id,
            a: a.into(),
            b: b.into(),
        }
    }

    /// Returns the stable id of the link.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Returns the two endpoints, in the order they were given.
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }

    /// Returns true if the given router is one of the endpoints.
    pub fn touches(&self, router: &str) -> bool {
        self.a == router || self.b == router
    }

    /// Returns true if the link connects `a` and `b`, in either orientation.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ↔ {}", self.a, self.b)
    }
}

/// A network topology: an ordered sequence of named routers and an ordered
/// sequence of undirected links between them.
///
/// Router order is insertion order and drives the diagram layout.  Link order
/// is creation order.
///
/// After every operation the following hold:
///
/// - every link's endpoints are current routers,
/// - no two links denote the same unordered pair,
/// - no link connects a router to itself,
/// - the number of routers doesn't exceed [`TopologyConfig::max_routers`],
///   which is at most [`MAX_ROUTERS`][crate::MAX_ROUTERS].
#[derive(Clone, Debug)]
pub struct Topology {
    graph: StableUnGraph<String, LinkId>,
    node_indices: NodeIndexMap,
    router_order: Vec<NodeIndex>,
    links: Vec<Link>,
    next_link_id: u64,
    config: TopologyConfig,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(TopologyConfig::default())
    }
}
