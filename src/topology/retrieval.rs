// License: MIT
// Copyright © 2026 The router-topology Authors

//! Methods for retrieving routers and links from a [`Topology`].

use crate::iterators::{Links, Neighbors, Routers};
use crate::{Error, TopologyConfig};

use super::{Link, LinkId, Topology};

/// `Router` and `Link` retrieval.
impl Topology {
    /// Returns an iterator over the router names, in insertion order.
    pub fn routers(&self) -> Routers<'_> {
        Routers {
            graph: &self.graph,
            iter: self.router_order.iter(),
        }
    }

    /// Returns an iterator over the links, in creation order.
    pub fn links(&self) -> Links<'_> {
        self.links.iter()
    }

    /// Returns the link with the given id, if it exists.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|link| link.id == id)
    }

    /// Returns true if a router with the given name exists.
    pub fn contains_router(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Returns true if `a` and `b` are linked, in either orientation.
    pub fn has_link(&self, a: &str, b: &str) -> bool {
        match (self.node_indices.get(a), self.node_indices.get(b)) {
            (Some(&a_idx), Some(&b_idx)) => self.graph.find_edge(a_idx, b_idx).is_some(),
            _ => false,
        }
    }

    /// Returns an iterator over the routers linked to the given router.
    ///
    /// Returns an error if the router doesn't exist.
    pub fn neighbors(&self, name: &str) -> Result<Neighbors<'_>, Error> {
        self.node_indices
            .get(name)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self.graph.neighbors(index),
            })
            .ok_or_else(|| Error::unknown_router(format!("Router {name} not found.")))
    }

    /// Returns the number of routers.
    pub fn router_count(&self) -> usize {
        self.router_order.len()
    }

    /// Returns the number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the topology has no routers.
    pub fn is_empty(&self) -> bool {
        self.router_order.is_empty()
    }

    /// Returns the configuration the topology was created with.
    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }
}
