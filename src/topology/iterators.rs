// License: MIT
// Copyright © 2026 The router-topology Authors

//! Iterators over routers and links in a `Topology`.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

use crate::topology::{Link, LinkId};

/// An iterator over the router names in a `Topology`, in insertion order.
pub struct Routers<'a> {
    pub(crate) graph: &'a StableUnGraph<String, LinkId>,
    pub(crate) iter: std::slice::Iter<'a, NodeIndex>,
}

impl<'a> Iterator for Routers<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| self.graph[*i].as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Routers<'_> {}

/// An iterator over the links in a `Topology`, in creation order.
pub type Links<'a> = std::slice::Iter<'a, Link>;

/// An iterator over the routers linked to a router in a `Topology`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a StableUnGraph<String, LinkId>,
    pub(crate) iter: petgraph::stable_graph::Neighbors<'a, LinkId>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| self.graph[i].as_str())
    }
}
