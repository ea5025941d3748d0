// License: MIT
// Copyright © 2026 The router-topology Authors

//! This module is only compiled when running unit tests and contains
//! the `TopologyBuilder`, which can declaratively build topologies for use in
//! tests across the crate.

use crate::{Topology, TopologyConfig};

/// A builder for creating topologies easily, for use in tests.
pub(crate) struct TopologyBuilder {
    routers: Vec<String>,
    links: Vec<(String, String)>,
    config: TopologyConfig,
}

impl TopologyBuilder {
    /// Creates a new `TopologyBuilder`.
    pub(crate) fn new() -> Self {
        TopologyBuilder {
            routers: Vec::new(),
            links: Vec::new(),
            config: TopologyConfig::default(),
        }
    }

    /// Adds `count` routers named `r1`, `r2`, ... after the existing ones.
    pub(crate) fn routers(mut self, count: usize) -> Self {
        let start = self.routers.len() + 1;
        self.routers
            .extend((start..start + count).map(|i| format!("r{i}")));
        self
    }

    /// Adds a router with the given name.
    pub(crate) fn router(mut self, name: &str) -> Self {
        self.routers.push(name.to_string());
        self
    }

    /// Adds a link between two routers.
    pub(crate) fn link(mut self, a: &str, b: &str) -> Self {
        self.links.push((a.to_string(), b.to_string()));
        self
    }

    /// Builds the topology, panicking if it is invalid.
    pub(crate) fn build(self) -> Topology {
        match Topology::try_new(self.routers, self.links, self.config) {
            Ok(topology) => topology,
            Err(e) => panic!("Invalid test topology: {e}"),
        }
    }
}
