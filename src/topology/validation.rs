// License: MIT
// Copyright © 2026 The router-topology Authors

//! Methods for validating a [`Topology`].

use std::collections::HashSet;

use crate::Error;

use super::Topology;

struct TopologyValidator<'a> {
    topology: &'a Topology,
}

impl Topology {
    /// Checks every structural invariant of the topology.
    ///
    /// The mutation methods maintain these invariants, so this only fails if
    /// the topology was corrupted.  It runs at the end of
    /// [`try_new`][Topology::try_new] and in tests.
    pub fn validate(&self) -> Result<(), Error> {
        let validator = TopologyValidator { topology: self };

        validator.validate_capacity()?;
        validator.validate_router_indices()?;
        validator.validate_links()?;

        Ok(())
    }
}

impl TopologyValidator<'_> {
    fn validate_capacity(&self) -> Result<(), Error> {
        let max = self.topology.config.max_routers();
        let count = self.topology.router_order.len();
        if count > max {
            return Err(Error::invalid_topology(format!(
                "{count} routers exceed the maximum of {max}."
            )));
        }
        Ok(())
    }

    /// Validates that the router sequence, the name index and the graph all
    /// describe the same set of routers.
    fn validate_router_indices(&self) -> Result<(), Error> {
        let t = self.topology;
        if t.node_indices.len() != t.router_order.len()
            || t.graph.node_count() != t.router_order.len()
        {
            return Err(Error::invalid_topology(format!(
                "Router bookkeeping out of sync: {} ordered, {} indexed, {} in graph.",
                t.router_order.len(),
                t.node_indices.len(),
                t.graph.node_count()
            )));
        }
        for &index in &t.router_order {
            let name = t.graph.node_weight(index).ok_or_else(|| {
                Error::invalid_topology(format!("Router index {} not in graph.", index.index()))
            })?;
            if t.node_indices.get(name) != Some(&index) {
                return Err(Error::invalid_topology(format!(
                    "Router {name} not indexed."
                )));
            }
        }
        Ok(())
    }

    /// Validates that links are between distinct, existing routers and that
    /// no unordered pair is linked twice.
    fn validate_links(&self) -> Result<(), Error> {
        let t = self.topology;
        let mut pairs = HashSet::new();
        let mut ids = HashSet::new();

        for link in &t.links {
            let (a, b) = link.endpoints();
            if a == b {
                return Err(Error::invalid_topology(format!("Self-link found: {link}")));
            }
            for name in [a, b] {
                if !t.node_indices.contains_key(name) {
                    return Err(Error::invalid_topology(format!(
                        "Link {link} references missing router {name}."
                    )));
                }
            }
            let pair = if a < b { (a, b) } else { (b, a) };
            if !pairs.insert(pair) {
                return Err(Error::invalid_topology(format!(
                    "Duplicate link found: {link}"
                )));
            }
            if !ids.insert(link.id()) {
                return Err(Error::invalid_topology(format!(
                    "Duplicate link id found: {}",
                    link.id()
                )));
            }
            if !t.has_link(a, b) {
                return Err(Error::invalid_topology(format!(
                    "Link {link} missing from graph."
                )));
            }
        }

        if t.graph.edge_count() != t.links.len() {
            return Err(Error::invalid_topology(format!(
                "{} links recorded but the graph has {} edges.",
                t.links.len(),
                t.graph.edge_count()
            )));
        }
        Ok(())
    }
}
