// License: MIT
// Copyright © 2026 The router-topology Authors

//! Methods for adding and removing routers and links.
//!
//! Every method either applies completely or returns an error and leaves the
//! topology untouched.

use petgraph::stable_graph::NodeIndex;
use tracing::debug;

use crate::Error;

use super::{Link, LinkId, Topology};

/// Router and link mutation.
impl Topology {
    /// Appends a router with the given name, after trimming surrounding
    /// whitespace.
    ///
    /// Blank names are ignored and `Ok(None)` is returned.  Otherwise the
    /// stored name is returned.
    ///
    /// Returns an error if the topology is already at capacity or a router
    /// with the same name exists.
    pub fn add_router(&mut self, name: &str) -> Result<Option<&str>, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let max_routers = self.config.max_routers();
        if self.router_order.len() >= max_routers {
            return Err(Error::capacity_exceeded(format!(
                "Maximum {max_routers} routers allowed."
            )));
        }
        if self.node_indices.contains_key(name) {
            return Err(Error::duplicate_router(format!(
                "Router already exists: {name}"
            )));
        }

        let index = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), index);
        self.router_order.push(index);
        debug!("Added router {name} ({} total).", self.router_order.len());

        Ok(Some(self.graph[index].as_str()))
    }

    /// Removes the router with the given name, together with every link that
    /// touches it.
    ///
    /// Removing a router that doesn't exist is a no-op.  Returns whether a
    /// router was removed.
    pub fn remove_router(&mut self, name: &str) -> bool {
        let Some(index) = self.node_indices.remove(name) else {
            return false;
        };

        // Removing the node drops its incident edges from the graph too.
        self.graph.remove_node(index);
        self.router_order.retain(|i| *i != index);

        let link_count = self.links.len();
        self.links.retain(|link| !link.touches(name));
        debug!(
            "Removed router {name} and {} link(s).",
            link_count - self.links.len()
        );

        true
    }

    /// Appends a link between the routers `a` and `b` and returns its id.
    ///
    /// Returns an error if either endpoint is blank, if `a == b`, if either
    /// endpoint is not a router in the topology, or if the routers are
    /// already linked in either orientation.
    pub fn add_link(&mut self, a: &str, b: &str) -> Result<LinkId, Error> {
        if a.is_empty() || b.is_empty() {
            return Err(Error::invalid_link(format!(
                "Link:({a}, {b}) Both endpoints must name a router."
            )));
        }
        if a == b {
            return Err(Error::invalid_link(format!(
                "Link:({a}, {b}) Can't connect a router to itself."
            )));
        }

        let a_idx = self.link_endpoint(a, b, a)?;
        let b_idx = self.link_endpoint(a, b, b)?;

        if self.graph.find_edge(a_idx, b_idx).is_some() {
            return Err(Error::duplicate_link(format!(
                "Link:({a}, {b}) already exists."
            )));
        }

        let id = LinkId(self.next_link_id);
        self.next_link_id += 1;
        self.graph.add_edge(a_idx, b_idx, id);
        self.links.push(Link::new(id, a, b));
        debug!("Added link {id}: {a} ↔ {b}.");

        Ok(id)
    }

    /// Removes the link with the given id and returns it.
    ///
    /// Returns an error if no link has that id.
    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, Error> {
        let position = self
            .links
            .iter()
            .position(|link| link.id == id)
            .ok_or_else(|| Error::link_not_found(format!("Link with id {id} not found.")))?;

        Ok(self.take_link(position))
    }

    /// Removes the link at the given position in the link sequence and
    /// returns it.
    ///
    /// Returns an error if the position is out of range.
    pub fn remove_link_at(&mut self, position: usize) -> Result<Link, Error> {
        if position >= self.links.len() {
            return Err(Error::invalid_position(format!(
                "Link position {position} out of range for {} link(s).",
                self.links.len()
            )));
        }

        Ok(self.take_link(position))
    }

    fn link_endpoint(&self, a: &str, b: &str, name: &str) -> Result<NodeIndex, Error> {
        self.node_indices.get(name).copied().ok_or_else(|| {
            Error::unknown_router(format!("Link:({a}, {b}) Can't find a router named {name}"))
        })
    }

    fn take_link(&mut self, position: usize) -> Link {
        let link = self.links.remove(position);
        let (a, b) = link.endpoints();
        if let (Some(&a_idx), Some(&b_idx)) = (self.node_indices.get(a), self.node_indices.get(b)) {
            if let Some(edge) = self.graph.find_edge(a_idx, b_idx) {
                self.graph.remove_edge(edge);
            }
        }
        debug!("Removed link {}: {link}.", link.id);

        link
    }
}
