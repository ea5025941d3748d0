// License: MIT
// Copyright © 2026 The router-topology Authors

//! Immutable copies of a [`Topology`]'s state.

use super::{Link, Topology};

/// The routers and links of a [`Topology`] at one instant.
///
/// Views and deployment payloads are derived from snapshots, so that later
/// edits to the topology don't affect them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopologySnapshot {
    routers: Vec<String>,
    links: Vec<Link>,
}

impl TopologySnapshot {
    /// Creates a snapshot from raw parts, bypassing the topology's checks.
    #[cfg(test)]
    pub(crate) fn from_parts(routers: Vec<String>, links: Vec<Link>) -> Self {
        Self { routers, links }
    }

    /// Returns the router names, in insertion order.
    pub fn routers(&self) -> &[String] {
        &self.routers
    }

    /// Returns the links, in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the links as pairs of endpoint names.
    pub fn link_pairs(&self) -> Vec<[String; 2]> {
        self.links
            .iter()
            .map(|link| {
                let (a, b) = link.endpoints();
                [a.to_string(), b.to_string()]
            })
            .collect()
    }

    /// Returns true if there are no routers.
    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }
}

impl Topology {
    /// Returns a snapshot of the current routers and links.
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            routers: self.routers().map(str::to_string).collect(),
            links: self.links.clone(),
        }
    }
}
