// License: MIT
// Copyright © 2026 The router-topology Authors

//! The request body sent to the deployment backend.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{DeployConfig, Error, Topology, TopologyConfig, TopologySnapshot, MAX_ROUTERS};

/// The fewest routers the backend accepts.
pub const MIN_ROUTERS: usize = 2;

/// Reasons the backend would reject a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("At least {} routers required, found {}.", MIN_ROUTERS, .0)]
    TooFewRouters(usize),
    #[error("Maximum {} routers allowed, found {}.", MAX_ROUTERS, .0)]
    TooManyRouters(usize),
    #[error("At least one link required.")]
    NoLinks,
    #[error("Duplicate router names not allowed: {0}")]
    DuplicateRouter(String),
    #[error("Invalid router in link: {0}-{1}")]
    UnknownRouter(String, String),
    #[error("Self-links not allowed: {0}")]
    SelfLink(String),
}

/// The JSON document posted to the deployment backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPayload {
    pub name: String,
    pub mgmt_subnet: String,
    pub routers: Vec<String>,
    pub links: Vec<[String; 2]>,
    pub ceos_image: String,
}

impl DeployPayload {
    /// Builds a payload from a topology snapshot and the static fields of the
    /// deployment configuration.
    pub fn from_snapshot(snapshot: &TopologySnapshot, config: &DeployConfig) -> Self {
        Self {
            name: config.name.clone(),
            mgmt_subnet: config.mgmt_subnet.clone(),
            routers: snapshot.routers().to_vec(),
            links: snapshot.link_pairs(),
            ceos_image: config.ceos_image.clone(),
        }
    }

    /// Returns the payload as indented JSON, for previewing.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Rebuilds a [`Topology`] from the routers and links in the payload.
    pub fn to_topology(&self, config: TopologyConfig) -> Result<Topology, Error> {
        Topology::try_new(
            self.routers.iter(),
            self.links.iter().map(|[a, b]| (a, b)),
            config,
        )
    }

    /// Checks the payload against the rules the backend enforces, so that a
    /// doomed deployment can be caught before it is sent.
    pub fn check(&self) -> Result<(), PayloadError> {
        let count = self.routers.len();
        if count < MIN_ROUTERS {
            return Err(PayloadError::TooFewRouters(count));
        }
        if count > MAX_ROUTERS {
            return Err(PayloadError::TooManyRouters(count));
        }
        if self.links.is_empty() {
            return Err(PayloadError::NoLinks);
        }

        let mut routers = HashSet::new();
        for router in &self.routers {
            if !routers.insert(router.as_str()) {
                return Err(PayloadError::DuplicateRouter(router.clone()));
            }
        }
        for [a, b] in &self.links {
            if !routers.contains(a.as_str()) || !routers.contains(b.as_str()) {
                return Err(PayloadError::UnknownRouter(a.clone(), b.clone()));
            }
            if a == b {
                return Err(PayloadError::SelfLink(a.clone()));
            }
        }

        Ok(())
    }
}
