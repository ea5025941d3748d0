// License: MIT
// Copyright © 2026 The router-topology Authors

//! This module contains the configuration options for the `Topology`, the
//! diagram canvas and the deployment client.

use std::time::Duration;

use crate::Error;

/// Environment variable that overrides [`DeployConfig::base_url`].
pub const DEPLOY_URL_ENV: &str = "TOPOLOGY_DEPLOY_URL";

/// Environment variable that overrides [`DeployConfig::timeout`], in seconds.
pub const DEPLOY_TIMEOUT_ENV: &str = "TOPOLOGY_DEPLOY_TIMEOUT_SECS";

/// The most routers a topology can hold, whatever its configuration.
///
/// The deployment backend refuses larger topologies.
pub const MAX_ROUTERS: usize = 8;

/// Configuration options for the `Topology`.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyConfig {
    pub(crate) max_routers: usize,
}

impl TopologyConfig {
    /// Creates a configuration that allows up to `max_routers` routers.
    ///
    /// Returns an error unless `max_routers` is between 1 and
    /// [`MAX_ROUTERS`].
    pub fn new(max_routers: usize) -> Result<Self, Error> {
        if !(1..=MAX_ROUTERS).contains(&max_routers) {
            return Err(Error::invalid_config(format!(
                "Router limit must be between 1 and {MAX_ROUTERS}, got {max_routers}."
            )));
        }
        Ok(Self { max_routers })
    }

    /// Returns the maximum number of routers a topology may hold.
    ///
    /// Never more than [`MAX_ROUTERS`].
    pub fn max_routers(&self) -> usize {
        self.max_routers.min(MAX_ROUTERS)
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            max_routers: MAX_ROUTERS,
        }
    }
}

/// Geometry of the canvas the topology diagram is drawn on.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,

    /// Radius of the layout circle, as a fraction of the smaller canvas
    /// dimension.
    pub radius_ratio: f64,

    /// Radius of the circle drawn for each router.
    pub node_radius: f64,
}

impl CanvasConfig {
    /// Returns the center of the canvas.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Returns the radius of the circle routers are placed on.
    pub fn layout_radius(&self) -> f64 {
        self.width.min(self.height) * self.radius_ratio
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 860.0,
            height: 420.0,
            radius_ratio: 0.33,
            node_radius: 22.0,
        }
    }
}

/// Configuration for the deployment client.
///
/// `name`, `mgmt_subnet` and `ceos_image` are copied verbatim into every
/// deployment payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployConfig {
    /// Base URL of the deployment backend, without a trailing slash.
    pub base_url: String,
    pub name: String,
    pub mgmt_subnet: String,
    pub ceos_image: String,

    /// How long to wait for the backend before giving up on a deployment.
    pub timeout: Duration,
}

impl DeployConfig {
    /// Returns the default configuration, with the backend URL and timeout
    /// overridden from the environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(DEPLOY_URL_ENV) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(secs) = std::env::var(DEPLOY_TIMEOUT_ENV) {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => tracing::warn!(
                    "Ignoring {}={:?}: {}; using {:?}.",
                    DEPLOY_TIMEOUT_ENV,
                    secs,
                    e,
                    config.timeout
                ),
            }
        }
        config
    }

    /// Returns the URL deployments are posted to.
    pub fn deploy_url(&self) -> String {
        format!("{}/deploy", self.base_url)
    }

    /// Returns the URL of the backend's health check.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            name: "sdn-lab".to_string(),
            mgmt_subnet: "172.20.20.0/24".to_string(),
            ceos_image: "ceos:4.35.1F".to_string(),
            timeout: Duration::from_secs(10 * 60),
        }
    }
}
