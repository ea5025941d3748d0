// License: MIT
// Copyright © 2026 The router-topology Authors

//! Response types for the deployment backend.

use serde::{Deserialize, Serialize};

/// The body returned by the backend for a deployment, successful or not.
///
/// Every field is optional; the backend only fills in the ones relevant to
/// the outcome.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeployResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub router_count: Option<u64>,
    #[serde(default)]
    pub controller_result: Option<ControllerResult>,

    /// Human readable failure reason.  Usually a string, but validation
    /// failures can carry structured details.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl DeployResponse {
    /// Returns the failure detail as text, if there is one.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// What the backend's route controller applied.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ControllerResult {
    #[serde(default)]
    pub topology_nodes: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// The outcome of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    /// Number of routers the backend reports as configured.
    pub router_count: u64,

    /// Routers the backend's controller installed routes on.
    pub topology_nodes: Vec<String>,
}

impl DeployReport {
    pub(crate) fn from_response(response: DeployResponse, fallback_count: usize) -> Self {
        Self {
            router_count: response.router_count.unwrap_or(fallback_count as u64),
            topology_nodes: response
                .controller_result
                .map(|c| c.topology_nodes)
                .unwrap_or_default(),
        }
    }

    /// Returns the status message for the report.
    pub fn message(&self) -> String {
        format!(
            "Routes installed successfully on {} routers ({}).",
            self.router_count,
            self.topology_nodes.join(", ")
        )
    }
}
