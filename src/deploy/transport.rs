// License: MIT
// Copyright © 2026 The router-topology Authors

//! The channel deployment requests travel over.
//!
//! [`Transport`] only moves bytes; interpreting status codes and bodies is
//! left to the [`DeploymentClient`][crate::deploy::DeploymentClient].

use std::future::Future;

use reqwest::Client;

use super::DeployPayload;
use crate::DeployConfig;

/// A response from the backend, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Returns true for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The backend could not be reached, or the connection broke before a full
/// response was read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends requests to the deployment backend.
pub trait Transport: Send + Sync {
    /// Posts a deployment payload and returns the backend's response.
    fn post_deploy(
        &self,
        payload: &DeployPayload,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;

    /// Queries the backend's health endpoint.
    fn get_health(&self) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// A [`Transport`] that talks HTTP to the backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    deploy_url: String,
    health_url: String,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport for the backend in the given configuration.
    ///
    /// The client has no timeout of its own; deadlines are enforced by the
    /// caller.
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            deploy_url: config.deploy_url(),
            health_url: config.health_url(),
            client: Client::new(),
        }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn post_deploy(&self, payload: &DeployPayload) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(&self.deploy_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Self::read(response).await
    }

    async fn get_health(&self) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Self::read(response).await
    }
}
