// License: MIT
// Copyright © 2026 The router-topology Authors

//! Deployment of a topology to the remote deployment backend.
//!
//! A [`DeploymentClient`] snapshots the topology into a [`DeployPayload`],
//! posts it through a [`Transport`] and races the request against the
//! configured timeout.  Whichever finishes first decides the outcome; the
//! loser is dropped, so a response that arrives after the timeout never
//! reaches the caller.  Progress is tracked as a [`DeployStatus`].

mod client;
mod payload;
mod response;
mod status;
mod transport;

pub use client::DeploymentClient;
pub use payload::{DeployPayload, PayloadError, MIN_ROUTERS};
pub use response::{ControllerResult, DeployReport, DeployResponse, HealthResponse};
pub use status::{DeployError, DeployStatus};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
