// License: MIT
// Copyright © 2026 The router-topology Authors

/*!
# Router Topology

This is a library for editing small network topologies, made of named routers
and undirected links between them, drawing them, and deploying them to a
remote lab backend.

## The `Topology`

The main struct is [`Topology`].  Routers are added by name and kept in
insertion order; links connect two distinct routers and get a stable
[`LinkId`][topology::LinkId] when created.

Every mutation either applies completely or returns an [`Error`] and leaves
the topology untouched.  After every operation:

- Every link connects two routers that exist.
- No two links connect the same pair of routers, in either orientation.
- No link connects a router to itself.
- There are at most [`TopologyConfig::max_routers`] routers, and never more
  than [`MAX_ROUTERS`].

Removing a router also removes all of its links.

## Drawing

[`layout::circular_layout`] places routers evenly on a circle, in insertion
order, and [`render::Diagram`] turns a [`TopologySnapshot`] into line and
circle primitives that can be written out as SVG.

## Editing sessions

An [`EditorSession`][session::EditorSession] applies
[`Command`][session::Command]s to a topology and regenerates its
[`View`][session::View] after every successful one.

## Deployment

A [`DeploymentClient`][deploy::DeploymentClient] posts a
[`DeployPayload`][deploy::DeployPayload] built from the topology to the
backend and waits for the result, up to a configurable timeout:

- [`deploy`][deploy::DeploymentClient::deploy]
- [`health_check`][deploy::DeploymentClient::health_check]
*/

mod config;
pub use config::{
    CanvasConfig, DeployConfig, TopologyConfig, DEPLOY_TIMEOUT_ENV, DEPLOY_URL_ENV, MAX_ROUTERS,
};

pub mod topology;
pub use topology::{iterators, Topology, TopologySnapshot};

pub mod layout;
pub mod render;

pub mod session;

pub mod deploy;

mod error;
pub use error::{Error, ErrorKind};
