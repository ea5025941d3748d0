// License: MIT
// Copyright © 2026 The router-topology Authors

//! An editing session over a [`Topology`].
//!
//! Every successful command is followed by a full refresh of the [`View`]:
//! router list, link list, selector options, JSON preview and diagram, in
//! that order.  A rejected command leaves the view as it was.

use std::str::FromStr;

use tracing::debug;

use crate::deploy::DeployPayload;
use crate::render::Diagram;
use crate::topology::LinkId;
use crate::{CanvasConfig, DeployConfig, Error, Topology, TopologyConfig, TopologySnapshot};

/// An edit to apply to the topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddRouter(String),
    RemoveRouter(String),
    AddLink(String, String),
    RemoveLink(LinkId),
    RemoveLinkAt(usize),
}

/// A line of text that isn't a valid [`Command`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Can't parse command {line:?}: {reason}")]
pub struct ParseCommandError {
    line: String,
    reason: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses commands of the form:
    ///
    /// ```text
    /// router add <name>
    /// router rm <name>
    /// link add <a> <b>
    /// link rm <id>
    /// link rm-at <position>
    /// ```
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| ParseCommandError {
            line: line.to_string(),
            reason: reason.to_string(),
        };
        let words = line.split_whitespace().collect::<Vec<_>>();

        match words.as_slice() {
            ["router", "add", name] => Ok(Command::AddRouter(name.to_string())),
            ["router", "rm", name] => Ok(Command::RemoveRouter(name.to_string())),
            ["link", "add", a, b] => Ok(Command::AddLink(a.to_string(), b.to_string())),
            ["link", "rm", id] => id
                .parse::<u64>()
                .map(|id| Command::RemoveLink(LinkId::from(id)))
                .map_err(|e| fail(&format!("bad link id: {e}"))),
            ["link", "rm-at", position] => position
                .parse::<usize>()
                .map(Command::RemoveLinkAt)
                .map_err(|e| fail(&format!("bad link position: {e}"))),
            ["router", ..] | ["link", ..] => Err(fail("wrong arguments")),
            _ => Err(fail("unknown command")),
        }
    }
}

/// Everything derived from the topology for display.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// Router names, in insertion order.
    pub router_list: Vec<String>,

    /// One line per link, as `(id, "a ↔ b")`, in creation order.
    pub link_list: Vec<(LinkId, String)>,

    /// The router names offered when choosing link endpoints.
    pub selector_options: Vec<String>,

    /// The deployment payload as indented JSON.
    pub json_preview: String,

    pub diagram: Diagram,
}

impl View {
    /// Renders a view of the given snapshot.
    ///
    /// This is a pure function of its arguments.
    pub fn render(
        snapshot: &TopologySnapshot,
        canvas: &CanvasConfig,
        deploy_config: &DeployConfig,
    ) -> Self {
        let router_list = snapshot.routers().to_vec();
        let link_list = snapshot
            .links()
            .iter()
            .map(|link| (link.id(), link.to_string()))
            .collect();
        let selector_options = snapshot.routers().to_vec();
        let json_preview = DeployPayload::from_snapshot(snapshot, deploy_config)
            .to_pretty_json()
            .unwrap_or_else(|e| format!("<unserializable payload: {e}>"));
        let diagram = Diagram::render(snapshot, canvas);

        Self {
            router_list,
            link_list,
            selector_options,
            json_preview,
            diagram,
        }
    }
}

/// A topology being edited, together with its current view.
pub struct EditorSession {
    topology: Topology,
    canvas: CanvasConfig,
    deploy_config: DeployConfig,
    view: View,
}

impl EditorSession {
    /// Starts a session with an empty topology.
    pub fn new(
        topology_config: TopologyConfig,
        canvas: CanvasConfig,
        deploy_config: DeployConfig,
    ) -> Self {
        let topology = Topology::new(topology_config);
        let view = View::render(&topology.snapshot(), &canvas, &deploy_config);
        Self {
            topology,
            canvas,
            deploy_config,
            view,
        }
    }

    /// Returns the topology being edited.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the view of the topology after the last successful command.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Applies a command and refreshes the view.
    ///
    /// Returns an error, and leaves both the topology and the view unchanged,
    /// if the command is rejected.  Commands that change nothing, such as
    /// adding a blank router name, still refresh the view.
    pub fn apply(&mut self, command: Command) -> Result<&View, Error> {
        debug!("Applying {command:?}.");
        match command {
            Command::AddRouter(name) => {
                self.topology.add_router(&name)?;
            }
            Command::RemoveRouter(name) => {
                self.topology.remove_router(&name);
            }
            Command::AddLink(a, b) => {
                self.topology.add_link(&a, &b)?;
            }
            Command::RemoveLink(id) => {
                self.topology.remove_link(id)?;
            }
            Command::RemoveLinkAt(position) => {
                self.topology.remove_link_at(position)?;
            }
        }

        self.view = View::render(&self.topology.snapshot(), &self.canvas, &self.deploy_config);
        Ok(&self.view)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(
            TopologyConfig::default(),
            CanvasConfig::default(),
            DeployConfig::default(),
        )
    }
}
