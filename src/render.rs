// License: MIT
// Copyright © 2026 The router-topology Authors

//! Rendering of a topology into a vector drawing.
//!
//! [`Diagram::render`] turns a [`TopologySnapshot`] into drawing primitives,
//! and [`Diagram::to_svg`] serializes them.  Both are deterministic: the same
//! snapshot always produces the same output.

use crate::layout::{circular_layout, Point};
use crate::{CanvasConfig, TopologySnapshot};

/// The text shown instead of a drawing when there are no routers.
pub const EMPTY_PROMPT: &str = "Add routers to visualize topology.";

const LINK_STROKE: &str = "#444";
const NODE_FILL: &str = "#e8f0ff";
const NODE_STROKE: &str = "#2b5cff";
const LABEL_FILL: &str = "#111";

/// A straight line drawn for a link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
}

/// A labelled circle drawn for a router.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePrimitive {
    pub center: Point,
    pub radius: f64,
    pub label: String,
}

/// The rendered topology.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagram {
    /// Shown when the topology has no routers.
    Placeholder(String),
    Drawing {
        width: f64,
        height: f64,
        lines: Vec<LinePrimitive>,
        nodes: Vec<NodePrimitive>,
    },
}

impl Diagram {
    /// Renders the given snapshot on the given canvas.
    ///
    /// Links are drawn before routers so that router circles cover the line
    /// ends.  A link with an endpoint that has no position is skipped.
    pub fn render(snapshot: &TopologySnapshot, canvas: &CanvasConfig) -> Self {
        if snapshot.is_empty() {
            return Diagram::Placeholder(EMPTY_PROMPT.to_string());
        }

        let layout = circular_layout(snapshot.routers(), canvas);

        let lines = snapshot
            .links()
            .iter()
            .filter_map(|link| {
                let (a, b) = link.endpoints();
                Some(LinePrimitive {
                    from: layout.position(a)?,
                    to: layout.position(b)?,
                })
            })
            .collect();

        let nodes = snapshot
            .routers()
            .iter()
            .filter_map(|router| {
                layout.position(router).map(|center| NodePrimitive {
                    center,
                    radius: canvas.node_radius,
                    label: router.clone(),
                })
            })
            .collect();

        Diagram::Drawing {
            width: canvas.width,
            height: canvas.height,
            lines,
            nodes,
        }
    }

    /// Serializes the diagram as an SVG document, or as a `<div>` prompt for
    /// the placeholder.
    pub fn to_svg(&self) -> String {
        match self {
            Diagram::Placeholder(prompt) => format!("<div>{}</div>", escape_xml(prompt)),
            Diagram::Drawing {
                width,
                height,
                lines,
                nodes,
            } => {
                let mut svg = format!(
                    "<svg viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
                );
                svg.push_str("<g class=\"links\">\n");
                for line in lines {
                    svg.push_str(&format!(
                        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{LINK_STROKE}\" stroke-width=\"2\"/>\n",
                        line.from.x, line.from.y, line.to.x, line.to.y
                    ));
                }
                svg.push_str("</g>\n<g class=\"nodes\">\n");
                for node in nodes {
                    svg.push_str(&format!(
                        "<g class=\"node\"><circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{NODE_FILL}\" stroke=\"{NODE_STROKE}\" stroke-width=\"2\"/><text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{LABEL_FILL}\">{}</text></g>\n",
                        node.center.x,
                        node.center.y,
                        node.radius,
                        node.center.x,
                        node.center.y + 4.0,
                        escape_xml(&node.label)
                    ));
                }
                svg.push_str("</g>\n</svg>\n");
                svg
            }
        }
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
