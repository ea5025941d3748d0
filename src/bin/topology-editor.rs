// License: MIT
// Copyright © 2026 The router-topology Authors

//! Topology editor - build a router topology from commands and deploy it.
//!
//! # Usage
//!
//! ```bash
//! topology-editor --script demos/lab.topo --svg lab.svg
//! echo "router add r1" | topology-editor --json -
//! topology-editor --script demos/lab.topo --check --deploy
//! ```
//!
//! Besides the editing commands understood by [`Command`], a script may
//! contain `show`, `health` and `deploy` lines.  Lines starting with `#` are
//! ignored.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use router_topology::deploy::{DeployPayload, DeployStatus, DeploymentClient};
use router_topology::session::{Command, EditorSession};
use router_topology::{CanvasConfig, DeployConfig, TopologyConfig, MAX_ROUTERS};

/// Build a router topology from commands, draw it and deploy it
#[derive(Parser, Debug)]
#[command(name = "topology-editor", version, about, long_about = None)]
struct Cli {
    /// File with one command per line (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the diagram as SVG to this file when done
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Write the JSON preview to this file when done ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Deploy the topology when done
    #[arg(long)]
    deploy: bool,

    /// Check the payload against the backend's rules before deploying
    #[arg(long)]
    check: bool,

    /// Deployment backend URL (overrides TOPOLOGY_DEPLOY_URL)
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Deployment timeout in seconds (overrides TOPOLOGY_DEPLOY_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Maximum number of routers (at most 8)
    #[arg(long, default_value_t = MAX_ROUTERS, value_parser = router_limit)]
    max_routers: usize,
}

fn router_limit(arg: &str) -> Result<usize, String> {
    let limit = arg.parse::<usize>().map_err(|e| e.to_string())?;
    TopologyConfig::new(limit)
        .map(|config| config.max_routers())
        .map_err(|e| e.description().to_string())
}

impl Cli {
    fn deploy_config(&self) -> DeployConfig {
        let mut config = DeployConfig::from_env();
        if let Some(url) = &self.backend_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

struct Editor {
    session: EditorSession,
    client: DeploymentClient,
    check: bool,
}

impl Editor {
    async fn run_line(&mut self, line: &str) {
        match line {
            "show" => self.show(),
            "health" => match self.client.health_check().await {
                Ok(health) => println!("Backend health: {}", health.status),
                Err(e) => println!("{e}"),
            },
            "deploy" => self.deploy().await,
            _ => match line.parse::<Command>() {
                Ok(command) => {
                    if let Err(e) = self.session.apply(command) {
                        println!("{}", e.description());
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    fn show(&self) {
        let view = self.session.view();
        println!("Routers: {}", view.router_list.join(", "));
        for (id, link) in &view.link_list {
            println!("  [{id}] {link}");
        }
    }

    async fn deploy(&self) {
        if self.check {
            let snapshot = self.session.topology().snapshot();
            let payload = DeployPayload::from_snapshot(&snapshot, self.client.config());
            if let Err(e) = payload.check() {
                println!("Not deploying: {e}");
                return;
            }
        }

        if let Some(message) = DeployStatus::Running.message() {
            println!("{message}");
        }
        match self.client.deploy(self.session.topology()).await {
            Ok(report) => println!("{}", report.message()),
            Err(e) => println!("{e}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let deploy_config = cli.deploy_config();

    let mut editor = Editor {
        session: EditorSession::new(
            TopologyConfig::new(cli.max_routers)?,
            CanvasConfig::default(),
            deploy_config.clone(),
        ),
        client: DeploymentClient::new(deploy_config),
        check: cli.check,
    };

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        editor.run_line(line).await;
    }

    let view = editor.session.view();
    if let Some(path) = &cli.svg {
        std::fs::write(path, view.diagram.to_svg())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote diagram to {}.", path.display());
    }
    if let Some(path) = &cli.json {
        if path.as_os_str() == "-" {
            println!("{}", view.json_preview);
        } else {
            std::fs::write(path, &view.json_preview)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote JSON preview to {}.", path.display());
        }
    }
    if cli.deploy {
        editor.deploy().await;
    }

    Ok(())
}
