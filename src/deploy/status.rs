// License: MIT
// Copyright © 2026 The router-topology Authors

//! Deployment states and failures.

use std::time::Duration;

/// Ways a deployment can fail.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    /// Another deployment is still running.  The running one is unaffected.
    #[error("A deployment is already running.")]
    Busy,

    /// No response arrived before the deadline.  The request was cancelled.
    #[error("Deploy timed out after {}.", format_duration(.0))]
    Timeout(Duration),

    /// The backend could not be reached.
    #[error("Backend unreachable: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Deploy failed: {detail}")]
    Backend { status: u16, detail: String },
}

/// The state of the deployment client.
///
/// ```text
/// Idle ──► Running ──► Success
///             ▲   └──► Error
///             └──── (next deploy)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeployStatus {
    #[default]
    Idle,
    Running,
    Success(String),
    Error(DeployError),
}

impl DeployStatus {
    /// Returns true while a deployment is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, DeployStatus::Running)
    }

    /// Returns true for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeployStatus::Success(_) | DeployStatus::Error(_))
    }

    /// Returns a short name for the state.
    pub fn label(&self) -> &'static str {
        match self {
            DeployStatus::Idle => "idle",
            DeployStatus::Running => "running",
            DeployStatus::Success(_) => "success",
            DeployStatus::Error(_) => "error",
        }
    }

    /// Returns the message to show for the state, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            DeployStatus::Idle => None,
            DeployStatus::Running => {
                Some("Deploying topology... this may take a few minutes.".to_string())
            }
            DeployStatus::Success(message) => Some(message.clone()),
            DeployStatus::Error(e) => Some(e.to_string()),
        }
    }
}

fn format_duration(duration: &Duration) -> String {
    let plural = |n: u64, unit: &str| format!("{n} {unit}{}", if n == 1 { "" } else { "s" });

    let secs = duration.as_secs();
    if duration.subsec_nanos() != 0 || secs == 0 {
        format!("{} ms", duration.as_millis())
    } else if secs % 60 == 0 {
        plural(secs / 60, "minute")
    } else {
        plural(secs, "second")
    }
}
