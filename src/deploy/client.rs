// License: MIT
// Copyright © 2026 The router-topology Authors

//! The deployment client and its timeout race.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use super::{
    DeployError, DeployPayload, DeployReport, DeployResponse, DeployStatus, HealthResponse,
    HttpTransport, RawResponse, Transport,
};
use crate::{DeployConfig, Topology};

/// How long a health check may take.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Deploys topologies to the backend, one at a time.
///
/// The client admits a single deployment at a time: calling
/// [`deploy`][DeploymentClient::deploy] while one is running fails with
/// [`DeployError::Busy`] and leaves the running one alone.
pub struct DeploymentClient<T = HttpTransport> {
    config: DeployConfig,
    transport: T,
    status: StatusCell,
}

impl DeploymentClient<HttpTransport> {
    /// Creates a client that talks HTTP to the backend in the given
    /// configuration.
    pub fn new(config: DeployConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> DeploymentClient<T> {
    /// Creates a client that sends requests over the given transport.
    pub fn with_transport(config: DeployConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            status: StatusCell::new(),
        }
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Returns the current deployment status.
    pub fn status(&self) -> DeployStatus {
        self.status.get()
    }

    /// Returns a receiver that is notified of every status change.
    ///
    /// Changes that happen in quick succession may be seen as one.
    pub fn subscribe(&self) -> watch::Receiver<DeployStatus> {
        self.status.sender.subscribe()
    }

    /// Deploys the topology as it is right now.
    ///
    /// The payload is built before this method returns, so edits made to the
    /// topology while the deployment is pending don't affect it.
    pub fn deploy(
        &self,
        topology: &Topology,
    ) -> impl Future<Output = Result<DeployReport, DeployError>> + '_ {
        let payload = DeployPayload::from_snapshot(&topology.snapshot(), &self.config);
        self.deploy_payload(payload)
    }

    /// Deploys the given payload.
    ///
    /// The request races the configured timeout.  If the timeout wins, the
    /// request is dropped, which cancels it; a response can then no longer be
    /// observed.  If the request wins, the timer is dropped.  Either way the
    /// status moves to a terminal state exactly once.
    pub async fn deploy_payload(
        &self,
        payload: DeployPayload,
    ) -> Result<DeployReport, DeployError> {
        let admission = Admission::acquire(&self.status)?;
        info!(
            "Deploying {} routers and {} links to {}.",
            payload.routers.len(),
            payload.links.len(),
            self.config.deploy_url()
        );

        let result = match tokio::time::timeout(
            self.config.timeout,
            self.transport.post_deploy(&payload),
        )
        .await
        {
            Ok(Ok(response)) => classify(response, payload.routers.len()),
            Ok(Err(e)) => Err(DeployError::Network(e.to_string())),
            Err(_) => Err(DeployError::Timeout(self.config.timeout)),
        };

        match &result {
            Ok(report) => {
                info!("{}", report.message());
                admission.finish(DeployStatus::Success(report.message()));
            }
            Err(e) => {
                warn!("{e}");
                admission.finish(DeployStatus::Error(e.clone()));
            }
        }

        result
    }

    /// Checks that the backend is up.
    ///
    /// Doesn't affect the deployment status.
    pub async fn health_check(&self) -> Result<HealthResponse, DeployError> {
        let response = tokio::time::timeout(HEALTH_TIMEOUT, self.transport.get_health())
            .await
            .map_err(|_| DeployError::Timeout(HEALTH_TIMEOUT))?
            .map_err(|e| DeployError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(backend_error(response));
        }
        serde_json::from_str(&response.body).map_err(|e| DeployError::Backend {
            status: response.status,
            detail: format!("Unexpected health response: {e}"),
        })
    }
}

/// Turns a backend response into a report or an error.
fn classify(response: RawResponse, router_count: usize) -> Result<DeployReport, DeployError> {
    if !response.is_success() {
        return Err(backend_error(response));
    }

    let body = match serde_json::from_str::<DeployResponse>(&response.body) {
        Ok(body) => body,
        Err(e) => {
            warn!("Couldn't parse deploy response ({e}); reporting without details.");
            DeployResponse::default()
        }
    };
    Ok(DeployReport::from_response(body, router_count))
}

/// Uses the backend's `detail` field when the body has one, otherwise the raw
/// body.
fn backend_error(response: RawResponse) -> DeployError {
    let detail = serde_json::from_str::<DeployResponse>(&response.body)
        .ok()
        .and_then(|body| body.detail_text())
        .unwrap_or(response.body);

    DeployError::Backend {
        status: response.status,
        detail,
    }
}

/// The client's deployment status, published to subscribers.
struct StatusCell {
    sender: watch::Sender<DeployStatus>,

    /// Every status published, in order.
    #[cfg(test)]
    published: std::sync::Mutex<Vec<DeployStatus>>,
}

impl StatusCell {
    fn new() -> Self {
        let (sender, _) = watch::channel(DeployStatus::Idle);
        Self {
            sender,
            #[cfg(test)]
            published: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn get(&self) -> DeployStatus {
        self.sender.borrow().clone()
    }

    /// Moves to `Running` unless already there.  Returns whether it moved.
    fn start(&self) -> bool {
        let started = self.sender.send_if_modified(|current| {
            if current.is_running() {
                return false;
            }
            *current = DeployStatus::Running;
            true
        });
        if started {
            self.record(DeployStatus::Running);
        }
        started
    }

    fn set(&self, status: DeployStatus) {
        self.record(status.clone());
        self.sender.send_replace(status);
    }

    #[cfg(test)]
    fn record(&self, status: DeployStatus) {
        if let Ok(mut published) = self.published.lock() {
            published.push(status);
        }
    }

    #[cfg(not(test))]
    fn record(&self, _status: DeployStatus) {}
}

/// The right to run a deployment.
///
/// Holding an `Admission` means the status is `Running`.  Dropping it without
/// calling [`finish`][Admission::finish], which happens when the deploy
/// future itself is dropped, returns the status to `Idle` so that the next
/// deployment isn't locked out.
struct Admission<'a> {
    status: &'a StatusCell,
    finished: bool,
}

impl<'a> Admission<'a> {
    fn acquire(status: &'a StatusCell) -> Result<Self, DeployError> {
        if !status.start() {
            return Err(DeployError::Busy);
        }

        Ok(Self {
            status,
            finished: false,
        })
    }

    fn finish(mut self, outcome: DeployStatus) {
        self.finished = true;
        self.status.set(outcome);
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.status.set(DeployStatus::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::TransportError;
    use crate::topology::test_utils::TopologyBuilder;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// What the scripted transport does for one request.
    enum Step {
        Respond(u16, &'static str),
        Fail(&'static str),
        Wait(oneshot::Receiver<RawResponse>),
    }

    struct ScriptedTransport {
        steps: Mutex<VecDeque<Step>>,
        requests: Mutex<Vec<DeployPayload>>,
        health_calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(steps: impl IntoIterator<Item = Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
                health_calls: AtomicUsize::new(0),
            }
        }

        fn next_step(&self) -> Option<Step> {
            self.steps.lock().unwrap().pop_front()
        }

        async fn run(step: Option<Step>) -> Result<RawResponse, TransportError> {
            match step {
                Some(Step::Respond(status, body)) => Ok(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                Some(Step::Fail(reason)) => Err(TransportError(reason.to_string())),
                Some(Step::Wait(rx)) => rx
                    .await
                    .map_err(|_| TransportError("response dropped".to_string())),
                None => Err(TransportError("no scripted response".to_string())),
            }
        }
    }

    impl Transport for ScriptedTransport {
        async fn post_deploy(&self, payload: &DeployPayload) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(payload.clone());
            let step = self.next_step();
            Self::run(step).await
        }

        async fn get_health(&self) -> Result<RawResponse, TransportError> {
            self.health_calls.fetch_add(1, Ordering::SeqCst);
            let step = self.next_step();
            Self::run(step).await
        }
    }

    fn client(steps: impl IntoIterator<Item = Step>) -> DeploymentClient<ScriptedTransport> {
        DeploymentClient::with_transport(DeployConfig::default(), ScriptedTransport::new(steps))
    }

    fn published<T: Transport>(client: &DeploymentClient<T>) -> Vec<DeployStatus> {
        client.status.published.lock().unwrap().clone()
    }

    fn topology() -> Topology {
        TopologyBuilder::new()
            .routers(3)
            .link("r1", "r2")
            .link("r2", "r3")
            .build()
    }

    const SUCCESS_BODY: &str = r#"{
        "status": "deployed_and_configured",
        "router_count": 3,
        "controller_result": {"topology_nodes": ["r1", "r2", "r3"]}
    }"#;

    #[tokio::test]
    async fn test_success() {
        let client = client([Step::Respond(200, SUCCESS_BODY)]);
        assert_eq!(client.status(), DeployStatus::Idle);

        let report = client.deploy(&topology()).await;
        assert_eq!(
            report,
            Ok(DeployReport {
                router_count: 3,
                topology_nodes: vec!["r1".into(), "r2".into(), "r3".into()],
            })
        );
        assert_eq!(
            client.status(),
            DeployStatus::Success(
                "Routes installed successfully on 3 routers (r1, r2, r3).".to_string()
            )
        );

        let requests = client.transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].routers, ["r1", "r2", "r3"]);
        assert_eq!(requests[0].name, "sdn-lab");
    }

    #[tokio::test]
    async fn test_backend_errors() {
        let client = client([
            Step::Respond(400, r#"{"detail": "Maximum 8 routers allowed."}"#),
            Step::Respond(500, "Internal Server Error"),
            Step::Respond(422, r#"{"detail": [{"msg": "too short"}]}"#),
        ]);
        let topology = topology();

        assert_eq!(
            client.deploy(&topology).await,
            Err(DeployError::Backend {
                status: 400,
                detail: "Maximum 8 routers allowed.".to_string()
            })
        );
        assert_eq!(
            client.status().message(),
            Some("Deploy failed: Maximum 8 routers allowed.".to_string())
        );

        assert_eq!(
            client.deploy(&topology).await,
            Err(DeployError::Backend {
                status: 500,
                detail: "Internal Server Error".to_string()
            })
        );

        assert_eq!(
            client.deploy(&topology).await.unwrap_err().to_string(),
            r#"Deploy failed: [{"msg":"too short"}]"#
        );
    }

    #[tokio::test]
    async fn test_network_error() {
        let client = client([Step::Fail("connection refused")]);

        assert_eq!(
            client.deploy(&topology()).await,
            Err(DeployError::Network("connection refused".to_string()))
        );
        assert_eq!(
            client.status(),
            DeployStatus::Error(DeployError::Network("connection refused".to_string()))
        );
        // No retry.
        assert_eq!(client.transport.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_success_body() {
        let client = client([Step::Respond(200, "ok")]);

        let report = client.deploy(&topology()).await.unwrap();
        assert_eq!(report.router_count, 3);
        assert!(report.topology_nodes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_suppresses_late_response() {
        let (tx, rx) = oneshot::channel();
        let client = client([Step::Wait(rx)]);
        let mut statuses = client.subscribe();

        let result = client.deploy(&topology()).await;
        assert_eq!(result, Err(DeployError::Timeout(Duration::from_secs(600))));

        let expected = DeployStatus::Error(DeployError::Timeout(Duration::from_secs(600)));
        assert_eq!(published(&client), [DeployStatus::Running, expected.clone()]);
        assert!(statuses.has_changed().unwrap());
        assert_eq!(*statuses.borrow_and_update(), expected);
        assert_eq!(
            expected.message(),
            Some("Deploy timed out after 10 minutes.".to_string())
        );

        // The request was cancelled, so the late response has nowhere to go.
        let late = RawResponse {
            status: 200,
            body: SUCCESS_BODY.to_string(),
        };
        assert!(tx.send(late).is_err());

        tokio::time::advance(Duration::from_secs(3600)).await;
        tokio::task::yield_now().await;
        assert!(!statuses.has_changed().unwrap());
        assert_eq!(client.status(), expected);

        let published = published(&client);
        assert_eq!(published.iter().filter(|s| s.is_terminal()).count(), 1);
        assert_eq!(published.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_cancels_timer() {
        let (tx, rx) = oneshot::channel();
        let client = client([Step::Wait(rx)]);
        let topology = topology();

        let deploy = client.deploy(&topology);
        let respond = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let response = RawResponse {
                status: 200,
                body: SUCCESS_BODY.to_string(),
            };
            assert!(tx.send(response).is_ok());
        };
        let (result, ()) = tokio::join!(deploy, respond);
        assert!(result.is_ok());

        let mut statuses = client.subscribe();
        tokio::time::advance(Duration::from_secs(3600)).await;
        tokio::task::yield_now().await;
        assert!(!statuses.has_changed().unwrap());
        assert!(matches!(statuses.borrow_and_update().clone(), DeployStatus::Success(_)));

        let published = published(&client);
        assert_eq!(published.len(), 2);
        assert!(matches!(published[1], DeployStatus::Success(_)));
    }

    #[tokio::test]
    async fn test_single_admission() {
        let (tx, rx) = oneshot::channel();
        let client = client([Step::Wait(rx)]);
        let topology = topology();
        let mut statuses = client.subscribe();

        let first = client.deploy(&topology);
        let second = async {
            statuses.wait_for(|s| s.is_running()).await.unwrap();
            let busy = client.deploy(&topology).await;
            assert_eq!(client.status(), DeployStatus::Running);
            tx.send(RawResponse {
                status: 200,
                body: SUCCESS_BODY.to_string(),
            })
            .unwrap();
            busy
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, Err(DeployError::Busy));
        assert!(first.is_ok());
        // The rejected deployment published nothing.
        assert_eq!(published(&client).len(), 2);
        assert_eq!(client.transport.requests.lock().unwrap().len(), 1);

        // A finished deployment doesn't block the next one.
        assert!(client.status().is_terminal());
        assert_eq!(
            client.deploy(&topology).await,
            Err(DeployError::Network("no scripted response".to_string()))
        );
    }

    #[tokio::test]
    async fn test_snapshot_taken_at_invocation() {
        let (tx, rx) = oneshot::channel();
        let client = client([Step::Wait(rx)]);
        let mut topology = topology();

        let deploy = client.deploy(&topology);
        topology.remove_router("r1");
        topology.add_router("r9").unwrap();

        tx.send(RawResponse {
            status: 200,
            body: SUCCESS_BODY.to_string(),
        })
        .unwrap();
        assert!(deploy.await.is_ok());

        let requests = client.transport.requests.lock().unwrap();
        assert_eq!(requests[0].routers, ["r1", "r2", "r3"]);
        assert_eq!(requests[0].links.len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_deploy_releases_admission() {
        let (_tx, rx) = oneshot::channel();
        let client = client([Step::Wait(rx), Step::Fail("refused")]);
        let topology = topology();

        {
            let mut deploy = Box::pin(client.deploy(&topology));
            tokio::select! {
                biased;
                _ = &mut deploy => panic!("deploy shouldn't finish"),
                _ = tokio::task::yield_now() => {}
            }
            assert!(client.status().is_running());
        }
        assert_eq!(client.status(), DeployStatus::Idle);
        assert_eq!(
            published(&client),
            [DeployStatus::Running, DeployStatus::Idle]
        );
        assert!(client.deploy(&topology).await.is_err());
        assert!(client.status().is_terminal());
    }

    #[tokio::test]
    async fn test_health_check() {
        let client = client([
            Step::Respond(200, r#"{"status": "ok"}"#),
            Step::Respond(503, r#"{"detail": "starting"}"#),
            Step::Fail("refused"),
        ]);

        assert_eq!(
            client.health_check().await,
            Ok(HealthResponse {
                status: "ok".to_string()
            })
        );
        assert_eq!(
            client.health_check().await,
            Err(DeployError::Backend {
                status: 503,
                detail: "starting".to_string()
            })
        );
        assert_eq!(
            client.health_check().await,
            Err(DeployError::Network("refused".to_string()))
        );
        assert_eq!(client.transport.health_calls.load(Ordering::SeqCst), 3);
        assert_eq!(client.status(), DeployStatus::Idle);
    }
}
