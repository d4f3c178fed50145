// ABOUTME: Engine implementation backed by the local Docker/Podman daemon.
// ABOUTME: Streams create_image progress into log lines and layer/overall percentages.

use super::progress::LayerTracker;
use super::{Engine, EngineError, PullSinks};
use crate::config::EngineConfig;
use crate::session::PullRequest;
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::CreateImageInfo;
use bollard::query_parameters::CreateImageOptionsBuilder;
use futures::StreamExt;

const DOCKER_HUB_HOSTS: [&str; 4] = [
    "registry.hub.docker.com",
    "docker.io",
    "index.docker.io",
    "registry-1.docker.io",
];

// Per-chunk statuses repeat many times per layer; they feed the bars only.
const PROGRESS_ONLY_STATUSES: [&str; 2] = ["Downloading", "Extracting"];

fn map_pull_error(e: bollard::errors::Error, reference: &str) -> EngineError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            EngineError::NotFound(reference.to_string())
        }
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 401 || *status_code == 403 =>
        {
            EngineError::AuthenticationFailed(reference.to_string())
        }
        _ => EngineError::PullFailed(format!("{}: {}", reference, e)),
    }
}

/// Reference handed to the daemon: the registry is prefixed unless the image
/// already names one or the registry is Docker Hub.
///
/// # Errors
///
/// `EngineError::InvalidReference` when the image text is not a well-formed reference.
pub fn qualified_reference(request: &PullRequest) -> Result<String, EngineError> {
    let image = request.image().resolve()?;
    let registry = request.registry().trim_end_matches('/');

    if image.registry().is_some() || registry.is_empty() || DOCKER_HUB_HOSTS.contains(&registry)
    {
        Ok(image.canonical())
    } else {
        Ok(format!("{}/{}", registry, image.canonical()))
    }
}

pub struct DockerEngine {
    client: Docker,
}

impl DockerEngine {
    /// Build a client for the configured socket. No I/O happens until the first pull.
    pub fn connect(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = match config.socket.as_deref() {
            Some(socket) => Docker::connect_with_unix(
                socket,
                config.timeout.as_secs(),
                bollard::API_DEFAULT_VERSION,
            ),
            None => Docker::connect_with_local_defaults()
                .map(|client| client.with_timeout(config.timeout)),
        }
        .map_err(|e| EngineError::Connection(e.to_string()))?;

        Ok(Self { client })
    }

    async fn report(info: &CreateImageInfo, tracker: &mut LayerTracker, sinks: &PullSinks) {
        let status = info.status.as_deref().unwrap_or_default();

        let Some(id) = info.id.as_deref() else {
            if !status.is_empty() {
                sinks.log(status).await;
            }
            return;
        };

        if !PROGRESS_ONLY_STATUSES.contains(&status) {
            sinks.log(format!("{}: {}", id, status)).await;
        }

        let detail = info.progress_detail.as_ref();
        let update = tracker.observe(
            id,
            status,
            detail.and_then(|d| d.current),
            detail.and_then(|d| d.total),
        );

        if let Some(layer) = update.layer {
            sinks.layer_progress(i64::from(layer.value())).await;
        }
        if let Some(overall) = update.overall {
            sinks.overall_progress(i64::from(overall.value())).await;
        }
    }
}

#[async_trait]
impl Engine for DockerEngine {
    async fn pull(&self, request: &PullRequest, sinks: &PullSinks) -> Result<(), EngineError> {
        let reference = qualified_reference(request)?;
        let platform = request.architecture().platform();

        tracing::debug!(%reference, %platform, "pulling through daemon");
        sinks
            .log(format!("resolving {} for {}", reference, platform))
            .await;

        let options = CreateImageOptionsBuilder::default()
            .from_image(&reference)
            .platform(platform)
            .build();

        let mut tracker = LayerTracker::default();
        let mut stream = self.client.create_image(Some(options), None, None);
        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| map_pull_error(e, &reference))?;

            if let Some(message) = info.error_detail.as_ref().and_then(|d| d.message.clone()) {
                return Err(EngineError::PullFailed(format!("{}: {}", reference, message)));
            }

            Self::report(&info, &mut tracker, sinks).await;
        }

        Ok(())
    }
}
