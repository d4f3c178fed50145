// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted engine and tracing setup for integration tests.

use async_trait::async_trait;
use pullwatch::engine::{Engine, EngineError, PullSinks};
use pullwatch::session::PullRequest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use tokio::sync::Notify;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("pullwatch=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One sink call the scripted engine makes.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Emit {
    Log(&'static str),
    Layer(i64),
    Overall(i64),
    /// Block until `ScriptedEngine::release` is called.
    Gate,
}

/// Engine that replays a fixed script, then succeeds or fails.
pub struct ScriptedEngine {
    script: Vec<Emit>,
    failure: Option<String>,
    panic: bool,
    gate: Notify,
    calls: AtomicUsize,
    requests: Mutex<Vec<PullRequest>>,
}

#[allow(dead_code)]
impl ScriptedEngine {
    pub fn succeeding(script: Vec<Emit>) -> Self {
        Self {
            script,
            failure: None,
            panic: false,
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(script: Vec<Emit>, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::succeeding(script)
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic: true,
            ..Self::succeeding(Vec::new())
        }
    }

    /// Let a script waiting at `Emit::Gate` continue.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Number of times `pull` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PullRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Engine for ScriptedEngine {
    async fn pull(&self, request: &PullRequest, sinks: &PullSinks) -> Result<(), EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        for emit in &self.script {
            match emit {
                Emit::Log(line) => sinks.log(*line).await,
                Emit::Layer(value) => sinks.layer_progress(*value).await,
                Emit::Overall(value) => sinks.overall_progress(*value).await,
                Emit::Gate => self.gate.notified().await,
            }
        }

        if self.panic {
            panic!("decoder exploded");
        }

        match &self.failure {
            Some(message) => Err(EngineError::Other(message.clone())),
            None => Ok(()),
        }
    }
}
