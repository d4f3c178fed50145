// ABOUTME: Owns the pull session state machine and enforces single-flight.
// ABOUTME: Starts workers, drains their relay, and applies events to the session.

use super::error::SessionError;
use super::event::{Event, Outcome};
use super::relay::{self, RelayReceiver};
use super::request::{PullInputs, PullRequest};
use super::state::{PullSession, SessionState};
use super::worker;
use crate::config::PullDefaults;
use crate::engine::Engine;
use std::sync::Arc;

const DEFAULT_RELAY_CAPACITY: usize = 64;

/// Drives one pull session at a time.
///
/// The controller is meant to live on the presentation side. Only
/// [`SessionController::step`] and [`SessionController::apply`] change the
/// session's log and progress, and they run wherever the relay is drained.
pub struct SessionController {
    engine: Arc<dyn Engine>,
    defaults: PullDefaults,
    relay_capacity: usize,
    form: PullInputs,
    session: PullSession,
    relay: Option<RelayReceiver>,
}

impl SessionController {
    pub fn new(engine: Arc<dyn Engine>, defaults: PullDefaults) -> Self {
        Self {
            engine,
            form: PullInputs::from_defaults(&defaults),
            defaults,
            relay_capacity: DEFAULT_RELAY_CAPACITY,
            session: PullSession::default(),
            relay: None,
        }
    }

    pub fn with_relay_capacity(mut self, capacity: usize) -> Self {
        self.relay_capacity = capacity.max(1);
        self
    }

    pub fn session(&self) -> &PullSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_running(&self) -> bool {
        self.session.state() == SessionState::Running
    }

    /// Current form values (last started request, or defaults after reset).
    pub fn form(&self) -> &PullInputs {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PullInputs {
        &mut self.form
    }

    /// Validate `inputs` and start a pull without waiting for it.
    ///
    /// Works from any context: the worker gets its own thread and runtime.
    ///
    /// # Errors
    ///
    /// `SessionError::Busy` while a pull is running; `SessionError::Validation`
    /// for a blank image; `SessionError::Spawn` if the worker thread cannot be
    /// created. None of them changes the session.
    pub fn start(&mut self, inputs: PullInputs) -> Result<(), SessionError> {
        if self.is_running() {
            return Err(SessionError::Busy);
        }

        let request = PullRequest::from_inputs(&inputs, &self.defaults)?;
        let (tx, rx) = relay::channel(self.relay_capacity);

        worker::spawn(Arc::clone(&self.engine), request.clone(), tx)
            .map_err(|e| SessionError::Spawn(e.to_string()))?;

        tracing::info!(
            image = request.image().as_str(),
            registry = request.registry(),
            arch = %request.architecture(),
            "session started"
        );
        self.attach(inputs, request, rx);

        Ok(())
    }

    // Enter Running with `relay` as the only source of further session changes.
    fn attach(&mut self, inputs: PullInputs, request: PullRequest, relay: RelayReceiver) {
        let first_line = super::start_line(request.image());
        self.form = inputs;
        self.session.begin(request, first_line);
        self.relay = Some(relay);
    }

    /// Return to `Idle` with an empty log and default form values.
    ///
    /// # Errors
    ///
    /// `SessionError::Busy` while a pull is running.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.is_running() {
            return Err(SessionError::Busy);
        }

        self.relay = None;
        self.session.reset();
        self.form = PullInputs::from_defaults(&self.defaults);
        tracing::info!("session reset");

        Ok(())
    }

    /// Wait for the next relay event without applying it.
    ///
    /// Returns `None` when no session is running. A relay that closes without
    /// a `Done` yields a synthetic failure so the session cannot hang in `Running`.
    pub async fn next_event(&mut self) -> Option<Event> {
        let relay = self.relay.as_mut()?;
        match relay.recv().await {
            Some(event) => Some(event),
            None => {
                tracing::warn!("relay closed without a terminal event");
                self.relay = None;
                Some(Event::Done(Outcome::Failure(
                    "worker exited without reporting an outcome".to_string(),
                )))
            }
        }
    }

    /// Apply one event to the session. `Done` ends the session and drops its relay.
    pub fn apply(&mut self, event: Event) {
        let done = event.is_done();
        if !self.session.apply(event) {
            tracing::debug!("ignoring event outside a running session");
            return;
        }

        if done {
            self.relay = None;
            tracing::info!(state = %self.session.state(), "session finished");
        }
    }

    /// Receive and apply the next event, returning a copy for rendering.
    ///
    /// Cancel-safe: if the future is dropped before an event arrives, nothing is lost.
    pub async fn step(&mut self) -> Option<Event> {
        let event = self.next_event().await?;
        self.apply(event.clone());
        Some(event)
    }

    /// Drain the relay until the session leaves `Running`.
    pub async fn wait(&mut self) -> SessionState {
        while self.is_running() {
            if self.step().await.is_none() {
                break;
            }
        }
        self.state()
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("defaults", &self.defaults)
            .field("form", &self.form)
            .field("state", &self.session.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, PullSinks};
    use async_trait::async_trait;

    struct Immediate;

    #[async_trait]
    impl Engine for Immediate {
        async fn pull(&self, _: &PullRequest, sinks: &PullSinks) -> Result<(), EngineError> {
            sinks.log("fetched").await;
            Ok(())
        }
    }

    fn controller() -> SessionController {
        SessionController::new(Arc::new(Immediate), PullDefaults::default())
    }

    fn alpine() -> PullInputs {
        PullInputs::default().with_image("alpine")
    }

    #[test]
    fn start_needs_no_ambient_runtime() {
        let mut c = controller();
        assert_eq!(c.start(alpine()), Ok(()));
        assert_eq!(c.state(), SessionState::Running);

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        assert_eq!(rt.block_on(c.wait()), SessionState::Succeeded);
        assert_eq!(
            c.session().log(),
            ["starting pull of alpine", "fetched", "pull complete"]
        );
    }

    #[tokio::test]
    async fn relay_closed_without_done_fails_the_session() {
        let mut c = controller();
        let inputs = alpine();
        let request = PullRequest::from_inputs(&inputs, &PullDefaults::default()).unwrap();
        let (tx, rx) = relay::channel(1);
        tx.send(Event::LogLine("partial".to_string())).await;
        drop(tx);

        c.attach(inputs, request, rx);
        assert_eq!(c.wait().await, SessionState::Failed);
        assert_eq!(
            c.session().log(),
            [
                "starting pull of alpine",
                "partial",
                "error: worker exited without reporting an outcome"
            ]
        );
        assert_eq!(c.reset(), Ok(()));
    }
}
