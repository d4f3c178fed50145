// ABOUTME: Background thread that runs one engine pull per session.
// ABOUTME: Forwards sink calls onto the relay and always finishes with Done.

use super::event::{Event, Outcome};
use super::relay::RelaySender;
use super::request::PullRequest;
use crate::engine::{Engine, PullSinks};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread;

const THREAD_NAME: &str = "pull-worker";

/// Spawn the worker thread for `request`. It drives the engine on its own
/// current-thread runtime, so callers need no runtime of their own.
///
/// The session learns the outcome from the relay; the thread is detached.
pub(super) fn spawn(
    engine: Arc<dyn Engine>,
    request: PullRequest,
    relay: RelaySender,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::error!(error = %e, "worker runtime unavailable");
                    relay.blocking_send(Event::Done(Outcome::Failure(format!(
                        "worker runtime unavailable: {e}"
                    ))));
                    return;
                }
            };

            runtime.block_on(async move {
                let sinks = PullSinks::new(relay);
                let outcome = run(engine.as_ref(), &request, &sinks).await;
                sinks.finish(outcome).await;
            });
        })?;

    Ok(())
}

async fn run(engine: &dyn Engine, request: &PullRequest, sinks: &PullSinks) -> Outcome {
    let image = request.image().as_str();
    tracing::debug!(
        image,
        registry = request.registry(),
        arch = %request.architecture(),
        "worker started"
    );

    match AssertUnwindSafe(engine.pull(request, sinks))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            tracing::info!(image, "pull succeeded");
            Outcome::Success
        }
        Ok(Err(e)) => {
            tracing::error!(image, error = %e, "pull failed");
            Outcome::Failure(e.to_string())
        }
        Err(panic) => {
            let message = format!("engine panicked: {}", panic_message(panic.as_ref()));
            tracing::error!(image, "{}", message);
            Outcome::Failure(message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
