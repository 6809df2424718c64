//! # AnimatorHandle: ownership of one running animation.
//!
//! Owns everything a started animator needs to be stopped and awaited:
//! - the [`JoinHandle`] of the [`AnimatorActor`] task,
//! - the [`CancellationToken`] observed by the loop,
//! - the optional subscriber listener (only spawned when subscribers are attached).
//!
//! Both public wrappers ([`ScopedAnimator`](crate::ScopedAnimator) and
//! [`ManualAnimator`](crate::ManualAnimator)) are thin layers over this type.
//!
//! ## Shutdown path
//! ```text
//! request_stop()
//!   ├─► publish StopRequested   (first call only)
//!   └─► token.cancel()          → loop exits at loop-top or during sleep
//!
//! join()
//!   ├─► await animation task    → Ok / SinkError / panic (kept until returned)
//!   └─► fanout.finish()         → subscribers see every event, workers flushed
//! ```
//!
//! ## Rules
//! - Exactly one animation task per handle; it is never restarted.
//! - `join` is cancel-safe: a dropped `join` future loses neither the task nor
//!   its outcome, and the next `join` picks up where it left off.
//! - `join` after a returned outcome yields `Ok(())` immediately.
//! - Dropping a handle whose loop may still run cancels it but cannot wait for it.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    config::AnimatorConfig,
    core::actor::AnimatorActor,
    error::{AnimatorError, SinkError, panic_message},
    events::{Bus, Event, EventKind},
    sinks::SinkRef,
    subscribers::{Fanout, Subscribe},
};

/// Handle to a spawned animation loop.
pub(crate) struct AnimatorHandle {
    config: AnimatorConfig,
    bus: Bus,
    token: CancellationToken,
    /// `None` once the task has resolved.
    task: Option<JoinHandle<Result<(), SinkError>>>,
    /// Outcome of the resolved task, held until a `join` returns it.
    outcome: Option<Result<(), AnimatorError>>,
    fanout: Option<Fanout>,
}

impl AnimatorHandle {
    /// Validates `config` and spawns the animation loop.
    ///
    /// Nothing is spawned when validation fails or no Tokio runtime is available.
    pub(crate) fn spawn(
        sink: SinkRef,
        config: AnimatorConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Result<Self, AnimatorError> {
        config.validate()?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| AnimatorError::NoRuntime)?;

        let bus = Bus::new(config.bus_capacity_clamped());
        let token = CancellationToken::new();

        // Subscribed before the actor runs so `AnimatorStarted` is seen.
        let fanout = Fanout::spawn(&bus, subscribers);

        let actor = AnimatorActor::new(sink, config.clone(), bus.clone());
        let task = runtime.spawn(actor.run(token.clone()));

        Ok(Self {
            config,
            bus,
            token,
            task: Some(task),
            outcome: None,
            fanout,
        })
    }

    pub(crate) fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Raises the cancellation signal. Idempotent.
    pub(crate) fn request_stop(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.bus.publish(
            Event::new(EventKind::StopRequested).with_animator(self.config.base_text.as_str()),
        );
        self.token.cancel();
    }

    pub(crate) fn is_stop_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the animation task, then flushes subscribers.
    ///
    /// Expected cancellation maps to `Ok(())`; sink errors and panics are returned.
    pub(crate) async fn join(&mut self) -> Result<(), AnimatorError> {
        if let Some(task) = self.task.as_mut() {
            let res = task.await;
            self.task = None;
            self.outcome = Some(map_join(res));
        }
        if let Some(fanout) = self.fanout.as_mut() {
            fanout.finish().await;
            self.fanout = None;
        }
        self.outcome.take().unwrap_or(Ok(()))
    }
}

impl Drop for AnimatorHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.request_stop();
        }
        self.token.cancel();
        if let Some(fanout) = &self.fanout {
            fanout.detach();
        }
    }
}

/// Maps the animation task outcome into the public error type.
fn map_join(res: Result<Result<(), SinkError>, JoinError>) -> Result<(), AnimatorError> {
    match res {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AnimatorError::Sink(e)),
        // Aborted by runtime shutdown; same outcome as a cancellation.
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(AnimatorError::Panicked {
            reason: panic_message(&*e.into_panic()),
        }),
    }
}
