use std::future::Future;
use std::sync::Arc;

use crate::{
    animators::{ManualAnimator, ScopedAnimator},
    config::AnimatorConfig,
    core::handle::AnimatorHandle,
    error::AnimatorError,
    sinks::SinkRef,
    subscribers::Subscribe,
};

/// Builder for starting an animator with optional subscribers.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use dotcycle::{AnimatorBuilder, AnimatorConfig, SyncSinkFn};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), dotcycle::AnimatorError> {
///     let sink = SyncSinkFn::arc(|text: &str| print!("\r{text}"));
///     let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(50));
///
///     let answer = AnimatorBuilder::new(sink, cfg)
///         .scope(async {
///             tokio::time::sleep(Duration::from_millis(120)).await;
///             42
///         })
///         .await?;
///     assert_eq!(answer, 42);
///     Ok(())
/// }
/// ```
pub struct AnimatorBuilder {
    sink: SinkRef,
    config: AnimatorConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl AnimatorBuilder {
    /// Creates a new builder for `sink` with the given configuration.
    pub fn new(sink: SinkRef, config: AnimatorConfig) -> Self {
        Self {
            sink,
            config,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive animator events (start, frames, failures, stop)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Starts a [`ScopedAnimator`].
    pub fn scoped(self) -> Result<ScopedAnimator, AnimatorError> {
        self.spawn().map(ScopedAnimator::from_handle)
    }

    /// Starts a [`ManualAnimator`].
    pub fn manual(self) -> Result<ManualAnimator, AnimatorError> {
        self.spawn().map(ManualAnimator::from_handle)
    }

    /// Animates for as long as `body` runs, then stops and waits.
    ///
    /// See [`ScopedAnimator::scope`].
    pub async fn scope<Fut>(self, body: Fut) -> Result<Fut::Output, AnimatorError>
    where
        Fut: Future,
    {
        let animator = self.scoped()?;
        let out = body.await;
        animator.close().await?;
        Ok(out)
    }

    fn spawn(self) -> Result<AnimatorHandle, AnimatorError> {
        AnimatorHandle::spawn(self.sink, self.config, self.subscribers)
    }
}
