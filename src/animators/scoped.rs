//! # ScopedAnimator: animation bound to a scope.
//!
//! The animator starts on construction and is released at scope exit:
//! - [`ScopedAnimator::scope`] runs a future and guarantees stop + wait afterwards,
//! - [`ScopedAnimator::close`] is the explicit async disposal,
//! - dropping the value raises the cancellation signal (it cannot wait).
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use dotcycle::{AnimatorConfig, ScopedAnimator, SyncSinkFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), dotcycle::AnimatorError> {
//!     let sink = SyncSinkFn::arc(|text: &str| print!("\r{text}"));
//!     let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(50));
//!
//!     let animator = ScopedAnimator::start(sink, cfg)?;
//!     tokio::time::sleep(Duration::from_millis(120)).await;
//!     animator.close().await?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::future::Future;

use crate::{
    config::AnimatorConfig,
    core::{AnimatorBuilder, handle::AnimatorHandle},
    error::AnimatorError,
    sinks::SinkRef,
};

/// Animator whose disposal stops the loop and waits for it.
///
/// `close` consumes the animator, so it cannot be disposed twice.
#[must_use = "dropping a ScopedAnimator stops the animation immediately"]
pub struct ScopedAnimator {
    handle: AnimatorHandle,
}

impl ScopedAnimator {
    /// Validates the arguments and starts animating.
    ///
    /// Returns without waiting for the first frame. Fails with
    /// [`AnimatorError::InvalidArgument`] for an empty/whitespace `base_text` or
    /// `max_dots == 0`, and with [`AnimatorError::NoRuntime`] outside Tokio.
    pub fn start(sink: SinkRef, config: AnimatorConfig) -> Result<Self, AnimatorError> {
        Self::builder(sink, config).scoped()
    }

    /// Returns a builder (to attach subscribers).
    pub fn builder(sink: SinkRef, config: AnimatorConfig) -> AnimatorBuilder {
        AnimatorBuilder::new(sink, config)
    }

    /// Animates while `body` runs, then stops and waits for the loop.
    ///
    /// Returns the output of `body`, or the animator's failure (a sink error or
    /// panic) if the loop ended abnormally.
    pub async fn scope<Fut>(
        sink: SinkRef,
        config: AnimatorConfig,
        body: Fut,
    ) -> Result<Fut::Output, AnimatorError>
    where
        Fut: Future,
    {
        Self::builder(sink, config).scope(body).await
    }

    pub(crate) fn from_handle(handle: AnimatorHandle) -> Self {
        Self { handle }
    }

    /// Settings this animator runs with.
    pub fn config(&self) -> &AnimatorConfig {
        self.handle.config()
    }

    /// True once the animation loop has exited (stopped or failed).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the animation and waits until the loop has terminated.
    ///
    /// The expected cancellation outcome is discarded. A sink failure or panic
    /// that ended the loop earlier is returned here.
    pub async fn close(mut self) -> Result<(), AnimatorError> {
        self.handle.request_stop();
        self.handle.join().await
    }
}

impl fmt::Debug for ScopedAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedAnimator")
            .field("base_text", &self.config().base_text)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
