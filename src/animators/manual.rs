//! # ManualAnimator: explicit stop and wait.
//!
//! ```text
//! start() ──► RUNNING ──stop()──► cancellation requested ──wait_for_completion()──► STOPPED
//!                 └──── sink failure ─────────────────────────────────────────────► STOPPED (Err)
//! ```
//!
//! `stop` only raises the signal; a frame may still be in flight until
//! `wait_for_completion` returns.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use dotcycle::{AnimatorConfig, ManualAnimator, SinkError, SinkFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), dotcycle::AnimatorError> {
//!     let sink = SinkFn::arc(|text: String| async move {
//!         print!("\r{text}");
//!         Ok::<_, SinkError>(())
//!     });
//!     let cfg = AnimatorConfig::new("Processing").with_interval(Duration::from_millis(50));
//!
//!     let mut animator = ManualAnimator::start(sink, cfg)?;
//!     tokio::time::sleep(Duration::from_millis(120)).await;
//!     animator.stop();
//!     animator.wait_for_completion().await?;
//!     Ok(())
//! }
//! ```

use std::fmt;

use crate::{
    config::AnimatorConfig,
    core::{AnimatorBuilder, handle::AnimatorHandle},
    error::AnimatorError,
    sinks::SinkRef,
};

/// Animator with separate `stop` and `wait_for_completion` operations.
///
/// Dropping it without stopping raises the cancellation signal, so an abandoned
/// animator never keeps delivering frames.
#[must_use = "dropping a ManualAnimator stops the animation immediately"]
pub struct ManualAnimator {
    handle: AnimatorHandle,
}

impl ManualAnimator {
    /// Validates the arguments and starts animating.
    ///
    /// Same validation and launch semantics as
    /// [`ScopedAnimator::start`](crate::ScopedAnimator::start).
    pub fn start(sink: SinkRef, config: AnimatorConfig) -> Result<Self, AnimatorError> {
        Self::builder(sink, config).manual()
    }

    /// Returns a builder (to attach subscribers).
    pub fn builder(sink: SinkRef, config: AnimatorConfig) -> AnimatorBuilder {
        AnimatorBuilder::new(sink, config)
    }

    pub(crate) fn from_handle(handle: AnimatorHandle) -> Self {
        Self { handle }
    }

    /// Settings this animator runs with.
    pub fn config(&self) -> &AnimatorConfig {
        self.handle.config()
    }

    /// Requests cancellation and returns immediately. Repeated calls are no-ops.
    pub fn stop(&self) {
        self.handle.request_stop();
    }

    /// True once [`stop`](Self::stop) was called (or the animator is being dropped).
    pub fn is_stop_requested(&self) -> bool {
        self.handle.is_stop_requested()
    }

    /// True once the animation loop has exited (stopped or failed).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits until the animation loop has terminated.
    ///
    /// Call after [`stop`](Self::stop) to make sure no delivery is still in
    /// flight. Without `stop` this only returns once the sink fails. The expected
    /// cancellation outcome is discarded; a sink failure or panic is returned.
    /// Calls after the first completed wait return `Ok(())` immediately.
    ///
    /// Cancel-safe: if this future is dropped early (for example by
    /// `tokio::time::timeout`), the loop keeps its stop-on-drop guarantee and the
    /// next call still reports its outcome.
    pub async fn wait_for_completion(&mut self) -> Result<(), AnimatorError> {
        self.handle.join().await
    }
}

impl fmt::Debug for ManualAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualAnimator")
            .field("base_text", &self.config().base_text)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animators::testing::{RecordingSink, recording};
    use crate::{Event, EventKind, SinkError, SinkFn, Subscribe};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time;
    use tokio_util::sync::CancellationToken;

    #[derive(Default)]
    struct KindRecorder {
        kinds: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for KindRecorder {
        async fn on_event(&self, event: &Event) {
            self.kinds.lock().unwrap().push(event.kind);
        }

        fn name(&self) -> &'static str {
            "kind-recorder"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_count_frozen_after_stop() {
        let sink = recording();
        let cfg = AnimatorConfig::new("Processing").with_interval(Duration::from_millis(100));
        let mut animator = ManualAnimator::start(sink.clone(), cfg).unwrap();

        time::sleep(Duration::from_millis(300)).await;
        animator.stop();
        animator.wait_for_completion().await.unwrap();

        let stopped_at = sink.count();
        assert!(stopped_at >= 2, "only {stopped_at} deliveries");
        assert!(sink.frames().iter().all(|f| f.starts_with("Processing")));

        time::sleep(Duration::from_millis(300)).await;
        assert_eq!(sink.count(), stopped_at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent_and_wait_is_repeatable() {
        let mut animator = ManualAnimator::start(recording(), AnimatorConfig::new("Loading")).unwrap();
        assert!(!animator.is_stop_requested());

        animator.stop();
        animator.stop();
        assert!(animator.is_stop_requested());

        animator.wait_for_completion().await.unwrap();
        assert!(animator.is_finished());
        animator.wait_for_completion().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_arguments_rejected() {
        let err = ManualAnimator::start(recording(), AnimatorConfig::new(" \t ")).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = ManualAnimator::start(recording(), AnimatorConfig::new("Loading").with_max_dots(0))
            .unwrap_err();
        assert!(matches!(
            err,
            AnimatorError::InvalidArgument {
                argument: "max_dots",
                ..
            }
        ));

        let cfg = AnimatorConfig::new("Loading")
            .with_max_dots(usize::MAX)
            .with_padding(false);
        let err = ManualAnimator::start(recording(), cfg).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_wait_then_drop_stops_the_loop() {
        let sink = recording();
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let mut animator = ManualAnimator::start(sink.clone(), cfg).unwrap();

        let waited = time::timeout(Duration::from_millis(50), animator.wait_for_completion()).await;
        assert!(waited.is_err());
        assert!(!animator.is_finished());

        let waited = time::timeout(Duration::from_millis(50), animator.wait_for_completion()).await;
        assert!(waited.is_err(), "a second wait must still block on the running loop");

        drop(animator);
        time::sleep(Duration::from_millis(1)).await;
        let after_drop = sink.count();

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.count(), after_drop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_timed_out_wait_is_still_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_sink = Arc::clone(&calls);
        let sink = SinkFn::arc(move |_text: String| {
            let n = calls_in_sink.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 3 {
                    Err(SinkError::fail("terminal detached"))
                } else {
                    Ok(())
                }
            }
        });
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let mut animator = ManualAnimator::start(sink, cfg).unwrap();

        let waited = time::timeout(Duration::from_millis(50), animator.wait_for_completion()).await;
        assert!(waited.is_err());

        let err = animator.wait_for_completion().await.unwrap_err();
        assert_eq!(err.as_label(), "animator_sink_failed");
        assert!(animator.is_finished());
        animator.wait_for_completion().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_surfaces_on_wait_without_stop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_sink = Arc::clone(&calls);
        let sink = SinkFn::arc(move |_text: String| {
            let n = calls_in_sink.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 2 {
                    Err(SinkError::fail("widget disposed"))
                } else {
                    Ok(())
                }
            }
        });
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let mut animator = ManualAnimator::start(sink, cfg).unwrap();

        let err = animator.wait_for_completion().await.unwrap_err();
        assert_eq!(err.as_label(), "animator_sink_failed");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooperative_sink_sees_cancellation() {
        struct SlowSink {
            interrupted: AtomicUsize,
        }

        #[async_trait]
        impl crate::Sink for SlowSink {
            async fn deliver(&self, _text: &str, ctx: CancellationToken) -> Result<(), SinkError> {
                tokio::select! {
                    _ = time::sleep(Duration::from_secs(60)) => Ok(()),
                    _ = ctx.cancelled() => {
                        self.interrupted.fetch_add(1, Ordering::SeqCst);
                        Err(SinkError::Canceled)
                    }
                }
            }
        }

        let sink = Arc::new(SlowSink {
            interrupted: AtomicUsize::new(0),
        });
        let mut animator = ManualAnimator::start(sink.clone(), AnimatorConfig::new("Uploading")).unwrap();

        time::sleep(Duration::from_millis(10)).await;
        let before = time::Instant::now();
        animator.stop();
        animator.wait_for_completion().await.unwrap();

        assert!(before.elapsed() < Duration::from_secs(1));
        assert_eq!(sink.interrupted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_full_lifecycle() {
        let recorder = Arc::new(KindRecorder::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![recorder.clone()];
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let mut animator = ManualAnimator::builder(recording(), cfg)
            .with_subscribers(subs)
            .manual()
            .unwrap();

        time::sleep(Duration::from_millis(150)).await;
        animator.stop();
        animator.wait_for_completion().await.unwrap();

        let kinds = recorder.kinds.lock().unwrap().clone();
        assert_eq!(
            kinds,
            [
                EventKind::AnimatorStarted,
                EventKind::FrameDelivered,
                EventKind::FrameDelivered,
                EventKind::StopRequested,
                EventKind::AnimatorStopped,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_sink_throttles_cycle() {
        let sink = Arc::new(RecordingSink::with_latency(Duration::from_millis(200)));
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let mut animator = ManualAnimator::start(sink.clone(), cfg).unwrap();

        // Deliveries start at 0, 300 and 600ms.
        time::sleep(Duration::from_millis(650)).await;
        animator.stop();
        animator.wait_for_completion().await.unwrap();

        assert_eq!(sink.count(), 3);
        assert_eq!(sink.overlaps.load(Ordering::SeqCst), 0);
    }
}
