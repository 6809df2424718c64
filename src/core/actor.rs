//! # AnimatorActor: the animation loop.
//!
//! Drives one [`Sink`] with frames from a [`DotCycle`]:
//! - formats the current frame and delivers it,
//! - advances the cycle,
//! - sleeps for the configured interval,
//! - stops cooperatively via [`CancellationToken`].
//!
//! ## Event flow
//! ```text
//! AnimatorStarted → FrameDelivered → FrameDelivered → ... → AnimatorStopped
//!                                  → SinkFailed ──────────→ AnimatorStopped
//! ```
//!
//! ## Architecture
//! ```text
//! AnimatorHandle::spawn() ──► tokio::spawn(AnimatorActor::run())
//!
//! loop {                                    RUNNING
//!   ├─► token cancelled? ──► break ───────► STOPPED
//!   ├─► frame = format(dot_count)
//!   ├─► sink.deliver(frame).await
//!   │     ├─ Ok         ──► publish FrameDelivered
//!   │     ├─ Canceled   ──► break (graceful, only after a stop request)
//!   │     └─ otherwise  ──► publish SinkFailed, break with error
//!   ├─► cycle.advance()
//!   └─► select! { sleep(interval), token.cancelled() ──► break }
//! }
//! ```
//!
//! ## Rules
//! - Deliveries run **sequentially** (never concurrent for one actor)
//! - No delivery starts after cancellation was observed
//! - An in-flight delivery is never interrupted; it gets a child token instead

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::{
    config::AnimatorConfig,
    core::frame::DotCycle,
    error::SinkError,
    events::{Bus, Event, EventKind},
    sinks::Sink,
};

/// Runs the dot-cycle loop for a single sink.
pub struct AnimatorActor {
    /// Frame receiver.
    pub sink: Arc<dyn Sink>,
    /// Validated animator settings.
    pub config: AnimatorConfig,
    /// Event bus (used to publish lifecycle events).
    pub bus: Bus,
}

impl AnimatorActor {
    /// Creates a new actor.
    pub fn new(sink: Arc<dyn Sink>, config: AnimatorConfig, bus: Bus) -> Self {
        Self { sink, config, bus }
    }

    /// Runs the loop until cancellation or a sink failure.
    ///
    /// ### Exit conditions
    /// - `token` cancelled (checked at loop-top and during the sleep) → `Ok(())`
    /// - sink returned [`SinkError::Canceled`] after `token` was cancelled → `Ok(())`
    /// - sink returned any other error, or `Canceled` unprompted → `Err(error)`
    ///
    /// Cancellation during the sleep **aborts it** immediately.
    pub async fn run(self, token: CancellationToken) -> Result<(), SinkError> {
        let name: Arc<str> = Arc::from(self.config.base_text.as_str());
        let mut cycle = DotCycle::new(self.config.max_dots);
        let mut delivered: u64 = 0;

        self.bus.publish(
            Event::new(EventKind::AnimatorStarted)
                .with_animator(Arc::clone(&name))
                .with_interval(self.config.interval)
                .with_dots(self.config.max_dots),
        );

        let outcome = loop {
            if token.is_cancelled() {
                break Ok(());
            }

            let dots = cycle.dot_count();
            let frame = self.config.frame(dots);
            let tick = delivered + 1;

            match self.sink.deliver(&frame, token.child_token()).await {
                Ok(()) => {
                    delivered = tick;
                    self.bus.publish(
                        Event::new(EventKind::FrameDelivered)
                            .with_animator(Arc::clone(&name))
                            .with_frame(frame)
                            .with_dots(dots)
                            .with_tick(tick),
                    );
                }
                Err(e) if e.is_cancellation() && token.is_cancelled() => break Ok(()),
                Err(e) => {
                    self.bus.publish(
                        Event::new(EventKind::SinkFailed)
                            .with_animator(Arc::clone(&name))
                            .with_tick(tick)
                            .with_reason(e.to_string()),
                    );
                    break Err(e);
                }
            }

            cycle.advance();

            let sleep = time::sleep(self.config.interval);
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = token.cancelled() => { break Ok(()); }
            }
        };

        self.bus.publish(
            Event::new(EventKind::AnimatorStopped)
                .with_animator(name)
                .with_tick(delivered),
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{SinkFn, SyncSinkFn};
    use std::sync::Mutex;
    use std::time::Duration;

    fn recording_sink() -> (Arc<dyn Sink>, Arc<Mutex<Vec<String>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let frames_in_sink = Arc::clone(&frames);
        let sink: Arc<dyn Sink> = SyncSinkFn::arc(move |text: &str| {
            frames_in_sink.lock().unwrap().push(text.to_owned());
        });
        (sink, frames)
    }

    #[tokio::test]
    async fn test_cancelled_before_start_delivers_nothing() {
        let (sink, frames) = recording_sink();
        let actor = AnimatorActor::new(sink, AnimatorConfig::new("Loading"), Bus::new(8));
        let token = CancellationToken::new();
        token.cancel();

        assert!(actor.run(token).await.is_ok());
        assert!(frames.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_follow_dot_cycle() {
        let (sink, frames) = recording_sink();
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let actor = AnimatorActor::new(sink, cfg, Bus::new(8));
        let token = CancellationToken::new();
        let join = tokio::spawn(actor.run(token.clone()));

        // Deliveries at 0, 100, 200, 300 and 400ms.
        time::sleep(Duration::from_millis(450)).await;
        token.cancel();
        assert!(join.await.unwrap().is_ok());

        let frames = frames.lock().unwrap();
        assert_eq!(
            *frames,
            [
                "Loading   ",
                "Loading.  ",
                "Loading.. ",
                "Loading...",
                "Loading   "
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_stops_loop_with_error() {
        let calls = Arc::new(Mutex::new(0u32));
        let calls_in_sink = Arc::clone(&calls);
        let sink = SinkFn::arc(move |_text: String| {
            let calls = Arc::clone(&calls_in_sink);
            async move {
                let mut n = calls.lock().unwrap();
                *n += 1;
                if *n == 3 {
                    Err(SinkError::fail("display gone"))
                } else {
                    Ok(())
                }
            }
        });
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let cfg = AnimatorConfig::new("Sync").with_interval(Duration::from_millis(10));

        let err = AnimatorActor::new(sink, cfg, bus)
            .run(CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, SinkError::fail("display gone"));
        assert_eq!(*calls.lock().unwrap(), 3);

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            [
                EventKind::AnimatorStarted,
                EventKind::FrameDelivered,
                EventKind::FrameDelivered,
                EventKind::SinkFailed,
                EventKind::AnimatorStopped,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_cancellation_after_stop_is_graceful() {
        let token = CancellationToken::new();
        let token_in_sink = token.clone();
        let sink = SinkFn::arc(move |_text: String| {
            let token = token_in_sink.clone();
            async move {
                token.cancel();
                Err::<(), _>(SinkError::Canceled)
            }
        });
        let res = AnimatorActor::new(sink, AnimatorConfig::new("Loading"), Bus::new(8))
            .run(token)
            .await;
        assert!(res.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unprompted_sink_cancellation_is_reported() {
        let sink = SinkFn::arc(|_text: String| async { Err::<(), _>(SinkError::Canceled) });
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let err = AnimatorActor::new(sink, AnimatorConfig::new("Loading"), bus)
            .run(CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_cancellation());

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::SinkFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sleep_returns_promptly() {
        let (sink, frames) = recording_sink();
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_secs(3600));
        let token = CancellationToken::new();
        let join = tokio::spawn(AnimatorActor::new(sink, cfg, Bus::new(8)).run(token.clone()));

        time::sleep(Duration::from_millis(10)).await;
        let before = time::Instant::now();
        token.cancel();
        assert!(join.await.unwrap().is_ok());
        assert!(before.elapsed() < Duration::from_secs(1));
        assert_eq!(frames.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_event_counts_deliveries() {
        let (sink, _frames) = recording_sink();
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(100));
        let token = CancellationToken::new();
        let join = tokio::spawn(AnimatorActor::new(sink, cfg, bus).run(token.clone()));

        time::sleep(Duration::from_millis(250)).await;
        token.cancel();
        join.await.unwrap().unwrap();

        let mut last = None;
        while let Ok(ev) = rx.try_recv() {
            last = Some(ev);
        }
        let last = last.unwrap();
        assert_eq!(last.kind, EventKind::AnimatorStopped);
        assert_eq!(last.tick, Some(3));
    }
}
