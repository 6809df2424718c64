//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [started] animator="Loading" interval_ms=500 max_dots=3
//! [frame] animator="Loading" tick=1 dots=0 text="Loading   "
//! [stop-requested] animator="Loading"
//! [sink-failed] animator="Loading" tick=4 err="delivery failed: closed"
//! [stopped] animator="Loading" ticks=4
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let name = e.animator.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::AnimatorStarted => {
                println!(
                    "[started] animator={name:?} interval_ms={:?} max_dots={:?}",
                    e.interval_ms, e.dots
                );
            }
            EventKind::FrameDelivered => {
                println!(
                    "[frame] animator={name:?} tick={:?} dots={:?} text={:?}",
                    e.tick, e.dots, e.frame
                );
            }
            EventKind::StopRequested => {
                println!("[stop-requested] animator={name:?}");
            }
            EventKind::SinkFailed => {
                println!(
                    "[sink-failed] animator={name:?} tick={:?} err={:?}",
                    e.tick, e.reason
                );
            }
            EventKind::AnimatorStopped => {
                println!("[stopped] animator={name:?} ticks={:?}", e.tick);
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={name} reason={:?}",
                    e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={name} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
