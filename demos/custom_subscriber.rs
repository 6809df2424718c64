//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] for animator metrics.
//! - Wire subscribers in with [`ManualAnimator::builder`].
//!
//! ## Flow
//! ```text
//! ManualAnimator::builder(sink, cfg).with_subscribers(subs).manual()
//!     ├─► AnimatorActor::run()
//!     │     └─► publish(AnimatorStarted / FrameDelivered / SinkFailed / AnimatorStopped)
//!     └─► Fanout task
//!           └─► per-subscriber worker ──► ConsoleSubscriber.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! cargo run --example custom_subscriber --features logging   # adds LogWriter
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dotcycle::{
    AnimatorConfig, Event, EventKind, ManualAnimator, SinkError, SinkFn, Subscribe,
};

/// A simple console subscriber that prints selected events.
/// In real life, you could export metrics, ship logs, or trigger alerts.
#[derive(Default)]
struct ConsoleSubscriber {
    frames: AtomicU64,
}

#[async_trait::async_trait]
impl Subscribe for ConsoleSubscriber {
    async fn on_event(&self, ev: &Event) {
        let name = ev.animator.as_deref().unwrap_or("<unknown>");
        match ev.kind {
            EventKind::AnimatorStarted => {
                println!(
                    "[sub] started:  animator={name} interval={}ms",
                    ev.interval_ms.unwrap_or(0)
                );
            }
            EventKind::FrameDelivered => {
                self.frames.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::SinkFailed => {
                println!(
                    "[sub] failed:   animator={name} tick={} reason={}",
                    ev.tick.unwrap_or(0),
                    ev.reason.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::AnimatorStopped => {
                println!(
                    "[sub] stopped:  animator={name} ticks={} (seen {})",
                    ev.tick.unwrap_or(0),
                    self.frames.load(Ordering::Relaxed)
                );
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== custom_subscriber example ===\n");

    // 1. Build subscribers
    #[allow(unused_mut)]
    let mut subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(ConsoleSubscriber::default())];
    #[cfg(feature = "logging")]
    subs.push(Arc::new(dotcycle::LogWriter::new()));

    // 2. A sink that gives up after a few frames
    let delivered = Arc::new(AtomicU64::new(0));
    let sink = SinkFn::arc(move |_text: String| {
        let n = delivered.fetch_add(1, Ordering::Relaxed) + 1;
        async move {
            if n > 6 {
                Err(SinkError::fail("display detached"))
            } else {
                Ok(())
            }
        }
    });

    // 3. Start with subscribers attached
    let cfg = AnimatorConfig::new("Syncing").with_interval(Duration::from_millis(100));
    let mut animator = ManualAnimator::builder(sink, cfg)
        .with_subscribers(subs)
        .manual()?;

    // 4. The sink failure ends the loop and surfaces here
    match animator.wait_for_completion().await {
        Ok(()) => println!("\nfinished cleanly"),
        Err(e) => println!("\nfinished with {}: {}", e.as_label(), e.as_message()),
    }
    Ok(())
}
