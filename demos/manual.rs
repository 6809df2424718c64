//! # Example: manual
//!
//! Demonstrates a manually controlled animation whose sink is asynchronous.
//!
//! Shows how to:
//! - Use an async [`SinkFn`] that hands frames to a UI task over a channel
//! - Stop with [`ManualAnimator::stop`] and wait with [`ManualAnimator::wait_for_completion`]
//! - Confirm that no frame arrives after completion
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► spawn ui task (receives frames from mpsc)
//!   ├─► ManualAnimator::start(sink, cfg)
//!   │     └─► sink.deliver(frame) → tx.send(frame).await
//!   ├─► sleep 1s
//!   ├─► stop()                    → cancellation requested
//!   ├─► wait_for_completion()     → loop terminated
//!   └─► sink released → ui task prints the total
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example manual
//! ```

use std::time::Duration;

use dotcycle::{AnimatorConfig, ManualAnimator, SinkError, SinkFn};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== manual example ===\n");

    // 1. A "UI" task owning the display
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let ui = tokio::spawn(async move {
        let mut shown = 0usize;
        while let Some(frame) = rx.recv().await {
            shown += 1;
            println!("[ui] {frame:?}");
        }
        shown
    });

    // 2. Async sink: delivery completes once the UI accepted the frame
    let sink = SinkFn::arc(move |text: String| {
        let tx = tx.clone();
        async move {
            tx.send(text)
                .await
                .map_err(|_| SinkError::fail("ui task is gone"))
        }
    });

    // 3. Run, stop, wait
    let cfg = AnimatorConfig::new("Processing")
        .with_interval(Duration::from_millis(100))
        .with_padding(false);
    let mut animator = ManualAnimator::start(sink, cfg)?;
    tokio::time::sleep(Duration::from_secs(1)).await;

    animator.stop();
    println!("[main] stop requested: {}", animator.is_stop_requested());
    animator.wait_for_completion().await?;
    println!("[main] finished: {}", animator.is_finished());

    // 4. The finished loop released the sink, and with it the last sender
    drop(animator);
    let shown = ui.await?;
    println!("[main] ui displayed {shown} frames");
    Ok(())
}
