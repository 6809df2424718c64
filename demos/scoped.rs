//! # Example: scoped
//!
//! Demonstrates a scope-bound animation around a piece of async work.
//!
//! Shows how to:
//! - Print frames in place on a terminal line with a synchronous sink
//! - Tie the animation to a future with [`ScopedAnimator::scope`]
//! - Dispose explicitly with [`ScopedAnimator::close`]
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► ScopedAnimator::scope(sink, cfg, download())
//!   │     ├─► frames: "Downloading   " → "Downloading.  " → ...
//!   │     └─► download() finishes → stop + wait
//!   └─► ScopedAnimator::start(...) ... close().await
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example scoped
//! ```

use std::io::Write;
use std::time::Duration;

use dotcycle::{AnimatorConfig, ScopedAnimator, SinkRef, SyncSinkFn};

fn terminal_line() -> SinkRef {
    SyncSinkFn::arc(|text: &str| {
        let mut out = std::io::stdout();
        let _ = write!(out, "\r{text}");
        let _ = out.flush();
    })
}

async fn download() -> usize {
    tokio::time::sleep(Duration::from_millis(1500)).await;
    4096
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== scoped example ===\n");

    // 1. Animate for exactly as long as the work runs
    let cfg = AnimatorConfig::new("Downloading").with_interval(Duration::from_millis(200));
    let bytes = ScopedAnimator::scope(terminal_line(), cfg, download()).await?;
    println!("\rDownloaded {bytes} bytes");

    // 2. Same lifecycle, disposed by hand
    let cfg = AnimatorConfig::new("Unpacking")
        .with_interval(Duration::from_millis(150))
        .with_max_dots(5);
    let animator = ScopedAnimator::start(terminal_line(), cfg)?;
    tokio::time::sleep(Duration::from_secs(1)).await;
    animator.close().await?;
    println!("\rUnpacked        ");

    // 3. Invalid arguments fail before anything starts
    let err = ScopedAnimator::start(terminal_line(), AnimatorConfig::new("   "))
        .err()
        .map(|e| e.to_string());
    println!("\nrejected: {err:?}");
    Ok(())
}
