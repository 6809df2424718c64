//! # dotcycle
//!
//! **dotcycle** animates a piece of text with a cycling run of trailing dots
//! (`"Loading"`, `"Loading."`, `"Loading.."`, `"Loading..."`, ...) and hands every
//! frame to a caller-supplied [`Sink`]. It is a "work in progress" indicator that
//! knows nothing about rendering: the sink decides where the text goes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ScopedAnimator            ManualAnimator
//!   (close / scope / drop)    (stop + wait_for_completion)
//!          │                          │
//!          └──────────┬───────────────┘
//!                     ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  AnimatorHandle                                                   │
//! │  - CancellationToken (single-fire stop signal)                    │
//! │  - JoinHandle of the animation task                               │
//! │  - optional subscriber listener                                   │
//! └──────┬─────────────────────────────────────────────────┬──────────┘
//!        ▼                                                 │
//!   ┌──────────────┐  deliver(frame)  ┌──────────┐         │
//!   │AnimatorActor │ ───────────────► │   Sink   │         │
//!   │ (frame loop) │                  └──────────┘         │
//!   └──────┬───────┘                                       │
//!          │ Publishes: AnimatorStarted, FrameDelivered,   │
//!          │ SinkFailed, AnimatorStopped                   │ StopRequested
//!          ▼                                               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                   Bus (broadcast channel)                         │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       Fanout ──► per-subscriber worker ──► Subscribe::on_event
//! ```
//!
//! ### Lifecycle
//! ```text
//! start(sink, config) ──► validate ──► spawn AnimatorActor::run()
//!
//! loop {                                              RUNNING
//!   ├─► cancelled? ─► exit                            STOPPED
//!   ├─► frame = base_text + dots (+ padding)
//!   ├─► sink.deliver(frame).await
//!   │       ├─ Ok       ─► publish FrameDelivered
//!   │       ├─ Canceled ─► exit (graceful once stop was requested)
//!   │       └─ Fail     ─► publish SinkFailed, exit with error
//!   ├─► dot_count = dot_count + 1, or 0 after max_dots
//!   └─► sleep(interval) or cancelled ─► exit
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                           |
//! |-------------------|------------------------------------------------------------------|----------------------------------------------|
//! | **Animators**     | Scope-bound and manually controlled lifecycles.                  | [`ScopedAnimator`], [`ManualAnimator`]       |
//! | **Sinks**         | Where frames go; async or synchronous callbacks.                 | [`Sink`], [`SinkFn`], [`SyncSinkFn`]         |
//! | **Frames**        | Pure formatting and the dot cycle.                               | [`format_frame`], [`DotCycle`]               |
//! | **Subscriber API**| Hook into animator lifecycle events.                             | [`Subscribe`], [`Event`], [`EventKind`]      |
//! | **Errors**        | Typed errors for construction, sinks and the background task.    | [`AnimatorError`], [`SinkError`]             |
//! | **Configuration** | Text, interval, dot limit, padding.                              | [`AnimatorConfig`], [`AnimatorBuilder`]      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use dotcycle::{AnimatorConfig, ManualAnimator, ScopedAnimator, SyncSinkFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = AnimatorConfig::new("Loading").with_interval(Duration::from_millis(50));
//!
//!     // Scope-bound: the animation ends when the future completes.
//!     let sink = SyncSinkFn::arc(|text: &str| print!("\r{text}"));
//!     let bytes = ScopedAnimator::scope(sink, cfg.clone(), async {
//!         tokio::time::sleep(Duration::from_millis(120)).await;
//!         1024
//!     })
//!     .await?;
//!     assert_eq!(bytes, 1024);
//!
//!     // Manual: stop and wait are separate calls.
//!     let sink = SyncSinkFn::arc(|text: &str| print!("\r{text}"));
//!     let mut animator = ManualAnimator::start(sink, cfg)?;
//!     tokio::time::sleep(Duration::from_millis(120)).await;
//!     animator.stop();
//!     animator.wait_for_completion().await?;
//!     println!();
//!     Ok(())
//! }
//! ```
mod animators;
mod config;
mod core;
mod error;
mod events;
mod sinks;
mod subscribers;

// ---- Public re-exports ----

pub use animators::{ManualAnimator, ScopedAnimator};
pub use config::{
    AnimatorConfig, DEFAULT_BUS_CAPACITY, DEFAULT_INTERVAL, DEFAULT_MAX_DOTS, MAX_DOTS_LIMIT,
};
pub use core::{AnimatorBuilder, DotCycle, format_frame};
pub use error::{AnimatorError, SinkError};
pub use events::{Event, EventKind};
pub use sinks::{Sink, SinkFn, SinkRef, SyncSinkFn};
pub use subscribers::Subscribe;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
