//! # Event subscribers for animators.
//!
//! This module provides the [`Subscribe`] trait, the per-animator `Fanout`
//! task that feeds subscribers, and a built-in [`LogWriter`] (feature `logging`).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   AnimatorActor ── publish(Event) ──► Bus ──► Fanout
//!                                                 │
//!                                      ┌──────────┼──────────┐
//!                                      ▼          ▼          ▼
//!                                  LogWriter   Metrics    Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use dotcycle::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::SinkFailed {
//!             // increment failure counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

mod fanout;
#[cfg(feature = "logging")]
mod log;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
pub(crate) use fanout::Fanout;
