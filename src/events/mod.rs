//! Animator events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the animation loop, the animator
//! handles and the subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `AnimatorActor` (started/frame/failed/stopped),
//!   `AnimatorHandle` (stop requested), `Fanout` workers (overflow/panic).
//! - **Consumers**: the per-animator `Fanout` task, which feeds one worker per
//!   subscriber.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
