//! # Sink abstractions.
//!
//! This module provides the output side of an animator:
//! - [`Sink`] - trait receiving each generated frame
//! - [`SinkFn`] - async closure-backed sink
//! - [`SyncSinkFn`] - plain (synchronous) closure-backed sink
//! - [`SinkRef`] - shared reference to a sink (`Arc<dyn Sink>`)

mod sink;
mod sink_fn;

pub use sink::{Sink, SinkRef};
pub use sink_fn::{SinkFn, SyncSinkFn};
