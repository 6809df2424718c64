//! # Function-backed sinks (`SinkFn`, `SyncSinkFn`)
//!
//! [`SinkFn`] wraps an async closure `F: Fn(String) -> Fut`, producing a fresh
//! future per frame. [`SyncSinkFn`] wraps a plain `Fn(&str)` callback for sinks
//! that complete immediately (e.g. storing the text in a status field).
//!
//! Neither keeps hidden state between frames; if the closure needs shared state,
//! capture an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use dotcycle::{SinkFn, SinkRef, SinkError, SyncSinkFn};
//!
//! let async_sink: SinkRef = SinkFn::arc(|text: String| async move {
//!     println!("{text}");
//!     Ok::<_, SinkError>(())
//! });
//!
//! let sync_sink: SinkRef = SyncSinkFn::arc(|text: &str| print!("\r{text}"));
//! # let _ = (async_sink, sync_sink);
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SinkError;
use crate::sinks::sink::Sink;

/// Async closure-backed sink.
///
/// Wraps a closure that *creates* a new future per frame.
#[derive(Debug)]
pub struct SinkFn<F> {
    f: F,
}

impl<F> SinkFn<F> {
    /// Creates a new function-backed sink.
    ///
    /// Prefer [`SinkFn::arc`] when you immediately need a [`SinkRef`](crate::SinkRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the sink and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Sink for SinkFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), SinkError>> + Send + 'static,
{
    async fn deliver(&self, text: &str, _ctx: CancellationToken) -> Result<(), SinkError> {
        (self.f)(text.to_owned()).await
    }
}

/// Synchronous closure-backed sink.
///
/// The callback runs on the animation task; keep it short.
#[derive(Debug)]
pub struct SyncSinkFn<F> {
    f: F,
}

impl<F> SyncSinkFn<F> {
    /// Creates a new callback sink.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the sink and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F> Sink for SyncSinkFn<F>
where
    F: Fn(&str) + Send + Sync + 'static,
{
    async fn deliver(&self, text: &str, _ctx: CancellationToken) -> Result<(), SinkError> {
        (self.f)(text);
        Ok(())
    }
}
