//! # Sink abstraction.
//!
//! A [`Sink`] receives every frame the animation loop produces. The loop awaits
//! each delivery before advancing, so a slow sink throttles the animation.
//!
//! A sink also receives a [`CancellationToken`] that fires once the animator is
//! asked to stop. Deliveries are never forcibly interrupted; a sink that does
//! slow work can watch the token and return [`SinkError::Canceled`] early.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SinkError;

/// Shared handle to a sink.
pub type SinkRef = Arc<dyn Sink>;

/// # Receiver of animation frames.
///
/// Calls for one animator never overlap: delivery `N + 1` starts only after
/// delivery `N` returned.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use dotcycle::{Sink, SinkError};
///
/// struct Stderr;
///
/// #[async_trait]
/// impl Sink for Stderr {
///     async fn deliver(&self, text: &str, _ctx: CancellationToken) -> Result<(), SinkError> {
///         eprint!("\r{text}");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Displays one frame.
    ///
    /// Returning [`SinkError::Canceled`] once `ctx` has fired ends the animation
    /// gracefully. Any other error, or `Canceled` returned while no stop was
    /// requested, ends it and is reported by the next wait on the animator.
    async fn deliver(&self, text: &str, ctx: CancellationToken) -> Result<(), SinkError>;
}
