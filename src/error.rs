//! Error types used by the animators and their sinks.
//!
//! This module defines two main error enums:
//!
//! - [`AnimatorError`]: errors raised by animator construction or surfaced by a wait.
//! - [`SinkError`]: errors raised by individual sink deliveries.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by an animator.
///
/// Construction fails synchronously with [`AnimatorError::InvalidArgument`] or
/// [`AnimatorError::NoRuntime`]; the remaining variants are only observed when
/// waiting for a running animator to finish.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AnimatorError {
    /// A construction argument was rejected; nothing was spawned.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The sink failed and aborted the animation loop.
    #[error("sink failed: {0}")]
    Sink(#[from] SinkError),

    /// The animation task panicked (usually inside the sink).
    #[error("animation task panicked: {reason}")]
    Panicked {
        /// Panic payload rendered as text.
        reason: String,
    },

    /// The animator was started outside of a Tokio runtime.
    #[error("no tokio runtime available to spawn the animation task")]
    NoRuntime,
}

impl AnimatorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use dotcycle::AnimatorError;
    ///
    /// let err = AnimatorError::InvalidArgument { argument: "max_dots", reason: "must be at least 1" };
    /// assert_eq!(err.as_label(), "animator_invalid_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AnimatorError::InvalidArgument { .. } => "animator_invalid_argument",
            AnimatorError::Sink(_) => "animator_sink_failed",
            AnimatorError::Panicked { .. } => "animator_panicked",
            AnimatorError::NoRuntime => "animator_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            AnimatorError::InvalidArgument { argument, reason } => {
                format!("invalid {argument}: {reason}")
            }
            AnimatorError::Sink(e) => format!("sink: {}", e.as_message()),
            AnimatorError::Panicked { reason } => format!("panicked: {reason}"),
            AnimatorError::NoRuntime => "no tokio runtime".to_string(),
        }
    }

    /// Indicates whether the error was raised at construction time.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AnimatorError::InvalidArgument { .. })
    }
}

/// # Errors produced by a sink delivery.
///
/// [`SinkError::Canceled`] is the expected way for a cooperative sink to give up
/// once its cancellation token fires; after a stop request the loop treats it as
/// a graceful stop. Returned without a stop request it is reported like a failure.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Delivery failed; the animation loop stops and reports it.
    #[error("delivery failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Delivery gave up because cancellation was requested.
    #[error("delivery cancelled")]
    Canceled,
}

impl SinkError {
    /// Shorthand for [`SinkError::Fail`].
    ///
    /// # Example
    /// ```
    /// use dotcycle::SinkError;
    ///
    /// let err = SinkError::fail("terminal closed");
    /// assert_eq!(err.to_string(), "delivery failed: terminal closed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        SinkError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Fail { .. } => "sink_failed",
            SinkError::Canceled => "sink_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SinkError::Fail { error } => format!("error: {error}"),
            SinkError::Canceled => "delivery cancelled".to_string(),
        }
    }

    /// True when the sink gave up because of cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, SinkError::Canceled)
    }
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
