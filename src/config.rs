//! # Animator configuration.
//!
//! Provides [`AnimatorConfig`] the settings an animator is started with.
//!
//! Config is consumed by [`AnimatorBuilder`](crate::AnimatorBuilder) (and the
//! `start` shorthands), which calls [`AnimatorConfig::validate`] before spawning
//! anything.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by [`AnimatorConfig::bus_capacity_clamped`]
//! - `interval = 0s` → frames are delivered back to back (still cancellable)

use std::time::Duration;

use crate::core::frame::{DotCycle, format_frame};
use crate::error::AnimatorError;

/// Default delay between two frames.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Default number of dots at the top of the cycle.
pub const DEFAULT_MAX_DOTS: usize = 3;

/// Largest accepted `max_dots`.
///
/// Keeps every frame a bounded, displayable string.
pub const MAX_DOTS_LIMIT: usize = 1024;

/// Default capacity of the per-animator event bus.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Settings for one animator.
///
/// ## Field semantics
/// - `base_text`: text before the dots (must contain a non-whitespace character)
/// - `interval`: sleep between deliveries, measured after the sink returns
/// - `max_dots`: highest dot count of the cycle (`1..=MAX_DOTS_LIMIT`)
/// - `pad_to_max_length`: pad with spaces so every frame has the same width
/// - `bus_capacity`: event ring buffer size for subscribers (min 1)
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use dotcycle::AnimatorConfig;
///
/// let cfg = AnimatorConfig::new("Loading")
///     .with_interval(Duration::from_millis(100))
///     .with_max_dots(2);
///
/// let frames: Vec<String> = cfg.frames().take(4).collect();
/// assert_eq!(frames, ["Loading  ", "Loading. ", "Loading..", "Loading  "]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatorConfig {
    /// Text shown before the dots.
    pub base_text: String,

    /// Delay between the end of one delivery and the start of the next.
    pub interval: Duration,

    /// Number of dots at the top of the cycle (`1..=MAX_DOTS_LIMIT`).
    pub max_dots: usize,

    /// Right-pad the dots with spaces up to `max_dots` characters.
    pub pad_to_max_length: bool,

    /// Capacity of the event bus broadcast channel.
    ///
    /// Only relevant with subscribers attached; slow subscriber listeners that lag
    /// more than `bus_capacity` events skip the oldest ones.
    pub bus_capacity: usize,
}

impl AnimatorConfig {
    /// Creates a config for `base_text` with default interval, dots and padding.
    pub fn new(base_text: impl Into<String>) -> Self {
        Self {
            base_text: base_text.into(),
            interval: DEFAULT_INTERVAL,
            max_dots: DEFAULT_MAX_DOTS,
            pad_to_max_length: true,
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }

    /// Returns a new config with updated interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns a new config with updated dot count limit.
    pub fn with_max_dots(mut self, max_dots: usize) -> Self {
        self.max_dots = max_dots;
        self
    }

    /// Returns a new config with updated padding mode.
    pub fn with_padding(mut self, pad_to_max_length: bool) -> Self {
        self.pad_to_max_length = pad_to_max_length;
        self
    }

    /// Returns a new config with updated event bus capacity.
    pub fn with_bus_capacity(mut self, bus_capacity: usize) -> Self {
        self.bus_capacity = bus_capacity;
        self
    }

    /// Checks the construction arguments.
    ///
    /// Fails with [`AnimatorError::InvalidArgument`] when `base_text` is empty or
    /// whitespace-only, or when `max_dots` is zero or above [`MAX_DOTS_LIMIT`].
    pub fn validate(&self) -> Result<(), AnimatorError> {
        if self.base_text.trim().is_empty() {
            return Err(AnimatorError::InvalidArgument {
                argument: "base_text",
                reason: "must not be empty or whitespace",
            });
        }
        if self.max_dots < 1 {
            return Err(AnimatorError::InvalidArgument {
                argument: "max_dots",
                reason: "must be at least 1",
            });
        }
        if self.max_dots > MAX_DOTS_LIMIT {
            return Err(AnimatorError::InvalidArgument {
                argument: "max_dots",
                reason: "must not exceed MAX_DOTS_LIMIT",
            });
        }
        Ok(())
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Formats the frame for `dot_count` with this config.
    pub fn frame(&self, dot_count: usize) -> String {
        format_frame(
            &self.base_text,
            dot_count,
            self.max_dots,
            self.pad_to_max_length,
        )
    }

    /// Infinite iterator over the frames an animator would deliver, in order.
    pub fn frames(&self) -> impl Iterator<Item = String> + '_ {
        DotCycle::new(self.max_dots).map(|dots| self.frame(dots))
    }
}
