//! # Events emitted by animators.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Lifecycle events**: animation flow (started, frame delivered, stop requested, sink failed, stopped)
//! - **Subscriber events**: fan-out problems (overflow, panic)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! animator name (its base text), the delivered frame and tick counters.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use dotcycle::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::FrameDelivered)
//!     .with_animator("Loading")
//!     .with_frame("Loading.  ")
//!     .with_dots(1)
//!     .with_tick(2);
//!
//! assert_eq!(ev.kind, EventKind::FrameDelivered);
//! assert_eq!(ev.animator.as_deref(), Some("Loading"));
//! assert_eq!(ev.dots, Some(1));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of animator events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `animator`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `animator`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Animation lifecycle events ===
    /// Animation loop started (RUNNING state entered).
    ///
    /// Sets:
    /// - `animator`: base text
    /// - `interval_ms`: configured interval
    /// - `dots`: configured `max_dots`
    AnimatorStarted,

    /// A frame was handed to the sink and the sink returned.
    ///
    /// Sets:
    /// - `animator`: base text
    /// - `frame`: delivered text
    /// - `dots`: dot count of the frame
    /// - `tick`: delivery number (1-based)
    FrameDelivered,

    /// Cancellation was requested by `stop`, `close` or drop.
    ///
    /// Sets:
    /// - `animator`: base text
    StopRequested,

    /// The sink returned an error; the loop stops after this event.
    ///
    /// Sets:
    /// - `animator`: base text
    /// - `tick`: failing delivery number
    /// - `reason`: error message
    SinkFailed,

    /// Animation loop exited (STOPPED state entered).
    ///
    /// Sets:
    /// - `animator`: base text
    /// - `tick`: number of completed deliveries
    AnimatorStopped,
}

/// Animator event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Animator name (its base text), or subscriber name for subscriber events.
    pub animator: Option<Arc<str>>,
    /// Delivered frame text.
    pub frame: Option<Arc<str>>,
    /// Dot count (of the frame, or the configured maximum on start).
    pub dots: Option<u32>,
    /// Delivery counter (starting from 1).
    pub tick: Option<u64>,
    /// Frame interval in milliseconds (compact).
    pub interval_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            animator: None,
            frame: None,
            dots: None,
            tick: None,
            interval_ms: None,
            reason: None,
        }
    }

    /// Attaches the animator name.
    #[inline]
    pub fn with_animator(mut self, name: impl Into<Arc<str>>) -> Self {
        self.animator = Some(name.into());
        self
    }

    /// Attaches the delivered frame.
    #[inline]
    pub fn with_frame(mut self, frame: impl Into<Arc<str>>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    /// Attaches a dot count.
    #[inline]
    pub fn with_dots(mut self, dots: usize) -> Self {
        self.dots = Some(dots.min(u32::MAX as usize) as u32);
        self
    }

    /// Attaches a delivery counter.
    #[inline]
    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Attaches the frame interval (stored as milliseconds).
    #[inline]
    pub fn with_interval(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.interval_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_animator(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_animator(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}
