//! Animation core: frame formatting, the loop, and task ownership.
//!
//! The public API from this module is [`AnimatorBuilder`] plus the
//! [`format_frame`] / [`DotCycle`] primitives.
//!
//! Internal modules:
//! - [`frame`]: dot-cycle counter and frame formatting;
//! - [`actor`]: the animation loop (deliver, advance, cancellable sleep);
//! - [`handle`]: spawns the loop, stops it, maps its outcome;
//! - [`builder`]: validated construction of both animator flavours.

mod actor;
mod builder;
pub(crate) mod frame;
pub(crate) mod handle;

pub use builder::AnimatorBuilder;
pub use frame::{DotCycle, format_frame};
