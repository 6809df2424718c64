//! # Animator lifecycles.
//!
//! Two thin wrappers over the same animation loop:
//! - [`ScopedAnimator`] - disposal fuses stop and wait (`close`, `scope`)
//! - [`ManualAnimator`] - `stop` and `wait_for_completion` are separate calls
//!
//! Both validate their arguments synchronously and start animating immediately.

mod manual;
mod scoped;

pub use manual::ManualAnimator;
pub use scoped::ScopedAnimator;
