//! # Dot-cycle formatting.
//!
//! [`DotCycle`] tracks the current dot count and [`format_frame`] turns a count
//! into the displayed text.
//!
//! ```text
//! max_dots = 3, pad = true
//!
//! tick:   0           1           2           3           4
//! dots:   0           1           2           3           0
//! text:   "Loading   " "Loading.  " "Loading.. " "Loading..." "Loading   "
//! ```
//!
//! ## Rules
//! - The count cycles through `0..=max_dots` and never exceeds `max_dots`.
//! - With padding, every frame has the same length (`base + max_dots` chars).

/// Formats one animation frame.
///
/// Appends `dot_count` dots to `base_text`. When `pad_to_max_length` is set the
/// dots are right-padded with spaces to `max_dots` characters, so the frame width
/// stays constant across the cycle. A `dot_count` above `max_dots` is clamped.
///
/// The result holds `max_dots` padded characters, so callers bound `max_dots`
/// (animators accept at most [`MAX_DOTS_LIMIT`](crate::MAX_DOTS_LIMIT)).
///
/// # Example
/// ```
/// use dotcycle::format_frame;
///
/// assert_eq!(format_frame("Loading", 1, 3, true), "Loading.  ");
/// assert_eq!(format_frame("Loading", 1, 3, false), "Loading.");
/// ```
pub fn format_frame(
    base_text: &str,
    dot_count: usize,
    max_dots: usize,
    pad_to_max_length: bool,
) -> String {
    let dots = dot_count.min(max_dots);
    let width = if pad_to_max_length { max_dots } else { dots };

    let mut out = String::with_capacity(base_text.len().saturating_add(width));
    out.push_str(base_text);
    out.extend(std::iter::repeat_n('.', dots));
    out.extend(std::iter::repeat_n(' ', width - dots));
    out
}

/// Cycling dot counter: `0, 1, ..., max_dots, 0, 1, ...`.
///
/// As an [`Iterator`] it yields the current count and then advances, forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotCycle {
    dot_count: usize,
    max_dots: usize,
}

impl DotCycle {
    /// Starts a cycle at zero dots.
    pub fn new(max_dots: usize) -> Self {
        Self {
            dot_count: 0,
            max_dots,
        }
    }

    /// Current number of dots.
    #[inline]
    pub fn dot_count(&self) -> usize {
        self.dot_count
    }

    /// Upper bound of the cycle.
    #[inline]
    pub fn max_dots(&self) -> usize {
        self.max_dots
    }

    /// Moves to the next step, wrapping after `max_dots`.
    #[inline]
    pub fn advance(&mut self) {
        self.dot_count = if self.dot_count >= self.max_dots {
            0
        } else {
            self.dot_count + 1
        };
    }
}

impl Iterator for DotCycle {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.dot_count;
        self.advance();
        Some(current)
    }
}
