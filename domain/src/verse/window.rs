//! Neighbor window arithmetic.

use std::ops::Range;

/// Compute the expansion window around a matched verse.
///
/// The window is `[position - radius, position + radius)` clipped to
/// `[0, store_len)`. The right edge is exclusive, so a window holds `radius`
/// verses before the hit, the hit itself, and `radius - 1` verses after it.
/// With `radius = 1` the window is the preceding verse and the hit.
///
/// Positions past the end of the store yield an empty range instead of an
/// inverted one.
pub fn window_bounds(position: usize, radius: usize, store_len: usize) -> Range<usize> {
    let start = position.saturating_sub(radius);
    let end = store_len.min(position.saturating_add(radius));
    start.min(end)..end
}
