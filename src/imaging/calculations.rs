//! Pure arithmetic for aspect-preserving width caps.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale dimensions down to a maximum width, preserving aspect ratio.
///
/// The result width is `min(source_width, max_width)`. When scaling is
/// needed, the height is `floor(source_height * max_width / source_width)`.
/// Images at or below the cap are never upscaled.
///
/// # Examples
/// ```
/// # use bandstand::imaging::scale_to_width;
/// // 3000x2000 capped at 1600 → 1600x1066
/// assert_eq!(scale_to_width((3000, 2000), 1600), (1600, 1066));
///
/// // Already narrow enough — unchanged
/// assert_eq!(scale_to_width((200, 300), 1600), (200, 300));
/// ```
pub fn scale_to_width(source: (u32, u32), max_width: u32) -> (u32, u32) {
    let (w, h) = source;
    if w <= max_width {
        return (w, h);
    }
    // u64 intermediate so large photo dimensions cannot overflow
    let scaled_h = (h as u64 * max_width as u64 / w as u64) as u32;
    (max_width, scaled_h)
}

/// Whether an image of the given width passes through a cap unresized.
pub fn fits_within(width: u32, max_width: u32) -> bool {
    width <= max_width
}
