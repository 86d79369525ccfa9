//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Dimensions after fitting the longer edge into `long_edge`.
///
/// Images already at or below the target are returned unchanged (never
/// upscaled). Otherwise the longer edge becomes exactly `long_edge` and the
/// shorter edge is scaled proportionally and rounded, never below 1px.
///
/// # Examples
/// ```
/// # use photoshelf::imaging::fit_long_edge;
/// // 4000x3000 landscape into 2000 → 2000x1500
/// assert_eq!(fit_long_edge((4000, 3000), 2000), (2000, 1500));
///
/// // Already small enough → untouched
/// assert_eq!(fit_long_edge((640, 480), 2000), (640, 480));
/// ```
pub fn fit_long_edge(original: (u32, u32), long_edge: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    if orig_w.max(orig_h) <= long_edge {
        return original;
    }

    if orig_w >= orig_h {
        // Landscape or square
        let ratio = long_edge as f64 / orig_w as f64;
        (long_edge, ((orig_h as f64 * ratio).round() as u32).max(1))
    } else {
        // Portrait
        let ratio = long_edge as f64 / orig_h as f64;
        (((orig_w as f64 * ratio).round() as u32).max(1), long_edge)
    }
}
