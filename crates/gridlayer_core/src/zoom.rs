//! # Zoom Levels
//!
//! Zoom thresholds are small integers bounded by the tile pyramid.
//! Geometry sizes are measured in world units, where the whole
//! Web Mercator square is `1.0` wide.

/// A zoom level in the tile pyramid.
pub type Zoom = u8;

/// Lowest zoom of the tile pyramid.
pub const MIN_ZOOM: Zoom = 0;

/// Highest zoom of the tile pyramid.
pub const MAX_ZOOM: Zoom = 15;

/// Width of one tile in pixels.
pub const TILE_PIXELS: f64 = 256.0;

/// Returns the first zoom at which a geometry of `world_size` renders at
/// least `min_pixels` wide.
///
/// At zoom `z` the world is `256 * 2^z` pixels wide, so the answer is
/// `ceil(log2(min_pixels / (world_size * 256)))`, clamped to the pyramid.
/// Empty or invalid sizes never reach the requested width and map to
/// [`MAX_ZOOM`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn min_zoom_for_pixel_size(world_size: f64, min_pixels: f64) -> Zoom {
    if world_size.is_nan() || world_size <= 0.0 {
        return MAX_ZOOM;
    }
    let world_pixels = world_size * TILE_PIXELS;
    let zoom = (min_pixels / world_pixels).log2().ceil();
    if zoom.is_nan() {
        return MAX_ZOOM;
    }
    // Clamped to [0, 15] so the cast is exact.
    zoom.clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM)) as Zoom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_world_is_one_tile_at_zoom_zero() {
        assert_eq!(min_zoom_for_pixel_size(1.0, 256.0), 0);
        assert_eq!(min_zoom_for_pixel_size(1.0, 257.0), 1);
    }

    #[test]
    fn test_halving_size_adds_one_zoom() {
        let size = 32.0 / TILE_PIXELS / 1024.0; // 32 px wide at z10
        assert_eq!(min_zoom_for_pixel_size(size, 32.0), 10);
        assert_eq!(min_zoom_for_pixel_size(size / 2.0, 32.0), 11);
        assert_eq!(min_zoom_for_pixel_size(size * 2.0, 32.0), 9);
    }

    #[test]
    fn test_clamped_to_pyramid() {
        assert_eq!(min_zoom_for_pixel_size(1e-12, 32.0), MAX_ZOOM);
        assert_eq!(min_zoom_for_pixel_size(10.0, 32.0), MIN_ZOOM);
    }

    #[test]
    fn test_empty_geometry_never_visible_early() {
        assert_eq!(min_zoom_for_pixel_size(0.0, 32.0), MAX_ZOOM);
        assert_eq!(min_zoom_for_pixel_size(-1.0, 32.0), MAX_ZOOM);
        assert_eq!(min_zoom_for_pixel_size(f64::NAN, 32.0), MAX_ZOOM);
    }
}
