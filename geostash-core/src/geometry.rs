//! Viewport geometry for circular download regions.

use geo::{Coord, Rect};

/// Metres spanned by one degree of latitude (and of longitude at the
/// equator) on the WGS84 ellipsoid, to the accuracy the viewport needs.
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Axis-aligned WGS84 rectangle enclosing a circle of `radius_km` around
/// `centre`.
///
/// The longitude span widens with latitude (`1 / cos(lat)`); at the poles
/// it degenerates to the full longitude range. Bounds are clamped to the
/// valid WGS84 ranges rather than wrapped, so a circle hugging the
/// antimeridian is truncated, matching what the native surface displays.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use geostash_core::circle_bounds;
///
/// let bounds = circle_bounds(Coord { x: -74.0, y: 40.0 }, 15);
/// assert!(bounds.min().y < 40.0 && 40.0 < bounds.max().y);
/// assert!(bounds.min().x < -74.0 && -74.0 < bounds.max().x);
/// ```
#[must_use]
pub fn circle_bounds(centre: Coord<f64>, radius_km: u32) -> Rect<f64> {
    let radius_m = f64::from(radius_km) * 1000.0;
    let half_lat = radius_m / METRES_PER_DEGREE;
    let cos_lat = centre.y.to_radians().cos();
    let half_lon = if cos_lat <= f64::EPSILON {
        180.0
    } else {
        (radius_m / (METRES_PER_DEGREE * cos_lat)).min(180.0)
    };

    Rect::new(
        Coord {
            x: (centre.x - half_lon).max(-180.0),
            y: (centre.y - half_lat).max(-90.0),
        },
        Coord {
            x: (centre.x + half_lon).min(180.0),
            y: (centre.y + half_lat).min(90.0),
        },
    )
}
