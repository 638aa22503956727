//! The selected location and the mount-time geolocation reading.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// The currently selected point on the map.
///
/// Both components are `None` until the user picks a location. The marker is
/// mutated by exactly one of: the initial geolocation seeding, a
/// search-result selection, or a map single-tap. Coordinates are WGS84
/// degrees.
///
/// # Examples
/// ```
/// use geostash_core::LocationMarker;
///
/// let mut marker = LocationMarker::default();
/// assert!(marker.position().is_none());
///
/// marker.set(51.5, -0.1);
/// let position = marker.position().expect("marker set");
/// assert_eq!(position.y, 51.5);
/// assert_eq!(position.x, -0.1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMarker {
    /// Latitude component, if a location has been picked.
    pub latitude: Option<f64>,
    /// Longitude component, if a location has been picked.
    pub longitude: Option<f64>,
}

impl LocationMarker {
    /// Seed the marker from the geolocation reading taken at mount time.
    ///
    /// A partial fix (either component missing) leaves the marker without a
    /// usable position.
    #[must_use]
    pub const fn seeded_from(fix: GeolocationFix) -> Self {
        Self {
            latitude: fix.latitude,
            longitude: fix.longitude,
        }
    }

    /// Move the marker to the given coordinates.
    pub const fn set(&mut self, latitude: f64, longitude: f64) {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
    }

    /// The marker position, if both components are present.
    ///
    /// Follows the crate convention of `x = longitude`, `y = latitude`.
    #[must_use]
    pub fn position(&self) -> Option<Coord<f64>> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coord {
                x: longitude,
                y: latitude,
            }),
            _ => None,
        }
    }
}

/// An ambient geolocation reading, sampled once when the screen mounts.
///
/// Later fixes never move an already-seeded [`LocationMarker`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeolocationFix {
    /// Latitude, if the device has a fix.
    pub latitude: Option<f64>,
    /// Longitude, if the device has a fix.
    pub longitude: Option<f64>,
}

impl GeolocationFix {
    /// A reading with both components resolved.
    #[must_use]
    pub const fn resolved(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

/// A place chosen from the location search bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchSelection {
    /// Latitude of the selected place, WGS84 degrees.
    pub latitude: f64,
    /// Longitude of the selected place, WGS84 degrees.
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn seeding_requires_a_full_fix() {
        let partial = GeolocationFix {
            latitude: Some(40.0),
            longitude: None,
        };
        let marker = LocationMarker::seeded_from(partial);
        assert!(marker.position().is_none());
    }

    #[rstest]
    fn seeding_copies_a_resolved_fix() {
        let marker = LocationMarker::seeded_from(GeolocationFix::resolved(40.0, -74.0));
        let position = marker.position().expect("seeded marker");
        assert_eq!(position.y, 40.0);
        assert_eq!(position.x, -74.0);
    }

    #[rstest]
    fn set_overwrites_previous_position() {
        let mut marker = LocationMarker::seeded_from(GeolocationFix::resolved(40.0, -74.0));
        marker.set(51.5, -0.1);
        let position = marker.position().expect("marker set");
        assert_eq!((position.y, position.x), (51.5, -0.1));
    }
}
