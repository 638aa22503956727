//! The validated download request and its radius configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive radius range offered by the download screen's slider, in
/// kilometres.
pub const DOWNLOAD_RADIUS: RadiusRange = RadiusRange { min: 1, max: 50 };

/// Radius the screen resets to after a successful download, in kilometres.
pub const DEFAULT_RADIUS_KM: u32 = 15;

/// Inclusive range of allowed download radii, in kilometres.
///
/// # Examples
/// ```
/// use geostash_core::RadiusRange;
///
/// let range = RadiusRange { min: 1, max: 50 };
/// assert!(range.contains(15));
/// assert_eq!(range.clamp(120), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusRange {
    /// Smallest selectable radius.
    pub min: u32,
    /// Largest selectable radius.
    pub max: u32,
}

impl RadiusRange {
    /// Whether `radius_km` falls inside the range.
    #[must_use]
    pub const fn contains(self, radius_km: u32) -> bool {
        radius_km >= self.min && radius_km <= self.max
    }

    /// Clamp `radius_km` to the range.
    #[must_use]
    pub const fn clamp(self, radius_km: u32) -> u32 {
        if radius_km < self.min {
            self.min
        } else if radius_km > self.max {
            self.max
        } else {
            radius_km
        }
    }
}

impl Default for RadiusRange {
    fn default() -> Self {
        DOWNLOAD_RADIUS
    }
}

/// Errors returned by [`PlaceDownloadRequest::new`].
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    /// The place name was empty.
    #[error("place name must not be empty")]
    EmptyName,
    /// The place description was empty.
    #[error("place description must not be empty")]
    EmptyDescription,
    /// The radius fell outside the selectable range.
    #[error("radius {radius_km} km is outside the allowed range {}..={} km", .range.min, .range.max)]
    RadiusOutOfRange {
        /// Radius that was requested.
        radius_km: u32,
        /// Range the radius was validated against.
        range: RadiusRange,
    },
}

/// A validated request to fetch and cache the geodata for a circular region.
///
/// The request is only constructible with a non-empty name and description
/// and a radius inside the selectable range, so holding a value implies it
/// can be handed to the engine as-is.
///
/// # Examples
/// ```
/// use geostash_core::PlaceDownloadRequest;
///
/// # fn main() -> Result<(), geostash_core::RequestError> {
/// let request = PlaceDownloadRequest::new("Park", "Central", 40.0, -74.0, 15)?;
/// assert_eq!(request.radius_km, 15);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDownloadRequest {
    /// User-facing place name.
    pub name: String,
    /// Free-form description of the place.
    pub description: String,
    /// Latitude of the region centre, WGS84 degrees.
    pub latitude: f64,
    /// Longitude of the region centre, WGS84 degrees.
    pub longitude: f64,
    /// Radius of the region, kilometres.
    pub radius_km: u32,
}

impl PlaceDownloadRequest {
    /// Validates and constructs a request against [`DOWNLOAD_RADIUS`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
    ) -> Result<Self, RequestError> {
        Self::with_radius_range(name, description, latitude, longitude, radius_km, DOWNLOAD_RADIUS)
    }

    /// Validates and constructs a request against an explicit radius range.
    pub fn with_radius_range(
        name: impl Into<String>,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        range: RadiusRange,
    ) -> Result<Self, RequestError> {
        let name = name.into();
        let description = description.into();
        if name.is_empty() {
            return Err(RequestError::EmptyName);
        }
        if description.is_empty() {
            return Err(RequestError::EmptyDescription);
        }
        if !range.contains(radius_km) {
            return Err(RequestError::RadiusOutOfRange { radius_km, range });
        }
        Ok(Self {
            name,
            description,
            latitude,
            longitude,
            radius_km,
        })
    }
}
