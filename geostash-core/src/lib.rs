//! Core domain types for the Geostash place-download subsystem.
//!
//! These models provide basic validation to keep downstream components
//! honest. Constructors return `Result` to surface invalid input early; a
//! [`PlaceDownloadRequest`] that exists is always submittable. The native
//! map surface is reached through a capability trait so embedders can swap
//! in real bridges or test doubles; the async engine seam lives in the
//! coordinator crate.

#![forbid(unsafe_code)]

mod event;
mod geometry;
mod map;
mod marker;
mod request;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use event::{DOWNLOAD_EVENT, DownloadEvent, DownloadOutcome};
pub use geometry::circle_bounds;
pub use map::{MapBinding, MapCommand, MapError, MapSurface, MapTap, ZOOM_SET_BBOX};
pub use marker::{GeolocationFix, LocationMarker, SearchSelection};
pub use request::{
    DEFAULT_RADIUS_KM, DOWNLOAD_RADIUS, PlaceDownloadRequest, RadiusRange, RequestError,
};
