//! Facade crate for the Geostash place-download subsystem.
//!
//! This crate re-exports the core domain types and the download coordinator
//! so embedders can depend on a single crate.

#![forbid(unsafe_code)]

pub use geostash_core::{
    DEFAULT_RADIUS_KM, DOWNLOAD_EVENT, DOWNLOAD_RADIUS, DownloadEvent, DownloadOutcome,
    GeolocationFix, LocationMarker, MapBinding, MapCommand, MapError, MapSurface, MapTap,
    PlaceDownloadRequest, RadiusRange, RequestError, SearchSelection, ZOOM_SET_BBOX,
    circle_bounds,
};

pub use geostash_coordinator::{
    CoordinatorConfig, DOWNLOAD_FAILED_TEXT, DOWNLOAD_IN_PROGRESS_TEXT, DownloadEngine,
    DownloadEvents, DownloadSession, EngineError, PlaceDownloadCoordinator, ReframeOutcome,
    SubmitError, ViewportMap,
};
