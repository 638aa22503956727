//! Download coordination for the place-download screen.
//!
//! The coordinator owns the screen's transient state (name, description,
//! selected location, radius, modal visibility) and mediates between user
//! input, the native map surface, and the native geo engine's asynchronous
//! download operation and event stream. The engine call resolves on request
//! acceptance; completion and failure arrive out-of-band on the
//! `"DownloadEvent"` stream, which the coordinator subscribes to for exactly
//! the lifetime of the screen.

#![forbid(unsafe_code)]

mod coordinator;
mod debounce;
mod engine;
mod session;
mod viewport;

pub mod test_support;

pub use coordinator::{
    CoordinatorConfig, DOWNLOAD_FAILED_TEXT, DOWNLOAD_IN_PROGRESS_TEXT, PlaceDownloadCoordinator,
    ReframeOutcome, SubmitError,
};
pub use engine::{DownloadEngine, DownloadEvents, EngineError};
pub use session::DownloadSession;
pub use viewport::ViewportMap;
