//! Download progress events delivered by the native engine.

use serde::{Deserialize, Serialize};

/// Name of the native event stream carrying [`DownloadEvent`] payloads.
pub const DOWNLOAD_EVENT: &str = "DownloadEvent";

/// Payload of the engine's `"DownloadEvent"` stream.
///
/// The bridge delivers these as JSON objects. Completion and failure are
/// signalled out-of-band on this stream; the download call itself resolves
/// on request acceptance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadEvent {
    /// Whether the download ran to completion.
    pub done: bool,
    /// Whether the download failed.
    pub error: bool,
}

/// Terminal outcome signalled by a [`DownloadEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The region's geodata was fetched and stored.
    Completed,
    /// The download failed; the user may retry later.
    Failed,
}

impl DownloadEvent {
    /// Classify the event.
    ///
    /// An error flag wins regardless of `done`; an event with neither flag
    /// set is an in-flight notification and carries no outcome.
    ///
    /// # Examples
    /// ```
    /// use geostash_core::{DownloadEvent, DownloadOutcome};
    ///
    /// let event = DownloadEvent { done: true, error: false };
    /// assert_eq!(event.outcome(), Some(DownloadOutcome::Completed));
    ///
    /// let event = DownloadEvent { done: true, error: true };
    /// assert_eq!(event.outcome(), Some(DownloadOutcome::Failed));
    /// ```
    #[must_use]
    pub const fn outcome(self) -> Option<DownloadOutcome> {
        if self.error {
            Some(DownloadOutcome::Failed)
        } else if self.done {
            Some(DownloadOutcome::Completed)
        } else {
            None
        }
    }
}
