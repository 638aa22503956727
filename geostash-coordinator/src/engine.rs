//! Capability seam for the native AR/geo engine.

use async_trait::async_trait;
use log::warn;
use thiserror::Error;
use tokio::sync::broadcast;

use geostash_core::{DownloadEvent, PlaceDownloadRequest};

/// Errors raised when the engine refuses to take on a download.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The engine rejected the request before accepting it.
    #[error("engine rejected the download request: {message}")]
    Rejected {
        /// Short description supplied by the engine.
        message: String,
    },
    /// The engine could not be reached at all.
    #[error("engine is unavailable")]
    Unavailable,
}

/// Capability to download and store geodata for a circular region.
///
/// Implementations must be `Send + Sync`; the coordinator shares the engine
/// handle with its scheduled tasks.
#[async_trait]
pub trait DownloadEngine: Send + Sync {
    /// Hand a request to the engine.
    ///
    /// Resolves when the engine *accepts* the request, not when the download
    /// completes; completion is signalled on the event stream obtained via
    /// [`DownloadEngine::subscribe`].
    async fn download_and_store(
        &self,
        request: &PlaceDownloadRequest,
    ) -> Result<(), EngineError>;

    /// Open a listener on the engine's `"DownloadEvent"` stream.
    ///
    /// Dropping the returned handle deregisters the listener.
    fn subscribe(&self) -> DownloadEvents;
}

/// Scoped listener handle on the engine's download event stream.
pub struct DownloadEvents {
    receiver: broadcast::Receiver<DownloadEvent>,
}

impl DownloadEvents {
    /// Wrap a broadcast receiver obtained from an engine.
    #[must_use]
    pub const fn new(receiver: broadcast::Receiver<DownloadEvent>) -> Self {
        Self { receiver }
    }

    /// The next event, or `None` once the engine side has gone away.
    ///
    /// A slow listener that misses events skips the gap and keeps
    /// listening; the stream only ever carries coarse done/error flags, so
    /// the latest event is the one that matters.
    pub async fn next(&mut self) -> Option<DownloadEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("download event listener lagged; skipped {missed} events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl std::fmt::Debug for DownloadEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadEvents").finish_non_exhaustive()
    }
}
