//! Test doubles for the engine capability seam.
//!
//! [`ScriptedEngine`] records accepted requests and lets tests drive the
//! download event stream by hand, so coordinator behaviour can be verified
//! without a native engine.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;

use geostash_core::{DownloadEvent, PlaceDownloadRequest};

use crate::engine::{DownloadEngine, DownloadEvents, EngineError};

/// Scripted [`DownloadEngine`] backed by an in-memory event channel.
#[derive(Debug)]
pub struct ScriptedEngine {
    requests: Mutex<Vec<PlaceDownloadRequest>>,
    rejection: Option<String>,
    events: broadcast::Sender<DownloadEvent>,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            requests: Mutex::new(Vec::new()),
            rejection: None,
            events,
        }
    }
}

impl ScriptedEngine {
    /// An engine that rejects every request with `message` instead of
    /// accepting it.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            rejection: Some(message.into()),
            ..Self::default()
        }
    }

    /// Requests accepted so far, in submission order.
    pub fn requests(&self) -> Vec<PlaceDownloadRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Emit a download event to every live listener.
    ///
    /// Returns the number of listeners reached.
    pub fn emit(&self, event: DownloadEvent) -> usize {
        self.events.send(event).unwrap_or(0)
    }

    /// Number of live event listeners.
    pub fn listener_count(&self) -> usize {
        self.events.receiver_count()
    }
}

#[async_trait]
impl DownloadEngine for ScriptedEngine {
    async fn download_and_store(
        &self,
        request: &PlaceDownloadRequest,
    ) -> Result<(), EngineError> {
        if let Some(message) = &self.rejection {
            return Err(EngineError::Rejected {
                message: message.clone(),
            });
        }
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(())
    }

    fn subscribe(&self) -> DownloadEvents {
        DownloadEvents::new(self.events.subscribe())
    }
}
