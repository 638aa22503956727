//! Test-only map surface double used by unit and behaviour tests.

use std::sync::Mutex;

use crate::{MapCommand, MapError, MapSurface};

/// In-memory [`MapSurface`] that records every applied command.
///
/// Construct with [`RecordingMapSurface::with_failure`] to script a surface
/// that rejects every command instead.
#[derive(Debug, Default)]
pub struct RecordingMapSurface {
    commands: Mutex<Vec<MapCommand>>,
    failure: Option<String>,
}

impl RecordingMapSurface {
    /// A surface that rejects every command with `message`.
    pub fn with_failure(message: impl Into<String>) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Commands applied so far, in dispatch order.
    pub fn commands(&self) -> Vec<MapCommand> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }
}

impl MapSurface for RecordingMapSurface {
    fn apply(&self, command: &MapCommand) -> Result<(), MapError> {
        if let Some(message) = &self.failure {
            return Err(MapError::Dispatch {
                command: command.name(),
                message: message.clone(),
            });
        }
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command.clone());
        }
        Ok(())
    }
}
