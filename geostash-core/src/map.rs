//! Imperative command protocol for the native map surface.
//!
//! The map is an opaque native view: the coordinator talks to it through
//! named commands with positional arguments and receives single-tap events
//! back. The handle to a concrete surface resolves only after the view has
//! mounted, so [`MapBinding`] keeps the "not yet ready" state explicit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Wire name of the re-framing command.
pub const ZOOM_SET_BBOX: &str = "ZOOM_SET_BBOX";

/// A command dispatched to the native map surface.
///
/// # Examples
/// ```
/// use geostash_core::{MapCommand, ZOOM_SET_BBOX};
/// use serde_json::json;
///
/// let command = MapCommand::zoom_set_bbox(51.5, -0.1, 15, true);
/// assert_eq!(command.name(), ZOOM_SET_BBOX);
/// assert_eq!(
///     command.wire_args(),
///     vec![json!(51.5), json!(-0.1), json!(15), json!(true)],
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MapCommand {
    /// Set the visible bounds to a circle of `radius_km` around the centre.
    ZoomSetBbox {
        /// Latitude of the circle centre, WGS84 degrees.
        latitude: f64,
        /// Longitude of the circle centre, WGS84 degrees.
        longitude: f64,
        /// Circle radius, kilometres.
        radius_km: u32,
        /// Rotate the viewport with the device compass. Fixed `false` on
        /// the download screen.
        use_compass_orientation: bool,
        /// Keep the viewport following the observer's live position.
        use_observer_location: bool,
    },
}

impl MapCommand {
    /// Build a re-framing command with the compass flag fixed off.
    #[must_use]
    pub const fn zoom_set_bbox(
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        use_observer_location: bool,
    ) -> Self {
        Self::ZoomSetBbox {
            latitude,
            longitude,
            radius_km,
            use_compass_orientation: false,
            use_observer_location,
        }
    }

    /// Wire name identifying the command on the bridge.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ZoomSetBbox { .. } => ZOOM_SET_BBOX,
        }
    }

    /// Positional bridge arguments.
    ///
    /// `ZOOM_SET_BBOX` carries `[latitude, longitude, radius_km,
    /// use_observer_location]`; the compass flag is not on the wire.
    #[must_use]
    pub fn wire_args(&self) -> Vec<Value> {
        match self {
            Self::ZoomSetBbox {
                latitude,
                longitude,
                radius_km,
                use_observer_location,
                ..
            } => vec![
                json!(latitude),
                json!(longitude),
                json!(radius_km),
                json!(use_observer_location),
            ],
        }
    }
}

/// Errors raised when the native surface rejects a command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// The surface failed to execute the command.
    #[error("map surface rejected {command}: {message}")]
    Dispatch {
        /// Wire name of the rejected command.
        command: &'static str,
        /// Short description supplied by the surface.
        message: String,
    },
}

/// Single-tap event emitted by the native map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapTap {
    /// Latitude of the tapped point, WGS84 degrees.
    pub latitude: f64,
    /// Longitude of the tapped point, WGS84 degrees.
    pub longitude: f64,
}

/// Capability to apply imperative commands to a map surface.
///
/// Implementations must be `Send + Sync` so the coordinator's scheduled
/// re-frames can run on another task.
pub trait MapSurface: Send + Sync {
    /// Apply a command to the surface.
    fn apply(&self, command: &MapCommand) -> Result<(), MapError>;
}

/// Resolution state of the native map handle.
///
/// The handle resolves once, after the map view mounts. Commands must never
/// be attempted while the binding is [`MapBinding::Unresolved`].
#[derive(Default, Clone)]
pub enum MapBinding {
    /// No surface has mounted yet.
    #[default]
    Unresolved,
    /// The surface is ready to receive commands.
    Ready(Arc<dyn MapSurface>),
}

impl MapBinding {
    /// The bound surface, if resolved.
    #[must_use]
    pub fn surface(&self) -> Option<&Arc<dyn MapSurface>> {
        match self {
            Self::Unresolved => None,
            Self::Ready(surface) => Some(surface),
        }
    }

    /// Whether the surface has resolved.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for MapBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => f.write_str("MapBinding::Unresolved"),
            Self::Ready(_) => f.write_str("MapBinding::Ready(..)"),
        }
    }
}
