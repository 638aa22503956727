//! Headless map surface tracking the viewport a native view would show.

use std::sync::Mutex;

use geo::{Coord, Rect};
use log::warn;

use geostash_core::{MapCommand, MapError, MapSurface, circle_bounds};

/// In-process [`MapSurface`] that applies re-framing commands to an owned
/// viewport instead of a native view.
///
/// Useful when embedding without a native map (headless hosts, previews)
/// and as a realistic double in tests: it derives the visible bounds from
/// the commanded circle exactly as the native surface does.
#[derive(Debug, Default)]
pub struct ViewportMap {
    state: Mutex<Viewport>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Viewport {
    centre: Option<Coord<f64>>,
    bounds: Option<Rect<f64>>,
    following_observer: bool,
}

impl ViewportMap {
    /// An empty viewport with no framed region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Centre of the last framed circle.
    #[must_use]
    pub fn centre(&self) -> Option<Coord<f64>> {
        self.read().centre
    }

    /// Visible bounds enclosing the last framed circle.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.read().bounds
    }

    /// Whether the last command asked the viewport to follow the observer.
    #[must_use]
    pub fn following_observer(&self) -> bool {
        self.read().following_observer
    }

    fn read(&self) -> Viewport {
        self.state.lock().map(|state| *state).unwrap_or_default()
    }
}

impl MapSurface for ViewportMap {
    fn apply(&self, command: &MapCommand) -> Result<(), MapError> {
        match command {
            MapCommand::ZoomSetBbox {
                latitude,
                longitude,
                radius_km,
                use_observer_location,
                ..
            } => {
                let centre = Coord {
                    x: *longitude,
                    y: *latitude,
                };
                let mut state = self.state.lock().map_err(|_| MapError::Dispatch {
                    command: command.name(),
                    message: "viewport state poisoned".to_owned(),
                })?;
                state.centre = Some(centre);
                state.bounds = Some(circle_bounds(centre, *radius_km));
                state.following_observer = *use_observer_location;
                Ok(())
            }
            other => {
                warn!("viewport map ignoring unknown command {}", other.name());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn starts_with_no_framed_region() {
        let map = ViewportMap::new();
        assert!(map.centre().is_none());
        assert!(map.bounds().is_none());
        assert!(!map.following_observer());
    }

    #[rstest]
    fn frames_the_commanded_circle() {
        let map = ViewportMap::new();
        map.apply(&MapCommand::zoom_set_bbox(40.0, -74.0, 15, false))
            .expect("viewport accepts the command");

        let centre = map.centre().expect("framed");
        assert_eq!(centre, Coord { x: -74.0, y: 40.0 });

        let bounds = map.bounds().expect("framed");
        assert_eq!(bounds, circle_bounds(centre, 15));
        assert!(!map.following_observer());
    }

    #[rstest]
    fn tracks_the_observer_flag_of_the_last_command() {
        let map = ViewportMap::new();
        map.apply(&MapCommand::zoom_set_bbox(51.5, -0.1, 15, true))
            .expect("viewport accepts the command");
        assert!(map.following_observer());

        map.apply(&MapCommand::zoom_set_bbox(51.5, -0.1, 15, false))
            .expect("viewport accepts the command");
        assert!(!map.following_observer());
    }
}
