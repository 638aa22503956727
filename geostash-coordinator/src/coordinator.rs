//! The download coordinator for the place-download screen.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use geostash_core::{
    DEFAULT_RADIUS_KM, DOWNLOAD_RADIUS, DownloadEvent, DownloadOutcome, GeolocationFix,
    LocationMarker, MapBinding, MapCommand, MapSurface, MapTap, PlaceDownloadRequest, RadiusRange,
    RequestError, SearchSelection,
};

use crate::debounce::Debounce;
use crate::engine::{DownloadEngine, DownloadEvents, EngineError};
use crate::session::DownloadSession;

/// Quiet period observed before a radius change re-frames the map.
const REFRAME_QUIET_PERIOD: Duration = Duration::from_millis(150);

/// Fixed copy shown beside the loading indicator while a download runs.
pub const DOWNLOAD_IN_PROGRESS_TEXT: &str =
    "Downloading location data, this may take up to a minute.";

/// Fixed retry-later copy shown in the error modal.
pub const DOWNLOAD_FAILED_TEXT: &str =
    "Error occurred while trying to download data, please try again later";

/// Tunables for a coordinator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Selectable radius range for the screen's slider.
    pub radius: RadiusRange,
    /// Radius restored after a successful download, kilometres.
    pub default_radius_km: u32,
    /// Quiet period for radius-driven re-framing.
    pub debounce: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            radius: DOWNLOAD_RADIUS,
            default_radius_km: DEFAULT_RADIUS_KM,
            debounce: REFRAME_QUIET_PERIOD,
        }
    }
}

impl CoordinatorConfig {
    /// Set the selectable radius range.
    #[must_use]
    pub const fn with_radius(mut self, radius: RadiusRange) -> Self {
        self.radius = radius;
        self
    }

    /// Set the radius restored after a successful download.
    #[must_use]
    pub const fn with_default_radius_km(mut self, default_radius_km: u32) -> Self {
        self.default_radius_km = default_radius_km;
        self
    }

    /// Set the quiet period for radius-driven re-framing.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// Outcome of an immediate re-frame dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReframeOutcome {
    /// The command was handed to the surface.
    Dispatched,
    /// The native map has not resolved yet; nothing was attempted.
    MapNotReady,
}

/// Errors returned by [`PlaceDownloadCoordinator::submit`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// A download is already in flight for this screen.
    #[error("a download is already in flight")]
    AlreadySubmitting,
    /// No location has been selected on the map.
    #[error("no location has been selected")]
    MissingLocation,
    /// The request fields did not validate.
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
    /// The engine refused the request before accepting it.
    #[error("the engine did not accept the request: {source}")]
    Rejected {
        /// Rejection reported by the engine.
        #[source]
        source: EngineError,
    },
}

/// Owns the place-download screen's transient state and mediates between
/// user input, the native map surface, and the engine's asynchronous
/// download operation and event stream.
///
/// One coordinator exists per screen mount. [`PlaceDownloadCoordinator::mount`]
/// registers the engine event listener and seeds the location marker from
/// the ambient geolocation reading; dropping the coordinator deregisters the
/// listener and aborts any pending re-frame timer, so neither can outlive a
/// navigation away from the screen.
pub struct PlaceDownloadCoordinator {
    engine: Arc<dyn DownloadEngine>,
    events: DownloadEvents,
    map: MapBinding,
    config: CoordinatorConfig,
    name: String,
    description: String,
    radius_km: u32,
    marker: LocationMarker,
    session: DownloadSession,
    reframe: Debounce,
}

impl PlaceDownloadCoordinator {
    /// Mount the screen with the default configuration.
    ///
    /// The marker is seeded from `fix` once; later geolocation updates never
    /// move it.
    #[must_use]
    pub fn mount(engine: Arc<dyn DownloadEngine>, fix: GeolocationFix) -> Self {
        Self::with_config(engine, fix, CoordinatorConfig::default())
    }

    /// Mount the screen with an explicit configuration.
    #[must_use]
    pub fn with_config(
        engine: Arc<dyn DownloadEngine>,
        fix: GeolocationFix,
        config: CoordinatorConfig,
    ) -> Self {
        let events = engine.subscribe();
        let radius_km = config.radius.clamp(config.default_radius_km);
        Self {
            engine,
            events,
            map: MapBinding::default(),
            config,
            name: String::new(),
            description: String::new(),
            radius_km,
            marker: LocationMarker::seeded_from(fix),
            session: DownloadSession::default(),
            reframe: Debounce::default(),
        }
    }

    /// Resolve the native map handle once the map view has mounted.
    pub fn attach_map(&mut self, surface: Arc<dyn MapSurface>) {
        self.map = MapBinding::Ready(surface);
    }

    /// Current place name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current place description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current download radius, kilometres.
    #[must_use]
    pub const fn radius_km(&self) -> u32 {
        self.radius_km
    }

    /// The selected location marker.
    #[must_use]
    pub const fn marker(&self) -> LocationMarker {
        self.marker
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> DownloadSession {
        self.session
    }

    /// Whether the loading indicator is visible.
    #[must_use]
    pub const fn loading_visible(&self) -> bool {
        self.session.is_submitting()
    }

    /// Whether the retry-later error modal is visible.
    #[must_use]
    pub const fn error_visible(&self) -> bool {
        self.session.is_failed()
    }

    /// Whether the submit control is enabled.
    ///
    /// True iff the name and description are non-empty, the marker has both
    /// coordinates, and no download is in flight.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        !self.name.is_empty()
            && !self.description.is_empty()
            && self.marker.position().is_some()
            && self.session.is_idle()
    }

    /// Update the place name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Update the place description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Update the download radius from the slider.
    ///
    /// The value is clamped to the configured range. A re-frame around the
    /// current marker is scheduled after the quiet period; a burst of changes
    /// collapses to one command carrying the last value. Must be called from
    /// within a Tokio runtime.
    pub fn set_radius(&mut self, radius_km: u32) {
        self.radius_km = self.config.radius.clamp(radius_km);
        self.schedule_reframe();
    }

    /// Move the marker to a place chosen in the location search bar.
    ///
    /// Re-frames immediately, with the viewport following the observer.
    pub fn select_search_result(&mut self, place: SearchSelection) -> ReframeOutcome {
        self.marker.set(place.latitude, place.longitude);
        self.reframe_now(place.latitude, place.longitude, true)
    }

    /// Move the marker to a tapped map location.
    ///
    /// Re-frames immediately, without observer following.
    pub fn map_tapped(&mut self, tap: MapTap) -> ReframeOutcome {
        self.marker.set(tap.latitude, tap.longitude);
        self.reframe_now(tap.latitude, tap.longitude, false)
    }

    /// Submit the current request to the engine.
    ///
    /// Returns once the engine has *accepted* the request; completion and
    /// failure arrive on the event stream. A rejected acceptance call moves
    /// the session to [`DownloadSession::Failed`] so the retry-later modal is
    /// shown, and is also returned to the caller.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        if self.session.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }
        let position = self.marker.position().ok_or(SubmitError::MissingLocation)?;
        let request = PlaceDownloadRequest::with_radius_range(
            self.name.clone(),
            self.description.clone(),
            position.y,
            position.x,
            self.radius_km,
            self.config.radius,
        )?;

        self.transition(DownloadSession::Submitting);
        info!(
            "submitting download {:?} ({} km around {}, {})",
            request.name, request.radius_km, request.latitude, request.longitude
        );
        if let Err(source) = self.engine.download_and_store(&request).await {
            warn!("engine did not accept the download: {source}");
            self.transition(DownloadSession::Failed);
            return Err(SubmitError::Rejected { source });
        }
        Ok(())
    }

    /// Apply a download event to the session.
    ///
    /// Events arriving outside an active submission are ignored. On success
    /// the name, description and radius reset for the next place; the marker
    /// deliberately stays where the user put it.
    pub fn apply_event(&mut self, event: DownloadEvent) {
        if !self.session.is_submitting() {
            debug!("ignoring download event outside an active session: {event:?}");
            return;
        }
        match event.outcome() {
            Some(DownloadOutcome::Completed) => {
                self.name.clear();
                self.description.clear();
                self.radius_km = self.config.radius.clamp(self.config.default_radius_km);
                self.transition(DownloadSession::Idle);
            }
            Some(DownloadOutcome::Failed) => {
                self.transition(DownloadSession::Failed);
            }
            None => debug!("download still in flight"),
        }
    }

    /// Dismiss the retry-later error modal.
    pub fn dismiss_error(&mut self) {
        if self.session.is_failed() {
            self.transition(DownloadSession::Idle);
        }
    }

    /// The next event from the engine stream, or `None` once it closes.
    pub async fn next_event(&mut self) -> Option<DownloadEvent> {
        self.events.next().await
    }

    /// Drive the coordinator until the engine's event stream closes.
    pub async fn run(&mut self) {
        while let Some(event) = self.events.next().await {
            self.apply_event(event);
        }
    }

    fn transition(&mut self, next: DownloadSession) {
        if self.session == next {
            return;
        }
        info!("download session: {} -> {}", self.session, next);
        self.session = next;
    }

    /// Schedule a debounced re-frame capturing the marker and radius current
    /// at this moment. Supersedes any pending re-frame.
    fn schedule_reframe(&mut self) {
        let Some(position) = self.marker.position() else {
            debug!("radius changed with no marker set; skipping re-frame");
            self.reframe.cancel();
            return;
        };
        let Some(surface) = self.map.surface().cloned() else {
            debug!("radius changed before the map resolved; skipping re-frame");
            self.reframe.cancel();
            return;
        };
        let command = MapCommand::zoom_set_bbox(position.y, position.x, self.radius_km, false);
        self.reframe.schedule(self.config.debounce, async move {
            dispatch(&surface, &command);
        });
    }

    fn reframe_now(
        &mut self,
        latitude: f64,
        longitude: f64,
        use_observer_location: bool,
    ) -> ReframeOutcome {
        let Some(surface) = self.map.surface() else {
            debug!("selection made before the map resolved; skipping re-frame");
            return ReframeOutcome::MapNotReady;
        };
        dispatch(
            surface,
            &MapCommand::zoom_set_bbox(latitude, longitude, self.radius_km, use_observer_location),
        );
        ReframeOutcome::Dispatched
    }
}

impl std::fmt::Debug for PlaceDownloadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceDownloadCoordinator")
            .field("map", &self.map)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("radius_km", &self.radius_km)
            .field("marker", &self.marker)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn dispatch(surface: &Arc<dyn MapSurface>, command: &MapCommand) {
    debug!("dispatching {} to the map surface", command.name());
    if let Err(err) = surface.apply(command) {
        warn!("map re-frame failed: {err}");
    }
}
