//! Behavioural coverage for the map re-framing protocol.
//!
//! These scenarios drive the coordinator against [`ViewportMap`], the
//! headless surface, so the observer-following flag and the framed centre
//! can be asserted without a native view.

use std::cell::RefCell;
use std::sync::Arc;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use geostash_core::{GeolocationFix, MapTap, SearchSelection};
use geostash_coordinator::{
    DownloadEngine, PlaceDownloadCoordinator, ReframeOutcome, ViewportMap,
    test_support::ScriptedEngine,
};

/// A mounted screen and the headless surface bound to it (if any).
struct Screen {
    surface: Option<Arc<ViewportMap>>,
    coordinator: PlaceDownloadCoordinator,
}

fn mount_screen(resolved: bool) -> Screen {
    let engine = Arc::new(ScriptedEngine::default());
    let mut coordinator = PlaceDownloadCoordinator::mount(
        engine as Arc<dyn DownloadEngine>,
        GeolocationFix::resolved(40.0, -74.0),
    );
    let surface = if resolved {
        let map = Arc::new(ViewportMap::new());
        coordinator.attach_map(map.clone());
        Some(map)
    } else {
        None
    };
    Screen {
        surface,
        coordinator,
    }
}

#[fixture]
fn screen() -> RefCell<Option<Screen>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> RefCell<Option<ReframeOutcome>> {
    RefCell::new(None)
}

#[given("a mounted download screen with the map resolved")]
fn screen_with_map(screen: &RefCell<Option<Screen>>) {
    *screen.borrow_mut() = Some(mount_screen(true));
}

#[given("a mounted download screen without a resolved map")]
fn screen_without_map(screen: &RefCell<Option<Screen>>) {
    *screen.borrow_mut() = Some(mount_screen(false));
}

#[when("the user selects a search result")]
fn select_search_result(
    screen: &RefCell<Option<Screen>>,
    outcome: &RefCell<Option<ReframeOutcome>>,
) {
    let mut borrow = screen.borrow_mut();
    let mounted = borrow.as_mut().expect("screen must be mounted");
    *outcome.borrow_mut() = Some(mounted.coordinator.select_search_result(SearchSelection {
        latitude: 51.5,
        longitude: -0.1,
    }));
}

#[when("the user taps a point on the map")]
fn tap_the_map(screen: &RefCell<Option<Screen>>, outcome: &RefCell<Option<ReframeOutcome>>) {
    let mut borrow = screen.borrow_mut();
    let mounted = borrow.as_mut().expect("screen must be mounted");
    *outcome.borrow_mut() = Some(mounted.coordinator.map_tapped(MapTap {
        latitude: 48.8,
        longitude: 2.3,
    }));
}

#[then("the map follows the observer around the selection")]
fn map_follows_observer(
    screen: &RefCell<Option<Screen>>,
    outcome: &RefCell<Option<ReframeOutcome>>,
) {
    assert_eq!(*outcome.borrow(), Some(ReframeOutcome::Dispatched));
    let borrow = screen.borrow();
    let mounted = borrow.as_ref().expect("screen must be mounted");
    let surface = mounted.surface.as_ref().expect("map resolved");
    assert!(surface.following_observer());
    assert_eq!(surface.centre(), Some(Coord { x: -0.1, y: 51.5 }));
}

#[then("the map frames the tapped point without following the observer")]
fn map_frames_tap(screen: &RefCell<Option<Screen>>, outcome: &RefCell<Option<ReframeOutcome>>) {
    assert_eq!(*outcome.borrow(), Some(ReframeOutcome::Dispatched));
    let borrow = screen.borrow();
    let mounted = borrow.as_ref().expect("screen must be mounted");
    let surface = mounted.surface.as_ref().expect("map resolved");
    assert!(!surface.following_observer());
    assert_eq!(surface.centre(), Some(Coord { x: 2.3, y: 48.8 }));
}

#[then("no command reaches the map surface")]
fn nothing_dispatched(screen: &RefCell<Option<Screen>>, outcome: &RefCell<Option<ReframeOutcome>>) {
    assert_eq!(*outcome.borrow(), Some(ReframeOutcome::MapNotReady));
    let borrow = screen.borrow();
    let mounted = borrow.as_ref().expect("screen must be mounted");
    assert!(
        mounted.surface.is_none(),
        "no surface exists for a command to reach"
    );
    let marker = mounted.coordinator.marker();
    assert_eq!(marker.latitude, Some(51.5), "the marker still moves");
}

#[scenario(path = "tests/features/map_reframe.feature", index = 0)]
fn search_selection_follows_observer(
    screen: RefCell<Option<Screen>>,
    outcome: RefCell<Option<ReframeOutcome>>,
) {
    let _ = (screen, outcome);
}

#[scenario(path = "tests/features/map_reframe.feature", index = 1)]
fn map_tap_does_not_follow_observer(
    screen: RefCell<Option<Screen>>,
    outcome: RefCell<Option<ReframeOutcome>>,
) {
    let _ = (screen, outcome);
}

#[scenario(path = "tests/features/map_reframe.feature", index = 2)]
fn no_command_before_the_map_resolves(
    screen: RefCell<Option<Screen>>,
    outcome: RefCell<Option<ReframeOutcome>>,
) {
    let _ = (screen, outcome);
}
