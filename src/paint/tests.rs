//! Session-level tests: mode transitions, pointer sessions and commits.

use crate::config::BrushSettings;
use crate::geometry::{
    ground_resolution, BrushAction, GeoEngine, GeoPoint, GeometryEngine, Region,
};

use super::session::{PaintEvent, PaintSession, ToolMode};
use super::test_support::{CountingEngine, FlakyEngine, RecordingHost};

fn origin() -> GeoPoint {
    GeoPoint::new(0.0, 0.0)
}

/// Disc the session should build for a 30 px brush at zoom 10
fn expected_disc(point: GeoPoint) -> Region {
    let radius_m = 30.0 * ground_resolution(10, point.lat);
    GeoEngine::default()
        .circle_polygon(point, radius_m)
        .unwrap()
}

fn paint_at(session: &mut PaintSession, host: &mut RecordingHost, point: GeoPoint) {
    session.pointer_down(point, host);
    session.pointer_up(host);
}

// ============================================================================
// Mode transitions
// ============================================================================

#[test]
fn test_session_starts_idle() {
    let session = PaintSession::default();
    assert_eq!(session.mode(), ToolMode::Idle);
    assert!(!session.is_pointer_down());
    assert!(session.region().is_none());
    assert!(session.stroke().is_none());
    assert_eq!(session.radius(), 30.0);
    assert_eq!(session.cursor(), origin());
}

#[test]
fn test_start_draw_subscribes_pointer() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.start_draw(&mut host);
    assert_eq!(session.mode(), ToolMode::Drawing);
    assert!(host.listening);
    assert_eq!(host.subscribe_calls, 1);
    assert_eq!(host.unsubscribe_calls, 0);
}

#[test]
fn test_switching_modes_stops_then_starts() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.start_draw(&mut host);
    session.start_erase(&mut host);

    assert_eq!(session.mode(), ToolMode::Erasing);
    assert!(host.listening);
    assert_eq!(host.subscribe_calls, 2);
    assert_eq!(host.unsubscribe_calls, 1);
}

#[test]
fn test_stop_unsubscribes_once() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.start_draw(&mut host);
    session.stop(&mut host);
    session.stop(&mut host);

    assert_eq!(session.mode(), ToolMode::Idle);
    assert!(!host.listening);
    assert_eq!(host.unsubscribe_calls, 1);
}

#[test]
fn test_toggle_behaves_like_toolbar_button() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.toggle_draw(&mut host);
    assert_eq!(session.mode(), ToolMode::Drawing);
    session.toggle_draw(&mut host);
    assert_eq!(session.mode(), ToolMode::Idle);

    session.toggle_erase(&mut host);
    assert_eq!(session.mode(), ToolMode::Erasing);
    session.toggle_draw(&mut host);
    assert_eq!(session.mode(), ToolMode::Drawing);
}

#[test]
fn test_detach_behaves_like_stop() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.start_draw(&mut host);
    session.pointer_down(origin(), &mut host);
    session.detach(&mut host);

    assert_eq!(session.mode(), ToolMode::Idle);
    assert!(!host.listening);
    assert!(host.panning);
    assert!(session.region().is_none());
}

// ============================================================================
// Brush radius
// ============================================================================

#[test]
fn test_set_radius_clamps() {
    let mut session = PaintSession::default();

    assert_eq!(session.set_radius(25.0), 25.0);
    assert_eq!(session.set_radius(5.0), 10.0);
    assert_eq!(session.set_radius(500.0), 50.0);
    assert_eq!(session.set_radius(f64::NAN), 50.0);
}

#[test]
fn test_construction_clamps_radius() {
    let settings = BrushSettings {
        radius: 80.0,
        ..BrushSettings::default()
    };
    let session = PaintSession::new(&settings);
    assert_eq!(session.radius(), 50.0);
}

#[test]
fn test_apply_brush_settings_reclamps() {
    let mut session = PaintSession::default();
    session.set_radius(50.0);

    session.apply_brush_settings(&BrushSettings {
        radius: 50.0,
        min_radius: 5.0,
        max_radius: 20.0,
        ..BrushSettings::default()
    });
    assert_eq!(session.radius_bounds(), (5.0, 20.0));
    assert_eq!(session.radius(), 20.0);
}

#[test]
fn test_apply_brush_settings_changes_disc_steps() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.apply_brush_settings(&BrushSettings {
        disc_steps: 8,
        ..BrushSettings::default()
    });
    assert_eq!(session.disc_steps(), 8);

    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());

    let region = session.region().unwrap();
    assert_eq!(region.polygon_count(), 1);
    assert_eq!(region.as_multi_polygon().0[0].exterior().0.len(), 9);
}

#[test]
fn test_same_disc_steps_keeps_engine() {
    let engine = CountingEngine::default();
    let mut session = PaintSession::with_engine(&BrushSettings::default(), engine.clone());
    let mut host = RecordingHost::default();

    session.apply_brush_settings(&BrushSettings {
        radius: 20.0,
        ..BrushSettings::default()
    });
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());

    assert_eq!(engine.disc_count(), 1);
}

#[test]
fn test_samples_capture_radius_at_capture_time() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.set_radius(10.0);
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());

    let small = session.region().unwrap().area();

    session.erase_all();
    session.set_radius(40.0);
    paint_at(&mut session, &mut host, origin());
    assert!(session.region().unwrap().area() > small * 10.0);
}

// ============================================================================
// Pointer sessions
// ============================================================================

#[test]
fn test_pointer_ignored_while_idle() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.pointer_down(origin(), &mut host);
    session.pointer_move(GeoPoint::new(1.0, 1.0), &mut host);
    session.pointer_up(&mut host);

    assert!(!session.is_pointer_down());
    assert!(session.region().is_none());
    assert!(session.drain_events().is_empty());
    assert!(host.panning);
    // The cursor still follows the pointer for the brush preview
    assert_eq!(session.cursor(), GeoPoint::new(1.0, 1.0));
}

#[test]
fn test_first_paint_commits_disc() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.start_draw(&mut host);
    session.pointer_down(origin(), &mut host);
    assert!(session.is_pointer_down());
    assert!(!host.panning);
    assert_eq!(session.stroke(), Some(&expected_disc(origin())));

    session.pointer_up(&mut host);
    assert!(!session.is_pointer_down());
    assert!(host.panning);
    assert!(session.stroke().is_none());
    assert_eq!(session.region(), Some(&expected_disc(origin())));
}

#[test]
fn test_move_without_press_only_tracks_cursor() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_move(GeoPoint::new(2.0, 3.0), &mut host);
    assert_eq!(session.cursor(), GeoPoint::new(2.0, 3.0));
    assert!(session.stroke().is_none());
    assert_eq!(session.pending_samples(), 0);
}

#[test]
fn test_stroke_accumulates_until_pointer_up() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_down(origin(), &mut host);
    session.pointer_move(GeoPoint::new(0.0, 0.03), &mut host);
    session.pointer_move(GeoPoint::new(0.0, 0.06), &mut host);
    assert!(session.region().is_none());

    session.pointer_up(&mut host);
    let region = session.region().unwrap();
    assert_eq!(region.polygon_count(), 1);
    for lng in [0.0, 0.03, 0.06] {
        assert!(region.contains(GeoPoint::new(0.0, lng)));
    }
}

#[test]
fn test_second_draw_stroke_unions() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    paint_at(&mut session, &mut host, origin());
    paint_at(&mut session, &mut host, GeoPoint::new(0.0, 1.0));

    let region = session.region().unwrap();
    assert_eq!(region.polygon_count(), 2);
}

#[test]
fn test_erase_stroke_covering_region_empties_it() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();

    session.set_radius(10.0);
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());

    session.set_radius(50.0);
    session.start_erase(&mut host);
    paint_at(&mut session, &mut host, origin());

    let region = session.region().unwrap();
    assert!(region.is_empty());
}

#[test]
fn test_erase_before_anything_painted_is_ignored() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_erase(&mut host);

    session.pointer_down(origin(), &mut host);
    assert!(session.stroke().is_none());
    session.pointer_up(&mut host);

    assert!(session.region().is_none());
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_erase_stroke_outside_region_is_harmless() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());
    let before = session.region().cloned();

    session.start_erase(&mut host);
    paint_at(&mut session, &mut host, GeoPoint::new(0.0, 2.0));

    let after = session.region().unwrap();
    let before = before.unwrap();
    assert!((after.area() - before.area()).abs() < before.area() * 1e-6);
}

#[test]
fn test_second_press_closes_previous_session() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_down(origin(), &mut host);
    session.pointer_down(GeoPoint::new(0.0, 1.0), &mut host);

    // The first stroke was committed on its own
    assert_eq!(session.region(), Some(&expected_disc(origin())));
    assert_eq!(session.stroke(), Some(&expected_disc(GeoPoint::new(0.0, 1.0))));
}

#[test]
fn test_stop_mid_stroke_abandons_it() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_down(origin(), &mut host);
    session.pointer_move(GeoPoint::new(0.0, 0.03), &mut host);
    session.stop(&mut host);

    assert!(session.stroke().is_none());
    assert!(session.region().is_none());
    assert!(!session.is_pointer_down());
    assert!(host.panning);

    // A late pointer-up after the stop commits nothing
    session.pointer_up(&mut host);
    assert!(session.region().is_none());
}

#[test]
fn test_switching_mode_mid_stroke_drops_stale_samples() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_down(origin(), &mut host);
    session.record_pointer(GeoPoint::new(0.0, 0.03), &host);
    session.record_pointer(GeoPoint::new(0.0, 0.06), &host);
    assert_eq!(session.pending_samples(), 2);

    session.start_erase(&mut host);
    assert_eq!(session.pending_samples(), 0);
    assert_eq!(session.process_pending(), 0);
    assert!(session.stroke().is_none());
}

#[test]
fn test_burst_of_samples_applied_once_in_order() {
    let engine = CountingEngine::default();
    let mut session = PaintSession::with_engine(&BrushSettings::default(), engine.clone());
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_down(origin(), &mut host);
    session.drain_events();
    assert_eq!(engine.disc_count(), 1);

    let points: Vec<GeoPoint> = (1..=5).map(|i| GeoPoint::new(0.0, i as f64 * 0.02)).collect();
    for point in &points {
        assert!(session.record_pointer(*point, &host));
    }
    assert_eq!(session.pending_samples(), 5);

    assert_eq!(session.process_pending(), 5);
    assert_eq!(session.pending_samples(), 0);
    assert_eq!(engine.disc_count(), 6);

    // One stroke update per sample, each one growing the stroke
    let events = session.drain_events();
    assert_eq!(events.len(), 5);
    let mut last_area = 0.0;
    for (event, point) in events.iter().zip(&points) {
        let PaintEvent::StrokeUpdated { stroke, action } = event else {
            panic!("unexpected event {:?}", event);
        };
        assert_eq!(*action, BrushAction::Draw);
        assert!(stroke.contains(*point));
        assert!(stroke.area() > last_area);
        last_area = stroke.area();
    }
}

#[test]
fn test_samples_use_host_zoom() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost {
        zoom: 12,
        ..RecordingHost::default()
    };
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());

    let radius_m = 30.0 * ground_resolution(12, 0.0);
    let expected = GeoEngine::default()
        .circle_polygon(origin(), radius_m)
        .unwrap();
    assert_eq!(session.region(), Some(&expected));
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_failed_unions_never_halt_the_session() {
    let mut session =
        PaintSession::with_engine(&BrushSettings::default(), FlakyEngine::failing_unions());
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);

    session.pointer_down(origin(), &mut host);
    session.pointer_move(GeoPoint::new(0.0, 0.03), &mut host);
    session.pointer_move(GeoPoint::new(0.0, 0.06), &mut host);
    session.pointer_up(&mut host);

    // Only the first disc survived, the rest were dropped
    assert_eq!(session.region(), Some(&expected_disc(origin())));
    assert_eq!(session.mode(), ToolMode::Drawing);

    // Later strokes fail to merge and leave the committed region alone
    paint_at(&mut session, &mut host, GeoPoint::new(0.0, 1.0));
    assert_eq!(session.region(), Some(&expected_disc(origin())));
}

#[test]
fn test_failed_difference_keeps_region() {
    let mut session =
        PaintSession::with_engine(&BrushSettings::default(), FlakyEngine::failing_differences());
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());
    session.drain_events();

    session.start_erase(&mut host);
    paint_at(&mut session, &mut host, origin());

    assert_eq!(session.region(), Some(&expected_disc(origin())));
    // No region update is published for a failed commit
    assert!(
        !session
            .drain_events()
            .iter()
            .any(|e| matches!(e, PaintEvent::RegionUpdated { .. }))
    );
}

// ============================================================================
// Notifications and whole-region operations
// ============================================================================

#[test]
fn test_events_for_a_stroke() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_erase(&mut host);
    session.start_draw(&mut host);

    paint_at(&mut session, &mut host, origin());
    let disc = expected_disc(origin());

    assert_eq!(
        session.drain_events(),
        vec![
            PaintEvent::StrokeUpdated {
                stroke: disc.clone(),
                action: BrushAction::Draw,
            },
            PaintEvent::RegionUpdated { region: Some(disc) },
        ]
    );
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_erase_all_clears_region() {
    let mut session = PaintSession::default();
    let mut host = RecordingHost::default();
    session.start_draw(&mut host);
    paint_at(&mut session, &mut host, origin());
    session.drain_events();

    session.erase_all();
    assert!(session.region().is_none());
    assert_eq!(
        session.drain_events(),
        vec![PaintEvent::RegionUpdated { region: None }]
    );

    // Next stroke is a first paint again
    paint_at(&mut session, &mut host, GeoPoint::new(0.0, 1.0));
    assert_eq!(
        session.region(),
        Some(&expected_disc(GeoPoint::new(0.0, 1.0)))
    );
}

#[test]
fn test_replace_region() {
    let mut session = PaintSession::default();
    let loaded = expected_disc(GeoPoint::new(45.0, 7.0));

    session.replace_region(Some(loaded.clone()));
    assert_eq!(session.region(), Some(&loaded));

    session.replace_region(None);
    assert!(session.region().is_none());
    assert_eq!(
        session.drain_events(),
        vec![
            PaintEvent::RegionUpdated {
                region: Some(loaded)
            },
            PaintEvent::RegionUpdated { region: None },
        ]
    );
}
