use pane_rs::lifecycle::PaneSeriesState;
use pane_rs::surface::{RecordingSurface, SurfaceOp};

#[test]
fn baseline_is_created_once_and_only_its_data_updates() {
    let mut surface = RecordingSurface::new();
    let mut state = PaneSeriesState::new();

    state
        .sync_baseline(&mut surface, &[100, 200, 300])
        .expect("first sync");
    let handle = state.baseline_handle().expect("baseline exists");
    assert_eq!(surface.create_count(), 1);

    surface.take_operations();
    state
        .sync_baseline(&mut surface, &[100, 200, 300, 400])
        .expect("second sync");
    assert_eq!(state.baseline_handle(), Some(handle));
    assert_eq!(surface.create_count(), 0);
    assert!(
        surface
            .take_operations()
            .contains(&SurfaceOp::SetSeriesData { handle, len: 4 })
    );
}

#[test]
fn baseline_points_are_deduplicated_sorted_and_invisible() {
    let mut surface = RecordingSurface::new();
    let mut state = PaneSeriesState::new();

    state
        .sync_baseline(&mut surface, &[300, 100, 200, 100, 300])
        .expect("sync");

    let handle = state.baseline_handle().expect("baseline exists");
    let recorded = &surface.series[&handle];
    assert!(!recorded.options.visible);
    let times: Vec<i64> = recorded.data.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![100, 200, 300]);
    assert!(recorded.data.iter().all(|p| p.value == 0.0));
}
