use pane_rs::TimeScaleSynchronizer;
use pane_rs::core::{PaneKey, VisibleRange};
use pane_rs::surface::{RecordingSurface, SharedSurface};

fn key(indicator: &str) -> PaneKey {
    PaneKey::new("BTCUSDT", indicator, 0)
}

#[test]
fn primary_range_fans_out_to_all_registered_secondaries() {
    let mut sync = TimeScaleSynchronizer::new();
    let primary = RecordingSurface::shared();
    let p1 = RecordingSurface::shared();
    let p2 = RecordingSurface::shared();

    sync.register_primary(primary.clone() as SharedSurface);
    sync.register_secondary(key("rsi"), p1.clone() as SharedSurface)
        .expect("register p1");
    sync.register_secondary(key("macd"), p2.clone() as SharedSurface)
        .expect("register p2");

    let range = VisibleRange::new(1_000.0, 2_000.0).expect("range");
    sync.on_primary_range_changed(range).expect("broadcast");

    assert_eq!(p1.borrow().visible, Some(range));
    assert_eq!(p2.borrow().visible, Some(range));
}

#[test]
fn late_registrant_is_synced_immediately_without_a_new_primary_event() {
    let mut sync = TimeScaleSynchronizer::new();
    let range = VisibleRange::new(5.0, 10.0).expect("range");
    sync.on_primary_range_changed(range).expect("broadcast");

    let p3 = RecordingSurface::shared();
    sync.register_secondary(key("stoch"), p3.clone() as SharedSurface)
        .expect("register p3");
    assert_eq!(p3.borrow().visible, Some(range));
}

#[test]
fn registering_a_primary_seeds_the_broadcast_range_from_its_viewport() {
    let mut sync = TimeScaleSynchronizer::new();
    let primary = RecordingSurface::shared();
    let range = VisibleRange::new(0.0, 100.0).expect("range");
    primary.borrow_mut().visible = Some(range);

    sync.register_primary(primary as SharedSurface);
    assert_eq!(sync.last_primary_range(), Some(range));

    let secondary = RecordingSurface::shared();
    sync.register_secondary(key("obv"), secondary.clone() as SharedSurface)
        .expect("register");
    assert_eq!(secondary.borrow().visible, Some(range));
}

#[test]
fn re_registering_the_primary_replaces_the_previous_one() {
    let mut sync = TimeScaleSynchronizer::new();
    let first = RecordingSurface::shared();
    let second = RecordingSurface::shared();
    second.borrow_mut().visible = Some(VisibleRange::new(7.0, 9.0).expect("range"));

    sync.register_primary(first as SharedSurface);
    sync.register_primary(second as SharedSurface);
    assert!(sync.has_primary());
    assert_eq!(
        sync.last_primary_range(),
        Some(VisibleRange::new(7.0, 9.0).expect("range"))
    );
}

#[test]
fn secondary_registration_is_keyed_and_idempotent() {
    let mut sync = TimeScaleSynchronizer::new();
    let first = RecordingSurface::shared();
    let replacement = RecordingSurface::shared();

    sync.register_secondary(key("rsi"), first.clone() as SharedSurface)
        .expect("register");
    sync.register_secondary(key("rsi"), replacement.clone() as SharedSurface)
        .expect("re-register");
    assert_eq!(sync.secondary_count(), 1);

    let range = VisibleRange::new(1.0, 2.0).expect("range");
    sync.on_primary_range_changed(range).expect("broadcast");
    assert_eq!(first.borrow().visible, None);
    assert_eq!(replacement.borrow().visible, Some(range));
}

#[test]
fn unregistering_an_unknown_key_is_a_no_op() {
    let mut sync = TimeScaleSynchronizer::new();
    assert!(!sync.unregister_secondary(&key("ghost")));

    let p1 = RecordingSurface::shared();
    sync.register_secondary(key("rsi"), p1 as SharedSurface)
        .expect("register");
    assert!(sync.unregister_secondary(&key("rsi")));
    assert!(!sync.unregister_secondary(&key("rsi")));
    assert_eq!(sync.secondary_count(), 0);
}

#[test]
fn unregistered_pane_no_longer_receives_broadcasts() {
    let mut sync = TimeScaleSynchronizer::new();
    let p1 = RecordingSurface::shared();
    let p2 = RecordingSurface::shared();
    sync.register_secondary(key("rsi"), p1.clone() as SharedSurface)
        .expect("register p1");
    sync.register_secondary(key("macd"), p2.clone() as SharedSurface)
        .expect("register p2");

    sync.unregister_secondary(&key("rsi"));
    let range = VisibleRange::new(3.0, 4.0).expect("range");
    sync.on_primary_range_changed(range).expect("broadcast");

    assert_eq!(p1.borrow().visible, None);
    assert_eq!(p2.borrow().visible, Some(range));
}
