use super::*;
use crate::guests::model::Guest;
use crate::layout::table::{LayoutParams, layout_tables};

fn table(n: usize) -> TableLayout {
    let guests: Vec<Guest> = (0..n)
        .map(|i| {
            let mut g = Guest::new(format!("g{i}"), format!("n{i}")).in_group("A", i.to_string());
            g.title = Some("友人".to_string());
            g
        })
        .collect();
    layout_tables(&guests, &LayoutParams::default())
        .into_iter()
        .next()
        .unwrap()
}

#[test]
fn full_mode_matches_engine_placement() {
    let t = table(5);
    let view = view_table(&t, ViewMode::Full, &ViewportPolicy::default());
    for (seat, layout) in view.seats.iter().zip(t.guests.iter()) {
        assert_eq!(seat.center.x.to_bits(), layout.x.to_bits());
        assert_eq!(seat.center.y.to_bits(), layout.y.to_bits());
        assert!(seat.show_controls);
        assert!(seat.title.is_some());
    }
}

#[test]
fn compact_mode_shrinks_radius_and_hides_controls() {
    let t = table(4);
    let policy = ViewportPolicy::default();
    let full = view_table(&t, ViewMode::Full, &policy);
    let compact = view_table(&t, ViewMode::Compact, &policy);

    let r_full = full.seats[0].center.distance(full.center);
    let r_compact = compact.seats[0].center.distance(compact.center);
    assert!((r_compact - r_full * policy.compact_scale).abs() < 1e-9);
    assert!(compact.seats.iter().all(|s| !s.show_controls));
    assert!(compact.seats.iter().all(|s| s.title.is_none()));
    assert_eq!(compact.seats.len(), 4);
}

#[test]
fn viewport_width_picks_mode() {
    let policy = ViewportPolicy::default();
    assert_eq!(policy.mode_for_viewport(375), ViewMode::Compact);
    assert_eq!(policy.mode_for_viewport(640), ViewMode::Full);
    assert_eq!(policy.mode_for_viewport(1440), ViewMode::Full);
}

#[test]
fn resize_replaces_on_new_viewport() {
    let t = table(3);
    let policy = ViewportPolicy::default();
    let view = view_for_viewport(&t, Canvas::new(400, 400).unwrap(), &policy);
    assert_eq!(view.mode, ViewMode::Compact);
    assert_eq!(view.center, Point::new(200.0, 200.0));
    let r = view.seats[0].center.distance(view.center);
    assert!((r - 400.0 * 0.35 * policy.compact_scale).abs() < 1e-9);
}

#[test]
fn deep_links_are_percent_encoded() {
    let policy = ViewportPolicy::default();
    assert_eq!(policy.guest_href("g-12"), "/guests/g-12");
    assert_eq!(policy.guest_href("a b/c"), "/guests/a%20b%2Fc");
    assert_eq!(policy.guest_href("山"), "/guests/%E5%B1%B1");
}

#[test]
fn mode_cycle_flips_every_period() {
    let mut cycle = ViewModeCycle::new(ViewMode::Full, 3);
    let modes: Vec<ViewMode> = (0..7).map(|_| cycle.tick()).collect();
    use ViewMode::{Compact as C, Full as F};
    assert_eq!(modes, vec![F, F, C, C, C, F, F]);
}

#[test]
fn mode_cycle_zero_period_flips_each_tick() {
    let mut cycle = ViewModeCycle::new(ViewMode::Compact, 0);
    assert_eq!(cycle.tick(), ViewMode::Full);
    assert_eq!(cycle.tick(), ViewMode::Compact);
}

#[test]
fn empty_table_view_is_empty() {
    let t = TableLayout {
        guests: vec![],
        ..table(1)
    };
    let view = view_table(&t, ViewMode::Full, &ViewportPolicy::default());
    assert!(view.seats.is_empty());
}
