use std::f64::consts::{FRAC_PI_2, TAU};

use super::*;

const EPS: f64 = 1e-9;

fn guests(n: usize) -> Vec<Guest> {
    (0..n)
        .map(|i| Guest::new(i.to_string(), format!("g{i}")))
        .collect()
}

#[test]
fn four_guests_land_on_compass_points() {
    let out = place_guests(&guests(4), Point::new(500.0, 500.0), 100.0);
    let expected = [(500.0, 400.0), (600.0, 500.0), (500.0, 600.0), (400.0, 500.0)];

    assert_eq!(out.len(), 4);
    for (p, (x, y)) in out.iter().zip(expected) {
        assert!((p.x - x).abs() < EPS, "x {} != {x}", p.x);
        assert!((p.y - y).abs() < EPS, "y {} != {y}", p.y);
    }
    assert!((out[1].angle_radians - 0.0).abs() < EPS);
}

#[test]
fn single_guest_sits_at_top() {
    let out = place_guests(&guests(1), Point::new(10.0, 10.0), 5.0);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].angle_radians, -FRAC_PI_2);
    assert!((out[0].x - 10.0).abs() < EPS);
    assert!((out[0].y - 5.0).abs() < EPS);
}

#[test]
fn consecutive_gap_is_uniform() {
    for n in 1..=24 {
        let out = place_guests(&guests(n), Point::new(0.0, 0.0), 1.0);
        let step = TAU / n as f64;
        for w in out.windows(2) {
            assert!((w[1].angle_radians - w[0].angle_radians - step).abs() < EPS);
        }
    }
}

#[test]
fn placement_is_bit_identical_across_calls() {
    let g = guests(9);
    let a = place_guests(&g, Point::new(333.3, 271.9), 187.25);
    let b = place_guests(&g, Point::new(333.3, 271.9), 187.25);
    for (pa, pb) in a.iter().zip(b.iter()) {
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
    }
}

#[test]
fn empty_table_is_a_no_op() {
    assert!(place_guests(&[], Point::new(0.0, 0.0), 100.0).is_empty());
    assert_eq!(seat_angles(0).count(), 0);
}

#[test]
fn placements_keep_guest_ids_in_order() {
    let out = place_guests(&guests(3), Point::ORIGIN, 1.0);
    let ids: Vec<&str> = out.iter().map(|p| p.guest_id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
}

#[test]
fn every_seat_is_on_the_circle() {
    let center = Point::new(40.0, -12.0);
    for p in place_guests(&guests(7), center, 33.0) {
        assert!((p.point().distance(center) - 33.0).abs() < 1e-9);
    }
}
