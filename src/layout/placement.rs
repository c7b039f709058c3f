use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use crate::foundation::core::Point;
use crate::guests::model::Guest;

/// Angle of seat 0: 12 o'clock in screen coordinates (y grows downward), so increasing angles
/// proceed clockwise.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Position of one guest around a table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Guest this placement belongs to.
    pub guest_id: String,
    /// Absolute x coordinate.
    pub x: f64,
    /// Absolute y coordinate.
    pub y: f64,
    /// Angle from the table center, in radians.
    pub angle_radians: f64,
}

impl Placement {
    /// Position as a point.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Evenly spaced seat angles for `n` seats, starting at [`START_ANGLE`].
pub fn seat_angles(n: usize) -> impl Iterator<Item = f64> {
    let step = if n == 0 { 0.0 } else { TAU / n as f64 };
    (0..n).map(move |i| START_ANGLE + i as f64 * step)
}

/// Point on the circle of `radius` around `center` at `angle`.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

/// Place already-ordered guests evenly around a circle.
///
/// Seat 0 sits at the top and the rest follow clockwise with a uniform `2π / n` gap. An empty
/// slice yields an empty result.
pub fn place_guests(ordered_guests: &[Guest], center: Point, radius: f64) -> Vec<Placement> {
    ordered_guests
        .iter()
        .zip(seat_angles(ordered_guests.len()))
        .map(|(guest, angle)| {
            let p = point_on_circle(center, radius, angle);
            Placement {
                guest_id: guest.id.clone(),
                x: p.x,
                y: p.y,
                angle_radians: angle,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
