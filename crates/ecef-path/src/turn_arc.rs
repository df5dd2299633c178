//! Circular turns between two great-circle legs.
//!
//! Model
//! - A `TurnArc` is the small circle of angular `radius` about `centre` that is
//!   tangent to the inbound leg at `start` and to the outbound leg at `finish`.
//!   `start` and `finish` lie one turn initiation distance before and after the
//!   waypoint, and `radius = tid / tan(|angle| / 2)`.
//! - The signed `angle` follows `Arc::turn_angle`: negative for left turns.
//! - Turns outside `(MIN_TURN_ANGLE, MAX_TURN_ANGLE]` are degenerate: zero radius
//!   and angle, all three points at the outbound leg's start.

use crate::arc::Arc;
use crate::constants::{MAX_TURN_ANGLE, MIN_TURN_ANGLE, SQ_MIN_LENGTH};
use crate::point::Point;

/// Turn radius for an unsigned `turn_angle` and turn initiation distance [radians].
#[inline]
pub fn calculate_radius(turn_angle: f64, anticipation_distance: f64) -> f64 {
    anticipation_distance / (0.5 * turn_angle).tan()
}

/// Length flown through a turn [radians].
///
/// Below `MIN_TURN_ANGLE` there is no turn to model and the length is the
/// straight distance in and out of the waypoint.
pub fn calculate_arc_length(angle: f64, anticipation_distance: f64) -> f64 {
    let turn_angle = angle.abs();
    if turn_angle > MIN_TURN_ANGLE {
        turn_angle * calculate_radius(turn_angle, anticipation_distance)
    } else {
        2.0 * anticipation_distance
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnArc {
    start: Point,
    centre: Point,
    finish: Point,
    angle: f64,
    radius: f64,
}

impl TurnArc {
    /// Turn from `inbound` onto `outbound` starting `distance` before the waypoint.
    pub fn new(inbound: &Arc, outbound: &Arc, distance: f64) -> Self {
        let waypoint = outbound.a();
        let mut turn = Self {
            start: waypoint,
            centre: waypoint,
            finish: waypoint,
            angle: 0.0,
            radius: 0.0,
        };

        let turn_angle = inbound
            .pole()
            .dot(&outbound.pole())
            .clamp(-1.0, 1.0)
            .acos();
        if MIN_TURN_ANGLE < turn_angle && turn_angle <= MAX_TURN_ANGLE {
            let is_left_turn = inbound.cross_track_distance(&outbound.b()) > 0.0;
            turn.angle = if is_left_turn { -turn_angle } else { turn_angle };
            turn.radius = calculate_radius(turn_angle, distance);
            turn.start = inbound.position(inbound.length() - distance);
            let r = if turn.angle > 0.0 {
                -turn.radius
            } else {
                turn.radius
            };
            turn.centre = inbound.perp_position(&turn.start, r);
            turn.finish = outbound.position(distance);
        }
        turn
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }
    #[inline]
    pub fn centre(&self) -> Point {
        self.centre
    }
    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }
    /// Signed turn angle [radians], negative for left turns.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }
    /// Turn radius [radians].
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// False for a degenerate turn (zero radius).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.radius > 0.0
    }

    /// Length of the turn [radians].
    #[inline]
    pub fn length(&self) -> f64 {
        self.radius * self.angle.abs()
    }

    /// Distance of `point` from the turn centre [radians].
    #[inline]
    pub fn radial_distance(&self, point: &Point) -> f64 {
        point.great_circle_distance(&self.centre)
    }

    /// Distance of `point` outside (positive) or inside the turn circle.
    #[inline]
    pub fn cross_track_distance(&self, point: &Point) -> f64 {
        self.radial_distance(point) - self.radius
    }

    /// Signed angle about the centre from `start` to `point`; 0 when `point` is
    /// too close to the centre to have a direction.
    pub fn point_angle(&self, point: &Point) -> f64 {
        let radial_pole = self.centre.cross(point);
        let radial_norm = radial_pole.norm();
        if SQ_MIN_LENGTH < radial_norm {
            let radial_pole = radial_pole * (1.0 / radial_norm.sqrt());
            let start_pole = self.centre.cross(&self.start).normalized();
            let angle = start_pole.dot(&radial_pole).clamp(-1.0, 1.0).acos();
            if start_pole.dot(point) > 0.0 {
                -angle
            } else {
                angle
            }
        } else {
            0.0
        }
    }

    /// Distance flown from `start` to the point abeam `point` [radians].
    pub fn along_track_distance(&self, point: &Point) -> f64 {
        let distance = self.radius * self.point_angle(point);
        if self.angle < 0.0 {
            -distance
        } else {
            distance
        }
    }

    /// Point on the turn at signed `angle` about the centre from `start`.
    pub fn position(&self, angle: f64) -> Point {
        let start_pole = Arc::new(self.centre, self.start).pole();
        let angle_pos = angle.cos() * start_pole.cross(&self.centre) - angle.sin() * start_pole;
        Arc::new(self.centre, angle_pos).position(self.radius)
    }
}
