//! Great-circle arcs.
//!
//! Purpose
//! - `Arc` stores the start point `a`, the unit `pole` of the great-circle plane
//!   (normalised `a×b`) and the angular `length`. The finish point is derived.
//! - Coincident or antipodal endpoints give a zero pole; check
//!   [`Arc::is_valid`] before asking directional questions.
//!
//! Sign conventions
//! - Cross-track distance is positive left of track.
//! - Turn angles are negative for left (anticlockwise) turns.
//! - Ground tracks are measured clockwise from true North in `(-π, π]`.

use crate::constants::{EPSILON, MIN_LENGTH, SQ_EPSILON};
use crate::point::{Point, NORTH_POLE};
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    a: Point,
    pole: Point,
    length: f64,
}

impl Arc {
    /// Arc from `a` to `b`.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            a,
            pole: a.cross(&b).normalized(),
            length: a.great_circle_distance(&b),
        }
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }
    #[inline]
    pub fn pole(&self) -> Point {
        self.pole
    }
    /// Angular length [radians].
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// False for a degenerate arc (zero pole).
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.pole.is_zero()
    }

    /// Finish point, `position(length)`.
    #[inline]
    pub fn b(&self) -> Point {
        self.position(self.length)
    }

    /// Point at signed `distance` from `a` along the great circle. Negative
    /// distances lie behind `a`, distances past `length` extrapolate beyond `b`.
    pub fn position(&self, distance: f64) -> Point {
        distance.cos() * self.a + distance.sin() * self.pole.cross(&self.a)
    }

    /// Offset `point` (on this great circle) by signed `distance` towards the pole.
    pub fn perp_position(&self, point: &Point, distance: f64) -> Point {
        distance.cos() * *point + distance.sin() * self.pole
    }

    /// Signed cross-track distance [radians], positive left of track.
    #[inline]
    pub fn cross_track_distance(&self, point: &Point) -> f64 {
        self.pole.dot(point).clamp(-1.0, 1.0).asin()
    }

    /// Signed distance of the projection of `point` from `a` [radians].
    ///
    /// Points within `EPSILON` of `a` give 0 and points within `EPSILON` of its
    /// antipode give π. Points at a pole of the arc have no projection and give 0.
    pub fn along_track_distance(&self, point: &Point) -> f64 {
        let atd = self.a.great_circle_distance(point);
        if atd <= EPSILON {
            return 0.0;
        }
        if atd >= PI - EPSILON {
            return PI;
        }

        let sin_xtd = self.pole.dot(point);
        let sin2_xtd = sin_xtd * sin_xtd;
        let cos2_xtd = 1.0 - sin2_xtd;
        if cos2_xtd <= SQ_EPSILON {
            return 0.0;
        }

        let atd = if sin2_xtd > SQ_EPSILON {
            (atd.cos() / cos2_xtd.sqrt()).clamp(-1.0, 1.0).acos()
        } else {
            atd
        };
        let ahead = self.pole.cross(&self.a).dot(point);
        if ahead < 0.0 {
            -atd
        } else {
            atd
        }
    }

    /// Shortest distance from `point` to the arc segment [radians].
    pub fn closest_distance(&self, point: &Point) -> f64 {
        let atd = self.along_track_distance(point);
        if (0.0..=self.length).contains(&atd) {
            self.cross_track_distance(point).abs()
        } else {
            let to_a = point.great_circle_distance(&self.a);
            let to_b = point.great_circle_distance(&self.b());
            to_a.min(to_b)
        }
    }

    /// Signed turn from this arc onto the arc from `b` to `point` [radians].
    pub fn turn_angle(&self, point: &Point) -> f64 {
        let b = self.b();
        if point.great_circle_distance(&b) > MIN_LENGTH {
            let pole_p = b.cross(point).normalized();
            let angle = self.pole.dot(&pole_p).clamp(-1.0, 1.0).acos();
            if self.cross_track_distance(point) > 0.0 {
                -angle
            } else {
                angle
            }
        } else {
            0.0
        }
    }

    /// Direction of travel at `point` relative to true North [radians].
    ///
    /// At the poles the meridian is undefined: 0 at the North pole, π at the South.
    pub fn calculate_ground_track(&self, point: &Point) -> f64 {
        let meridian = point.cross(&NORTH_POLE);
        if meridian.norm() < SQ_EPSILON {
            return if point.z() > 0.0 { 0.0 } else { PI };
        }
        let sin_pole = self.pole.cross(&meridian);
        let angle = sin_pole.length().atan2(self.pole.dot(&meridian));
        if sin_pole.dot(point) < 0.0 {
            -angle
        } else {
            angle
        }
    }
}
