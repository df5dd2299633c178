//! Points on the unit sphere.
//!
//! Purpose
//! - `Point` is an ECEF unit vector, or exactly the zero vector as the
//!   "undefined direction" sentinel produced by `normalize` when a cross
//!   product or difference is too short to carry a direction.
//! - Great-circle distances use `atan2(|a×b|, a·b)`, which keeps full precision
//!   both for nearly coincident and for nearly antipodal points.
//!
//! Conventions
//! - Latitude/longitude are degrees at the boundary, radians everywhere else.
//! - Equality is tolerance based: squared coordinate difference `<= SQ_EPSILON`.

use crate::constants::{rad2nm, SQ_EPSILON, SQ_MIN_LENGTH};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// The North pole of the unit sphere.
pub const NORTH_POLE: Point = Point {
    coords: Vector3::new(0.0, 0.0, 1.0),
};

/// A point (or direction) in ECEF coordinates.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub coords: Vector3<f64>,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: Vector3::new(x, y, z),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Point at latitude/longitude in degrees. Latitude is clamped to ±90°,
    /// longitude is periodic.
    pub fn from_lat_long(latitude: f64, longitude: f64) -> Self {
        let lat = latitude.clamp(-90.0, 90.0).to_radians();
        let lon = longitude.to_radians();
        let sin_lat = lat.sin();
        let cos_lat = (1.0 - sin_lat * sin_lat).sqrt();
        Self::new(cos_lat * lon.cos(), cos_lat * lon.sin(), sin_lat)
    }

    /// `(latitude, longitude)` in degrees.
    pub fn to_lat_long(&self) -> (f64, f64) {
        let w = (self.x() * self.x() + self.y() * self.y()).sqrt();
        (
            self.z().atan2(w).to_degrees(),
            self.y().atan2(self.x()).to_degrees(),
        )
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coords.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.coords.y
    }
    #[inline]
    pub fn z(&self) -> f64 {
        self.coords.z
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.coords.dot(&other.coords)
    }

    /// Unnormalised cross product.
    #[inline]
    pub fn cross(&self, other: &Point) -> Point {
        Point::from(self.coords.cross(&other.coords))
    }

    /// Sum of the squares of the coordinates.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.coords.norm_squared()
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.norm().sqrt()
    }

    /// True only for the exact zero vector.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coords.x == 0.0 && self.coords.y == 0.0 && self.coords.z == 0.0
    }

    /// Rescale to unit length in place, or collapse to the zero vector when the
    /// squared length is not above `SQ_MIN_LENGTH`.
    pub fn normalize(&mut self) {
        let sq_length = self.norm();
        if SQ_MIN_LENGTH < sq_length {
            self.coords /= sq_length.sqrt();
        } else {
            self.coords = Vector3::zeros();
        }
    }

    /// Normalised copy, see [`Point::normalize`].
    #[inline]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Great-circle distance in radians, in `[0, π]`.
    #[inline]
    pub fn great_circle_distance(&self, other: &Point) -> f64 {
        let sin_angle = self.coords.cross(&other.coords).norm();
        let cos_angle = self.coords.dot(&other.coords);
        sin_angle.atan2(cos_angle)
    }
}

impl From<Vector3<f64>> for Point {
    #[inline]
    fn from(coords: Vector3<f64>) -> Self {
        Self { coords }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.coords - other.coords).norm_squared() <= SQ_EPSILON
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::from(self.coords + rhs.coords)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::from(self.coords - rhs.coords)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::from(self.coords * rhs)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: Point) -> Point {
        Point::from(rhs.coords * self)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::from(-self.coords)
    }
}

/// Great-circle distance between two points [radians].
#[inline]
pub fn distance_radians(a: &Point, b: &Point) -> f64 {
    a.great_circle_distance(b)
}

/// Great-circle distance between two points [nautical miles].
#[inline]
pub fn distance_nm(a: &Point, b: &Point) -> f64 {
    rad2nm(distance_radians(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EPSILON, MIN_LENGTH};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn lat_long_round_trip() {
        let p = Point::from_lat_long(0.0, 0.0);
        assert_eq!(p, Point::new(1.0, 0.0, 0.0));

        let north = Point::from_lat_long(90.0, 0.0);
        assert_eq!(north, NORTH_POLE);
        // latitude is clamped
        assert_eq!(Point::from_lat_long(100.0, 45.0), Point::from_lat_long(90.0, 45.0));

        let (lat, lon) = Point::from_lat_long(-33.5, 151.25).to_lat_long();
        assert!((lat + 33.5).abs() < 1e-12);
        assert!((lon - 151.25).abs() < 1e-12);

        // longitude is periodic
        let (_, lon) = Point::from_lat_long(10.0, 190.0).to_lat_long();
        assert!((lon + 170.0).abs() < 1e-12);
    }

    #[test]
    fn vector_algebra() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Point::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Point::new(2.0, 1.5, 1.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Point::new(-1.0, -2.0, -3.0));
        assert_eq!(a.norm(), 14.0);
        assert!((a.length() - 14f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn normalize_collapses_short_vectors() {
        let mut p = Point::new(3.0, 0.0, 4.0);
        p.normalize();
        assert_eq!(p, Point::new(0.6, 0.0, 0.8));
        assert!(!p.is_zero());

        let mut tiny = Point::new(MIN_LENGTH / 2.0, 0.0, 0.0);
        tiny.normalize();
        assert!(tiny.is_zero());

        let mut zero = Point::zero();
        zero.normalize();
        assert!(zero.is_zero());
    }

    #[test]
    fn equality_uses_squared_epsilon() {
        let a = Point::new(1.0, 0.0, 0.0);
        assert_eq!(a, Point::new(1.0 + EPSILON / 2.0, 0.0, 0.0));
        assert_ne!(a, Point::new(1.0 + 4.0 * EPSILON, 0.0, 0.0));
    }

    #[test]
    fn great_circle_distances() {
        let a = Point::from_lat_long(0.0, 0.0);
        let b = Point::from_lat_long(0.0, 90.0);
        let c = Point::from_lat_long(0.0, 180.0);
        assert_eq!(distance_radians(&a, &a), 0.0);
        assert!((distance_radians(&a, &b) - FRAC_PI_2).abs() < 1e-15);
        assert!((distance_radians(&a, &c) - PI).abs() < 1e-15);
        assert!((distance_nm(&a, &Point::from_lat_long(1.0, 0.0)) - 60.0).abs() < 1e-9);
    }

    fn lat_long() -> impl Strategy<Value = (f64, f64)> {
        (-89.0f64..89.0, -180.0f64..180.0)
    }

    proptest! {
        #[test]
        fn distance_to_self_and_antipode((lat, lon) in lat_long()) {
            let a = Point::from_lat_long(lat, lon);
            prop_assert_eq!(distance_radians(&a, &a), 0.0);
            prop_assert!((distance_radians(&a, &-a) - PI).abs() < 1e-12);
        }

        #[test]
        fn points_are_unit_vectors((lat, lon) in lat_long()) {
            let a = Point::from_lat_long(lat, lon);
            prop_assert!((a.norm() - 1.0).abs() < 1e-14);
            let (lat2, lon2) = a.to_lat_long();
            prop_assert!((lat2 - lat).abs() < 1e-9);
            prop_assert!((lon2 - lon).abs() < 1e-9);
        }

        #[test]
        fn distance_is_symmetric(a in lat_long(), b in lat_long()) {
            let a = Point::from_lat_long(a.0, a.1);
            let b = Point::from_lat_long(b.0, b.1);
            prop_assert!((distance_radians(&a, &b) - distance_radians(&b, &a)).abs() < 1e-15);
        }
    }
}
