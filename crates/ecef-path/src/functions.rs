//! Batch helpers over ordered point sequences.
//!
//! These work on raw polylines (no turns). `EcefPath` and the derivation
//! pipeline build on them.

use crate::arc::Arc;
use crate::constants::MIN_LENGTH;
use crate::point::Point;

/// Points from latitudes and longitudes in degrees.
pub fn calculate_points(lats: &[f64], lons: &[f64]) -> Vec<Point> {
    lats.iter()
        .zip(lons)
        .map(|(&lat, &lon)| Point::from_lat_long(lat, lon))
        .collect()
}

/// Latitudes of the points in degrees.
pub fn calculate_latitudes(points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| p.to_lat_long().0).collect()
}

/// Longitudes of the points in degrees.
pub fn calculate_longitudes(points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| p.to_lat_long().1).collect()
}

/// Distances between consecutive points; the first value is 0.
pub fn calculate_leg_lengths(points: &[Point]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    if let Some(first) = points.first() {
        let mut prev = first;
        for p in points {
            lengths.push(prev.great_circle_distance(p));
            prev = p;
        }
    }
    lengths
}

/// Distances of the points from `ref_point`.
pub fn calculate_distances(points: &[Point], ref_point: &Point) -> Vec<f64> {
    points
        .iter()
        .map(|p| ref_point.great_circle_distance(p))
        .collect()
}

/// Largest distance from the first point and its index.
pub fn find_furthest_distance(points: &[Point]) -> (f64, usize) {
    match points.first() {
        Some(first) => argmax(&calculate_distances(points, first)),
        None => (0.0, 0),
    }
}

pub fn calculate_xtds(arc: &Arc, points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| arc.cross_track_distance(p)).collect()
}

pub fn calculate_atds(arc: &Arc, points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| arc.along_track_distance(p)).collect()
}

/// The value with the largest magnitude, sign preserved, and its index.
/// Ties between `max` and `-min` go to the maximum.
pub fn find_most_extreme_value(values: &[f64]) -> (f64, usize) {
    let (max_value, max_index) = argmax(values);
    let (min_value, min_index) = argmin(values);
    if max_value < -min_value {
        (min_value, min_index)
    } else {
        (max_value, max_index)
    }
}

/// Arcs between consecutive points (one fewer than the points).
pub fn calculate_arcs(points: &[Point]) -> Vec<Arc> {
    points.windows(2).map(|w| Arc::new(w[0], w[1])).collect()
}

pub fn calculate_closest_distances(arcs: &[Arc], point: &Point) -> Vec<f64> {
    arcs.iter().map(|arc| arc.closest_distance(point)).collect()
}

/// Turn angle at the start of every arc plus a trailing 0, so the result has
/// one entry per point and is 0 at both ends.
pub fn calculate_turn_angles(arcs: &[Arc]) -> Vec<f64> {
    let mut angles = vec![0.0; arcs.len() + 1];
    for (i, pair) in arcs.windows(2).enumerate() {
        angles[i + 1] = pair[0].turn_angle(&pair[1].b());
    }
    angles
}

/// Point at `ratio` along the leg starting at `index`.
pub fn calculate_position(points: &[Point], index: usize, ratio: f64) -> Point {
    let last = points.len().saturating_sub(1);
    let index = index.min(last);
    match points.get(index) {
        Some(point) if ratio > 0.0 && index < last => {
            let arc = Arc::new(*point, points[index + 1]);
            arc.position(ratio * arc.length())
        }
        Some(point) => *point,
        None => Point::zero(),
    }
}

/// Leg index and ratio of the projection of `point` onto the polyline.
///
/// A point at the end of a leg is reported as ratio 0 of the next index.
pub fn find_index_and_ratio(points: &[Point], point: &Point) -> (usize, f64) {
    let arcs = calculate_arcs(points);
    if arcs.is_empty() {
        return (0, 0.0);
    }
    let (_, index) = argmin(&calculate_closest_distances(&arcs, point));
    let arc = &arcs[index];
    let distance = arc.along_track_distance(point);
    if distance >= arc.length() - MIN_LENGTH {
        return (index + 1, 0.0);
    }
    (index, distance / arc.length())
}

/// Index and ratio of `value` in ascending `values`: `values[index] <= value`
/// and `0 <= ratio < 1` within the range of `values`.
pub fn calculate_value_reference(values: &[f64], value: f64) -> (usize, f64) {
    if values.is_empty() {
        return (0, 0.0);
    }
    let mut index = values.partition_point(|v| *v < value).min(values.len() - 1);
    let mut ratio = 0.0;
    let index_value = values[index];
    if index > 0 && value < index_value {
        index -= 1;
        let denom = index_value - values[index];
        if denom > 0.0 {
            ratio = (value - values[index]) / denom;
        }
    }
    (index, ratio)
}

fn argmax(values: &[f64]) -> (f64, usize) {
    let mut best = (f64::NEG_INFINITY, 0);
    for (i, &v) in values.iter().enumerate() {
        if v > best.0 {
            best = (v, i);
        }
    }
    best
}

fn argmin(values: &[f64]) -> (f64, usize) {
    let mut best = (f64::INFINITY, 0);
    for (i, &v) in values.iter().enumerate() {
        if v < best.0 {
            best = (v, i);
        }
    }
    best
}
