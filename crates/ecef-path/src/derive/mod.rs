//! Derive a compact path with turns from noisy trajectory points.
//!
//! Purpose
//! - Turn a dense sequence of raw positions into an `EcefPath`: a few waypoints
//!   joined by best-fit great circles, with a turn initiation distance at every
//!   turn that is worth modelling.
//!
//! Model
//! - Simplify: keep the points that deviate most from the chord between the
//!   points already kept (a spherical Douglas–Peucker with a length-scaled
//!   threshold and a short-chord fallback), processed as a work stack.
//! - Fit: regress cross-track on along-track distance over the raw points of
//!   each simplified leg and offset the chord ends by the fitted line.
//! - Assemble: waypoints are the intersections of consecutive fitted legs;
//!   turns are sized from the first raw point after each waypoint.
//! - Refine: waypoints that the simplification would drop from the assembled
//!   path are removed and the surrounding legs refitted until none remain.
//!
//! Code cross-refs: `Arc`, `EcefPath`, `functions::find_most_extreme_value`.

use crate::arc::Arc;
use crate::constants::{MAX_TURN_ANGLE, MINIMUM_ARC_LENGTH, MIN_TURN_ANGLE, SQ_MIN_LENGTH, TWENTY_NM, TWO_NM};
use crate::functions::{calculate_atds, calculate_xtds, find_furthest_distance, find_most_extreme_value};
use crate::path::{EcefPath, PathError};
use crate::point::{distance_radians, Point};

/// Pipeline policies.
#[derive(Clone, Copy, Debug)]
pub struct DeriveCfg {
    /// Deviation threshold as a fraction of the chord length, for short chords.
    pub xtd_ratio: f64,
    /// Upper bound on a turn initiation distance [radians].
    pub max_turn_initiation_distance: f64,
    /// A turn is only modelled when its bounded initiation distance exceeds this [radians].
    pub min_turn_initiation_distance: f64,
}
impl Default for DeriveCfg {
    fn default() -> Self {
        Self {
            xtd_ratio: 0.1,
            max_turn_initiation_distance: TWENTY_NM,
            min_turn_initiation_distance: TWO_NM,
        }
    }
}

/// Index of the point between `first_index` and `last_index` that deviates
/// most from the chord joining them, or `last_index` if none deviates enough.
///
/// Chords longer than `MINIMUM_ARC_LENGTH` use the largest cross-track
/// distance against `max(min(threshold, xtd_ratio * chord), MINIMUM_ARC_LENGTH)`.
/// Shorter chords take the point furthest from the chord start, provided it is
/// more than `MINIMUM_ARC_LENGTH` from both ends.
pub fn find_extreme_point_index(
    points: &[Point],
    first_index: usize,
    last_index: usize,
    threshold: f64,
    xtd_ratio: f64,
) -> usize {
    if last_index >= points.len() || last_index <= first_index + 1 {
        return last_index;
    }

    let arc = Arc::new(points[first_index], points[last_index]);
    if arc.length() > MINIMUM_ARC_LENGTH {
        let xtds = calculate_xtds(&arc, &points[first_index + 1..last_index]);
        let (max_xtd, xtd_index) = find_most_extreme_value(&xtds);
        let xtd_threshold = threshold.min(xtd_ratio * arc.length()).max(MINIMUM_ARC_LENGTH);
        if max_xtd.abs() > xtd_threshold {
            return first_index + 1 + xtd_index;
        }
    } else {
        let (distance, index) = find_furthest_distance(&points[first_index..last_index]);
        if distance > MINIMUM_ARC_LENGTH {
            let index = first_index + index;
            if distance_radians(&points[index], &points[last_index]) > MINIMUM_ARC_LENGTH {
                return index;
            }
        }
    }
    last_index
}

/// Indices of the extreme points in increasing order, always including the
/// first and last points.
///
/// Sequences of two or fewer points, and sequences that never get further than
/// `threshold` from their first point, simplify to their ends.
pub fn find_extreme_point_indicies(points: &[Point], threshold: f64, xtd_ratio: f64) -> Vec<usize> {
    let Some(finish_index) = points.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut indicies = vec![0];
    if finish_index == 0 {
        return indicies;
    }

    let (distance, _) = find_furthest_distance(points);
    if points.len() <= 2 || distance <= threshold {
        indicies.push(finish_index);
        return indicies;
    }

    // Pending intervals, nearest the start on top.
    let mut stack = vec![(0, finish_index)];
    while let Some((first, last)) = stack.pop() {
        let index = find_extreme_point_index(points, first, last, threshold, xtd_ratio);
        tracing::trace!(first, last, index, "extreme point search");
        if first < index && index < last {
            stack.push((index, last));
            stack.push((first, index));
        } else {
            indicies.push(last);
        }
    }
    indicies
}

/// Least-squares great circle through `points`, starting from `arc`.
///
/// The fitted arc's ends are `arc`'s ends offset perpendicular to it by the
/// regression of cross-track on along-track distance.
pub fn fit_arc_to_points(points: &[Point], arc: &Arc) -> Arc {
    let atds = calculate_atds(arc, points);
    let xtds = calculate_xtds(arc, points);
    let (slope, intercept) = linear_regression(&atds, &xtds);
    let a = arc.perp_position(&arc.a(), intercept);
    let b = arc.perp_position(&arc.b(), intercept + arc.length() * slope);
    Arc::new(a, b)
}

/// Ordinary least squares `y = slope * x + intercept`; a flat line when `x` has no spread.
fn linear_regression(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len().min(y.len());
    if n == 0 {
        return (0.0, 0.0);
    }
    let count = n as f64;
    let x_mean = x[..n].iter().sum::<f64>() / count;
    let y_mean = y[..n].iter().sum::<f64>() / count;
    let (sxx, sxy) = x[..n]
        .iter()
        .zip(&y[..n])
        .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (slope, y_mean - slope * x_mean)
}

/// Intersection of the great circles of two arcs, on the side of `arc`'s start.
/// Arcs on the same great circle meet at `arc`'s start.
pub fn calculate_intersection(prev_arc: &Arc, arc: &Arc) -> Point {
    let coords = prev_arc.pole().cross(&arc.pole());
    let norm = coords.norm();
    if norm > SQ_MIN_LENGTH {
        let coords = coords * (1.0 / norm.sqrt());
        if coords.dot(&arc.a()) < 0.0 {
            -coords
        } else {
            coords
        }
    } else {
        arc.a()
    }
}

/// Largest turn initiation distance the adjoining legs allow: half the shorter
/// leg, capped at `max_distance` [radians].
#[inline]
pub fn calculate_max_turn_initiation_distance(in_length: f64, out_length: f64, max_distance: f64) -> f64 {
    (0.5 * in_length.min(out_length)).min(max_distance)
}

/// Turn initiation distance of the turn from `prev_arc` onto `arc` that passes
/// through `point`, capped at `max_distance` [radians].
///
/// Points within `threshold` of either leg, or further than `max_distance` from
/// the waypoint, give their distance from the waypoint.
pub fn calculate_turn_initiation_distance(
    prev_arc: &Arc,
    arc: &Arc,
    point: &Point,
    max_distance: f64,
    threshold: f64,
) -> f64 {
    let mut distance = distance_radians(&arc.a(), point);
    if distance < max_distance {
        let xtd_in = prev_arc.cross_track_distance(point).abs();
        let xtd_out = arc.cross_track_distance(point).abs();
        if xtd_in > threshold && xtd_out > threshold {
            // pole of the bisector of the legs
            let pole = (prev_arc.pole() + arc.pole()).normalized();
            let xtd = pole.dot(point).clamp(-1.0, 1.0).asin().abs();
            if xtd < distance {
                let angle = (xtd / distance).acos();
                let half_turn_angle = 0.5 * prev_arc.turn_angle(&arc.b()).abs();
                let cos_angle = angle.cos();
                let cos_half_turn_angle = half_turn_angle.cos();
                let sin2_half_turn_angle = 1.0 - cos_half_turn_angle * cos_half_turn_angle;
                let factor = (cos_angle * cos_angle - sin2_half_turn_angle).max(0.0);
                let radius =
                    distance * cos_half_turn_angle * (cos_angle + factor.sqrt()) / sin2_half_turn_angle;
                distance = radius * half_turn_angle.tan();
            }
        }
    }
    distance.min(max_distance)
}

/// [`derive_horizontal_path_with`] using the default policies.
pub fn derive_horizontal_path(points: &[Point], threshold: f64) -> Result<EcefPath, PathError> {
    derive_horizontal_path_with(points, threshold, DeriveCfg::default())
}

/// Derive a path from raw `points` with across-track `threshold` [radians].
///
/// Waypoints the simplification would drop from the derived path itself are
/// removed and the legs around them refitted, so deriving a path from its own
/// waypoints gives the same waypoints back.
pub fn derive_horizontal_path_with(
    points: &[Point],
    threshold: f64,
    cfg: DeriveCfg,
) -> Result<EcefPath, PathError> {
    if points.len() < 2 {
        return Err(PathError::TooFewPoints(points.len()));
    }

    let mut indicies = find_extreme_point_indicies(points, threshold, cfg.xtd_ratio);
    tracing::debug!(points = points.len(), extreme_points = indicies.len(), "simplified trajectory");

    loop {
        let (waypoints, turn_distances) = assemble_legs(points, &indicies, threshold, cfg);
        let kept = find_extreme_point_indicies(&waypoints, threshold, cfg.xtd_ratio);
        if kept.len() == waypoints.len() {
            return EcefPath::new(waypoints, turn_distances);
        }
        tracing::debug!(
            waypoints = waypoints.len(),
            kept = kept.len(),
            "refitting legs without redundant waypoints"
        );
        indicies = kept.iter().map(|&k| indicies[k]).collect();
    }
}

/// Fit a leg between each pair of consecutive extreme points and join the
/// legs at waypoints, with a turn initiation distance per waypoint.
///
/// Returns one waypoint per extreme point. `indicies` holds at least two
/// increasing indices into `points`.
fn assemble_legs(points: &[Point], indicies: &[usize], threshold: f64, cfg: DeriveCfg) -> (Vec<Point>, Vec<f64>) {
    let leg_arc = |first: usize, last: usize| {
        let chord = Arc::new(points[first], points[last]);
        fit_arc_to_points(&points[first..=last], &chord)
    };

    let mut prev_arc = leg_arc(indicies[0], indicies[1]);
    let mut waypoints = vec![prev_arc.a()];
    let mut turn_distances = vec![0.0];

    for leg in indicies.windows(3) {
        let (prev_index, index) = (leg[1], leg[2]);
        let arc = leg_arc(prev_index, index);

        let turn_angle = prev_arc.turn_angle(&arc.b());
        let max_turn_distance = calculate_max_turn_initiation_distance(
            prev_arc.length(),
            arc.length(),
            cfg.max_turn_initiation_distance,
        );

        let angle = turn_angle.abs();
        let is_valid_turn = MIN_TURN_ANGLE < angle
            && angle <= MAX_TURN_ANGLE
            && max_turn_distance > cfg.min_turn_initiation_distance;
        if is_valid_turn {
            waypoints.push(calculate_intersection(&prev_arc, &arc));
            turn_distances.push(calculate_turn_initiation_distance(
                &prev_arc,
                &arc,
                &points[prev_index + 1],
                max_turn_distance,
                0.25 * threshold,
            ));
        } else {
            tracing::debug!(
                index = prev_index,
                angle = turn_angle.to_degrees(),
                max_turn_distance,
                "turn rejected"
            );
            waypoints.push(arc.a());
            turn_distances.push(0.0);
        }
        prev_arc = arc;
    }

    waypoints.push(prev_arc.b());
    turn_distances.push(0.0);
    (waypoints, turn_distances)
}
