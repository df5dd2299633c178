//! Multi-leg paths with turns at the waypoints.
//!
//! Purpose
//! - `EcefPath` is an immutable route: waypoints plus one turn initiation
//!   distance (TID) per waypoint. Construction validates the legs and caches
//!   everything the queries need (leg arcs, turn angles, turns, flown lengths).
//!
//! Model
//! - A turn at waypoint `i` starts `tid[i]` before the waypoint on the inbound
//!   leg and finishes `tid[i]` after it on the outbound leg.
//! - Flown distances are measured between turn mid-points: `path_lengths[i]` is
//!   the leg from waypoint `i-1` to waypoint `i` shortened by `tid - half_length`
//!   at each end, where `half_length` is half of the turn's flown length.
//!   `path_distances()[i]` is the flown distance to the point abeam waypoint `i`.
//! - Turns outside `(MIN_TURN_ANGLE, MAX_TURN_ANGLE]` are not modelled: their
//!   TID and turn angle are cleared. TIDs at both ends are always 0.
//!
//! Code cross-refs: `Arc`, `TurnArc`, `functions::find_index_and_ratio`.

mod query;

use crate::arc::Arc;
use crate::constants::{rad2nm, MAX_TURN_ANGLE, MIN_LENGTH, MIN_TURN_ANGLE};
use crate::functions::{
    calculate_arcs, calculate_latitudes, calculate_leg_lengths, calculate_longitudes,
    calculate_turn_angles,
};
use crate::point::Point;
use crate::turn_arc::{calculate_arc_length, TurnArc};

/// Errors from building a path.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PathError {
    /// A path needs at least two waypoints.
    #[error("a path needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    /// Waypoints and turn initiation distances must pair up.
    #[error("{points} points but {distances} turn initiation distances")]
    LengthMismatch { points: usize, distances: usize },
    /// Consecutive waypoints closer than `MIN_LENGTH`.
    #[error("leg ending at point {index} is too short: {length:e} radians")]
    ShortLeg { index: usize, length: f64 },
}

/// Kind of boundary returned by [`EcefPath::section_distances_and_types`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointType {
    Waypoint,
    TurnStart,
    TurnFinish,
}

#[derive(Clone, Debug)]
pub struct EcefPath {
    points: Vec<Point>,
    turn_initiation_distances: Vec<f64>,
    leg_lengths: Vec<f64>,
    turn_angles: Vec<f64>,
    turn_half_lengths: Vec<f64>,
    path_lengths: Vec<f64>,
    leg_arcs: Vec<Arc>,
    turns: Vec<Option<TurnArc>>,
}

impl EcefPath {
    /// Build a path from waypoints and turn initiation distances [radians].
    pub fn new(points: Vec<Point>, turn_initiation_distances: Vec<f64>) -> Result<Self, PathError> {
        let n = points.len();
        if n < 2 {
            return Err(PathError::TooFewPoints(n));
        }
        if turn_initiation_distances.len() != n {
            return Err(PathError::LengthMismatch {
                points: n,
                distances: turn_initiation_distances.len(),
            });
        }

        // first leg length is always zero
        let leg_lengths = calculate_leg_lengths(&points);
        if let Some((index, &length)) = leg_lengths
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, length)| **length < MIN_LENGTH)
        {
            return Err(PathError::ShortLeg { index, length });
        }

        let leg_arcs = calculate_arcs(&points);
        let mut turn_angles = calculate_turn_angles(&leg_arcs);
        let mut tids = turn_initiation_distances;
        tids[0] = 0.0;
        tids[n - 1] = 0.0;

        let mut turns = vec![None; n];
        for i in 1..n - 1 {
            let angle = turn_angles[i].abs();
            if !(MIN_TURN_ANGLE < angle && angle <= MAX_TURN_ANGLE) {
                if tids[i] > 0.0 {
                    tracing::debug!(index = i, angle = angle.to_degrees(), "turn not modelled");
                }
                tids[i] = 0.0;
                turn_angles[i] = 0.0;
                continue;
            }
            if tids[i] > 0.0 {
                let turn = TurnArc::new(&leg_arcs[i - 1], &leg_arcs[i], tids[i]);
                if turn.is_valid() {
                    turns[i] = Some(turn);
                } else {
                    tids[i] = 0.0;
                }
            } else {
                tids[i] = 0.0;
            }
        }

        let turn_half_lengths: Vec<f64> = turn_angles
            .iter()
            .zip(&tids)
            .map(|(&angle, &tid)| {
                if tid > 0.0 {
                    0.5 * calculate_arc_length(angle, tid)
                } else {
                    0.0
                }
            })
            .collect();
        let path_lengths = calculate_path_lengths(&leg_lengths, &tids, &turn_half_lengths);

        Ok(Self {
            points,
            turn_initiation_distances: tids,
            leg_lengths,
            turn_angles,
            turn_half_lengths,
            path_lengths,
            leg_arcs,
            turns,
        })
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    /// Turn initiation distances [radians], 0 where no turn is modelled.
    #[inline]
    pub fn turn_initiation_distances(&self) -> &[f64] {
        &self.turn_initiation_distances
    }
    /// Distances between consecutive waypoints [radians]; the first is 0.
    #[inline]
    pub fn leg_lengths(&self) -> &[f64] {
        &self.leg_lengths
    }
    /// Signed turn angles [radians]; 0 at both ends and where no turn is modelled.
    #[inline]
    pub fn turn_angles(&self) -> &[f64] {
        &self.turn_angles
    }
    #[inline]
    pub fn turn_half_lengths(&self) -> &[f64] {
        &self.turn_half_lengths
    }
    /// Flown length of the leg ending at each waypoint [radians]; the first is 0.
    #[inline]
    pub fn path_lengths(&self) -> &[f64] {
        &self.path_lengths
    }
    /// Great-circle arcs between consecutive waypoints.
    #[inline]
    pub fn leg_arcs(&self) -> &[Arc] {
        &self.leg_arcs
    }
    /// The modelled turn at waypoint `index`, if any.
    #[inline]
    pub fn turn(&self, index: usize) -> Option<&TurnArc> {
        self.turns.get(index).and_then(Option::as_ref)
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a path has at least two waypoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Waypoint latitudes and longitudes in degrees.
    pub fn point_lat_longs(&self) -> (Vec<f64>, Vec<f64>) {
        (
            calculate_latitudes(&self.points),
            calculate_longitudes(&self.points),
        )
    }

    pub fn turn_initiation_distances_nm(&self) -> Vec<f64> {
        self.turn_initiation_distances
            .iter()
            .map(|&d| rad2nm(d))
            .collect()
    }

    /// Cumulative flown distance to each waypoint [radians].
    pub fn path_distances(&self) -> Vec<f64> {
        self.path_lengths
            .iter()
            .scan(0.0, |total, &length| {
                *total += length;
                Some(*total)
            })
            .collect()
    }
}

/// Leg lengths shortened by `tid - half_length` of the turns at both ends.
fn calculate_path_lengths(leg_lengths: &[f64], tids: &[f64], half_lengths: &[f64]) -> Vec<f64> {
    let n = leg_lengths.len();
    let mut lengths = vec![0.0; n];
    let mut prev_delta = 0.0;
    for i in 1..n - 1 {
        let delta = tids[i] - half_lengths[i];
        lengths[i] = leg_lengths[i] - (prev_delta + delta);
        prev_delta = delta;
    }
    lengths[n - 1] = leg_lengths[n - 1] - prev_delta;
    lengths
}
