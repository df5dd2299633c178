//! Distance, position and ground track queries on an `EcefPath`.
//!
//! Indices name legs: leg `i` runs from waypoint `i` to waypoint `i + 1` and
//! its flown length is `path_lengths[i + 1]`. Ratios are fractions of that
//! flown length, measured from the mid-point of the turn at waypoint `i`.

use super::{EcefPath, PointType};
use crate::arc::Arc;
use crate::constants::MIN_LENGTH;
use crate::functions::{self, calculate_value_reference};
use crate::point::Point;
use crate::turn_arc::TurnArc;
use std::f64::consts::{PI, TAU};

/// Which part of a leg a flown distance falls in.
enum Section<'a> {
    /// Inside a turn, at `ratio` of the way through it, entered from `inbound`.
    Turn {
        turn: &'a TurnArc,
        inbound: &'a Arc,
        ratio: f64,
    },
    /// On the straight part of the leg, `distance` from its first waypoint.
    Straight { arc: &'a Arc, distance: f64 },
}

/// Wrap an angle into `(-π, π]`.
fn wrap_track(angle: f64) -> f64 {
    let angle = angle % TAU;
    if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

impl EcefPath {
    /// Last valid leg index.
    #[inline]
    fn last_leg(&self) -> usize {
        self.len() - 2
    }

    /// Locate `ratio` of the flown length of leg `index` (`index < len - 1`).
    fn locate(&self, index: usize, ratio: f64) -> Section<'_> {
        let arc = &self.leg_arcs[index];
        let path_length = self.path_lengths[index + 1];
        let mut distance = ratio * path_length;

        let next_turn_distance = path_length - self.turn_half_lengths[index + 1];
        let inside_finish_turn = index < self.last_leg()
            && self.turn_initiation_distances[index + 1] > 0.0
            && distance > next_turn_distance;
        let inside_start_turn = index > 0
            && self.turn_initiation_distances[index] > 0.0
            && distance < self.turn_half_lengths[index];

        if inside_finish_turn {
            if let Some(turn) = self.turn(index + 1) {
                let ratio = 0.5 * (distance - next_turn_distance) / self.turn_half_lengths[index + 1];
                return Section::Turn {
                    turn,
                    inbound: arc,
                    ratio,
                };
            }
        } else if inside_start_turn {
            if let Some(turn) = self.turn(index) {
                let ratio = 0.5 * (distance + self.turn_half_lengths[index]) / self.turn_half_lengths[index];
                return Section::Turn {
                    turn,
                    inbound: &self.leg_arcs[index - 1],
                    ratio,
                };
            }
        }

        if self.turn_initiation_distances[index] > 0.0 {
            distance += self.turn_initiation_distances[index] - self.turn_half_lengths[index];
        }
        Section::Straight { arc, distance }
    }

    /// Position at `ratio` of the flown length of leg `index`.
    ///
    /// Indices past the last leg give the last waypoint.
    pub fn calculate_position(&self, index: usize, ratio: f64) -> Point {
        if index > self.last_leg() {
            return self.points[self.len() - 1];
        }
        match self.locate(index, ratio) {
            Section::Turn { turn, ratio, .. } => turn.position(ratio * turn.angle()),
            Section::Straight { arc, distance } => arc.position(distance),
        }
    }

    /// Ground track at `ratio` of the flown length of leg `index` [radians, `(-π, π]`].
    ///
    /// Indices past the last leg give the track of the last leg at the last waypoint.
    pub fn calculate_ground_track(&self, index: usize, ratio: f64) -> f64 {
        if index > self.last_leg() {
            let arc = &self.leg_arcs[self.last_leg()];
            return arc.calculate_ground_track(&self.points[self.len() - 1]);
        }
        match self.locate(index, ratio) {
            Section::Turn {
                turn,
                inbound,
                ratio,
            } => wrap_track(inbound.calculate_ground_track(&turn.start()) + ratio * turn.angle()),
            Section::Straight { arc, distance } => {
                arc.calculate_ground_track(&arc.position(distance))
            }
        }
    }

    /// Signed flown distance of the projection of `point` from the start of leg
    /// `index` [radians]. Negative before the leg start, beyond the leg's flown
    /// length past its end.
    pub fn calculate_path_leg_distance(&self, point: &Point, index: usize) -> f64 {
        let index = index.min(self.last_leg());
        let arc = &self.leg_arcs[index];
        let mut distance = arc.along_track_distance(point);

        let prev_tid = if index > 0 {
            self.turn_initiation_distances[index]
        } else {
            0.0
        };
        if prev_tid > 0.0 && distance < prev_tid {
            if let Some(turn) = self.turn(index) {
                return turn.along_track_distance(point) - self.turn_half_lengths[index];
            }
        }

        let next_tid = if index < self.last_leg() {
            self.turn_initiation_distances[index + 1]
        } else {
            0.0
        };
        let next_turn_distance = arc.length() - next_tid;
        if next_tid > 0.0 && distance > next_turn_distance {
            if let Some(turn) = self.turn(index + 1) {
                return turn.along_track_distance(point) + self.path_lengths[index + 1]
                    - self.turn_half_lengths[index + 1];
            }
        }

        if prev_tid > 0.0 {
            distance += self.turn_half_lengths[index] - prev_tid;
        }
        distance
    }

    /// Flown distance from the path start of the projection of `point`, searching
    /// leg `index` and its neighbours [radians].
    pub fn calculate_path_distance(&self, point: &Point, index: usize) -> f64 {
        self.calculate_path_distance_within(point, index, f64::INFINITY)
    }

    /// As [`EcefPath::calculate_path_distance`], but searches the whole path when
    /// none of the neighbouring legs is within `across_track_tolerance`.
    pub fn calculate_path_distance_within(
        &self,
        point: &Point,
        index: usize,
        across_track_tolerance: f64,
    ) -> f64 {
        let mut index = index.min(self.last_leg());
        let closest = self.leg_arcs[index].closest_distance(point);
        let prev = if index > 0 {
            self.leg_arcs[index - 1].closest_distance(point)
        } else {
            closest + 1.0
        };
        let next = if index < self.last_leg() {
            self.leg_arcs[index + 1].closest_distance(point)
        } else {
            closest + 1.0
        };

        if closest.min(prev.min(next)) < across_track_tolerance {
            if prev < closest || next < closest {
                index = if prev < next { index - 1 } else { index + 1 };
            }
        } else {
            let (nearest, _) = functions::find_index_and_ratio(&self.points, point);
            index = nearest.min(self.last_leg());
        }

        let path_length = self.path_lengths[index + 1];
        let distance = self
            .calculate_path_leg_distance(point, index)
            .max(0.0)
            .min(path_length);
        distance + self.path_lengths[..=index].iter().sum::<f64>()
    }

    /// Flown distances of an ordered sequence of points, starting the search at
    /// leg `start_index` and moving forward as the distances pass leg ends.
    pub fn calculate_path_distances(
        &self,
        points: &[Point],
        across_track_tolerance: f64,
        start_index: usize,
    ) -> Vec<f64> {
        let mut index = start_index.min(self.last_leg());
        let mut leg_end: f64 = self.path_lengths[..=index + 1].iter().sum();
        points
            .iter()
            .map(|point| {
                let distance = self.calculate_path_distance_within(point, index, across_track_tolerance);
                if distance > leg_end && index < self.last_leg() {
                    index += 1;
                    leg_end += self.path_lengths[index + 1];
                }
                distance
            })
            .collect()
    }

    /// Leg index and ratio of the projection of `point` onto the flown path.
    ///
    /// A point at the end of a leg is reported as ratio 0 of the next leg.
    pub fn find_index_and_ratio(&self, point: &Point) -> (usize, f64) {
        let (mut index, mut ratio) = functions::find_index_and_ratio(&self.points, point);
        if index <= self.last_leg() {
            let path_length = self.path_lengths[index + 1];
            let distance = self.calculate_path_leg_distance(point, index);
            // within rounding of the leg end counts as the start of the next leg
            if distance >= path_length - MIN_LENGTH {
                index += 1;
                ratio = 0.0;
                if index <= self.last_leg() {
                    ratio = self.calculate_path_leg_distance(point, index) / self.path_lengths[index + 1];
                }
            } else {
                ratio = distance / path_length;
            }
        }
        (index, ratio)
    }

    /// Cross-track distance of `point` from leg `index`, or from the turn at
    /// either end when the point is abeam the turn [radians].
    pub fn calculate_path_cross_track_distance(&self, point: &Point, index: usize) -> f64 {
        let index = index.min(self.last_leg());
        let arc = &self.leg_arcs[index];
        let xtd = arc.cross_track_distance(point);

        let prev_tid = if index > 0 {
            self.turn_initiation_distances[index]
        } else {
            0.0
        };
        let next_tid = if index < self.last_leg() {
            self.turn_initiation_distances[index + 1]
        } else {
            0.0
        };
        if prev_tid <= 0.0 && next_tid <= 0.0 {
            return xtd;
        }

        let distance = arc.along_track_distance(point);
        let turn = if prev_tid > 0.0 && distance < prev_tid {
            self.turn(index)
        } else if next_tid > 0.0 && distance > arc.length() - next_tid {
            self.turn(index + 1)
        } else {
            None
        };
        turn.map_or(xtd, |turn| turn.cross_track_distance(point))
    }

    /// Cross-track distances of points whose flown `distances` are known [radians].
    pub fn calculate_cross_track_distances(&self, points: &[Point], distances: &[f64]) -> Vec<f64> {
        let path_distances = self.path_distances();
        let mut index = 0;
        points
            .iter()
            .zip(distances)
            .map(|(point, &distance)| {
                if distance > path_distances[index + 1] && index < self.last_leg() {
                    index += 1;
                }
                self.calculate_path_cross_track_distance(point, index)
            })
            .collect()
    }

    /// Flown distances of the waypoints and turn boundaries [radians].
    ///
    /// Each modelled turn is replaced by its `TurnStart` and `TurnFinish`.
    pub fn section_distances_and_types(&self) -> Vec<(f64, PointType)> {
        let mut sections = vec![(0.0, PointType::Waypoint)];
        let mut waypoint_distance = 0.0;
        for i in 1..self.len() {
            waypoint_distance += self.path_lengths[i];
            let half_length = self.turn_half_lengths[i];
            if half_length > 0.0 {
                sections.push((waypoint_distance - half_length, PointType::TurnStart));
                sections.push((waypoint_distance + half_length, PointType::TurnFinish));
            } else {
                sections.push((waypoint_distance, PointType::Waypoint));
            }
        }
        sections
    }

    /// Walk ascending flown `distances` along the legs, yielding `(index, ratio)`.
    fn leg_references<'a>(&'a self, distances: &'a [f64]) -> impl Iterator<Item = (usize, f64)> + 'a {
        let mut index = 0;
        let mut leg_start = 0.0;
        let mut leg_length = self.path_lengths[1];
        distances.iter().map(move |&distance| {
            if distance > leg_start + leg_length && index < self.last_leg() {
                index += 1;
                leg_start += leg_length;
                leg_length = self.path_lengths[index + 1];
            }
            (index, (distance - leg_start) / leg_length)
        })
    }

    /// Positions at ascending flown `distances` [radians].
    pub fn calculate_positions(&self, distances: &[f64]) -> Vec<Point> {
        self.leg_references(distances)
            .map(|(index, ratio)| self.calculate_position(index, ratio))
            .collect()
    }

    /// Ground tracks at ascending flown `distances` [radians].
    pub fn calculate_ground_tracks(&self, distances: &[f64]) -> Vec<f64> {
        self.leg_references(distances)
            .map(|(index, ratio)| self.calculate_ground_track(index, ratio))
            .collect()
    }

    /// The flown path as a polyline, with `number_of_points` interpolated points
    /// inside each modelled turn.
    pub fn turn_points(&self, number_of_points: usize) -> Vec<Point> {
        let mut points = vec![self.points[0]];
        for i in 1..self.len() - 1 {
            match self.turn(i) {
                Some(turn) => {
                    points.push(turn.start());
                    let delta = turn.angle() / (1.0 + number_of_points as f64);
                    points.extend((1..=number_of_points).map(|j| turn.position(j as f64 * delta)));
                    points.push(turn.finish());
                }
                None => points.push(self.points[i]),
            }
        }
        points.push(self.points[self.len() - 1]);
        points
    }

    /// The straight-leg polyline between flown distances `start_distance` and
    /// `finish_distance` [radians], ignoring turns.
    pub fn subsection_positions(&self, start_distance: f64, finish_distance: f64) -> Vec<Point> {
        let distances = self.path_distances();
        let (start_index, start_ratio) = calculate_value_reference(&distances, start_distance);
        let (finish_index, finish_ratio) = calculate_value_reference(&distances, finish_distance);

        let mut positions = vec![functions::calculate_position(&self.points, start_index, start_ratio)];
        positions.extend_from_slice(&self.points[(start_index + 1).min(finish_index + 1)..=finish_index]);
        if finish_ratio > 0.0 {
            positions.push(functions::calculate_position(&self.points, finish_index, finish_ratio));
        }
        positions
    }
}
