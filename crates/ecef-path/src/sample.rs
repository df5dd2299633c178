//! Noisy trajectories along a route (bounded jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic source of raw trajectory points for tests
//!   and benchmarks of the derivation pipeline.
//!
//! Model
//! - Each leg between consecutive waypoints is sampled at (about) `spacing`,
//!   starting at its first waypoint; the last waypoint closes the route.
//! - Every sample is moved along and across its leg by uniform noise bounded by
//!   `along_track_noise` and `cross_track_noise`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use crate::arc::Arc;
use crate::constants::{MIN_LENGTH, NM};
use crate::point::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sampler configuration, distances in radians.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Target distance between consecutive samples.
    pub spacing: f64,
    /// Samples move up to this far off their leg, either side.
    pub cross_track_noise: f64,
    /// Samples move up to this far along their leg, either way.
    pub along_track_noise: f64,
}
impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            spacing: NM,
            cross_track_noise: 0.05 * NM,
            along_track_noise: 0.05 * NM,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    /// Generator for this draw; neighbouring indices give unrelated streams.
    fn rng(self) -> StdRng {
        let stream = splitmix64(self.index.wrapping_add(GOLDEN_GAMMA));
        StdRng::seed_from_u64(splitmix64(self.seed ^ stream))
    }
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

fn splitmix64(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Uniform draw in `[-bound, bound]`, exactly 0 for a non-positive bound.
fn jitter<R: Rng>(rng: &mut R, bound: f64) -> f64 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

/// Draw noisy points along the legs joining `waypoints`.
///
/// Legs shorter than `MIN_LENGTH` are skipped. Fewer than two waypoints give
/// the waypoints unchanged.
pub fn sample_route(waypoints: &[Point], cfg: SampleCfg, tok: ReplayToken) -> Vec<Point> {
    if waypoints.len() < 2 {
        return waypoints.to_vec();
    }
    let mut rng = tok.rng();
    let spacing = cfg.spacing.max(MIN_LENGTH);

    let mut noisy = |arc: &Arc, distance: f64| {
        let along = distance + jitter(&mut rng, cfg.along_track_noise);
        let across = jitter(&mut rng, cfg.cross_track_noise);
        arc.perp_position(&arc.position(along), across)
    };

    let mut points = Vec::new();
    let mut last_arc = None;
    for pair in waypoints.windows(2) {
        let arc = Arc::new(pair[0], pair[1]);
        if arc.length() < MIN_LENGTH {
            continue;
        }
        let count = (arc.length() / spacing).ceil().max(1.0) as usize;
        let step = arc.length() / count as f64;
        points.extend((0..count).map(|i| noisy(&arc, i as f64 * step)));
        last_arc = Some(arc);
    }
    match last_arc {
        Some(arc) => points.push(noisy(&arc, arc.length())),
        None => points.push(waypoints[0]),
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::rad2nm;

    fn route() -> Vec<Point> {
        vec![
            Point::from_lat_long(0.0, 0.0),
            Point::from_lat_long(0.0, 1.0),
            Point::from_lat_long(1.0, 1.0),
        ]
    }

    #[test]
    fn replay_tokens_are_deterministic() {
        let cfg = SampleCfg::default();
        let tok = ReplayToken { seed: 42, index: 3 };
        let a = sample_route(&route(), cfg, tok);
        let b = sample_route(&route(), cfg, tok);
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(&b).all(|(p, q)| p.coords == q.coords));

        let c = sample_route(&route(), cfg, ReplayToken { seed: 42, index: 4 });
        assert!(a.iter().zip(&c).any(|(p, q)| p.coords != q.coords));
    }

    #[test]
    fn samples_stay_near_the_route() {
        let cfg = SampleCfg {
            spacing: NM,
            cross_track_noise: 0.1 * NM,
            along_track_noise: 0.0,
        };
        let points = sample_route(&route(), cfg, ReplayToken { seed: 1, index: 0 });
        // two 60 NM legs at 1 NM plus the final waypoint
        assert!((121..=123).contains(&points.len()), "{}", points.len());
        for p in &points {
            assert!((p.length() - 1.0).abs() < 1e-12);
            let lat_long = p.to_lat_long();
            let off_route = lat_long.0.abs().min((lat_long.1 - 1.0).abs());
            assert!(off_route * 60.0 <= 0.1 + 1e-3, "{lat_long:?}");
        }
    }

    #[test]
    fn noiseless_samples_hit_the_waypoints() {
        let cfg = SampleCfg {
            spacing: 10.0 * NM,
            cross_track_noise: 0.0,
            along_track_noise: 0.0,
        };
        let waypoints = route();
        let points = sample_route(&waypoints, cfg, ReplayToken { seed: 0, index: 0 });
        assert_eq!(points[0], waypoints[0]);
        assert!(rad2nm(points.last().unwrap().great_circle_distance(&waypoints[2])) < 1e-9);
        assert!(points
            .iter()
            .any(|p| rad2nm(p.great_circle_distance(&waypoints[1])) < 1e-9));
    }

    #[test]
    fn degenerate_routes() {
        let cfg = SampleCfg::default();
        let tok = ReplayToken { seed: 0, index: 0 };
        assert!(sample_route(&[], cfg, tok).is_empty());
        let p = Point::from_lat_long(10.0, 20.0);
        assert_eq!(sample_route(&[p], cfg, tok), vec![p]);
        assert_eq!(sample_route(&[p, p], cfg, tok), vec![p]);
    }
}
