//! Exchange record of a derived path.
//!
//! Latitudes and longitudes in degrees, turn initiation distances in NM.
//! Reading and writing the record is left to callers (any serde format).

use crate::constants::nm2rad;
use crate::functions::calculate_points;
use crate::path::{EcefPath, PathError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPath {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub tids: Vec<f64>,
}

impl HorizontalPath {
    pub fn new(lats: Vec<f64>, lons: Vec<f64>, tids: Vec<f64>) -> Self {
        Self { lats, lons, tids }
    }

    pub fn from_path(path: &EcefPath) -> Self {
        let (lats, lons) = path.point_lat_longs();
        Self {
            lats,
            lons,
            tids: path.turn_initiation_distances_nm(),
        }
    }

    /// Rebuild the path; fails as `EcefPath::new` does.
    pub fn to_path(&self) -> Result<EcefPath, PathError> {
        if self.lats.len() != self.lons.len() {
            return Err(PathError::LengthMismatch {
                points: self.lats.len().min(self.lons.len()),
                distances: self.tids.len(),
            });
        }
        let points = calculate_points(&self.lats, &self.lons);
        let tids = self.tids.iter().map(|&nm| nm2rad(nm)).collect();
        EcefPath::new(points, tids)
    }
}

impl From<&EcefPath> for HorizontalPath {
    fn from(path: &EcefPath) -> Self {
        Self::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{route_points, route_turn_distances, ROUTE_LATS, ROUTE_LONS};

    #[test]
    fn from_path_converts_units() {
        let path = EcefPath::new(route_points(), route_turn_distances()).unwrap();
        let record = HorizontalPath::from(&path);
        assert_eq!(record.lats.len(), 12);
        for (lat, expected) in record.lats.iter().zip(ROUTE_LATS) {
            assert!((lat - expected).abs() < 1e-12);
        }
        for (lon, expected) in record.lons.iter().zip(ROUTE_LONS) {
            assert!((lon - expected).abs() < 1e-12);
        }
        assert!((record.tids[2] - 10.0).abs() < 1e-9);
        assert!((record.tids[3] - 20.0).abs() < 1e-9);
        assert_eq!(record.tids[11], 0.0);
    }

    #[test]
    fn json_round_trip_rebuilds_the_path() {
        let path = EcefPath::new(route_points(), route_turn_distances()).unwrap();
        let json = serde_json::to_string(&HorizontalPath::from_path(&path)).unwrap();
        assert!(json.starts_with("{\"lats\":["));

        let record: HorizontalPath = serde_json::from_str(&json).unwrap();
        let rebuilt = record.to_path().unwrap();
        assert_eq!(rebuilt.len(), path.len());
        for (a, b) in rebuilt.path_distances().iter().zip(path.path_distances()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn to_path_reports_bad_records() {
        let record = HorizontalPath::new(vec![0.0, 1.0], vec![0.0], vec![0.0, 0.0]);
        assert!(matches!(record.to_path(), Err(PathError::LengthMismatch { .. })));

        let record = HorizontalPath::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![0.0]);
        assert_eq!(
            record.to_path().unwrap_err(),
            PathError::LengthMismatch {
                points: 2,
                distances: 1
            }
        );

        let record = HorizontalPath::new(vec![0.0, 0.0], vec![5.0, 5.0], vec![0.0, 0.0]);
        assert!(matches!(record.to_path(), Err(PathError::ShortLeg { index: 1, .. })));
        assert_eq!(HorizontalPath::default().to_path().unwrap_err(), PathError::TooFewPoints(0));
    }
}
