//! Fixtures shared by the unit tests.

use crate::constants::NM;
use crate::point::Point;

/// Icosahedron with vertices at the North and South poles.
pub(crate) const ICOSAHEDRON: [[f64; 3]; 12] = [
    [0.0, 0.0, 1.0],
    [-0.8944271907493363, 0.0, 0.4472135960011169],
    [-0.276393202421474, -0.8506508080328565, 0.4472135960011169],
    [0.7236067972396153, -0.5257311123952776, 0.4472135960011169],
    [0.7236067972396153, 0.5257311123952776, 0.4472135960011169],
    [-0.276393202421474, 0.8506508080328565, 0.4472135960011169],
    [-0.7236067972396153, 0.5257311123952776, -0.4472135960011169],
    [-0.7236067972396153, -0.5257311123952776, -0.4472135960011169],
    [0.276393202421474, -0.8506508080328565, -0.4472135960011169],
    [0.8944271907493363, 0.0, -0.4472135960011169],
    [0.276393202421474, 0.8506508080328565, -0.4472135960011169],
    [0.0, 0.0, -1.0],
];

pub(crate) fn icosahedron() -> Vec<Point> {
    ICOSAHEDRON
        .iter()
        .map(|c| Point::new(c[0], c[1], c[2]))
        .collect()
}

/// Zig-zag route with right and left turns of 45° to 135°.
pub(crate) const ROUTE_LATS: [f64; 12] = [1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 2.0, 3.0];
pub(crate) const ROUTE_LONS: [f64; 12] = [-3.0, -2.0, -1.0, -1.0, 1.0, 0.0, 3.0, 2.0, 5.0, 4.0, 4.0, 4.0];

pub(crate) fn route_points() -> Vec<Point> {
    ROUTE_LATS
        .iter()
        .zip(ROUTE_LONS.iter())
        .map(|(&lat, &lon)| Point::from_lat_long(lat, lon))
        .collect()
}

pub(crate) fn route_turn_distances() -> Vec<f64> {
    let mut tids = vec![20.0 * NM; 12];
    tids[0] = 0.0;
    tids[1] = 0.0;
    tids[2] = 10.0 * NM;
    tids[10] = 0.0;
    tids[11] = 0.0;
    tids
}

pub(crate) const EXPECTED_LEG_LENGTHS: [f64; 12] = [
    0.0, 59.99086148, 59.99086148, 120.0, 119.98172156, 134.16271632, 179.97257886, 84.85065966,
    180.0, 84.85065966, 60.0, 60.0,
];

pub(crate) const EXPECTED_TURN_ANGLES: [f64; 12] = [
    0.0, 0.0, 89.99127358, -89.98254582, -116.54934239, 116.54061198, 134.97817895, -134.99563646,
    -134.99563646, 45.00436354, 0.0, 0.0,
];

pub(crate) const EXPECTED_PATH_LENGTHS: [f64; 12] = [
    0.0, 59.99086148, 57.84527776, 113.56411819, 108.267138, 119.31534542, 162.31284918, 64.37442822,
    159.52082563, 73.57205787, 58.9609854, 60.0,
];

pub(crate) const EXPECTED_PATH_DISTANCES: [f64; 12] = [
    0.0, 59.99086148, 117.83613924, 231.40025743, 339.66739543, 458.98274085, 621.29559004,
    685.67001826, 845.19084389, 918.76290176, 977.72388715, 1037.723887,
];
