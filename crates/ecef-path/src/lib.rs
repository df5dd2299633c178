//! Spherical geometry for aircraft trajectories in ECEF coordinates.
//!
//! Points are unit vectors, legs are great-circle arcs and turns are small
//! circles tangent to their legs. `derive` simplifies raw trajectory points
//! into an `EcefPath`, which answers along-track, cross-track, position and
//! ground track queries.
//!
//! Units
//! - Distances and angles are radians; degrees only at the lat/long boundary.
//! - `rad2nm`/`nm2rad` convert distances for presentation.

pub mod arc;
pub mod constants;
pub mod derive;
pub mod functions;
pub mod horizontal_path;
pub mod path;
pub mod point;
pub mod sample;
pub mod turn_arc;

#[cfg(test)]
mod test_data;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use arc::Arc;
pub use constants::{nm2rad, rad2nm};
pub use derive::{derive_horizontal_path, derive_horizontal_path_with, DeriveCfg};
pub use path::{EcefPath, PathError, PointType};
pub use point::Point;
pub use turn_arc::TurnArc;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::arc::Arc;
    pub use crate::constants::{nm2rad, rad2nm, MINIMUM_ARC_LENGTH, NM, TWENTY_NM, TWO_NM};
    pub use crate::derive::{derive_horizontal_path, derive_horizontal_path_with, DeriveCfg};
    pub use crate::functions::{calculate_latitudes, calculate_longitudes, calculate_points};
    pub use crate::horizontal_path::HorizontalPath;
    pub use crate::path::{EcefPath, PathError, PointType};
    pub use crate::point::{distance_nm, distance_radians, Point};
    pub use crate::sample::{sample_route, ReplayToken, SampleCfg};
    pub use crate::turn_arc::TurnArc;
}
