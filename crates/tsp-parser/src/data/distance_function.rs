//! TSPLIB95 edge-weight formulas, mapping a pair of coordinates to a [`Distance`].
//!
//! Every formula returns a rounded-to-nearest-integer distance except `CEIL_2D`, which rounds up,
//! matching the TSPLIB95 convention that edge weights are non-negative integers.

use std::f64::consts::PI;

use tsp_core::{instance::distance::Distance, tsp_lib_spec::EdgeWeightType};

/// A node's raw coordinate data, as read from a `NODE_COORD_SECTION`. The third component is
/// unused (and zero) for 2D instances.
pub type Coord = (f64, f64, f64);

pub type DistanceFn = fn(Coord, Coord) -> Distance;

/// Returns the distance function associated with an [`EdgeWeightType`].
///
/// Panics for weight types that are not coordinate-based (`EXPLICIT`, `SPECIAL`); callers are
/// expected to have already dispatched those to a different data section.
pub fn get_distance_function(edge_weight_type: EdgeWeightType) -> DistanceFn {
    match edge_weight_type {
        EdgeWeightType::EUC_2D | EdgeWeightType::EUC_3D => euclidean,
        EdgeWeightType::MAN_2D | EdgeWeightType::MAN_3D => manhattan,
        EdgeWeightType::MAX_2D | EdgeWeightType::MAX_3D => maximum,
        EdgeWeightType::CEIL_2D => euclidean_ceil,
        EdgeWeightType::GEO => geographical,
        EdgeWeightType::ATT => pseudo_euclidean,
        _ => panic!("{edge_weight_type:?} is not a coordinate-based edge weight type"),
    }
}

fn euclidean(a: Coord, b: Coord) -> Distance {
    Distance(euclidean_raw(a, b).round() as i32)
}

fn euclidean_ceil(a: Coord, b: Coord) -> Distance {
    Distance(euclidean_raw(a, b).ceil() as i32)
}

fn euclidean_raw(a: Coord, b: Coord) -> f64 {
    let (dx, dy, dz) = (a.0 - b.0, a.1 - b.1, a.2 - b.2);
    (dx * dx + dy * dy + dz * dz).sqrt()
}

fn manhattan(a: Coord, b: Coord) -> Distance {
    let (dx, dy, dz) = ((a.0 - b.0).abs(), (a.1 - b.1).abs(), (a.2 - b.2).abs());
    Distance((dx + dy + dz).round() as i32)
}

fn maximum(a: Coord, b: Coord) -> Distance {
    let (dx, dy, dz) = ((a.0 - b.0).abs(), (a.1 - b.1).abs(), (a.2 - b.2).abs());
    Distance(dx.round().max(dy.round()).max(dz.round()) as i32)
}

/// The pseudo-Euclidean distance used by the `att532`-style ATT instances.
fn pseudo_euclidean(a: Coord, b: Coord) -> Distance {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    let r = ((dx * dx + dy * dy) / 10.0).sqrt();
    let t = r.round();
    Distance(if t < r { t as i32 + 1 } else { t as i32 })
}

/// Geographical distance. Coordinates are given in TSPLIB's `DDD.MM` degrees-and-minutes encoding
/// and must be converted to radians before computing the great-circle distance.
fn geographical(a: Coord, b: Coord) -> Distance {
    const RRR: f64 = 6378.388;

    let lat_a = to_radians(a.0);
    let lon_a = to_radians(a.1);
    let lat_b = to_radians(b.0);
    let lon_b = to_radians(b.1);

    let q1 = (lon_a - lon_b).cos();
    let q2 = (lat_a - lat_b).cos();
    let q3 = (lat_a + lat_b).cos();

    let distance = RRR * (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).acos() + 1.0;
    Distance(distance as i32)
}

fn to_radians(coord: f64) -> f64 {
    let deg = coord.trunc();
    let min = coord - deg;
    PI * (deg + 5.0 * min / 3.0) / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_matches_pythagorean_triangle() {
        let a = (0.0, 0.0, 0.0);
        let b = (3.0, 4.0, 0.0);
        assert_eq!(euclidean(a, b), Distance(5));
    }

    #[test]
    fn ceil_rounds_up() {
        let a = (0.0, 0.0, 0.0);
        let b = (1.0, 1.0, 0.0);
        // sqrt(2) = 1.41421356...
        assert_eq!(euclidean_ceil(a, b), Distance(2));
    }

    #[test]
    fn manhattan_sums_axis_deltas() {
        let a = (0.0, 0.0, 0.0);
        let b = (3.0, 4.0, 0.0);
        assert_eq!(manhattan(a, b), Distance(7));
    }

    #[test]
    fn maximum_picks_largest_axis_delta() {
        let a = (0.0, 0.0, 0.0);
        let b = (3.0, 4.0, 0.0);
        assert_eq!(maximum(a, b), Distance(4));
    }
}
