//! Dyadic covariate change statistics.
//!
//! These read fixed per-node coordinates and contribute the same value
//! whichever graph state the dyad is in, so the delta for adding a tie is
//! simply the covariate itself. Missing coordinates contribute zero.

use crate::graph::{AttributeStore, NodeId};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance in kilometres between the two
/// endpoints' latitude/longitude coordinates.
pub(super) fn geo_distance(
    attrs: &AttributeStore,
    lat: usize,
    lon: usize,
    i: NodeId,
    j: NodeId,
) -> f64 {
    haversine(attrs, lat, lon, i, j).unwrap_or(0.0)
}

/// Natural logarithm of the great-circle distance; zero for coincident or
/// missing coordinates.
pub(super) fn log_geo_distance(
    attrs: &AttributeStore,
    lat: usize,
    lon: usize,
    i: NodeId,
    j: NodeId,
) -> f64 {
    match haversine(attrs, lat, lon, i, j) {
        Some(distance) if distance > 0.0 => distance.ln(),
        _ => 0.0,
    }
}

/// Euclidean distance over three coordinate attributes; zero when any
/// coordinate is missing.
pub(super) fn euclidean_distance(
    attrs: &AttributeStore,
    x: usize,
    y: usize,
    z: usize,
    i: NodeId,
    j: NodeId,
) -> f64 {
    let mut total = 0.0;
    for axis in [x, y, z] {
        let a = attrs.continuous(axis, i);
        let b = attrs.continuous(axis, j);
        if a.is_nan() || b.is_nan() {
            return 0.0;
        }
        total += (a - b) * (a - b);
    }
    total.sqrt()
}

fn haversine(
    attrs: &AttributeStore,
    lat: usize,
    lon: usize,
    i: NodeId,
    j: NodeId,
) -> Option<f64> {
    let lat_i = attrs.continuous(lat, i);
    let lon_i = attrs.continuous(lon, i);
    let lat_j = attrs.continuous(lat, j);
    let lon_j = attrs.continuous(lon, j);
    if lat_i.is_nan() || lon_i.is_nan() || lat_j.is_nan() || lon_j.is_nan() {
        return None;
    }
    let (phi_i, phi_j) = (lat_i.to_radians(), lat_j.to_radians());
    let d_phi = (lat_j - lat_i).to_radians();
    let d_lambda = (lon_j - lon_i).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi_i.cos() * phi_j.cos() * (d_lambda / 2.0).sin().powi(2);
    Some(2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin())
}
