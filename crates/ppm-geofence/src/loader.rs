//! CSV road-map loader.
//!
//! # CSV format
//!
//! One row per undirected road segment:
//!
//! ```csv
//! a_lat,a_lon,b_lat,b_lon,way_type,width_m
//! 35.0000,-84.0000,35.0010,-84.0000,residential,10.0
//! 35.0010,-84.0000,35.0020,-84.0010,service,
//! ```
//!
//! `width_m` may be empty — the way type's default width is used.  Rows with
//! unknown way types, non-finite or out-of-range coordinates, identical
//! endpoints, or non-positive widths are errors: a bad map file should fail
//! at startup, not degrade the geofence silently.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ppm_core::{geo, BBox, GeoPoint, WayType};

use crate::{GeofenceError, Quadtree, RoadEdge};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    a_lat:    f64,
    a_lon:    f64,
    b_lat:    f64,
    b_lon:    f64,
    way_type: String,
    width_m:  Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load road edges from a CSV map file.
pub fn load_edges_csv(path: &Path) -> Result<Vec<RoadEdge>, GeofenceError> {
    let file = std::fs::File::open(path).map_err(GeofenceError::Io)?;
    load_edges_reader(file)
}

/// Like [`load_edges_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_edges_reader<R: Read>(reader: R) -> Result<Vec<RoadEdge>, GeofenceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut edges = Vec::new();
    for (row, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let record = result.map_err(|e| GeofenceError::Parse(e.to_string()))?;
        edges.push(edge_from_record(row, record)?);
    }
    Ok(edges)
}

/// Bounding envelope of an edge set (endpoints only), or `None` when empty.
pub fn envelope_of(edges: &[RoadEdge]) -> Option<BBox> {
    let mut it = edges.iter();
    let first = it.next()?;
    let mut bbox = BBox::from_corners(first.a, first.b);
    for e in it {
        bbox = bbox.union(&BBox::from_corners(e.a, e.b));
    }
    Some(bbox)
}

/// Build the process-wide quadtree from a loaded edge set.
///
/// The envelope is the map's endpoint bounding box padded by the largest
/// corridor half-width, so corridors of boundary edges stay fully queryable.
/// `extension_m` is the uniform corridor pad
/// (`privacy.filter.geofence.extension`).
pub fn build_quadtree(edges: Vec<RoadEdge>, extension_m: f64) -> Result<Quadtree, GeofenceError> {
    let bbox = envelope_of(&edges).ok_or(GeofenceError::EmptyMap)?;

    let max_half = edges
        .iter()
        .map(|e| e.corridor_half_width_m(extension_m))
        .fold(0.0, f64::max);
    let widest_lat = bbox.sw.lat.abs().max(bbox.ne.lat.abs());
    let envelope = bbox.padded(
        geo::lat_degrees_for_m(max_half),
        geo::lon_degrees_for_m(max_half, widest_lat),
    );

    let mut quad = Quadtree::new(envelope, extension_m);
    for e in edges {
        quad.insert(e);
    }
    Ok(quad)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn edge_from_record(row: usize, r: EdgeRecord) -> Result<RoadEdge, GeofenceError> {
    let way_type = WayType::parse(r.way_type.trim()).ok_or_else(|| {
        GeofenceError::Parse(format!("row {row}: unknown way type {:?}", r.way_type))
    })?;

    let a = GeoPoint::new(r.a_lat, r.a_lon);
    let b = GeoPoint::new(r.b_lat, r.b_lon);
    if !a.is_valid() || !b.is_valid() {
        return Err(GeofenceError::Parse(format!(
            "row {row}: coordinates out of range ({a}, {b})"
        )));
    }
    if a == b {
        return Err(GeofenceError::Parse(format!(
            "row {row}: degenerate edge, endpoints are identical"
        )));
    }

    let width_m = match r.width_m {
        Some(w) if w > 0.0 && w.is_finite() => w,
        Some(w) => {
            return Err(GeofenceError::Parse(format!(
                "row {row}: width must be positive, got {w}"
            )));
        }
        None => way_type.default_width_m(),
    };

    Ok(RoadEdge::new(a, b, way_type, width_m))
}
