//! Road-edge records and their geofence corridors.

use std::fmt;

use ppm_core::{geo, BBox, GeoPoint, WayType};

// ── EdgeId ────────────────────────────────────────────────────────────────────

/// Index of an edge in the quadtree's edge table.
///
/// Leaves store `EdgeId`s rather than edge records, so an edge duplicated
/// across sibling leaves costs four bytes per copy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

// ── RoadEdge ──────────────────────────────────────────────────────────────────

/// A single road segment with classification and carriageway width.
///
/// The geofence corridor of an edge is the set of points within
/// `width_m / 2 + extension_m` of the segment `a`–`b`, where `extension_m`
/// is the deployment-wide pad from the privacy configuration.  Endpoints
/// must differ; the map loader rejects degenerate rows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadEdge {
    pub a: GeoPoint,
    pub b: GeoPoint,
    pub way_type: WayType,
    /// Full carriageway width in metres.
    pub width_m: f64,
}

impl RoadEdge {
    pub fn new(a: GeoPoint, b: GeoPoint, way_type: WayType, width_m: f64) -> Self {
        Self { a, b, way_type, width_m }
    }

    /// Edge with the way type's default width (map row omitted the column).
    pub fn with_default_width(a: GeoPoint, b: GeoPoint, way_type: WayType) -> Self {
        Self::new(a, b, way_type, way_type.default_width_m())
    }

    /// Half the corridor width: half the carriageway plus the uniform pad.
    #[inline]
    pub fn corridor_half_width_m(&self, extension_m: f64) -> f64 {
        self.width_m * 0.5 + extension_m
    }

    /// Axis-aligned box strictly containing the corridor.
    ///
    /// Longitude padding converts metres at the endpoint latitude of largest
    /// magnitude, where a degree is shortest, so the box over-covers rather
    /// than under-covers.
    pub fn corridor_bbox(&self, extension_m: f64) -> BBox {
        let pad = self.corridor_half_width_m(extension_m);
        let widest_lat = self.a.lat.abs().max(self.b.lat.abs());
        BBox::from_corners(self.a, self.b).padded(
            geo::lat_degrees_for_m(pad),
            geo::lon_degrees_for_m(pad, widest_lat),
        )
    }

    /// Perpendicular distance from `p` to this segment in metres.
    #[inline]
    pub fn distance_to_point_m(&self, p: GeoPoint) -> f64 {
        p.distance_to_segment_m(self.a, self.b)
    }

    /// `true` when `p` lies inside the corridor.  The boundary is inside
    /// (`<=`, not `<`).
    #[inline]
    pub fn corridor_contains(&self, p: GeoPoint, extension_m: f64) -> bool {
        self.distance_to_point_m(p) <= self.corridor_half_width_m(extension_m)
    }
}

impl fmt::Display for RoadEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}–{} ({}m)",
            self.way_type, self.a, self.b, self.width_m
        )
    }
}
