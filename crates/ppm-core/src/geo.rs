//! Geographic coordinate types and segment geometry.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Corridor containment is decided
//! against road widths of a few metres; `f32` resolution at mid latitudes
//! (~0.5 m) would eat most of that margin, and the edge table is small enough
//! that memory is not a concern, so double precision is kept throughout.

use std::fmt;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree used for metre→degree padding, held a touch under the
/// value implied by the distance metric (≈111,195 m on the 6,371 km sphere).
/// Dividing by the smaller constant yields slightly more degrees per metre,
/// so padded boxes strictly contain the distances they were padded for.
const M_PER_DEG_PAD: f64 = 111_000.0;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and within WGS-84 bounds
    /// (lat ∈ [-90, 90], lon ∈ [-180, 180]).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Perpendicular distance in metres from `self` to the segment `a`–`b`,
    /// clamped to the nearer endpoint when the projection falls outside it.
    ///
    /// Uses an equirectangular projection centred on `self`.  For segments of
    /// road length (well under a few kilometres) the planar error is
    /// centimetre-scale, which is adequate for corridor-width tests.
    pub fn distance_to_segment_m(self, a: GeoPoint, b: GeoPoint) -> f64 {
        let cos_lat = self.lat.to_radians().cos();
        let plane = |p: GeoPoint| -> (f64, f64) {
            (
                (p.lon - self.lon).to_radians() * cos_lat * EARTH_RADIUS_M,
                (p.lat - self.lat).to_radians() * EARTH_RADIUS_M,
            )
        };

        // The query point is the projection origin.
        let (ax, ay) = plane(a);
        let (bx, by) = plane(b);
        let (dx, dy) = (bx - ax, by - ay);

        let len2 = dx * dx + dy * dy;
        let t = if len2 == 0.0 {
            0.0 // degenerate segment: distance to the single point
        } else {
            ((-ax * dx - ay * dy) / len2).clamp(0.0, 1.0)
        };

        let (cx, cy) = (ax + t * dx, ay + t * dy);
        (cx * cx + cy * cy).sqrt()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Degree/metre conversion ───────────────────────────────────────────────────

/// Metres → degrees of latitude, rounded up (see [`M_PER_DEG_PAD`]).
#[inline]
pub fn lat_degrees_for_m(m: f64) -> f64 {
    m / M_PER_DEG_PAD
}

/// Metres → degrees of longitude at latitude `lat`, rounded up.
///
/// The scale shrinks with `cos(lat)`; callers padding a box spanning several
/// latitudes should pass the latitude of largest magnitude so the result
/// over-covers rather than under-covers.
#[inline]
pub fn lon_degrees_for_m(m: f64, lat: f64) -> f64 {
    let cos = lat.to_radians().cos().max(1.0e-6); // keep finite at the poles
    m / (M_PER_DEG_PAD * cos)
}

// ── BBox ──────────────────────────────────────────────────────────────────────

/// An axis-aligned latitude/longitude box with inclusive boundaries.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl BBox {
    /// Build from two opposite corners given in either order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            sw: GeoPoint::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            ne: GeoPoint::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// `true` when `p` lies inside the box.  Boundaries count as inside.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.sw.lat && p.lat <= self.ne.lat
            && p.lon >= self.sw.lon && p.lon <= self.ne.lon
    }

    /// `true` when the two boxes overlap.  Shared boundaries count.
    #[inline]
    pub fn intersects(&self, other: &BBox) -> bool {
        self.sw.lat <= other.ne.lat && self.ne.lat >= other.sw.lat
            && self.sw.lon <= other.ne.lon && self.ne.lon >= other.sw.lon
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.sw.lat + self.ne.lat) * 0.5,
            (self.sw.lon + self.ne.lon) * 0.5,
        )
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.ne.lat - self.sw.lat
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.ne.lon - self.sw.lon
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            sw: GeoPoint::new(self.sw.lat.min(other.sw.lat), self.sw.lon.min(other.sw.lon)),
            ne: GeoPoint::new(self.ne.lat.max(other.ne.lat), self.ne.lon.max(other.ne.lon)),
        }
    }

    /// Expand by the given margins in degrees on every side.
    pub fn padded(&self, d_lat: f64, d_lon: f64) -> BBox {
        BBox {
            sw: GeoPoint::new(self.sw.lat - d_lat, self.sw.lon - d_lon),
            ne: GeoPoint::new(self.ne.lat + d_lat, self.ne.lon + d_lon),
        }
    }

    /// The four equal quadrants, in (NW, NE, SW, SE) order by (lat, lon).
    pub fn quadrants(&self) -> [BBox; 4] {
        let c = self.center();
        [
            // NW: upper-left
            BBox {
                sw: GeoPoint::new(c.lat, self.sw.lon),
                ne: GeoPoint::new(self.ne.lat, c.lon),
            },
            // NE: upper-right
            BBox { sw: c, ne: self.ne },
            // SW: lower-left
            BBox { sw: self.sw, ne: c },
            // SE: lower-right
            BBox {
                sw: GeoPoint::new(self.sw.lat, c.lon),
                ne: GeoPoint::new(c.lat, self.ne.lon),
            },
        ]
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.sw, self.ne)
    }
}
