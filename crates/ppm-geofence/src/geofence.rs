//! The geofence: corridor containment over quadtree candidates.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use ppm_core::{GeoPoint, PrivacyConfig, WayType};

use crate::Quadtree;

/// Decides whether a point lies inside any admissible road corridor.
///
/// Holds a shared reference to the process-wide quadtree.  Cloning a
/// `Geofence` is cheap and every clone queries the same read-only tree, so
/// the natural deployment is one clone per worker thread with no locking.
/// The corridor pad comes from the tree itself ([`Quadtree::pad_m`]), so the
/// containment test and the tree's corridor boxes can never disagree.
#[derive(Clone)]
pub struct Geofence {
    quad: Arc<Quadtree>,
    admissible: FxHashSet<WayType>,
}

impl Geofence {
    /// Build from a finished tree and the admissible way-type set.
    pub fn new(quad: Arc<Quadtree>, admissible: FxHashSet<WayType>) -> Self {
        Self { quad, admissible }
    }

    /// Build with the admissible set taken from the typed configuration.
    pub fn from_config(quad: Arc<Quadtree>, config: &PrivacyConfig) -> Self {
        Self::new(quad, config.admissible_way_types.clone())
    }

    /// `true` when `p` lies within the corridor of any admissible edge.
    ///
    /// Points exactly on a corridor boundary are inside (`<=`, not `<`).
    pub fn contains(&self, p: GeoPoint) -> bool {
        let pad = self.quad.pad_m();
        self.quad
            .query(p)
            .any(|e| self.admissible.contains(&e.way_type) && e.corridor_contains(p, pad))
    }

    pub fn quad(&self) -> &Quadtree {
        &self.quad
    }
}
