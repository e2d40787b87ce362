//! Quadtree spatial index over road-edge corridors.
//!
//! # Structure
//!
//! The tree owns every `RoadEdge` in a flat table; leaves hold `EdgeId`s.
//! An edge is inserted into **every** leaf whose bounding box intersects the
//! edge's corridor box.  Point queries therefore resolve with a single
//! root-to-leaf descent: the one leaf containing the point already holds
//! every candidate edge.  Do not "deduplicate" an edge into a single child —
//! query completeness depends on the fan-out.
//!
//! # Split policy
//!
//! A leaf splits at `MAX_LEAF` edges into four quadrant children
//! (NW, NE, SW, SE), redistributing its held edges into each intersecting
//! child.  Splitting stops at `MAX_DEPTH` or once a node's span falls below
//! `MIN_SPAN_DEG`; past either limit leaves simply grow.  Both knobs are
//! construction-time tuning ([`Quadtree::with_limits`]) and never change
//! query results.

use ppm_core::{BBox, GeoPoint};

use crate::{EdgeId, RoadEdge};

/// Default maximum edges per leaf before a split.
const MAX_LEAF: usize = 32;

/// Default maximum tree depth (root is depth 0).
const MAX_DEPTH: usize = 20;

/// Nodes narrower than this on either axis (degrees) never split.
const MIN_SPAN_DEG: f64 = 1.0e-5;

// ── Nodes ─────────────────────────────────────────────────────────────────────

struct QuadNode {
    bbox: BBox,
    kind: NodeKind,
}

enum NodeKind {
    /// Ids of edges whose corridor boxes intersect this node's bbox.
    Leaf(Vec<EdgeId>),
    /// Quadrant children in (NW, NE, SW, SE) order.
    Inner(Box<[QuadNode; 4]>),
}

impl QuadNode {
    fn leaf(bbox: BBox) -> Self {
        QuadNode { bbox, kind: NodeKind::Leaf(Vec::new()) }
    }
}

// ── Quadtree ──────────────────────────────────────────────────────────────────

/// Spatial index mapping a point to the road edges whose corridor may
/// contain it.
///
/// Built once at startup from the map file, then shared read-only by every
/// handler; no synchronization is needed after construction.
pub struct Quadtree {
    root: QuadNode,
    /// All inserted edges, indexed by `EdgeId`.
    edges: Vec<RoadEdge>,
    /// Uniform corridor pad applied to every edge (`box_extension_m`).
    pad_m: f64,
    max_leaf: usize,
    max_depth: usize,
}

impl Quadtree {
    /// Create an empty tree covering `envelope`.
    ///
    /// `pad_m` is the deployment-wide corridor extension; it is baked into
    /// every corridor box the tree computes, so tree and geofence always
    /// agree on corridor extents.
    pub fn new(envelope: BBox, pad_m: f64) -> Self {
        Self::with_limits(envelope, pad_m, MAX_LEAF, MAX_DEPTH)
    }

    /// Like [`Quadtree::new`] with explicit split knobs (tests and tuning).
    pub fn with_limits(envelope: BBox, pad_m: f64, max_leaf: usize, max_depth: usize) -> Self {
        Self {
            root: QuadNode::leaf(envelope),
            edges: Vec::new(),
            pad_m,
            max_leaf: max_leaf.max(1),
            max_depth,
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn envelope(&self) -> BBox {
        self.root.bbox
    }

    pub fn pad_m(&self) -> f64 {
        self.pad_m
    }

    /// Number of inserted edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge lookup by id.
    pub fn edge(&self, id: EdgeId) -> &RoadEdge {
        &self.edges[id.index()]
    }

    /// Total node count (diagnostics and tests).
    pub fn node_count(&self) -> usize {
        count_nodes(&self.root)
    }

    /// Leaf count; `node_count() - leaf_count()` is the inner-node count.
    pub fn leaf_count(&self) -> usize {
        count_leaves(&self.root)
    }

    // ── Mutation (load time only) ─────────────────────────────────────────

    /// Insert `edge`, returning its id.
    ///
    /// An edge whose corridor box misses the envelope entirely is still
    /// recorded in the edge table but reaches no leaf, so it can never
    /// satisfy a query.
    pub fn insert(&mut self, edge: RoadEdge) -> EdgeId {
        let bbox = edge.corridor_bbox(self.pad_m);
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        insert_into(
            &mut self.root,
            0,
            id,
            &bbox,
            &self.edges,
            self.pad_m,
            self.max_leaf,
            self.max_depth,
        );
        id
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Candidate edges for `p`: every edge whose corridor box may contain it.
    ///
    /// The exact corridor test is the caller's job
    /// ([`RoadEdge::corridor_contains`]).  Yields nothing when `p` falls
    /// outside the envelope.  A single query never yields the same edge
    /// twice — duplication exists only across sibling leaves.
    pub fn query(&self, p: GeoPoint) -> impl Iterator<Item = &RoadEdge> {
        self.query_ids(p).iter().map(|id| &self.edges[id.index()])
    }

    /// Ids of candidate edges for `p` (see [`Quadtree::query`]).
    pub fn query_ids(&self, p: GeoPoint) -> &[EdgeId] {
        if !self.root.bbox.contains(p) {
            return &[];
        }
        let mut node = &self.root;
        loop {
            match &node.kind {
                NodeKind::Leaf(ids) => return ids,
                NodeKind::Inner(children) => {
                    // Quadrant boundaries are closed, so a point on a shared
                    // boundary is in more than one child; any containing
                    // child is complete because boundary-crossing corridor
                    // boxes were fanned out into all of them.
                    match children.iter().find(|c| c.bbox.contains(p)) {
                        Some(child) => node = child,
                        None => return &[],
                    }
                }
            }
        }
    }
}

// ── Insert / split ────────────────────────────────────────────────────────────

/// Recursive insert.  `edges` is the tree's edge table, needed during a
/// split to recompute the corridor boxes of redistributed edges (a split
/// borrow: the table and the node tree are separate fields).
#[allow(clippy::too_many_arguments)]
fn insert_into(
    node: &mut QuadNode,
    depth: usize,
    id: EdgeId,
    bbox: &BBox,
    edges: &[RoadEdge],
    pad_m: f64,
    max_leaf: usize,
    max_depth: usize,
) {
    if !node.bbox.intersects(bbox) {
        return;
    }
    match &mut node.kind {
        NodeKind::Inner(children) => {
            for child in children.iter_mut() {
                insert_into(child, depth + 1, id, bbox, edges, pad_m, max_leaf, max_depth);
            }
        }
        NodeKind::Leaf(ids) => {
            ids.push(id);
            if ids.len() > max_leaf && depth < max_depth && can_split(&node.bbox) {
                split(node, depth, edges, pad_m, max_leaf, max_depth);
            }
        }
    }
}

fn can_split(bbox: &BBox) -> bool {
    bbox.lat_span() > MIN_SPAN_DEG && bbox.lon_span() > MIN_SPAN_DEG
}

/// Replace a full leaf with four quadrant leaves, redistributing every held
/// edge into each child whose bbox intersects the edge's corridor box.
fn split(
    node: &mut QuadNode,
    depth: usize,
    edges: &[RoadEdge],
    pad_m: f64,
    max_leaf: usize,
    max_depth: usize,
) {
    let held = match std::mem::replace(&mut node.kind, NodeKind::Leaf(Vec::new())) {
        NodeKind::Leaf(ids) => ids,
        NodeKind::Inner(children) => {
            // Only leaves split; put an inner node back untouched.
            node.kind = NodeKind::Inner(children);
            return;
        }
    };

    let mut children = Box::new(node.bbox.quadrants().map(QuadNode::leaf));
    for id in held {
        let bbox = edges[id.index()].corridor_bbox(pad_m);
        for child in children.iter_mut() {
            if !child.bbox.intersects(&bbox) {
                continue;
            }
            if let NodeKind::Leaf(ids) = &mut child.kind {
                ids.push(id);
            }
        }
    }

    // A dense cluster can overflow a fresh child immediately; keep splitting
    // until the depth or span limit applies.
    for child in children.iter_mut() {
        let len = match &child.kind {
            NodeKind::Leaf(ids) => ids.len(),
            NodeKind::Inner(_) => 0,
        };
        if len > max_leaf && depth + 1 < max_depth && can_split(&child.bbox) {
            split(child, depth + 1, edges, pad_m, max_leaf, max_depth);
        }
    }

    node.kind = NodeKind::Inner(children);
}

fn count_nodes(node: &QuadNode) -> usize {
    match &node.kind {
        NodeKind::Leaf(_) => 1,
        NodeKind::Inner(children) => 1 + children.iter().map(count_nodes).sum::<usize>(),
    }
}

fn count_leaves(node: &QuadNode) -> usize {
    match &node.kind {
        NodeKind::Leaf(_) => 1,
        NodeKind::Inner(children) => children.iter().map(count_leaves).sum(),
    }
}
