//! `ppm-geofence` — road edges, the quadtree index, and corridor containment.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`edge`]     | `RoadEdge`, `EdgeId`, corridor geometry                 |
//! | [`quad`]     | `Quadtree` (recursive bbox subdivision, point queries)  |
//! | [`geofence`] | `Geofence` (corridor test + admissible way types)       |
//! | [`loader`]   | CSV map file loading, envelope, tree construction       |
//! | [`error`]    | `GeofenceError`, `GeofenceResult<T>`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on embedded core types.  |

pub mod edge;
pub mod error;
pub mod geofence;
pub mod loader;
pub mod quad;


pub use edge::{EdgeId, RoadEdge};
pub use error::{GeofenceError, GeofenceResult};
pub use geofence::Geofence;
pub use loader::{build_quadtree, envelope_of, load_edges_csv, load_edges_reader};
pub use quad::Quadtree;
