//! `ppm-core` — foundational types for the `rust_ppm` privacy filter.
//!
//! This crate is a dependency of every other `ppm-*` crate.  It intentionally
//! has no `ppm-*` dependencies and minimal external ones (only `rustc-hash`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`geo`]     | `GeoPoint`, `BBox`, segment distance, degree padding  |
//! | [`waytype`] | `WayType` road classification                         |
//! | [`config`]  | `PrivacyConfig`, `IdRedactionMode`, flat-map parsing  |
//! | [`error`]   | `PpmError`, `PpmResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod waytype;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{IdRedactionMode, PrivacyConfig};
pub use error::{PpmError, PpmResult};
pub use geo::{BBox, GeoPoint};
pub use waytype::WayType;
