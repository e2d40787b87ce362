//! `ppm-filter` — the per-message BSM privacy pipeline.
//!
//! One [`BsmHandler`] per worker thread turns raw BSM bytes into either a
//! suppression [`Verdict`] or a redacted single-line JSON byte string, all
//! handlers sharing one read-only [`ppm_geofence::Geofence`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`verdict`]  | `Verdict` — the terminal outcome of one message        |
//! | [`mask`]     | `Feature`, `ActivationMask`                            |
//! | [`velocity`] | `VelocityFilter` speed predicate                       |
//! | [`redact`]   | `IdRedactor` (wildcard / inclusion set)                |
//! | [`partii`]   | Part II member removal and presence checks             |
//! | [`bsm`]      | `Bsm` diagnostic record                                |
//! | [`handler`]  | `BsmHandler` — parse, decide, redact, serialize        |

pub mod bsm;
pub mod handler;
pub mod mask;
pub mod partii;
pub mod redact;
pub mod velocity;
pub mod verdict;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bsm::Bsm;
pub use handler::BsmHandler;
pub use mask::{ActivationMask, Feature};
pub use redact::IdRedactor;
pub use velocity::VelocityFilter;
pub use verdict::Verdict;
