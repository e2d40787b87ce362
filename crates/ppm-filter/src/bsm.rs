//! The per-message BSM record.

use std::fmt;

use ppm_core::GeoPoint;

/// Fields observed while processing one message, kept for diagnostics.
///
/// The record always holds the **original** values — the id before any
/// redaction — so operators can correlate suppressed messages with their
/// source.  It never reaches the output path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bsm {
    pub id: String,
    pub position: GeoPoint,
    pub speed_mps: f64,
}

impl Bsm {
    /// Clear to the empty record between messages.
    pub fn reset(&mut self) {
        *self = Bsm::default();
    }
}

impl fmt::Display for Bsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bsm[id={} pos={} speed={} m/s]",
            self.id, self.position, self.speed_mps
        )
    }
}
