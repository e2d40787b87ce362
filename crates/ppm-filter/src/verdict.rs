//! Per-message processing outcomes.
//!
//! Verdict strings are a stable interface consumed by downstream
//! observability pipelines; do not rename them.

use std::fmt;

/// The terminal outcome of one `process` call.
///
/// Suppression (`Speed`, `Geoposition`) is a normal outcome, not an error:
/// the message is simply withheld.  `Parse`, `Missing`, and `Other` are
/// reported for operator visibility; the caller decides whether to log,
/// drop, or dead-letter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Verdict {
    /// Emit the redacted output.
    #[default]
    Success,
    /// Suppressed: speed outside the configured interval.
    Speed,
    /// Suppressed: position outside the geofence.
    Geoposition,
    /// Malformed JSON.
    Parse,
    /// Well-formed JSON lacking one of id / latitude / longitude / speed.
    Missing,
    /// A required field had an unexpected type, or coordinates were out of
    /// range.
    Other,
}

impl Verdict {
    /// Stable string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Success     => "success",
            Verdict::Speed       => "speed",
            Verdict::Geoposition => "geoposition",
            Verdict::Parse       => "parse",
            Verdict::Missing     => "missing",
            Verdict::Other       => "other",
        }
    }

    /// `true` only for `Success` — the sole verdict with output attached.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Verdict::Success)
    }

    /// `true` for the two filter-driven suppression causes.
    #[inline]
    pub fn is_suppression(self) -> bool {
        matches!(self, Verdict::Speed | Verdict::Geoposition)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
