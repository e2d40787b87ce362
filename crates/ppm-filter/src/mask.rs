//! Feature activation bitmask.
//!
//! The pipeline's switchable stages form a small closed set, so a `u8`
//! bitset makes activate/deactivate/is-active trivially cheap and the whole
//! activation state copyable.

/// One switchable stage of the pipeline.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Feature {
    /// Suppress messages with speeds outside the configured interval.
    VelocityFilter,
    /// Suppress messages positioned outside the road-corridor geofence.
    GeofenceFilter,
    /// Replace matching vehicle ids in the output.
    IdRedact,
    /// Reserved bit, kept for mask compatibility; currently has no effect.
    SizeRedact,
    /// Strip configured member names from the Part II subtree.
    PartIIRedact,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::VelocityFilter,
        Feature::GeofenceFilter,
        Feature::IdRedact,
        Feature::SizeRedact,
        Feature::PartIIRedact,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Feature::VelocityFilter => 1 << 0,
            Feature::GeofenceFilter => 1 << 1,
            Feature::IdRedact       => 1 << 2,
            Feature::SizeRedact     => 1 << 3,
            Feature::PartIIRedact   => 1 << 4,
        }
    }

    /// Label for log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::VelocityFilter => "velocity_filter",
            Feature::GeofenceFilter => "geofence_filter",
            Feature::IdRedact       => "id_redact",
            Feature::SizeRedact     => "size_redact",
            Feature::PartIIRedact   => "partii_redact",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ActivationMask ────────────────────────────────────────────────────────────

/// The set of active [`Feature`]s, scoped to one handler.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct ActivationMask(u8);

impl ActivationMask {
    /// No features active.
    pub const EMPTY: ActivationMask = ActivationMask(0);

    #[inline]
    pub fn activate(&mut self, feature: Feature) {
        self.0 |= feature.bit();
    }

    #[inline]
    pub fn deactivate(&mut self, feature: Feature) {
        self.0 &= !feature.bit();
    }

    #[inline]
    pub fn is_active(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// Set or clear one bit (config-driven construction).
    #[inline]
    pub fn set(&mut self, feature: Feature, on: bool) {
        if on {
            self.activate(feature);
        } else {
            self.deactivate(feature);
        }
    }
}
