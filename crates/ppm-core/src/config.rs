//! Typed privacy configuration.
//!
//! The deployment surface hands the filter a flat string→string property map.
//! That map is parsed exactly once, at startup, into [`PrivacyConfig`];
//! per-message code never touches string keys.  The flat map is purely the
//! on-disk format.
//!
//! # Recognized keys
//!
//! | Key                                 | Effect                                   |
//! |-------------------------------------|------------------------------------------|
//! | `privacy.filter.velocity`           | `ON`/`OFF` — velocity filter             |
//! | `privacy.filter.velocity.min`       | lower inclusive bound, m/s               |
//! | `privacy.filter.velocity.max`       | upper inclusive bound, m/s               |
//! | `privacy.filter.geofence`           | `ON`/`OFF` — geofence filter             |
//! | `privacy.filter.geofence.extension` | uniform corridor pad, metres             |
//! | `privacy.filter.geofence.waytypes`  | comma list of admissible way types       |
//! | `privacy.redaction.id`              | `ON` (all), `OFF`, or comma list of ids  |
//! | `privacy.redaction.id.value`        | replacement id string                    |
//! | `privacy.redaction.partII`          | `ON`/`OFF` — Part II member redaction    |
//! | `privacy.redaction.partII.fields`   | comma list of member names to strip      |
//!
//! Unrecognized keys are ignored — the map carries the whole deployment's
//! properties, not just ours.

use std::collections::HashMap;

use rustc_hash::FxHashSet;

use crate::{PpmError, PpmResult, WayType};

// ── IdRedactionMode ───────────────────────────────────────────────────────────

/// How vehicle ids are selected for redaction.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdRedactionMode {
    /// Id redaction is disabled.
    #[default]
    Off,
    /// Every id is replaced (wildcard mode).
    All,
    /// Only ids in the set are replaced.
    Inclusion(FxHashSet<String>),
}

// ── PrivacyConfig ─────────────────────────────────────────────────────────────

/// Top-level privacy filter configuration.
///
/// Build via [`PrivacyConfig::from_map`] from the deployment's flat property
/// map; `Default` gives a fully-inactive filter with standard bounds.
/// All fields are validated at parse time, so per-message code can assume
/// finite bounds with `min ≤ max` and a non-negative extension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrivacyConfig {
    /// Activate the velocity filter.
    pub velocity_filter_on: bool,

    /// Lower inclusive speed bound, m/s.  Default: 2.2352 (5 mph).
    pub velocity_min_mps: f64,

    /// Upper inclusive speed bound, m/s.  Default: 44.704 (100 mph).
    pub velocity_max_mps: f64,

    /// Activate the geofence filter.
    pub geofence_filter_on: bool,

    /// Uniform pad in metres added to every edge's corridor half-width.
    /// Hides precise lane positions and keeps corridors continuous at
    /// junctions.  Default: 5.0.
    pub box_extension_m: f64,

    /// Way types admissible to the geofence test.  Default: all known types.
    pub admissible_way_types: FxHashSet<WayType>,

    /// Vehicle-id redaction mode.  Any mode other than `Off` activates the
    /// id redactor.
    pub id_redaction: IdRedactionMode,

    /// Replacement id.  `None` → an all-zero string matching the input
    /// id's length.
    pub id_replacement: Option<String>,

    /// Activate Part II member redaction.
    pub partii_redaction_on: bool,

    /// Member names stripped from the Part II subtree, at any depth.
    pub partii_fields: Vec<String>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            velocity_filter_on:   false,
            velocity_min_mps:     Self::DEFAULT_VELOCITY_MIN_MPS,
            velocity_max_mps:     Self::DEFAULT_VELOCITY_MAX_MPS,
            geofence_filter_on:   false,
            box_extension_m:      Self::DEFAULT_BOX_EXTENSION_M,
            admissible_way_types: WayType::ALL.iter().copied().collect(),
            id_redaction:         IdRedactionMode::Off,
            id_replacement:       None,
            partii_redaction_on:  false,
            partii_fields:        Vec::new(),
        }
    }
}

impl PrivacyConfig {
    /// 5 mph.
    pub const DEFAULT_VELOCITY_MIN_MPS: f64 = 2.2352;
    /// 100 mph.
    pub const DEFAULT_VELOCITY_MAX_MPS: f64 = 44.704;
    pub const DEFAULT_BOX_EXTENSION_M: f64 = 5.0;

    /// Parse the flat key→value property map.
    ///
    /// # Errors
    ///
    /// Returns [`PpmError::Config`] for malformed numbers, non-finite or
    /// inverted velocity bounds, a negative extension, unknown way types, or
    /// a switch value other than `ON`/`OFF`.
    pub fn from_map(map: &HashMap<String, String>) -> PpmResult<Self> {
        let mut cfg = PrivacyConfig::default();

        // ── Velocity filter ───────────────────────────────────────────────
        if let Some(v) = map.get("privacy.filter.velocity") {
            cfg.velocity_filter_on = parse_switch("privacy.filter.velocity", v)?;
        }
        if let Some(v) = map.get("privacy.filter.velocity.min") {
            cfg.velocity_min_mps = parse_float("privacy.filter.velocity.min", v)?;
        }
        if let Some(v) = map.get("privacy.filter.velocity.max") {
            cfg.velocity_max_mps = parse_float("privacy.filter.velocity.max", v)?;
        }
        if cfg.velocity_min_mps > cfg.velocity_max_mps {
            return Err(PpmError::Config(format!(
                "velocity bounds inverted: min {} > max {}",
                cfg.velocity_min_mps, cfg.velocity_max_mps
            )));
        }

        // ── Geofence filter ───────────────────────────────────────────────
        if let Some(v) = map.get("privacy.filter.geofence") {
            cfg.geofence_filter_on = parse_switch("privacy.filter.geofence", v)?;
        }
        if let Some(v) = map.get("privacy.filter.geofence.extension") {
            let ext = parse_float("privacy.filter.geofence.extension", v)?;
            if ext < 0.0 {
                return Err(PpmError::Config(format!(
                    "privacy.filter.geofence.extension must be >= 0, got {ext}"
                )));
            }
            cfg.box_extension_m = ext;
        }
        if let Some(v) = map.get("privacy.filter.geofence.waytypes") {
            cfg.admissible_way_types = split_list(v)
                .map(|tag| {
                    WayType::parse(tag).ok_or_else(|| {
                        PpmError::Config(format!("unknown way type {tag:?}"))
                    })
                })
                .collect::<PpmResult<_>>()?;
        }

        // ── Id redaction ──────────────────────────────────────────────────
        if let Some(v) = map.get("privacy.redaction.id") {
            cfg.id_redaction = if v.trim().eq_ignore_ascii_case("off") {
                IdRedactionMode::Off
            } else if v.trim().eq_ignore_ascii_case("on") {
                IdRedactionMode::All
            } else {
                IdRedactionMode::Inclusion(split_list(v).map(str::to_owned).collect())
            };
        }
        if let Some(v) = map.get("privacy.redaction.id.value") {
            cfg.id_replacement = Some(v.clone());
        }

        // ── Part II redaction ─────────────────────────────────────────────
        if let Some(v) = map.get("privacy.redaction.partII") {
            cfg.partii_redaction_on = parse_switch("privacy.redaction.partII", v)?;
        }
        if let Some(v) = map.get("privacy.redaction.partII.fields") {
            cfg.partii_fields = split_list(v).map(str::to_owned).collect();
        }

        Ok(cfg)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Comma-separated list → trimmed, non-empty items.
fn split_list(v: &str) -> impl Iterator<Item = &str> {
    v.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_switch(key: &str, v: &str) -> PpmResult<bool> {
    let v = v.trim();
    if v.eq_ignore_ascii_case("on") {
        Ok(true)
    } else if v.eq_ignore_ascii_case("off") {
        Ok(false)
    } else {
        Err(PpmError::Config(format!(
            "{key}: expected ON or OFF, got {v:?}"
        )))
    }
}

fn parse_float(key: &str, v: &str) -> PpmResult<f64> {
    v.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| PpmError::Config(format!("{key}: expected a finite number, got {v:?}")))
}
