//! The per-message BSM pipeline.
//!
//! # Contract
//!
//! [`BsmHandler::process`] consumes one newline-free JSON object and returns
//! a [`Verdict`].  Output exists only for `Success` — [`BsmHandler::json`]
//! is `None` for every other verdict, so suppressed or rejected messages
//! cannot leak downstream by construction.  Newline-delimited framing is the
//! transport's responsibility.
//!
//! # Document handling
//!
//! The input is parsed once into a `serde_json` document.  The crate's
//! `preserve_order` and `arbitrary_precision` features keep member order and
//! the exact numeric text of the input, so a `Success` round-trip without
//! active redactions reproduces the input byte-for-byte (modulo
//! insignificant whitespace).  All suppression decisions run before any
//! mutation, in the order a streaming parse of a BSM would hit them — speed,
//! then position — and the first non-`Success` verdict abandons the message
//! with the output buffer untouched.
//!
//! # Reuse and sharing
//!
//! A handler is reusable across messages; each call starts by resetting the
//! verdict, diagnostic record, and output buffer.  Handlers are not safe for
//! concurrent use, but every handler shares one read-only [`Geofence`]
//! (`Arc`-backed), so the intended deployment is one handler per worker
//! thread.

use serde_json::Value;

use ppm_core::{GeoPoint, IdRedactionMode, PrivacyConfig};
use ppm_geofence::Geofence;

use crate::{partii, ActivationMask, Bsm, Feature, IdRedactor, VelocityFilter, Verdict};

// ── BsmHandler ────────────────────────────────────────────────────────────────

/// Turns raw BSM bytes into a verdict and, on success, redacted JSON bytes.
pub struct BsmHandler {
    geofence: Geofence,
    velocity: VelocityFilter,
    id_redactor: IdRedactor,
    partii_fields: Vec<String>,
    mask: ActivationMask,

    // ── Per-message state, reset by every `process` call ──────────────────
    bsm: Bsm,
    verdict: Verdict,
    output: Vec<u8>,
}

impl BsmHandler {
    /// Build a handler from the typed configuration and the shared geofence.
    ///
    /// The initial activation mask follows the config's flag keys;
    /// individual bits can be toggled afterwards with
    /// [`activate`](Self::activate) / [`deactivate`](Self::deactivate).
    pub fn new(geofence: Geofence, config: &PrivacyConfig) -> Self {
        let mut mask = ActivationMask::EMPTY;
        mask.set(Feature::VelocityFilter, config.velocity_filter_on);
        mask.set(Feature::GeofenceFilter, config.geofence_filter_on);
        mask.set(Feature::IdRedact, config.id_redaction != IdRedactionMode::Off);
        mask.set(Feature::PartIIRedact, config.partii_redaction_on);

        Self {
            geofence,
            velocity: VelocityFilter::new(config.velocity_min_mps, config.velocity_max_mps),
            id_redactor: IdRedactor::new(
                config.id_redaction.clone(),
                config.id_replacement.clone(),
            ),
            partii_fields: config.partii_fields.clone(),
            mask,
            bsm: Bsm::default(),
            verdict: Verdict::Success,
            output: Vec::new(),
        }
    }

    // ── Feature bits ──────────────────────────────────────────────────────

    pub fn activate(&mut self, feature: Feature) {
        self.mask.activate(feature);
    }

    pub fn deactivate(&mut self, feature: Feature) {
        self.mask.deactivate(feature);
    }

    pub fn is_active(&self, feature: Feature) -> bool {
        self.mask.is_active(feature)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Redacted single-line JSON of the last call.
    ///
    /// `Some` only when that call returned [`Verdict::Success`]; there is no
    /// way to observe partial output for a suppressed message.
    pub fn json(&self) -> Option<&[u8]> {
        self.verdict.is_success().then_some(self.output.as_slice())
    }

    /// Fields observed during the last call (originals, pre-redaction).
    pub fn bsm(&self) -> &Bsm {
        &self.bsm
    }

    /// Verdict of the last call.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    // ── Pipeline ──────────────────────────────────────────────────────────

    /// Process one BSM; returns the verdict, which is also stored.
    pub fn process(&mut self, bytes: &[u8]) -> Verdict {
        self.bsm.reset();
        self.output.clear();

        self.verdict = match self.evaluate(bytes) {
            Ok(doc) => match serde_json::to_vec(&doc) {
                Ok(out) => {
                    self.output = out;
                    Verdict::Success
                }
                Err(_) => Verdict::Other,
            },
            Err(verdict) => verdict,
        };
        self.verdict
    }

    /// Parse, locate fields, decide, and redact.
    ///
    /// `Err` carries the suppression or rejection verdict; `Ok` carries the
    /// redacted document ready to serialize.
    fn evaluate(&mut self, bytes: &[u8]) -> Result<Value, Verdict> {
        let mut doc: Value = serde_json::from_slice(bytes).map_err(|_| Verdict::Parse)?;
        if !doc.is_object() {
            return Err(Verdict::Other);
        }

        // ── Field discovery ───────────────────────────────────────────────
        // First occurrence by member name, document order, any depth: the
        // same lookup serves both the flat layout and J2735 `coreData`
        // nesting.
        let id = match find_member(&doc, "id") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(Verdict::Other),
            None => String::new(),
        };
        self.bsm.id = id.clone();

        let speed = required_number(&doc, "speed")?;
        let lat = required_number(&doc, "latitude")?;
        let lon = required_number(&doc, "longitude")?;

        // ── Decision phase ────────────────────────────────────────────────
        // Runs before any mutation; the first cause wins, in the order a
        // streaming parse of core data would observe the fields.
        if let Some(v) = speed {
            self.bsm.speed_mps = v;
            if self.mask.is_active(Feature::VelocityFilter) && !self.velocity.accept(v) {
                return Err(Verdict::Speed);
            }
        }
        if let (Some(lat), Some(lon)) = (lat, lon) {
            let p = GeoPoint::new(lat, lon);
            if !p.is_valid() {
                return Err(Verdict::Other);
            }
            self.bsm.position = p;
            if self.mask.is_active(Feature::GeofenceFilter) && !self.geofence.contains(p) {
                return Err(Verdict::Geoposition);
            }
        }
        if id.is_empty() || speed.is_none() || lat.is_none() || lon.is_none() {
            return Err(Verdict::Missing);
        }

        // ── Redaction phase ───────────────────────────────────────────────
        // Every `id` member in the document gets the redactor applied, not
        // just the first: a matched id must not survive anywhere in the
        // output.
        if self.mask.is_active(Feature::IdRedact) {
            redact_id_members(&mut doc, "id", &self.id_redactor);
        }
        if self.mask.is_active(Feature::PartIIRedact) {
            if let Some(subtree) = find_member_mut(&mut doc, "partII") {
                for name in &self.partii_fields {
                    partii::remove_all_members(subtree, name);
                }
            }
        }

        Ok(doc)
    }
}

// ── Document helpers ──────────────────────────────────────────────────────────

/// First value of a member called `name`, in document order, at any depth.
fn find_member<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key.as_str() == name {
                    return Some(child);
                }
                if let Some(found) = find_member(child, name) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|item| find_member(item, name)),
        _ => None,
    }
}

/// Apply `redactor` to every string member called `name`, at any depth.
fn redact_id_members(value: &mut Value, name: &str, redactor: &IdRedactor) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                match child {
                    Value::String(s) if key.as_str() == name => {
                        if let Some(replacement) = redactor.redact(s) {
                            *child = Value::String(replacement);
                        }
                    }
                    _ => redact_id_members(child, name, redactor),
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                redact_id_members(item, name, redactor);
            }
        }
        _ => {}
    }
}

/// Mutable twin of [`find_member`]; identical traversal order.
fn find_member_mut<'a>(value: &'a mut Value, name: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key.as_str() == name {
                    return Some(child);
                }
                if let Some(found) = find_member_mut(child, name) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Some(found) = find_member_mut(item, name) {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}

/// Numeric member lookup: `Ok(None)` when absent, `Err(Other)` when present
/// with a non-numeric value.
fn required_number(doc: &Value, name: &str) -> Result<Option<f64>, Verdict> {
    match find_member(doc, name) {
        None => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(Verdict::Other),
    }
}
