//! Load-rejection trip detection with debounce
//!
//! A protection-relevant transient starts when the generator breaker opens
//! while the unit is carrying meaningful load. Physical breaker contacts
//! bounce and load telemetry is noisy, so only the *first* qualifying
//! transition fires; the detector then stays disarmed until the resulting
//! capture session finalizes and the owner re-arms it. Repeated
//! breaker-open ticks during a capture are ignored by construction.

use serde::{Deserialize, Serialize};

use crate::types::Sample;

/// Trip-condition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Minimum active power in MW for a breaker opening to count as a
    /// load rejection. Openings below this are routine disconnections.
    pub load_threshold_mw: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            load_threshold_mw: 5.0,
        }
    }
}

/// Armed/disarmed trip detector.
///
/// The detector is armed exactly when no capture session is open; the
/// owning engine disarms it on trigger and re-arms it on finalization.
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    config: TriggerConfig,
    armed: bool,
}

impl TriggerDetector {
    /// Create an armed detector.
    pub fn new(config: TriggerConfig) -> Self {
        Self { config, armed: true }
    }

    /// `true` if the trip condition holds on this sample and the detector
    /// is armed. Does not change state; the caller disarms on trigger.
    pub fn check(&self, sample: &Sample) -> bool {
        self.armed && sample.breaker_open && sample.load_mw > self.config.load_threshold_mw
    }

    /// Suppress further triggers until [`TriggerDetector::rearm`].
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Re-enable triggering after a capture session has finalized.
    pub fn rearm(&mut self) {
        self.armed = true;
    }

    /// `true` when the detector will fire on a qualifying sample.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
