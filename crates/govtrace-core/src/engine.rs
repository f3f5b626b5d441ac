//! Per-unit monitoring engine
//!
//! One [`MonitorEngine`] owns the complete capture pipeline for one
//! monitored generating unit: the rolling pre-trigger history, the trip
//! detector, the open capture session (if any) and the transient
//! analyzer. There is no global state; a host monitoring several units
//! runs one engine per unit.
//!
//! Samples are absorbed strictly in arrival order, one at a time. Each
//! tick is fully processed — validation, history update, trigger check,
//! optional recording — before the next, because debounce and the
//! settling-time search both depend on total ordering. The engine never
//! blocks and never suspends; delivery is the sample source's concern.
//!
//! ```text
//!            ┌──────────────┐  trip   ┌──────────────────┐
//!  Sample ──►│ RollingBuffer├────────►│ CaptureSession   │
//!            │  (history)   │snapshot │ (pre + post)     │
//!            └──────────────┘         └────────┬─────────┘
//!                                       window elapsed
//!                                              ▼
//!                                     ┌──────────────────┐
//!                                     │ TransientAnalyzer│──► RejectionEvent
//!                                     └──────────────────┘
//! ```
//!
//! The only timeout is the post-trigger capture window, evaluated on the
//! data timestamps themselves: if samples stop arriving an open session
//! simply never finalizes. Production deployments pair the engine with a
//! liveness watchdog owned by the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::recorder::{CaptureSession, RecorderState};
use crate::rolling_buffer::RollingBuffer;
use crate::transient::{RejectionEvent, TransientAnalyzer, TransientConfig};
use crate::trigger::{TriggerConfig, TriggerDetector};
use crate::types::{validate_sample, Sample, SampleLimits};

/// Complete engine configuration. Every constant the engine uses is an
/// overridable field; the defaults are the reference certification
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pre-trigger history capacity in samples (1000 ≈ 1 s at 1 kHz).
    pub buffer_capacity: usize,
    /// Post-trigger capture window in seconds.
    pub post_trigger_window_s: f64,
    /// Trip-condition parameters.
    pub trigger: TriggerConfig,
    /// Regulatory limits for rejection-event analysis.
    pub transient: TransientConfig,
    /// Physical plausibility bounds for ingestion.
    pub sample_limits: SampleLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 1000,
            post_trigger_window_s: 60.0,
            trigger: TriggerConfig::default(),
            transient: TransientConfig::default(),
            sample_limits: SampleLimits::default(),
        }
    }
}

/// Transient capture engine for one generating unit.
#[derive(Debug)]
pub struct MonitorEngine {
    config: EngineConfig,
    buffer: RollingBuffer,
    detector: TriggerDetector,
    state: RecorderState,
    analyzer: TransientAnalyzer,
    rejected_samples: u64,
}

impl MonitorEngine {
    /// Create an idle, armed engine.
    pub fn new(config: EngineConfig) -> Self {
        let buffer = RollingBuffer::with_capacity(config.buffer_capacity);
        let detector = TriggerDetector::new(config.trigger.clone());
        let analyzer = TransientAnalyzer::new(config.transient.clone());
        Self {
            config,
            buffer,
            detector,
            state: RecorderState::Idle,
            analyzer,
            rejected_samples: 0,
        }
    }

    /// Feed one sample.
    ///
    /// Returns a finalized [`RejectionEvent`] only on the tick that
    /// completes a capture window; every other tick returns `None`.
    /// Malformed samples (non-finite or outside the plausibility bounds)
    /// are logged and skipped without touching buffer or trigger state.
    /// The tick that finalizes a session is itself re-examined by the
    /// trigger, so a new qualifying transient on that exact tick opens
    /// the next session without a gap.
    pub fn ingest(&mut self, sample: Sample) -> Option<RejectionEvent> {
        if let Err(err) = validate_sample(&sample, &self.config.sample_limits) {
            warn!(timestamp_s = sample.timestamp_s, %err, "dropping malformed sample");
            self.rejected_samples += 1;
            return None;
        }

        self.buffer.push(sample);

        let mut completed = None;
        match std::mem::replace(&mut self.state, RecorderState::Idle) {
            RecorderState::Recording(mut session) => {
                if session.elapsed_since_trigger(sample.timestamp_s)
                    > self.config.post_trigger_window_s
                {
                    let finalized = session.finalize();
                    debug!(
                        trigger_time_s = finalized.trigger_time_s(),
                        samples = finalized.samples().len(),
                        "capture window complete"
                    );
                    self.detector.rearm();
                    completed = Some(self.analyzer.analyze(&finalized));
                    // Fall through: this tick may re-trigger immediately.
                } else {
                    session.record_tick(sample);
                    self.state = RecorderState::Recording(session);
                    return None;
                }
            }
            RecorderState::Idle => {}
        }

        // Armed exactly when idle; the two must never disagree.
        debug_assert!(self.detector.is_armed());

        if self.detector.check(&sample) {
            self.detector.disarm();
            let session = CaptureSession::begin(sample.timestamp_s, self.buffer.snapshot());
            debug!(
                trigger_time_s = sample.timestamp_s,
                load_mw = sample.load_mw,
                pre_trigger = session.len(),
                "load rejection trigger"
            );
            self.state = RecorderState::Recording(session);
        }

        completed
    }

    /// `true` while a capture session is open.
    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Number of malformed samples dropped at ingestion.
    pub fn rejected_sample_count(&self) -> u64 {
        self.rejected_samples
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
