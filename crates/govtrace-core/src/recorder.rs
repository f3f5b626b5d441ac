//! Capture session lifecycle
//!
//! A capture session splices the buffered pre-trigger history onto the
//! samples that arrive after the trip, so the finalized record shows the
//! unit both immediately before and throughout the transient.
//!
//! The OPEN/FINALIZED distinction from the session lifecycle is encoded
//! in the type system: [`CaptureSession`] is append-only while it exists,
//! and [`CaptureSession::finalize`] consumes it to produce an immutable
//! [`FinalizedSession`] — there is no way to append to a finalized record
//! or to analyze an open one. The engine holds the open session inside
//! [`RecorderState`], so "a session exists" and "recording is active" are
//! the same fact and cannot disagree.

use crate::types::Sample;

/// An open capture session accumulating post-trigger samples.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    trigger_time_s: f64,
    samples: Vec<Sample>,
}

impl CaptureSession {
    /// Open a session at `trigger_time_s`, seeded with the pre-trigger
    /// history (oldest first). The triggering sample itself is expected
    /// to be the last entry of `pre_trigger`.
    pub fn begin(trigger_time_s: f64, pre_trigger: Vec<Sample>) -> Self {
        Self {
            trigger_time_s,
            samples: pre_trigger,
        }
    }

    /// Append one post-trigger sample.
    pub fn record_tick(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Seconds between the trigger instant and `now_s`.
    pub fn elapsed_since_trigger(&self, now_s: f64) -> f64 {
        now_s - self.trigger_time_s
    }

    /// Trigger instant in seconds.
    pub fn trigger_time_s(&self) -> f64 {
        self.trigger_time_s
    }

    /// Number of samples recorded so far (pre-trigger included).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` if nothing has been recorded (possible when the trigger
    /// fired with an empty pre-trigger buffer).
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Close the session. The record becomes immutable and ready for
    /// analysis.
    pub fn finalize(self) -> FinalizedSession {
        FinalizedSession {
            trigger_time_s: self.trigger_time_s,
            samples: self.samples,
        }
    }
}

/// An immutable, finalized capture record — the sole input to transient
/// analysis.
#[derive(Debug, Clone)]
pub struct FinalizedSession {
    trigger_time_s: f64,
    samples: Vec<Sample>,
}

impl FinalizedSession {
    /// Trigger instant in seconds.
    pub fn trigger_time_s(&self) -> f64 {
        self.trigger_time_s
    }

    /// The captured samples, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Recording state owned by the engine.
///
/// Exactly one session may be open per engine; encoding the session
/// inside the `Recording` variant makes a second open session
/// unrepresentable.
#[derive(Debug)]
pub enum RecorderState {
    /// No capture in progress; the trigger detector is armed.
    Idle,
    /// A capture session is open and absorbing every incoming tick.
    Recording(CaptureSession),
}

impl RecorderState {
    /// `true` while a session is open.
    pub fn is_recording(&self) -> bool {
        matches!(self, RecorderState::Recording(_))
    }
}
