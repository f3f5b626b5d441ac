//! # Governor Transient Capture & Response Analysis
//!
//! This crate watches a stream of electro-mechanical measurements from a
//! hydro generating unit — rotational speed, penstock pressure, commanded
//! load and breaker state — detects protection-relevant transients,
//! captures a bounded pre/post-trigger window of samples, and derives the
//! regulatory pass/fail metrics (peak overspeed, peak pressure, settling
//! time) and the controller step-response metrics (rise time, overshoot,
//! damping ratio) used to certify governor tuning.
//!
//! ## Signal flow
//!
//! ```text
//! Samples ─► validate ─► RollingBuffer ─► TriggerDetector
//!                              │ snapshot        │ trip
//!                              └────► CaptureSession ──► TransientAnalyzer ─► RejectionEvent
//!                                                                                  │
//! Step test series ───────────► StepResponseAnalyzer ─► StepResult ──┐            │
//!                                                                    ▼            ▼
//!                                                          ComplianceEvaluator ─► ComplianceVerdict
//! ```
//!
//! The engine is a library-style, in-process component: samples arrive
//! one at a time in timestamp order, the engine performs no I/O and never
//! suspends, and one [`MonitorEngine`] instance is owned per monitored
//! unit. Reporting (formatting, signing, export) is an external
//! collaborator consuming the verdict value objects.
//!
//! ## Example
//!
//! ```
//! use govtrace_core::{ComplianceEvaluator, EngineConfig, MonitorEngine};
//! use govtrace_core::synthetic::load_rejection_trace;
//!
//! let mut engine = MonitorEngine::new(EngineConfig::default());
//!
//! // A breaker opening at 50 MW; speed peaks at 132%, pressure at 140 bar.
//! let trace = load_rejection_trace(50.0, 132.0, 140.0, 4.0, 61.0, 1.0);
//!
//! let mut event = None;
//! for sample in trace {
//!     event = engine.ingest(sample).or(event);
//! }
//! let event = event.expect("capture window closed");
//!
//! let verdict = ComplianceEvaluator::new().evaluate(Some(&event), None);
//! assert!(verdict.passed);
//! ```

pub mod compliance;
pub mod engine;
pub mod recorder;
pub mod rolling_buffer;
pub mod step_response;
pub mod synthetic;
pub mod transient;
pub mod trigger;
pub mod types;

pub use compliance::{ComplianceEvaluator, ComplianceVerdict};
pub use engine::{EngineConfig, MonitorEngine};
pub use recorder::{CaptureSession, FinalizedSession, RecorderState};
pub use rolling_buffer::RollingBuffer;
pub use step_response::{StepResponseAnalyzer, StepResponseConfig, StepResult, TuningStatus};
pub use transient::{RejectionEvent, TransientAnalyzer, TransientConfig};
pub use trigger::{TriggerConfig, TriggerDetector};
pub use types::{validate_sample, Sample, SampleError, SampleLimits};
