//! Regulatory verdict aggregation
//!
//! Folds the latest rejection-event and step-test results into a single
//! attributable verdict for the reporting collaborator. There is no
//! arithmetic here — only boolean aggregation and itemized reasons — but
//! this is the contract boundary everything downstream (formatting,
//! signing, export) consumes, so the reason strings are stable and
//! self-contained.

use serde::{Deserialize, Serialize};

use crate::step_response::{StepResult, TuningStatus};
use crate::transient::RejectionEvent;

/// Aggregated pass/fail conclusion with itemized reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// `true` when every evaluated criterion is within limits.
    pub passed: bool,
    /// One entry per failing criterion; empty on a pass.
    pub reasons: Vec<String>,
    /// Single human-readable conclusion line.
    pub summary: String,
}

/// Evaluates analyzer outputs against the regulatory criteria.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceEvaluator;

impl ComplianceEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate the available results into one verdict.
    ///
    /// Overall pass requires the rejection event (if present) to have
    /// passed and the step result (if present) not to be oscillatory.
    /// Either input may be absent; an absent input constrains nothing.
    pub fn evaluate(
        &self,
        rejection: Option<&RejectionEvent>,
        step: Option<&StepResult>,
    ) -> ComplianceVerdict {
        let mut reasons = Vec::new();

        if let Some(event) = rejection {
            if event.insufficient_data {
                reasons.push(
                    "INSUFFICIENT_DATA: load-rejection capture too short to analyze".to_string(),
                );
            } else {
                let limits = &event.limits;
                if event.peak_speed_pct >= limits.max_overspeed_pct {
                    reasons.push(format!(
                        "overspeed: peak {:.1}% of rated exceeds limit {:.1}%",
                        event.peak_speed_pct, limits.max_overspeed_pct
                    ));
                }
                let pressure_limit_bar =
                    limits.rated_pressure_bar * limits.max_pressure_pct / 100.0;
                if event.peak_pressure_bar >= pressure_limit_bar {
                    reasons.push(format!(
                        "overpressure: peak {:.1} bar exceeds limit {:.1} bar ({:.0}% of rated)",
                        event.peak_pressure_bar, pressure_limit_bar, limits.max_pressure_pct
                    ));
                }
                if event.settling_time_s >= limits.max_settling_s {
                    reasons.push(format!(
                        "settling: {:.1} s to re-enter the ±{:.1}% band exceeds limit {:.1} s",
                        event.settling_time_s, limits.settling_band_pct, limits.max_settling_s
                    ));
                }
            }
        }

        if let Some(result) = step {
            if result.status == TuningStatus::Oscillatory {
                reasons.push(format!(
                    "oscillatory response on axis `{}`: damping ratio {:.2}",
                    result.axis, result.damping_ratio
                ));
            }
        }

        let passed = reasons.is_empty();
        let summary = if passed {
            "PASS: all evaluated criteria within limits".to_string()
        } else {
            format!("FAIL: {} criteria out of limits", reasons.len())
        };

        ComplianceVerdict {
            passed,
            reasons,
            summary,
        }
    }
}
