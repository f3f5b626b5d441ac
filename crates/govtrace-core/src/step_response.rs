//! Governor step-test characterization
//!
//! Certifying governor tuning requires stepping a controlled axis (gate
//! opening, speed setpoint, power setpoint) and characterizing the
//! response as a second-order system: rise time, overshoot, damping
//! ratio, and a qualitative verdict.
//!
//! The damping ratio comes from the standard log-decrement relation for
//! an underdamped second-order system:
//!
//! ```text
//!             -ln(OS)
//! ζ = ─────────────────────     OS = overshoot fraction (0–1)
//!     sqrt(π² + ln(OS)²)
//! ```
//!
//! When overshoot is negligible there is no observable oscillation and
//! the response is treated as critically/over-damped (ζ = 1.0); this also
//! keeps `ln(0)` out of the arithmetic. A zero step size is guarded the
//! same way — no metric is ever NaN.
//!
//! ## Example
//!
//! ```
//! use govtrace_core::step_response::{StepResponseAnalyzer, TuningStatus};
//!
//! // 0 → 10 step, peak 11.5 (15% overshoot), 10%/90% crossings 1.2 s apart.
//! let series = vec![
//!     (0.0, 0.0),
//!     (0.2, 1.0),
//!     (0.8, 5.0),
//!     (1.4, 9.0),
//!     (2.0, 11.5),
//!     (3.0, 10.4),
//!     (4.0, 10.0),
//! ];
//! let result = StepResponseAnalyzer::default().analyze(&series, 0.0, 0.0, 10.0, "gate");
//! assert_eq!(result.status, TuningStatus::Optimal);
//! assert!((result.damping_ratio - 0.517).abs() < 0.01);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Verdict thresholds and analysis parameters for step tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponseConfig {
    /// Rise time above this is reported as sluggish, in seconds.
    pub rise_time_ceiling_s: f64,
    /// Damping ratio below this is reported as oscillatory.
    pub oscillatory_zeta: f64,
    /// Overshoot below this percentage counts as no oscillation.
    pub negligible_overshoot_pct: f64,
    /// Half-width of the settling band as a percentage of step size.
    pub settling_band_pct: f64,
}

impl Default for StepResponseConfig {
    fn default() -> Self {
        Self {
            rise_time_ceiling_s: 5.0,
            oscillatory_zeta: 0.3,
            negligible_overshoot_pct: 0.1,
            settling_band_pct: 5.0,
        }
    }
}

/// Qualitative verdict on governor tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TuningStatus {
    /// Well damped and fast enough.
    Optimal,
    /// Rise time exceeds the configured ceiling.
    Sluggish,
    /// Damping ratio below the oscillatory threshold.
    Oscillatory,
}

/// Characterization of one step test on one controlled axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// The controlled axis that was stepped (e.g. "gate", "speed").
    pub axis: String,
    /// Commanded step magnitude, signed, in the axis' units.
    pub step_size: f64,
    /// 10%–90% rise time in seconds; 0.0 if a crossing was never observed.
    pub rise_time_s: f64,
    /// Peak deviation beyond the target as a percentage of step size.
    pub overshoot_pct: f64,
    /// Damping ratio ζ derived from overshoot; 1.0 when critically damped.
    pub damping_ratio: f64,
    /// Time from step start to the last sample outside the settling band.
    pub settling_time_s: f64,
    /// Qualitative verdict.
    pub status: TuningStatus,
}

/// Pure analyzer for step-test time series.
///
/// Stateless between calls; each call characterizes one `(t, value)`
/// series independently.
#[derive(Debug, Clone, Default)]
pub struct StepResponseAnalyzer {
    config: StepResponseConfig,
}

impl StepResponseAnalyzer {
    /// Create an analyzer with the given thresholds.
    pub fn new(config: StepResponseConfig) -> Self {
        Self { config }
    }

    /// The configured thresholds.
    pub fn config(&self) -> &StepResponseConfig {
        &self.config
    }

    /// Characterize one step test.
    ///
    /// `series` is an ordered `(t, value)` record of the axis; the step
    /// was commanded at `step_start_s`, moving the target from
    /// `from_value` to `to_value`.
    pub fn analyze(
        &self,
        series: &[(f64, f64)],
        step_start_s: f64,
        from_value: f64,
        to_value: f64,
        axis: impl Into<String>,
    ) -> StepResult {
        let axis = axis.into();
        let step_size = to_value - from_value;
        if step_size.abs() < f64::EPSILON {
            // Zero step: nothing to characterize, and nothing to divide by.
            return StepResult {
                axis,
                step_size: 0.0,
                rise_time_s: 0.0,
                overshoot_pct: 0.0,
                damping_ratio: 1.0,
                settling_time_s: 0.0,
                status: TuningStatus::Optimal,
            };
        }

        let rise_time_s = rise_time(series, step_start_s, from_value, step_size);
        let overshoot_pct = overshoot_pct(series, step_start_s, to_value, step_size);
        let damping_ratio =
            damping_from_overshoot(overshoot_pct, self.config.negligible_overshoot_pct);
        let settling_time_s = step_settling_time(
            series,
            step_start_s,
            to_value,
            step_size.abs() * self.config.settling_band_pct / 100.0,
        );

        // Oscillatory wins over sluggish when both apply.
        let status = if damping_ratio < self.config.oscillatory_zeta {
            TuningStatus::Oscillatory
        } else if rise_time_s > self.config.rise_time_ceiling_s {
            TuningStatus::Sluggish
        } else {
            TuningStatus::Optimal
        };

        StepResult {
            axis,
            step_size,
            rise_time_s,
            overshoot_pct,
            damping_ratio,
            settling_time_s,
            status,
        }
    }
}

/// 10%–90% rise time, direction-aware.
///
/// For a positive step a threshold is crossed when the value reaches or
/// exceeds it; for a negative step when it reaches or falls below it.
/// Returns 0.0 if either crossing is never observed.
fn rise_time(series: &[(f64, f64)], step_start_s: f64, from_value: f64, step_size: f64) -> f64 {
    let thr10 = from_value + 0.1 * step_size;
    let thr90 = from_value + 0.9 * step_size;
    let crossed = |value: f64, threshold: f64| {
        if step_size > 0.0 {
            value >= threshold
        } else {
            value <= threshold
        }
    };

    let mut t10 = None;
    let mut t90 = None;
    for &(t, v) in series.iter().filter(|&&(t, _)| t >= step_start_s) {
        if t10.is_none() && crossed(v, thr10) {
            t10 = Some(t);
        }
        if t90.is_none() && crossed(v, thr90) {
            t90 = Some(t);
        }
        if t90.is_some() {
            break;
        }
    }

    match (t10, t90) {
        (Some(a), Some(b)) => b - a,
        _ => 0.0,
    }
}

/// Peak deviation beyond the target, as a percentage of step size.
///
/// Tracks the extremum in the step's direction (maximum for a positive
/// step, minimum for a negative one) from the step start onward.
fn overshoot_pct(series: &[(f64, f64)], step_start_s: f64, to_value: f64, step_size: f64) -> f64 {
    let mut extremum: Option<f64> = None;
    for &(t, v) in series {
        if t < step_start_s {
            continue;
        }
        extremum = Some(match extremum {
            None => v,
            Some(e) => {
                if step_size > 0.0 {
                    e.max(v)
                } else {
                    e.min(v)
                }
            }
        });
    }
    let Some(peak) = extremum else {
        return 0.0;
    };
    let deviation = if step_size > 0.0 {
        (peak - to_value).max(0.0)
    } else {
        (to_value - peak).max(0.0)
    };
    deviation / step_size.abs() * 100.0
}

/// Damping ratio from overshoot via the log-decrement relation.
///
/// Overshoot below `negligible_pct` means no observable oscillation:
/// the response is treated as critically/over-damped (ζ = 1.0), which
/// also keeps `ln(0)` out of the arithmetic. Overshoot beyond 100%
/// clamps to ζ = 0.0.
fn damping_from_overshoot(overshoot_pct: f64, negligible_pct: f64) -> f64 {
    if overshoot_pct < negligible_pct {
        return 1.0;
    }
    let os = overshoot_pct / 100.0;
    let ln_os = os.ln();
    let zeta = -ln_os / (PI * PI + ln_os * ln_os).sqrt();
    zeta.max(0.0)
}

/// Backward scan for the last sample outside the settling band around the
/// target, relative to the step start. Same idiom as the rejection-event
/// settling search: a series that never leaves the band reports 0.0.
fn step_settling_time(series: &[(f64, f64)], step_start_s: f64, to_value: f64, band: f64) -> f64 {
    let last_out = series
        .iter()
        .rev()
        .find(|&&(t, v)| t >= step_start_s && (v - to_value).abs() > band);
    match last_out {
        Some(&(t, _)) => (t - step_start_s).max(0.0),
        None => 0.0,
    }
}
