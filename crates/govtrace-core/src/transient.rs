//! Load-rejection transient analysis
//!
//! Derives the regulatory metrics for a finalized capture session: peak
//! overspeed, peak penstock pressure (water hammer), and settling time of
//! the speed signal back into a tolerance band around rated. The limits
//! follow the usual certification criteria for hydro governors:
//!
//! | Metric        | Limit (default)      |
//! |---------------|----------------------|
//! | Peak speed    | < 135% of rated      |
//! | Peak pressure | < 145% of rated      |
//! | Settling time | < 40 s into ±1% band |
//!
//! Analysis is a pure function of the session: a single forward scan for
//! the peaks and a single backward scan for the settling time. A session
//! too short to analyze yields zero metrics with `passed = false` and the
//! `insufficient_data` flag set, so downstream reporting can distinguish
//! a failed test from a broken capture.

use serde::{Deserialize, Serialize};

use crate::recorder::FinalizedSession;

/// Regulatory limits and analysis parameters for rejection events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientConfig {
    /// Maximum allowed peak speed in percent of rated.
    pub max_overspeed_pct: f64,
    /// Maximum allowed peak pressure in percent of rated pressure.
    pub max_pressure_pct: f64,
    /// Rated penstock pressure in bar, reference for the pressure limit.
    pub rated_pressure_bar: f64,
    /// Maximum allowed settling time in seconds.
    pub max_settling_s: f64,
    /// Half-width of the settling band around 100% speed, in percent.
    pub settling_band_pct: f64,
    /// Minimum session length for a meaningful analysis.
    pub min_samples: usize,
}

impl Default for TransientConfig {
    fn default() -> Self {
        Self {
            max_overspeed_pct: 135.0,
            max_pressure_pct: 145.0,
            rated_pressure_bar: 100.0,
            max_settling_s: 40.0,
            settling_band_pct: 1.0,
            min_samples: 2,
        }
    }
}

/// Analysis result for one load-rejection capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionEvent {
    /// Trigger instant of the underlying capture, in seconds.
    pub trigger_time_s: f64,
    /// Highest speed observed, percent of rated.
    pub peak_speed_pct: f64,
    /// Highest penstock pressure observed, in bar.
    pub peak_pressure_bar: f64,
    /// Time from trigger to the last out-of-band speed sample, seconds.
    pub settling_time_s: f64,
    /// `true` if every limit was respected.
    pub passed: bool,
    /// `true` if the session was too short to analyze; metrics are zero.
    pub insufficient_data: bool,
    /// The limits the event was judged against.
    pub limits: TransientConfig,
}

/// Pure analyzer for finalized rejection captures.
#[derive(Debug, Clone, Default)]
pub struct TransientAnalyzer {
    config: TransientConfig,
}

impl TransientAnalyzer {
    /// Create an analyzer with the given limits.
    pub fn new(config: TransientConfig) -> Self {
        Self { config }
    }

    /// The configured limits.
    pub fn config(&self) -> &TransientConfig {
        &self.config
    }

    /// Compute peak and settling metrics for one finalized session and
    /// judge them against the configured limits.
    pub fn analyze(&self, session: &FinalizedSession) -> RejectionEvent {
        let samples = session.samples();
        if samples.len() < self.config.min_samples {
            return RejectionEvent {
                trigger_time_s: session.trigger_time_s(),
                peak_speed_pct: 0.0,
                peak_pressure_bar: 0.0,
                settling_time_s: 0.0,
                passed: false,
                insufficient_data: true,
                limits: self.config.clone(),
            };
        }

        let mut peak_speed = f64::MIN;
        let mut peak_pressure = f64::MIN;
        for s in samples {
            if s.speed_pct > peak_speed {
                peak_speed = s.speed_pct;
            }
            if s.pressure_bar > peak_pressure {
                peak_pressure = s.pressure_bar;
            }
        }

        let settling_time_s = settling_time_backward(
            session,
            self.config.settling_band_pct,
        );

        let pressure_limit_bar =
            self.config.rated_pressure_bar * self.config.max_pressure_pct / 100.0;
        let passed = peak_speed < self.config.max_overspeed_pct
            && peak_pressure < pressure_limit_bar
            && settling_time_s < self.config.max_settling_s;

        RejectionEvent {
            trigger_time_s: session.trigger_time_s(),
            peak_speed_pct: peak_speed,
            peak_pressure_bar: peak_pressure,
            settling_time_s,
            passed,
            insufficient_data: false,
            limits: self.config.clone(),
        }
    }
}

/// Backward scan for the settling time of the speed signal.
///
/// Walks the session from the end and finds the last sample whose speed
/// deviates from 100% by more than `band_pct`; the settling time is the
/// elapsed time from the trigger to that sample. If no sample ever leaves
/// the band the scan returns 0.0 — the unit was settled throughout the
/// window. A window that was already settled is therefore reported
/// identically to one that settled instantly; callers wanting to tell
/// them apart must inspect the capture itself.
///
/// Out-of-band samples *before* the trigger (pre-trigger history at the
/// old operating point) clamp to 0.0 rather than going negative.
pub fn settling_time_backward(session: &FinalizedSession, band_pct: f64) -> f64 {
    let last_out_of_band = session
        .samples()
        .iter()
        .rev()
        .find(|s| (s.speed_pct - 100.0).abs() > band_pct);
    match last_out_of_band {
        Some(s) => (s.timestamp_s - session.trigger_time_s()).max(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::CaptureSession;
    use crate::types::Sample;

    fn sample(t: f64, speed: f64, pressure: f64) -> Sample {
        Sample {
            timestamp_s: t,
            speed_pct: speed,
            pressure_bar: pressure,
            breaker_open: t >= 0.0,
            load_mw: 0.0,
        }
    }

    fn session_from(trigger_time: f64, samples: Vec<Sample>) -> FinalizedSession {
        CaptureSession::begin(trigger_time, samples).finalize()
    }

    // -----------------------------------------------------------------------
    // Peak search
    // -----------------------------------------------------------------------

    #[test]
    fn test_peaks_match_injected_maxima() {
        let samples = vec![
            sample(0.0, 100.0, 100.0),
            sample(1.0, 121.5, 118.0),
            sample(2.0, 133.2, 141.7),
            sample(3.0, 110.0, 120.0),
            sample(4.0, 100.5, 101.0),
        ];
        let event = TransientAnalyzer::default().analyze(&session_from(0.0, samples));
        assert_eq!(event.peak_speed_pct, 133.2);
        assert_eq!(event.peak_pressure_bar, 141.7);
        assert!(!event.insufficient_data);
    }

    // -----------------------------------------------------------------------
    // Settling time
    // -----------------------------------------------------------------------

    #[test]
    fn test_settling_time_is_last_band_exit() {
        // Decaying oscillation around 100%: enters the ±1% band at t = 12
        // and never leaves it afterwards.
        let mut samples = Vec::new();
        for t in 0..=30 {
            let tf = t as f64;
            let speed = if tf < 12.0 {
                100.0 + 10.0 * (-tf * 0.2).exp() * (tf * 1.3).cos()
            } else {
                100.0 + 0.5 * (tf * 1.3).cos()
            };
            // Keep the pre-band tail genuinely out of band.
            let speed = if tf < 12.0 && (speed - 100.0).abs() <= 1.0 {
                101.5
            } else {
                speed
            };
            samples.push(sample(tf, speed, 100.0));
        }
        let session = session_from(0.0, samples);
        let settling = settling_time_backward(&session, 1.0);
        assert_eq!(settling, 11.0, "last out-of-band sample is at t = 11");
    }

    #[test]
    fn test_settled_throughout_reports_zero() {
        let samples: Vec<Sample> = (0..10)
            .map(|t| sample(t as f64, 100.2, 100.0))
            .collect();
        let session = session_from(0.0, samples);
        assert_eq!(settling_time_backward(&session, 1.0), 0.0);
    }

    #[test]
    fn test_pre_trigger_excursion_clamps_to_zero() {
        // Only the pre-trigger history (t < trigger) is out of band.
        let samples = vec![
            sample(-2.0, 95.0, 100.0),
            sample(-1.0, 97.0, 100.0),
            sample(0.0, 100.1, 100.0),
            sample(1.0, 100.0, 100.0),
        ];
        let session = session_from(0.0, samples);
        assert_eq!(settling_time_backward(&session, 1.0), 0.0);
    }

    // -----------------------------------------------------------------------
    // Pass/fail scenarios
    // -----------------------------------------------------------------------

    /// Build the shared scenario: 3 pre-trigger samples, post-trigger
    /// speed peaking at `peak_speed`, pressure peaking at 140 bar, last
    /// out-of-band sample at t + 25 s.
    fn rejection_scenario(peak_speed: f64) -> FinalizedSession {
        let mut samples = vec![
            sample(-3.0, 100.0, 100.0),
            sample(-2.0, 100.0, 100.0),
            sample(-1.0, 100.0, 100.0),
        ];
        samples.push(sample(0.0, 100.0, 100.0));
        samples.push(sample(5.0, peak_speed, 140.0));
        samples.push(sample(15.0, 110.0, 120.0));
        samples.push(sample(25.0, 101.5, 105.0));
        samples.push(sample(30.0, 100.3, 100.0));
        samples.push(sample(40.0, 100.1, 100.0));
        session_from(0.0, samples)
    }

    #[test]
    fn test_compliant_rejection_passes() {
        let event = TransientAnalyzer::default().analyze(&rejection_scenario(132.0));
        assert_eq!(event.peak_speed_pct, 132.0);
        assert_eq!(event.peak_pressure_bar, 140.0);
        assert_eq!(event.settling_time_s, 25.0);
        assert!(event.passed, "132 < 135, 140 < 145, 25 < 40");
    }

    #[test]
    fn test_overspeed_fails() {
        let event = TransientAnalyzer::default().analyze(&rejection_scenario(138.0));
        assert_eq!(event.peak_speed_pct, 138.0);
        assert!(!event.passed);
    }

    #[test]
    fn test_slow_settling_fails() {
        let mut samples = vec![sample(0.0, 100.0, 100.0), sample(5.0, 120.0, 110.0)];
        // Still out of band at t + 45 s.
        samples.push(sample(45.0, 103.0, 100.0));
        samples.push(sample(50.0, 100.2, 100.0));
        let event = TransientAnalyzer::default().analyze(&session_from(0.0, samples));
        assert_eq!(event.settling_time_s, 45.0);
        assert!(!event.passed);
    }

    #[test]
    fn test_overpressure_fails() {
        let mut samples = vec![sample(0.0, 100.0, 100.0)];
        samples.push(sample(2.0, 120.0, 150.0)); // 150% of rated 100 bar
        samples.push(sample(10.0, 100.5, 100.0));
        let event = TransientAnalyzer::default().analyze(&session_from(0.0, samples));
        assert!(!event.passed);
        assert_eq!(event.peak_pressure_bar, 150.0);
    }

    // -----------------------------------------------------------------------
    // Degraded input
    // -----------------------------------------------------------------------

    #[test]
    fn test_insufficient_data_degrades() {
        let event = TransientAnalyzer::default().analyze(&session_from(0.0, vec![]));
        assert!(event.insufficient_data);
        assert!(!event.passed);
        assert_eq!(event.peak_speed_pct, 0.0);
        assert_eq!(event.settling_time_s, 0.0);
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        let event = TransientAnalyzer::default()
            .analyze(&session_from(0.0, vec![sample(0.0, 120.0, 120.0)]));
        assert!(event.insufficient_data);
    }

    #[test]
    fn test_custom_limits_respected() {
        let analyzer = TransientAnalyzer::new(TransientConfig {
            max_overspeed_pct: 120.0,
            ..Default::default()
        });
        let event = analyzer.analyze(&rejection_scenario(132.0));
        assert!(!event.passed, "132% exceeds the tightened 120% limit");
    }
}
