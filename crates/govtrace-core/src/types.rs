//! Core types for governor transient monitoring
//!
//! This module defines the fundamental measurement type shared by every
//! stage of the capture and analysis pipeline, together with the
//! data-quality validation applied at the ingestion boundary.
//!
//! ## The measurement model
//!
//! A generating unit is observed through four signals sampled on a common
//! tick (typically 1 kHz from the unit controller):
//!
//! - **Speed**: rotational speed as a percent of rated (100% = synchronous)
//! - **Pressure**: penstock pressure in bar at the spiral case inlet
//! - **Breaker**: the generator breaker position (open = off the grid)
//! - **Load**: active power in MW commanded at the breaker
//!
//! ```text
//!   speed %        pressure bar
//!   ^                 ^
//!   |    /\           |   /\
//! 100----  \-----   p0----  \______
//!   |       breaker opens while loaded
//!   +----|-----------> t
//! ```
//!
//! Samples are immutable once created: the pipeline copies them into the
//! rolling history and into capture sessions, it never mutates them.

use serde::{Deserialize, Serialize};

/// One timestamped measurement tick from a generating unit.
///
/// Timestamps are seconds on a monotonic per-unit clock; the feed contract
/// guarantees non-decreasing timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Acquisition time in seconds.
    pub timestamp_s: f64,
    /// Rotational speed in percent of rated speed.
    pub speed_pct: f64,
    /// Penstock pressure in bar.
    pub pressure_bar: f64,
    /// Generator breaker position (`true` = open, unit off the grid).
    pub breaker_open: bool,
    /// Active power at the breaker in MW.
    pub load_mw: f64,
}

/// Physical plausibility bounds applied at ingestion.
///
/// A sample outside these bounds is a telemetry fault, not a real
/// machine state, and is dropped before it can touch trigger or buffer
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleLimits {
    /// Maximum credible speed in percent of rated.
    pub max_speed_pct: f64,
    /// Maximum credible penstock pressure in bar.
    pub max_pressure_bar: f64,
    /// Maximum credible active power in MW.
    pub max_load_mw: f64,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            max_speed_pct: 250.0,
            max_pressure_bar: 500.0,
            max_load_mw: 2000.0,
        }
    }
}

/// Reasons a sample can be rejected at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("non-finite value in field `{field}`")]
    NonFinite { field: &'static str },

    #[error("field `{field}` value {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Validate one sample against the configured plausibility bounds.
///
/// Speed, pressure and load must be finite and within `[0, max]`; load is
/// allowed to swing slightly negative (motoring during disconnection)
/// down to `-max_load_mw`. The timestamp must be finite.
pub fn validate_sample(sample: &Sample, limits: &SampleLimits) -> Result<(), SampleError> {
    let finite = [
        ("timestamp_s", sample.timestamp_s),
        ("speed_pct", sample.speed_pct),
        ("pressure_bar", sample.pressure_bar),
        ("load_mw", sample.load_mw),
    ];
    for (field, value) in finite {
        if !value.is_finite() {
            return Err(SampleError::NonFinite { field });
        }
    }

    let ranges = [
        ("speed_pct", sample.speed_pct, 0.0, limits.max_speed_pct),
        (
            "pressure_bar",
            sample.pressure_bar,
            0.0,
            limits.max_pressure_bar,
        ),
        (
            "load_mw",
            sample.load_mw,
            -limits.max_load_mw,
            limits.max_load_mw,
        ),
    ];
    for (field, value, min, max) in ranges {
        if value < min || value > max {
            return Err(SampleError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal(t: f64) -> Sample {
        Sample {
            timestamp_s: t,
            speed_pct: 100.0,
            pressure_bar: 100.0,
            breaker_open: false,
            load_mw: 50.0,
        }
    }

    #[test]
    fn test_nominal_sample_valid() {
        let limits = SampleLimits::default();
        assert!(validate_sample(&nominal(0.0), &limits).is_ok());
    }

    #[test]
    fn test_nan_speed_rejected() {
        let limits = SampleLimits::default();
        let mut s = nominal(0.0);
        s.speed_pct = f64::NAN;
        assert_eq!(
            validate_sample(&s, &limits),
            Err(SampleError::NonFinite { field: "speed_pct" })
        );
    }

    #[test]
    fn test_infinite_pressure_rejected() {
        let limits = SampleLimits::default();
        let mut s = nominal(0.0);
        s.pressure_bar = f64::INFINITY;
        assert!(matches!(
            validate_sample(&s, &limits),
            Err(SampleError::NonFinite { field: "pressure_bar" })
        ));
    }

    #[test]
    fn test_speed_out_of_range_rejected() {
        let limits = SampleLimits::default();
        let mut s = nominal(0.0);
        s.speed_pct = 300.0;
        assert!(matches!(
            validate_sample(&s, &limits),
            Err(SampleError::OutOfRange { field: "speed_pct", .. })
        ));
    }

    #[test]
    fn test_negative_speed_rejected() {
        let limits = SampleLimits::default();
        let mut s = nominal(0.0);
        s.speed_pct = -1.0;
        assert!(validate_sample(&s, &limits).is_err());
    }

    #[test]
    fn test_slightly_negative_load_allowed() {
        let limits = SampleLimits::default();
        let mut s = nominal(0.0);
        s.load_mw = -2.0;
        assert!(validate_sample(&s, &limits).is_ok());
    }

    #[test]
    fn test_custom_limits() {
        let limits = SampleLimits {
            max_speed_pct: 150.0,
            ..Default::default()
        };
        let mut s = nominal(0.0);
        s.speed_pct = 160.0;
        assert!(validate_sample(&s, &limits).is_err());
    }
}
