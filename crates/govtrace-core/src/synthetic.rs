//! Synthetic unit traces for testing and demos
//!
//! Generates idealized load-rejection and step-test traces with known
//! peaks, decay constants and damping ratios, so analyzer output can be
//! checked against closed-form expectations.

use std::f64::consts::PI;

use crate::types::Sample;

/// Generate a load-rejection trace.
///
/// One second of nominal operation (speed 100%, pressure 100 bar, breaker
/// closed, carrying `load_mw`) is followed by a breaker opening at full
/// load. Speed ramps to `peak_speed_pct` over two seconds, pressure
/// spikes to `peak_pressure_bar` on the same ramp, and both decay
/// exponentially back toward nominal with time constant `decay_tau_s`.
/// The trace ends `duration_s` after the trigger; `dt_s` is the tick
/// spacing.
///
/// The breaker-opening sample still reports the pre-event load (telemetry
/// lags the contact), which is what makes it a qualifying trigger; load
/// reads zero from the next tick on.
pub fn load_rejection_trace(
    load_mw: f64,
    peak_speed_pct: f64,
    peak_pressure_bar: f64,
    decay_tau_s: f64,
    duration_s: f64,
    dt_s: f64,
) -> Vec<Sample> {
    let ramp_s = 2.0;
    let pre_ticks = (1.0 / dt_s).round().max(1.0) as usize;
    let post_ticks = (duration_s / dt_s).round() as usize;
    let mut out = Vec::with_capacity(pre_ticks + post_ticks + 1);

    for i in 0..pre_ticks {
        out.push(Sample {
            timestamp_s: (i as f64 - pre_ticks as f64) * dt_s,
            speed_pct: 100.0,
            pressure_bar: 100.0,
            breaker_open: false,
            load_mw,
        });
    }

    for i in 0..=post_ticks {
        let t = i as f64 * dt_s;
        let envelope = if t < ramp_s {
            t / ramp_s
        } else {
            (-(t - ramp_s) / decay_tau_s).exp()
        };
        out.push(Sample {
            timestamp_s: t,
            speed_pct: 100.0 + (peak_speed_pct - 100.0) * envelope,
            pressure_bar: 100.0 + (peak_pressure_bar - 100.0) * envelope,
            breaker_open: true,
            load_mw: if i == 0 { load_mw } else { 0.0 },
        });
    }

    out
}

/// Generate a second-order step response with a prescribed damping ratio.
///
/// For `zeta < 1` this is the standard underdamped step response
///
/// ```text
/// y(t) = to + (from - to) · e^(-ζωₙt) · (cos(ω_d t) + ζ/√(1-ζ²) · sin(ω_d t))
/// ```
///
/// with `ω_d = ωₙ√(1-ζ²)`; for `zeta ≥ 1` the critically damped form
/// `y(t) = to + (from - to)(1 + ωₙt)e^(-ωₙt)` is used. The step is
/// commanded at `t = 0`; samples run from 0 to `duration_s` at `dt_s`
/// spacing.
pub fn step_trace(
    from_value: f64,
    to_value: f64,
    zeta: f64,
    natural_freq_rad_s: f64,
    duration_s: f64,
    dt_s: f64,
) -> Vec<(f64, f64)> {
    let ticks = (duration_s / dt_s).round() as usize;
    let wn = natural_freq_rad_s;
    (0..=ticks)
        .map(|i| {
            let t = i as f64 * dt_s;
            let y = if zeta < 1.0 {
                let wd = wn * (1.0 - zeta * zeta).sqrt();
                let decay = (-zeta * wn * t).exp();
                let phase = (wd * t).cos() + zeta / (1.0 - zeta * zeta).sqrt() * (wd * t).sin();
                to_value + (from_value - to_value) * decay * phase
            } else {
                to_value + (from_value - to_value) * (1.0 + wn * t) * (-wn * t).exp()
            };
            (t, y)
        })
        .collect()
}

/// Theoretical overshoot fraction for an underdamped second-order system.
pub fn overshoot_for_zeta(zeta: f64) -> f64 {
    if zeta >= 1.0 {
        return 0.0;
    }
    (-zeta * PI / (1.0 - zeta * zeta).sqrt()).exp()
}
