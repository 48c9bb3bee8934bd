//! Link budget model: direct laser transmission to a photodetector.

use serde::Deserialize;
use tracing::debug;

use crate::ber::bit_error_rate;
use crate::constants::BOLTZMANN;
use crate::error::{require_finite, require_non_negative, require_positive, SimulationError,
    SimulationResult};
use crate::units;

/// Number of samples in the power-vs-distance trace.
const TRACE_POINTS: usize = 100;

/// Propagation medium between the laser and the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Fiber,
    Air,
    Vacuum,
}

impl Medium {
    /// Attenuation coefficient in 1/m (natural-log form, for `P0·exp(-αd)`).
    pub fn attenuation_per_meter(&self) -> f64 {
        match self {
            // typical single-mode fiber, 0.2 dB/km converted to 1/m
            Medium::Fiber => 0.2 / 4.343 / 1000.0,
            // simplified clear-weather atmospheric attenuation
            Medium::Air => 0.1 / 1000.0,
            // near-lossless placeholder
            Medium::Vacuum => 0.001 / 1000.0,
        }
    }
}

/// Laser, detector, and channel parameters for one link budget run.
#[derive(Clone, Debug, Deserialize)]
pub struct LinkBudgetParams {
    /// Laser optical power (mW).
    pub optical_power_mw: f64,
    /// Carrier wavelength (nm).
    pub wavelength_nm: f64,
    /// Laser spectral width (nm). Accepted for completeness; the closed-form
    /// budget does not depend on it.
    pub spectral_width_nm: Option<f64>,
    /// Detector responsivity (A/W).
    pub sensitivity_a_per_w: f64,
    /// Detector dark current (nA).
    pub dark_current_na: f64,
    /// Detector electrical bandwidth (GHz).
    pub bandwidth_ghz: f64,
    /// Receiver noise temperature (K).
    pub noise_temperature_k: f64,
    /// Link distance (m).
    pub distance_m: f64,
    /// Propagation medium.
    pub medium: Medium,
}

impl LinkBudgetParams {
    fn validate(&self) -> SimulationResult<()> {
        require_positive("optical_power_mw", self.optical_power_mw)?;
        require_positive("wavelength_nm", self.wavelength_nm)?;
        require_positive("sensitivity_a_per_w", self.sensitivity_a_per_w)?;
        require_non_negative("dark_current_na", self.dark_current_na)?;
        // zero bandwidth would make the noise power zero and the SNR infinite
        require_positive("bandwidth_ghz", self.bandwidth_ghz)?;
        require_positive("noise_temperature_k", self.noise_temperature_k)?;
        require_non_negative("distance_m", self.distance_m)?;
        if let Some(width) = self.spectral_width_nm {
            require_positive("spectral_width_nm", width)?;
        }
        Ok(())
    }
}

/// Scalar metrics and the power-vs-distance trace for one link budget run.
#[derive(Clone, Debug)]
pub struct LinkBudgetReport {
    /// Power at the detector (mW).
    pub received_power_mw: f64,
    /// Power at the detector (dBm).
    pub received_power_dbm: f64,
    /// Thermal plus dark-current noise power (W).
    pub noise_power_w: f64,
    /// Signal-to-noise ratio, linear.
    pub snr: f64,
    /// Bit-error-rate.
    pub ber: f64,
    /// (distance m, power mW) pairs from 0 to the configured distance.
    pub power_vs_distance_mw: Vec<(f64, f64)>,
}

/// Runs the link budget: exponential attenuation over the medium, thermal
/// and shot noise at the detector, then SNR and BER.
pub fn simulate(params: &LinkBudgetParams) -> SimulationResult<LinkBudgetReport> {
    params.validate()?;
    debug!(medium = ?params.medium, distance_m = params.distance_m, "link budget run");

    let alpha = params.medium.attenuation_per_meter();

    let power_vs_distance_mw: Vec<(f64, f64)> = (0..TRACE_POINTS)
        .map(|i| {
            let d = params.distance_m * i as f64 / (TRACE_POINTS - 1) as f64;
            (d, params.optical_power_mw * (-alpha * d).exp())
        })
        .collect();

    let received_power_mw = params.optical_power_mw * (-alpha * params.distance_m).exp();

    let bandwidth_hz = units::gigahertz_to_hertz(params.bandwidth_ghz);
    let dark_current_a = units::nanoamps_to_amps(params.dark_current_na);
    let noise_power_w = 4.0 * BOLTZMANN * params.noise_temperature_k * bandwidth_hz
        + 2.0 * dark_current_a * bandwidth_hz;

    // keep everything linear: responsivity (A/W) times received power (W)
    let received_power_w = received_power_mw * 1e-3;
    let snr = params.sensitivity_a_per_w * received_power_w / noise_power_w;
    let ber = bit_error_rate(snr);

    require_finite("snr", snr).map_err(|_| SimulationError::NonFinite("snr"))?;
    require_finite("ber", ber).map_err(|_| SimulationError::NonFinite("ber"))?;

    Ok(LinkBudgetReport {
        received_power_mw,
        received_power_dbm: units::milliwatts_to_dbm(received_power_mw),
        noise_power_w,
        snr,
        ber,
        power_vs_distance_mw,
    })
}
