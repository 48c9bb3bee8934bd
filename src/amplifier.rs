//! Erbium-doped fiber amplifier model.
//!
//! The small-signal gain and noise figure formulas are empirical curve
//! fits carried over from the reference design, documented approximations
//! rather than rate-equation physics.

use serde::Deserialize;
use tracing::debug;

use crate::error::{require_finite, require_non_negative, require_positive, SimulationError,
    SimulationResult};
use crate::units;

/// Amplification band modeled by the spectral profile (nm).
const BAND_START_NM: f64 = 1530.0;
const BAND_STOP_NM: f64 = 1565.0;

/// Number of points in the spectral profile.
const BAND_POINTS: usize = 100;

/// Gain peak of the erbium band (nm).
const PEAK_WAVELENGTH_NM: f64 = 1550.0;

/// Spread of the Gaussian gain roll-off about the peak (nm).
const GAIN_ROLLOFF_SIGMA_NM: f64 = 10.0;

/// Signal and amplifier parameters for one EDFA run.
#[derive(Clone, Debug, Deserialize)]
pub struct EdfaParams {
    /// Input signal power (dBm).
    pub input_power_dbm: f64,
    /// Signal wavelength (nm).
    pub signal_wavelength_nm: f64,
    /// Pump laser power (mW).
    pub pump_power_mw: f64,
    /// Pump wavelength (nm), typically 980 or 1480.
    pub pump_wavelength_nm: f64,
    /// Erbium-doped fiber length (m).
    pub fiber_length_m: f64,
    /// Erbium ion concentration (ppm).
    pub er_concentration_ppm: f64,
    /// Gain saturation power (mW).
    pub saturation_power_mw: f64,
}

impl EdfaParams {
    fn validate(&self) -> SimulationResult<()> {
        require_finite("input_power_dbm", self.input_power_dbm)?;
        require_positive("signal_wavelength_nm", self.signal_wavelength_nm)?;
        // zero pump or saturation power is a division hazard in the
        // saturation model, rejected up front rather than surfacing as NaN
        require_positive("pump_power_mw", self.pump_power_mw)?;
        require_positive("saturation_power_mw", self.saturation_power_mw)?;
        require_positive("pump_wavelength_nm", self.pump_wavelength_nm)?;
        require_non_negative("fiber_length_m", self.fiber_length_m)?;
        require_non_negative("er_concentration_ppm", self.er_concentration_ppm)?;
        Ok(())
    }
}

/// One point of the wavelength-dependent gain and noise figure profile.
#[derive(Clone, Debug)]
pub struct GainPoint {
    pub wavelength_nm: f64,
    pub gain_db: f64,
    pub noise_figure_db: f64,
}

/// Scalar metrics and the C-band profile for one EDFA run.
#[derive(Clone, Debug)]
pub struct EdfaReport {
    /// Unsaturated gain (dB).
    pub small_signal_gain_db: f64,
    /// Saturation-limited gain at the configured input power (dB).
    pub gain_db: f64,
    /// Amplified output power (mW).
    pub output_power_mw: f64,
    /// Amplified output power (dBm).
    pub output_power_dbm: f64,
    /// Noise figure at the signal wavelength (dB).
    pub noise_figure_db: f64,
    /// (wavelength, gain, noise figure) profile across 1530–1565 nm.
    pub gain_spectrum: Vec<GainPoint>,
}

/// Unsaturated gain from pump, fiber, and doping parameters (dB).
///
/// Empirical fit: 30 dB at 100 mW pump, 10 m fiber, 1000 ppm, scaling
/// linearly in each normalized parameter. Zero pump power gives zero gain.
pub fn small_signal_gain_db(
    pump_power_mw: f64,
    fiber_length_m: f64,
    er_concentration_ppm: f64,
) -> f64 {
    30.0 * (pump_power_mw / 100.0) * (fiber_length_m / 10.0) * (er_concentration_ppm / 1000.0)
}

/// Runs the amplifier model: small-signal gain, single-pole saturation,
/// output power, noise figure, and the C-band profile.
pub fn simulate(params: &EdfaParams) -> SimulationResult<EdfaReport> {
    params.validate()?;
    debug!(
        pump_power_mw = params.pump_power_mw,
        input_power_dbm = params.input_power_dbm,
        "edfa run"
    );

    let input_power_mw = units::dbm_to_milliwatts(params.input_power_dbm);

    let gss_db = small_signal_gain_db(
        params.pump_power_mw,
        params.fiber_length_m,
        params.er_concentration_ppm,
    );
    let gss_linear = units::db_to_linear(gss_db);

    // single-pole saturation
    let gain_linear = gss_linear / (1.0 + input_power_mw / params.saturation_power_mw);
    let gain_db = units::linear_to_db(gain_linear);

    let output_power_mw = input_power_mw * gain_linear;
    let output_power_dbm = units::milliwatts_to_dbm(output_power_mw);

    // 3 dB quantum limit plus under-pumping and high-input penalties
    let noise_figure_db = 3.0
        + 3.0 * (1.0 - params.pump_power_mw / 500.0)
        + 2.0 * (params.input_power_dbm + 30.0) / 40.0;

    let gain_spectrum = gain_profile(gain_db, noise_figure_db);

    require_finite("gain_db", gain_db).map_err(|_| SimulationError::NonFinite("gain_db"))?;
    require_finite("output_power_dbm", output_power_dbm)
        .map_err(|_| SimulationError::NonFinite("output_power_dbm"))?;
    require_finite("noise_figure_db", noise_figure_db)
        .map_err(|_| SimulationError::NonFinite("noise_figure_db"))?;

    Ok(EdfaReport {
        small_signal_gain_db: gss_db,
        gain_db,
        output_power_mw,
        output_power_dbm,
        noise_figure_db,
        gain_spectrum,
    })
}

/// Wavelength dependence across the erbium band: gain scaled by a Gaussian
/// about 1550 nm, noise figure rising linearly away from the peak.
fn gain_profile(gain_db: f64, noise_figure_db: f64) -> Vec<GainPoint> {
    (0..BAND_POINTS)
        .map(|i| {
            let wavelength_nm = BAND_START_NM
                + (BAND_STOP_NM - BAND_START_NM) * i as f64 / (BAND_POINTS - 1) as f64;
            let detune = wavelength_nm - PEAK_WAVELENGTH_NM;
            let rolloff = (-0.5 * (detune / GAIN_ROLLOFF_SIGMA_NM).powi(2)).exp();
            GainPoint {
                wavelength_nm,
                gain_db: gain_db * rolloff,
                noise_figure_db: noise_figure_db + 0.5 * detune.abs(),
            }
        })
        .collect()
}
