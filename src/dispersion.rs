//! Fiber propagation model: modulated waveform, chromatic dispersion
//! broadening, attenuation, eye-diagram windows, and a synthetic spectrum.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::debug;

use crate::constants::SPEED_OF_LIGHT;
use crate::error::{require_finite, require_non_negative, require_positive, SimulationError,
    SimulationResult};
use crate::modulation::Modulation;
use crate::units;

/// Oversampling factor for waveform synthesis.
pub const SAMPLES_PER_BIT: usize = 16;

/// Length of the pseudo-random test pattern when not configured.
pub const DEFAULT_NUM_BITS: usize = 128;

/// Laser spectral width assumed when not configured (nm).
pub const DEFAULT_SPECTRAL_WIDTH_NM: f64 = 0.1;

/// Number of points in the synthetic spectrum trace.
const SPECTRUM_POINTS: usize = 1000;

/// Half-span of the spectrum trace about the carrier (THz).
const SPECTRUM_HALF_SPAN_THZ: f64 = 0.5;

/// Floor for the kernel spread. The kernel is sampled on an even grid with
/// no sample at exactly zero, so an unbounded small sigma underflows every
/// tap to zero and normalization divides by zero.
const MIN_DISPERSION_SIGMA: f64 = 0.05;

/// Transmitter and fiber parameters for one dispersion run.
#[derive(Clone, Debug, Deserialize)]
pub struct DispersionParams {
    /// Bit rate (Gbps).
    pub bit_rate_gbps: f64,
    /// Line-coding scheme.
    pub modulation: Modulation,
    /// Launch optical power (mW).
    pub optical_power_mw: f64,
    /// Carrier wavelength (nm).
    pub carrier_wavelength_nm: f64,
    /// Fiber span length (km).
    pub fiber_length_km: f64,
    /// Fiber attenuation coefficient (dB/km).
    pub attenuation_coeff_db_per_km: f64,
    /// Chromatic dispersion coefficient (ps/nm/km).
    pub dispersion_coeff_ps_nm_km: f64,
    /// Laser spectral width (nm), defaults to 0.1.
    pub spectral_width_nm: Option<f64>,
    /// Transmitter extinction ratio (dB). Accepted for completeness; the
    /// closed-form model does not depend on it.
    pub extinction_ratio_db: Option<f64>,
    /// Test pattern length in bits, defaults to 128.
    pub num_bits: Option<usize>,
    /// Seed for the pseudo-random test pattern. With a seed the run is
    /// reproducible; without one each run draws a fresh pattern.
    pub seed: Option<u64>,
}

impl DispersionParams {
    fn validate(&self) -> SimulationResult<()> {
        require_positive("bit_rate_gbps", self.bit_rate_gbps)?;
        require_positive("optical_power_mw", self.optical_power_mw)?;
        require_positive("carrier_wavelength_nm", self.carrier_wavelength_nm)?;
        require_non_negative("fiber_length_km", self.fiber_length_km)?;
        require_non_negative("attenuation_coeff_db_per_km", self.attenuation_coeff_db_per_km)?;
        require_finite("dispersion_coeff_ps_nm_km", self.dispersion_coeff_ps_nm_km)?;
        if let Some(width) = self.spectral_width_nm {
            require_positive("spectral_width_nm", width)?;
        }
        if self.num_bits == Some(0) {
            return Err(SimulationError::invalid("num_bits", "must be at least 1"));
        }
        Ok(())
    }
}

/// Metrics and numeric traces for one dispersion run.
#[derive(Clone, Debug)]
pub struct DispersionReport {
    /// Temporal pulse broadening from chromatic dispersion (ps).
    pub temporal_broadening_ps: f64,
    /// Total span attenuation (dB).
    pub attenuation_db: f64,
    /// Power at the far end of the span (mW).
    pub output_power_mw: f64,
    /// The test pattern actually transmitted.
    pub bit_sequence: Vec<u8>,
    /// Dispersed, attenuated waveform (amplitude samples).
    pub waveform: Vec<f64>,
    /// Successive bit-period slices of the waveform, for eye-diagram
    /// rendering downstream.
    pub eye_windows: Vec<Vec<f64>>,
    /// (frequency THz, power dB) pairs of the synthetic optical spectrum.
    pub spectrum_db: Vec<(f64, f64)>,
}

/// Draws a pseudo-random binary test pattern. A seeded generator makes the
/// pattern reproducible; entropy seeding keeps runs statistically
/// independent under concurrent load without any shared RNG.
pub fn generate_bit_sequence(num_bits: usize, seed: Option<u64>) -> Vec<u8> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..num_bits).map(|_| rng.gen_range(0..2u8)).collect()
}

/// Runs the dispersion model end to end.
pub fn simulate(params: &DispersionParams) -> SimulationResult<DispersionReport> {
    params.validate()?;
    debug!(
        modulation = ?params.modulation,
        fiber_length_km = params.fiber_length_km,
        "dispersion run"
    );

    let spectral_width_nm = params.spectral_width_nm.unwrap_or(DEFAULT_SPECTRAL_WIDTH_NM);
    let num_bits = params.num_bits.unwrap_or(DEFAULT_NUM_BITS);
    let bit_rate_bps = units::gigahertz_to_hertz(params.bit_rate_gbps);

    let bit_sequence = generate_bit_sequence(num_bits, params.seed);
    let clean_waveform = params.modulation.synthesize(&bit_sequence, SAMPLES_PER_BIT);

    // Δt = |D| · L · Δλ
    let temporal_broadening_ps =
        params.dispersion_coeff_ps_nm_km.abs() * params.fiber_length_km * spectral_width_nm;

    let attenuation_db = params.attenuation_coeff_db_per_km * params.fiber_length_km;
    let attenuation_linear = units::db_to_linear(-attenuation_db);
    let output_power_mw = params.optical_power_mw * attenuation_linear;

    // broadening as a fraction of one bit period sets the kernel spread
    let sigma = units::picoseconds_to_seconds(temporal_broadening_ps) * bit_rate_bps;
    let dispersed = if sigma > 0.0 {
        let kernel = gaussian_kernel(sigma.max(MIN_DISPERSION_SIGMA), SAMPLES_PER_BIT);
        convolve_same(&clean_waveform, &kernel)
    } else {
        // zero dispersion leaves the waveform untouched
        clean_waveform
    };

    let waveform: Vec<f64> = dispersed.iter().map(|s| s * attenuation_linear).collect();

    let eye_windows: Vec<Vec<f64>> = waveform
        .chunks_exact(SAMPLES_PER_BIT)
        .map(|window| window.to_vec())
        .collect();

    let spectrum_db = synthetic_spectrum(
        params.carrier_wavelength_nm,
        spectral_width_nm,
        output_power_mw,
    );

    require_finite("temporal_broadening_ps", temporal_broadening_ps)
        .map_err(|_| SimulationError::NonFinite("temporal_broadening_ps"))?;
    require_finite("output_power_mw", output_power_mw)
        .map_err(|_| SimulationError::NonFinite("output_power_mw"))?;

    Ok(DispersionReport {
        temporal_broadening_ps,
        attenuation_db,
        output_power_mw,
        bit_sequence,
        waveform,
        eye_windows,
        spectrum_db,
    })
}

/// Normalized Gaussian kernel sampled over [-3, 3]. Taps sum to one so the
/// convolution conserves waveform energy.
fn gaussian_kernel(sigma: f64, len: usize) -> Vec<f64> {
    let mut kernel: Vec<f64> = (0..len)
        .map(|i| {
            let x = -3.0 + 6.0 * i as f64 / (len - 1) as f64;
            (-0.5 * x * x / (sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for tap in &mut kernel {
        *tap /= sum;
    }
    kernel
}

/// Same-length convolution with zero padding at the edges.
fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let half = kernel.len() / 2;
    let mut out = vec![0.0; n];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &tap) in kernel.iter().enumerate() {
            let idx = i as isize + k as isize - half as isize;
            if idx >= 0 && (idx as usize) < n {
                acc += signal[idx as usize] * tap;
            }
        }
        *slot = acc;
    }
    out
}

/// Gaussian spectrum estimate centered at the carrier frequency, in dB
/// relative to the span output power.
fn synthetic_spectrum(
    carrier_wavelength_nm: f64,
    spectral_width_nm: f64,
    output_power_mw: f64,
) -> Vec<(f64, f64)> {
    let center_thz =
        SPEED_OF_LIGHT / units::nanometers_to_meters(carrier_wavelength_nm) / 1e12;
    let sigma_thz = spectral_width_nm / 100.0;
    (0..SPECTRUM_POINTS)
        .map(|i| {
            let f = center_thz - SPECTRUM_HALF_SPAN_THZ
                + 2.0 * SPECTRUM_HALF_SPAN_THZ * i as f64 / (SPECTRUM_POINTS - 1) as f64;
            let shape = (-0.5 * ((f - center_thz) / sigma_thz).powi(2)).exp();
            // floor keeps the far skirts at a large negative dB value
            // instead of -inf
            let power_db = 10.0 * (shape * output_power_mw).max(1e-30).log10();
            (f, power_db)
        })
        .collect()
}
