//! Integration tests: realistic end-to-end optical link scenarios.
//!
//! These tests model complete link designs (free-space link, metro fiber
//! span, amplified long-haul span) and verify the published metrics.

use opticlink::{
    amplifier, dispersion, link, DispersionParams, EdfaParams, LinkBudgetParams, Medium,
    Modulation,
};

/// Helper: assert float equality within tolerance
fn assert_approx(actual: f64, expected: f64, tol: f64, msg: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{msg}: expected {expected:.6}, got {actual:.6}"
    );
}

/// Free-space link across 1 km of clear air:
/// 10 mW source, 0.8 A/W detector, 10 GHz receiver at 300 K.
///
/// Verifies the received power against the closed form and that SNR and
/// BER land in their valid ranges.
#[test]
fn free_space_air_link() {
    let params = LinkBudgetParams {
        optical_power_mw: 10.0,
        wavelength_nm: 1550.0,
        spectral_width_nm: Some(0.1),
        sensitivity_a_per_w: 0.8,
        dark_current_na: 10.0,
        bandwidth_ghz: 10.0,
        noise_temperature_k: 300.0,
        distance_m: 1000.0,
        medium: Medium::Air,
    };

    let report = link::simulate(&params).unwrap();

    // 10 * exp(-0.0001 * 1000) ~ 9.0484 mW
    assert_approx(report.received_power_mw, 9.048374, 1e-4, "Received power");
    assert!(report.snr.is_finite() && report.snr >= 0.0, "SNR valid");
    assert!(
        report.ber >= 0.0 && report.ber <= 0.5,
        "BER in [0, 0.5], got {}",
        report.ber
    );
    // 10 nA dark current across 10 GHz puts 200 W of shot noise in the
    // denominator, so this receiver is noise-dominated: SNR is tiny and
    // the BER sits just under the 0.5 coin-flip ceiling
    assert!(report.snr < 1e-3, "SNR should be tiny, got {}", report.snr);
    assert!(
        report.ber > 0.49 && report.ber < 0.5,
        "BER should approach 0.5 for a noise-dominated link, got {}",
        report.ber
    );
}

/// The same link through fiber and vacuum: the simplified atmospheric
/// coefficient exceeds the 0.2 dB/km fiber figure, and vacuum loses
/// almost nothing.
#[test]
fn medium_ordering_over_one_kilometer() {
    let mut received = Vec::new();
    for medium in [Medium::Fiber, Medium::Air, Medium::Vacuum] {
        let params = LinkBudgetParams {
            optical_power_mw: 10.0,
            wavelength_nm: 1550.0,
            spectral_width_nm: None,
            sensitivity_a_per_w: 0.8,
            dark_current_na: 10.0,
            bandwidth_ghz: 10.0,
            noise_temperature_k: 300.0,
            distance_m: 1000.0,
            medium,
        };
        received.push(link::simulate(&params).unwrap().received_power_mw);
    }
    // α: air 1e-4 /m > fiber 0.2/4.343/1000 ~ 4.6e-5 /m > vacuum 1e-6 /m
    assert!(received[1] < received[0], "air loses more than fiber");
    assert!(received[0] < received[2], "fiber loses more than vacuum");
    assert!(received[2] < 10.0, "vacuum still attenuates slightly");
}

/// Metro fiber span: 10 Gbps NRZ over 50 km of G.652 fiber.
///
/// Verifies broadening, attenuation, output power, and the shape of the
/// numeric traces handed to the rendering layer.
#[test]
fn metro_fiber_span() {
    let params = DispersionParams {
        bit_rate_gbps: 10.0,
        modulation: Modulation::Nrz,
        optical_power_mw: 1.0,
        carrier_wavelength_nm: 1550.0,
        fiber_length_km: 50.0,
        attenuation_coeff_db_per_km: 0.2,
        dispersion_coeff_ps_nm_km: 17.0,
        spectral_width_nm: Some(0.1),
        extinction_ratio_db: None,
        num_bits: None,
        seed: Some(1234),
    };

    let report = dispersion::simulate(&params).unwrap();

    assert_approx(report.temporal_broadening_ps, 85.0, 1e-9, "Broadening");
    assert_approx(report.attenuation_db, 10.0, 1e-9, "Attenuation");
    assert_approx(report.output_power_mw, 0.1, 1e-9, "Output power");

    assert_eq!(report.bit_sequence.len(), 128);
    assert_eq!(report.waveform.len(), 128 * 16);
    assert_eq!(report.eye_windows.len(), 128);
    assert_eq!(report.spectrum_db.len(), 1000);
    assert!(report.waveform.iter().all(|s| s.is_finite()));
    assert!(report.spectrum_db.iter().all(|(f, db)| f.is_finite() && db.is_finite()));
}

/// A dispersion-shifted span (D = 0) must only attenuate the waveform.
#[test]
fn dispersion_shifted_fiber_preserves_waveform_shape() {
    let params = DispersionParams {
        bit_rate_gbps: 10.0,
        modulation: Modulation::Rz,
        optical_power_mw: 1.0,
        carrier_wavelength_nm: 1550.0,
        fiber_length_km: 40.0,
        attenuation_coeff_db_per_km: 0.25,
        dispersion_coeff_ps_nm_km: 0.0,
        spectral_width_nm: None,
        extinction_ratio_db: None,
        num_bits: Some(64),
        seed: Some(99),
    };

    let report = dispersion::simulate(&params).unwrap();
    assert_eq!(report.temporal_broadening_ps, 0.0);

    let attenuation = 10f64.powf(-report.attenuation_db / 10.0);
    let bits = dispersion::generate_bit_sequence(64, Some(99));
    let clean = Modulation::Rz.synthesize(&bits, dispersion::SAMPLES_PER_BIT);
    for (out, reference) in report.waveform.iter().zip(clean.iter()) {
        assert_approx(*out, reference * attenuation, 1e-12, "Sample");
    }
}

/// Long-haul booster EDFA: -20 dBm input, 100 mW pump, 10 m doped fiber.
#[test]
fn longhaul_booster_edfa() {
    let params = EdfaParams {
        input_power_dbm: -20.0,
        signal_wavelength_nm: 1550.0,
        pump_power_mw: 100.0,
        pump_wavelength_nm: 980.0,
        fiber_length_m: 10.0,
        er_concentration_ppm: 1000.0,
        saturation_power_mw: 10.0,
    };

    let report = amplifier::simulate(&params).unwrap();

    assert!(report.gain_db.is_finite());
    assert!(report.output_power_dbm.is_finite());
    assert!(report.noise_figure_db.is_finite());
    assert!(
        report.noise_figure_db >= 3.0,
        "NF below quantum limit: {}",
        report.noise_figure_db
    );
    // 30 dB small-signal corner, barely compressed at -20 dBm input
    assert_approx(report.small_signal_gain_db, 30.0, 1e-9, "Small-signal gain");
    assert!(report.gain_db > 29.9 && report.gain_db < 30.0);
    // output around +10 dBm
    assert!(report.output_power_dbm > 9.9 && report.output_power_dbm < 10.0);
    assert_eq!(report.gain_spectrum.len(), 100);
}

/// Driving the amplifier into saturation compresses the gain
/// monotonically.
#[test]
fn edfa_gain_compression_curve() {
    let mut previous_gain = f64::INFINITY;
    for input_dbm in [-40.0, -30.0, -20.0, -10.0, 0.0, 10.0, 13.0] {
        let params = EdfaParams {
            input_power_dbm: input_dbm,
            signal_wavelength_nm: 1550.0,
            pump_power_mw: 100.0,
            pump_wavelength_nm: 980.0,
            fiber_length_m: 10.0,
            er_concentration_ppm: 1000.0,
            saturation_power_mw: 10.0,
        };
        let gain = amplifier::simulate(&params).unwrap().gain_db;
        assert!(
            gain < previous_gain,
            "gain must fall with input power: {input_dbm} dBm gave {gain} dB"
        );
        previous_gain = gain;
    }
}

/// Division-hazard inputs are rejected as validation errors, never
/// returned as NaN metrics.
#[test]
fn degenerate_inputs_rejected() {
    let good = EdfaParams {
        input_power_dbm: -20.0,
        signal_wavelength_nm: 1550.0,
        pump_power_mw: 100.0,
        pump_wavelength_nm: 980.0,
        fiber_length_m: 10.0,
        er_concentration_ppm: 1000.0,
        saturation_power_mw: 10.0,
    };

    let mut no_pump = good.clone();
    no_pump.pump_power_mw = 0.0;
    assert!(amplifier::simulate(&no_pump).is_err());

    let mut no_saturation = good.clone();
    no_saturation.saturation_power_mw = 0.0;
    assert!(amplifier::simulate(&no_saturation).is_err());

    let mut nan_input = good;
    nan_input.input_power_dbm = f64::NAN;
    assert!(amplifier::simulate(&nan_input).is_err());
}
