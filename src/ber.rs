//! Gaussian tail probability and bit-error-rate helpers.

/// Complementary error function, Abramowitz & Stegun approximation 7.1.26.
///
/// Accurate to about 1.5e-7 over the whole real line, and free of the
/// catastrophic cancellation that `1 - erf(x)` suffers for large `x`.
pub fn erfc(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.3275911 * x.abs());
    let poly = t * (0.254829592
        + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let result = poly * (-x * x).exp();
    if x >= 0.0 {
        result
    } else {
        2.0 - result
    }
}

/// Tail probability of the standard normal distribution, `Q(x) = 0.5·erfc(x/√2)`.
pub fn q_function(x: f64) -> f64 {
    0.5 * erfc(x / std::f64::consts::SQRT_2)
}

/// Bit-error-rate for a given signal-to-noise ratio.
///
/// `snr` is a dimensionless linear ratio, not dB; the caller converts.
/// Monotonically decreasing: 0.5 at zero SNR, approaching 0 as SNR grows.
pub fn bit_error_rate(snr: f64) -> f64 {
    q_function(snr)
}
