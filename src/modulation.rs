//! Line-coding schemes and waveform synthesis.

use serde::Deserialize;

/// Line-coding scheme for the synthetic transmit waveform.
///
/// Adding a scheme (DPSK, QPSK, ...) means adding a variant and a synthesis
/// arm in [`Modulation::synthesize`]; the dispersion and attenuation
/// pipeline is scheme-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modulation {
    /// Non-return-to-zero: amplitude held for the full bit period.
    Nrz,
    /// Return-to-zero: a one pulses the first half of the bit period.
    Rz,
}

impl Modulation {
    /// Builds a uniformly sampled amplitude waveform from a bit sequence.
    ///
    /// The result has `bits.len() * samples_per_bit` samples.
    pub fn synthesize(&self, bits: &[u8], samples_per_bit: usize) -> Vec<f64> {
        let mut waveform = vec![0.0; bits.len() * samples_per_bit];
        for (i, &bit) in bits.iter().enumerate() {
            if bit == 0 {
                continue;
            }
            let start = i * samples_per_bit;
            match self {
                Modulation::Nrz => {
                    waveform[start..start + samples_per_bit].fill(1.0);
                }
                Modulation::Rz => {
                    waveform[start..start + samples_per_bit / 2].fill(1.0);
                }
            }
        }
        waveform
    }
}
