/*
 * // Copyright (c) Radzivon Bartoshyk 12/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Continuous wavelet transform: scale generation, per-scale FFT
//! convolution, and the scale-to-frequency conversion used to label a
//! scalogram's axis.
pub mod executor;
pub(crate) mod freqs;
pub(crate) mod scale_bounds;
mod scales;
pub(crate) mod spectrum;
pub mod wavelet;
pub mod wavelets;

pub use executor::CwtExecutor;
pub use freqs::scale_to_frequencies;
pub use scale_bounds::{find_min_max_scales, MinMaxScale};
pub use wavelet::CwtWavelet;
pub use wavelets::ContinuousWavelet;

use crate::error::WaveletError;
use num_complex::Complex64;
use std::sync::Arc;

/// How [`cwt`] distributes scales across the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleType {
    /// `nv` voices per octave, the standard scalogram axis.
    Log,
    /// Evenly spaced, covering the same octave range `Log` would.
    Linear,
}

/// Per-call CWT configuration.
#[derive(Debug, Clone, Copy)]
pub struct CwtOptions {
    pub scale_type: ScaleType,
    /// Voices per octave (only meaningful for [`ScaleType::Log`], but also
    /// used by [`ScaleType::Linear`] to derive the same octave span).
    pub nv: f64,
    /// `true` for amplitude-preserving (L1) normalization, `false` for
    /// energy-preserving (L2).
    pub l1_norm: bool,
}

impl Default for CwtOptions {
    fn default() -> Self {
        Self {
            scale_type: ScaleType::Log,
            nv: 8.0,
            l1_norm: false,
        }
    }
}

fn generate_scales(
    wavelet: &Arc<dyn CwtWavelet>,
    options: CwtOptions,
) -> Result<Vec<f64>, WaveletError> {
    let bounds = find_min_max_scales(wavelet, 0.5)?;
    match options.scale_type {
        ScaleType::Log => scales::log_piecewise_scales(bounds.min, bounds.max, options.nv),
        ScaleType::Linear => scales::linear_scales(bounds.min, bounds.max, options.nv),
    }
}

/// Run the continuous wavelet transform over `signal`: automatically
/// derives a scale grid bounding the wavelet's valid frequency-domain
/// support, then runs one FFT-domain convolution per scale. Returns one
/// complex coefficient row per scale, each the same length as `signal`,
/// alongside the scales actually used.
pub fn cwt(
    signal: &[f64],
    wavelet: ContinuousWavelet,
    options: CwtOptions,
) -> Result<(Vec<Vec<Complex64>>, Vec<f64>), WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::InvalidSignal(
            "cwt requires a non-empty signal".into(),
        ));
    }
    if signal.iter().any(|v| !v.is_finite()) {
        return Err(WaveletError::InvalidSignal(
            "cwt input contains a non-finite sample".into(),
        ));
    }
    if !(options.nv.is_finite() && options.nv > 0.0) {
        return Err(WaveletError::InvalidFilter(
            "voices-per-octave (nv) must be finite and positive".into(),
        ));
    }

    let wavelet = wavelet.build()?;
    let scales = generate_scales(&wavelet, options)?;
    let executor = CwtExecutor::new(wavelet, scales, signal.len(), options.l1_norm)?;
    let coeffs = executor.execute(signal)?;
    let used_scales = executor.view_scales().to_vec();
    Ok((coeffs, used_scales))
}

/// Like [`cwt`], but runs the transform over a caller-supplied scale set
/// instead of auto-deriving one from the wavelet's frequency-domain support.
/// `options.scale_type` and `options.nv` are ignored; only `options.l1_norm`
/// applies. Returns one complex coefficient row per entry of `scales`, each
/// the same length as `signal`.
pub fn cwt_with_scales(
    signal: &[f64],
    wavelet: ContinuousWavelet,
    scales: &[f64],
    options: CwtOptions,
) -> Result<Vec<Vec<Complex64>>, WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::InvalidSignal(
            "cwt requires a non-empty signal".into(),
        ));
    }
    if signal.iter().any(|v| !v.is_finite()) {
        return Err(WaveletError::InvalidSignal(
            "cwt input contains a non-finite sample".into(),
        ));
    }
    if scales.is_empty() {
        return Err(WaveletError::InvalidFilter(
            "cwt_with_scales requires at least one scale".into(),
        ));
    }

    let wavelet = wavelet.build()?;
    let executor = CwtExecutor::new(wavelet, scales.to_vec(), signal.len(), options.l1_norm)?;
    executor.execute(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(n: usize, freq: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / n as f64).sin())
            .collect()
    }

    #[test]
    fn rejects_empty_signal() {
        assert!(cwt(&[], ContinuousWavelet::default(), CwtOptions::default()).is_err());
    }

    #[test]
    fn rejects_non_finite_signal() {
        let signal = vec![0.0, f64::NAN];
        assert!(cwt(&signal, ContinuousWavelet::default(), CwtOptions::default()).is_err());
    }

    #[test]
    fn produces_one_row_per_scale_and_preserves_length() {
        let signal = sine(256, 10.0);
        let (coeffs, scales) =
            cwt(&signal, ContinuousWavelet::default(), CwtOptions::default()).unwrap();
        assert_eq!(coeffs.len(), scales.len());
        for row in &coeffs {
            assert_eq!(row.len(), signal.len());
        }
    }

    #[test]
    fn dog_and_paul_wavelets_also_run() {
        let signal = sine(256, 6.0);
        for wavelet in [ContinuousWavelet::Dog(2), ContinuousWavelet::Paul(4)] {
            let (coeffs, _) = cwt(&signal, wavelet, CwtOptions::default()).unwrap();
            assert!(!coeffs.is_empty());
        }
    }

    #[test]
    fn with_scales_rejects_empty_scale_set() {
        let signal = sine(64, 5.0);
        assert!(cwt_with_scales(
            &signal,
            ContinuousWavelet::default(),
            &[],
            CwtOptions::default()
        )
        .is_err());
    }

    #[test]
    fn with_scales_produces_one_row_per_requested_scale() {
        let requested = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        let signal = sine(256, 10.0);
        let coeffs = cwt_with_scales(
            &signal,
            ContinuousWavelet::default(),
            &requested,
            CwtOptions::default(),
        )
        .unwrap();
        assert_eq!(coeffs.len(), requested.len());
        for row in &coeffs {
            assert_eq!(row.len(), signal.len());
        }
    }

    #[test]
    fn with_scales_chirp_dominant_scale_tracks_instantaneous_frequency() {
        let n = 2048;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                (2.0 * std::f64::consts::PI * (5.0 + 40.0 * t) * t).sin()
            })
            .collect();
        let requested = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];

        let coeffs = cwt_with_scales(
            &signal,
            ContinuousWavelet::Morlet(13.4),
            &requested,
            CwtOptions::default(),
        )
        .unwrap();

        let sample_times = [n / 8, n / 2, n - n / 8];
        let mut dominant = Vec::new();
        for &t in &sample_times {
            let (best_idx, _) = coeffs
                .iter()
                .enumerate()
                .map(|(i, row)| (i, row[t].norm()))
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
                .unwrap();
            dominant.push(requested[best_idx]);
        }
        assert!(dominant[0] >= dominant[1]);
        assert!(dominant[1] >= dominant[2]);
    }
}
