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
//! Per-scale convolution via the FFT convolution theorem: `Wx(a, t) =
//! IFFT(FFT(x) * conj(FFT(psi_a)))`, one wavelet evaluation and one inverse
//! FFT per scale, sharing a single forward FFT of the input across every
//! scale.
use crate::convolve::spectral_convolve_conj_normalize;
use crate::cwt::freqs::gen_psi;
use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use crate::fft::complex_forward;
use crate::pool::BufferPool;
use crate::schedule::{parallel_map, CancellationToken, PerfProfile};
use num_complex::Complex64;
use std::sync::Arc;

pub struct CwtExecutor {
    wavelet: Arc<dyn CwtWavelet>,
    scales: Vec<f64>,
    psi: Vec<f64>,
    execution_length: usize,
    l1_norm: bool,
}

impl CwtExecutor {
    pub fn new(
        wavelet: Arc<dyn CwtWavelet>,
        scales: Vec<f64>,
        execution_length: usize,
        l1_norm: bool,
    ) -> Result<Self, WaveletError> {
        if scales.iter().any(|&s| !(s.is_finite() && s > 0.0)) {
            return Err(WaveletError::InvalidFilter(
                "cwt scales must be finite and positive".into(),
            ));
        }
        let psi = gen_psi(execution_length)?;
        Ok(Self {
            wavelet,
            scales,
            psi,
            execution_length,
            l1_norm,
        })
    }

    pub fn length(&self) -> usize {
        self.execution_length
    }

    pub fn view_scales(&self) -> &[f64] {
        &self.scales
    }

    fn execute_impl(
        &self,
        signal_fft: &mut [Complex64],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Vec<Complex64>>, WaveletError> {
        if self.execution_length != signal_fft.len() {
            return Err(WaveletError::IncompatibleLength {
                expected: self.execution_length,
                actual: signal_fft.len(),
            });
        }

        complex_forward(signal_fft)?;
        let signal_fft: &[Complex64] = signal_fft;

        let n = self.execution_length;
        let threshold = PerfProfile::default().scale_parallel_threshold;
        let psi_pool = BufferPool::shared();

        // One scale's wavelet kernel, multiply, and inverse FFT. Each call
        // owns its own scratch buffers so scales can run independently on
        // the worker pool rather than serializing through shared state; the
        // scaled-psi scratch comes from the shared aligned buffer pool (C1)
        // and the multiply/inverse step runs through the pooled spectral
        // convolution (C3) rather than allocating a fresh result vector.
        let compute_scale = |idx: usize| -> Result<Vec<Complex64>, WaveletError> {
            let scale = self.scales[idx];
            let mut current_psi = psi_pool.acquire(n)?;
            for (dst, &p) in current_psi.iter_mut().zip(self.psi.iter()) {
                *dst = p * scale;
            }

            let wavelet_fft = self.wavelet.make_wavelet(&current_psi)?;
            psi_pool.release(current_psi);
            if wavelet_fft.len() != n {
                return Err(WaveletError::FftError(
                    "wavelet kernel returned the wrong length for the frequency grid".into(),
                ));
            }

            // `complex_inverse` below already divides by N, unlike the raw
            // radix/Bluestein kernels it wraps, so the 1/N factor other CWT
            // implementations fold in here is omitted: L1 keeps amplitude,
            // L2 additionally divides by sqrt(scale) for energy preservation.
            let norm_factor = if self.l1_norm { 1.0 } else { 1.0 / scale.sqrt() };

            spectral_convolve_conj_normalize(signal_fft, &wavelet_fft, norm_factor)
        };

        parallel_map(self.scales.len(), threshold, cancel, compute_scale)
    }

    /// Real-valued input: one complex CWT coefficient row per scale, each
    /// row the same length as `input`.
    pub fn execute(&self, input: &[f64]) -> Result<Vec<Vec<Complex64>>, WaveletError> {
        self.execute_cancellable(input, None)
    }

    /// As [`execute`](Self::execute), but stops early with
    /// [`WaveletError::Cancelled`] once `cancel` is observed cancelled
    /// before a scale's work has started.
    pub fn execute_cancellable(
        &self,
        input: &[f64],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Vec<Complex64>>, WaveletError> {
        if self.execution_length != input.len() {
            return Err(WaveletError::IncompatibleLength {
                expected: self.execution_length,
                actual: input.len(),
            });
        }
        let mut signal_fft: Vec<Complex64> =
            input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.execute_impl(&mut signal_fft, cancel)
    }

    /// Complex-valued input, for analyzing an already-analytic signal.
    pub fn execute_complex(&self, input: &[Complex64]) -> Result<Vec<Vec<Complex64>>, WaveletError> {
        if self.execution_length != input.len() {
            return Err(WaveletError::IncompatibleLength {
                expected: self.execution_length,
                actual: input.len(),
            });
        }
        let mut signal_fft = input.to_vec();
        self.execute_impl(&mut signal_fft, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwt::wavelets::morlet::MorletWavelet;

    fn chirp(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                (2.0 * std::f64::consts::PI * (5.0 + 40.0 * t) * t).sin()
            })
            .collect()
    }

    #[test]
    fn rejects_length_mismatch() {
        let wavelet: Arc<dyn CwtWavelet> = Arc::new(MorletWavelet::default());
        let executor = CwtExecutor::new(wavelet, vec![1.0, 2.0], 64, true).unwrap();
        assert!(executor.execute(&vec![0.0; 32]).is_err());
    }

    #[test]
    fn rejects_non_positive_scale() {
        let wavelet: Arc<dyn CwtWavelet> = Arc::new(MorletWavelet::default());
        assert!(CwtExecutor::new(wavelet, vec![0.0], 64, true).is_err());
    }

    #[test]
    fn chirp_instantaneous_frequency_tracks_upward() {
        let n = 2048;
        let signal = chirp(n);
        let wavelet: Arc<dyn CwtWavelet> = Arc::new(MorletWavelet::default());
        let scales = vec![1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        let executor = CwtExecutor::new(wavelet, scales.clone(), n, false).unwrap();
        let coeffs = executor.execute(&signal).unwrap();

        // At each of a handful of time points, the scale with the largest
        // magnitude should trend from small (high frequency) early in the
        // chirp to large (low frequency) late in the chirp... but this
        // chirp increases frequency over time, so the dominant scale should
        // trend downward as t grows.
        let sample_times = [n / 8, n / 2, n - n / 8];
        let mut dominant_scales = Vec::new();
        for &t in &sample_times {
            let (best_scale_idx, _) = coeffs
                .iter()
                .enumerate()
                .map(|(i, row)| (i, row[t].norm()))
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
                .unwrap();
            dominant_scales.push(scales[best_scale_idx]);
        }
        assert!(dominant_scales[0] >= dominant_scales[1]);
        assert!(dominant_scales[1] >= dominant_scales[2]);
    }
}
