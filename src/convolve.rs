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
//! FFT-domain linear convolution: a single whole-signal transform rather
//! than the partitioned/streaming scheme a realtime audio engine needs,
//! since every caller in this crate already has the full signal in hand.
use crate::cwt::spectrum::spectrum_arithmetic;
use crate::error::WaveletError;
use crate::fft::{complex_forward, complex_inverse, next_pow2};
use crate::pool::ComplexBufferPool;
use num_complex::Complex64;

/// Linear convolution `x * h`, length `x.len() + h.len() - 1`, computed by
/// zero-padding both operands to `next_pow2(N+K-1)`, transforming,
/// multiplying pointwise, and transforming back.
pub fn convolve_linear(x: &[f64], h: &[f64]) -> Result<Vec<f64>, WaveletError> {
    if x.is_empty() || h.is_empty() {
        return Err(WaveletError::InvalidSignal(
            "convolution operands must be non-empty".into(),
        ));
    }
    let out_len = x.len() + h.len() - 1;
    let fft_len = next_pow2(out_len);
    let pool = ComplexBufferPool::shared();

    // Buffers come pre-zeroed (pool hit re-zeroes, pool miss is a fresh
    // `alloc_zeroed`), so only the operand's own samples need writing.
    let mut xf = pool.acquire(fft_len)?;
    for (dst, &v) in xf.iter_mut().zip(x.iter()) {
        *dst = Complex64::new(v, 0.0);
    }
    let mut hf = pool.acquire(fft_len)?;
    for (dst, &v) in hf.iter_mut().zip(h.iter()) {
        *dst = Complex64::new(v, 0.0);
    }

    let result = (|| -> Result<Vec<f64>, WaveletError> {
        complex_forward(&mut xf)?;
        complex_forward(&mut hf)?;
        for (a, b) in xf.iter_mut().zip(hf.iter()) {
            *a *= b;
        }
        complex_inverse(&mut xf)?;
        Ok(xf[..out_len].iter().map(|c| c.re).collect())
    })();

    pool.release(hf);
    pool.release(xf);
    result
}

/// Scale-normalized convolution for the CWT engine: `h` is pre-divided by
/// `sqrt(scale)` before the same FFT convolution `convolve_linear` performs,
/// matching the L2 daughter-wavelet normalization `psi_s(t) = psi(t/s)/sqrt(s)`.
pub fn convolve_cwt_scaled(x: &[f64], h: &[f64], scale: f64) -> Result<Vec<f64>, WaveletError> {
    if scale <= 0.0 || !scale.is_finite() {
        return Err(WaveletError::InvalidSignal(format!(
            "cwt scale must be finite and positive, got {scale}"
        )));
    }
    let inv_sqrt_scale = 1.0 / scale.sqrt();
    let scaled_h: Vec<f64> = h.iter().map(|&v| v * inv_sqrt_scale).collect();
    convolve_linear(x, &scaled_h)
}

/// Already-frequency-domain convolution: `dst = IFFT(signal_fft *
/// conj(wavelet_fft) * normalize_value)`. This is the CWT engine's per-scale
/// step — the daughter wavelet is built directly in the frequency domain
/// (see [`crate::cwt::wavelet::CwtWavelet::make_wavelet`]) rather than
/// sampled in time and transformed, so it joins the convolution theorem
/// after the forward FFT that [`convolve_linear`] performs internally. The
/// output scratch buffer is drawn from the shared [`ComplexBufferPool`]
/// rather than allocated fresh, since the executor calls this once per scale.
pub fn spectral_convolve_conj_normalize(
    signal_fft: &[Complex64],
    wavelet_fft: &[Complex64],
    normalize_value: f64,
) -> Result<Vec<Complex64>, WaveletError> {
    if signal_fft.len() != wavelet_fft.len() {
        return Err(WaveletError::IncompatibleLength {
            expected: signal_fft.len(),
            actual: wavelet_fft.len(),
        });
    }
    let pool = ComplexBufferPool::shared();
    let mut dst = pool.acquire(signal_fft.len())?;
    let spectrum = spectrum_arithmetic();
    spectrum.mul_by_b_conj_normalize(&mut dst, signal_fft, wavelet_fft, normalize_value);
    let result = complex_inverse(&mut dst).map(|_| dst.to_vec());
    pool.release(dst);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_direct_convolution_definition() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let h = [1.0, 0.5];
        let got = convolve_linear(&x, &h).unwrap();
        let expected = [1.0, 2.5, 4.0, 5.5, 2.0];
        for (a, b) in got.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn identity_kernel_passes_signal_through() {
        let x = [3.0, -1.0, 4.0, 1.0, 5.0];
        let h = [1.0];
        let got = convolve_linear(&x, &h).unwrap();
        for (a, b) in got.iter().zip(x.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn scaled_cwt_convolution_divides_kernel_by_sqrt_scale() {
        let x = [1.0, 0.0, 0.0, 0.0];
        let h = [2.0];
        let got = convolve_cwt_scaled(&x, &h, 4.0).unwrap();
        assert!((got[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let x = [1.0, 2.0];
        let h = [1.0];
        assert!(convolve_cwt_scaled(&x, &h, 0.0).is_err());
        assert!(convolve_cwt_scaled(&x, &h, -1.0).is_err());
    }

    #[test]
    fn rejects_empty_operands() {
        assert!(convolve_linear(&[], &[1.0]).is_err());
        assert!(convolve_linear(&[1.0], &[]).is_err());
    }

    #[test]
    fn spectral_convolve_rejects_length_mismatch() {
        let signal_fft = vec![Complex64::new(1.0, 0.0); 8];
        let wavelet_fft = vec![Complex64::new(1.0, 0.0); 4];
        assert!(spectral_convolve_conj_normalize(&signal_fft, &wavelet_fft, 1.0).is_err());
    }

    #[test]
    fn spectral_convolve_identity_wavelet_recovers_signal() {
        let n = 16;
        let mut signal_fft: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new(i as f64, 0.0))
            .collect();
        let original = signal_fft.clone();
        complex_forward(&mut signal_fft).unwrap();
        let wavelet_fft = vec![Complex64::new(1.0, 0.0); n];

        let got = spectral_convolve_conj_normalize(&signal_fft, &wavelet_fft, 1.0).unwrap();
        for (a, b) in got.iter().zip(original.iter()) {
            assert!((a.re - b.re).abs() < 1e-9, "{} vs {}", a.re, b.re);
            assert!(a.im.abs() < 1e-9);
        }
    }

    #[test]
    fn spectral_convolve_reuses_pooled_buffers() {
        let pool = ComplexBufferPool::shared();
        pool.clear();
        let n = 32;
        let signal_fft = vec![Complex64::new(1.0, 0.0); n];
        let wavelet_fft = vec![Complex64::new(0.5, 0.0); n];
        for _ in 0..4 {
            spectral_convolve_conj_normalize(&signal_fft, &wavelet_fft, 1.0).unwrap();
        }
        let stats = pool.stats();
        assert!(stats.hits >= 1, "expected at least one pool hit, got {stats:?}");
    }
}
