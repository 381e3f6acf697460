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
//! Real-input FFT: packs a length-`2M` real signal into `M` complex samples
//! and recovers the full-length complex spectrum from one half-size
//! transform instead of a full-size complex one.
use crate::error::WaveletError;
use crate::fft::{complex_forward, complex_inverse};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Forward real FFT. `signal.len()` must be even; returns the full
/// length-`N` complex spectrum (not just the non-redundant half), so callers
/// can feed it directly into the same pointwise-multiply code path used for
/// complex spectra.
pub fn real_forward(signal: &[f64]) -> Result<Vec<Complex64>, WaveletError> {
    let n = signal.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n % 2 != 0 {
        return Err(WaveletError::FftError(format!(
            "real fft requires an even length, got {n}"
        )));
    }
    let m = n / 2;
    let mut packed: Vec<Complex64> = (0..m)
        .map(|i| Complex64::new(signal[2 * i], signal[2 * i + 1]))
        .collect();
    complex_forward(&mut packed)?;

    let mut spectrum = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..m {
        let km = (m - k) % m;
        let zk = packed[k];
        let zkm = packed[km].conj();
        let even = (zk + zkm) * 0.5;
        let odd = (zk - zkm) * Complex64::new(0.0, -0.5);
        let theta = -PI * (k as f64) / (m as f64);
        let twiddle = Complex64::new(theta.cos(), theta.sin());
        spectrum[k] = even + odd * twiddle;
        if k > 0 {
            spectrum[n - k] = spectrum[k].conj();
        }
    }
    // The k-loop above never touches the Nyquist bin (k == m); it is real
    // for a real input, so compute it directly.
    let mut nyquist = 0.0;
    for (i, &s) in signal.iter().enumerate() {
        nyquist += if i % 2 == 0 { s } else { -s };
    }
    spectrum[m] = Complex64::new(nyquist, 0.0);
    Ok(spectrum)
}

/// Inverse of [`real_forward`]: takes the full length-`n` conjugate-symmetric
/// spectrum and reconstructs the real signal. The caller is responsible for
/// the spectrum actually being conjugate-symmetric (a spectrum produced by
/// `real_forward`, or one built from it by symmetric pointwise operations,
/// always is); this does not re-check symmetry.
pub fn real_inverse(spectrum: &[Complex64]) -> Result<Vec<f64>, WaveletError> {
    let n = spectrum.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n % 2 != 0 {
        return Err(WaveletError::FftError(format!(
            "real ifft requires an even length, got {n}"
        )));
    }
    let m = n / 2;
    let mut packed = vec![Complex64::new(0.0, 0.0); m];
    for k in 0..m {
        let theta = PI * (k as f64) / (m as f64);
        let twiddle = Complex64::new(theta.cos(), theta.sin());
        let odd_part = (spectrum[k] - spectrum[(n - k) % n].conj()) * 0.5 * twiddle;
        let even_part = (spectrum[k] + spectrum[(n - k) % n].conj()) * 0.5;
        packed[k] = even_part + Complex64::new(0.0, 1.0) * odd_part;
    }
    complex_inverse(&mut packed)?;

    let mut out = Vec::with_capacity(n);
    for z in packed.iter() {
        out.push(z.re);
        out.push(z.im);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_then_inverse_recovers_signal() {
        let signal: Vec<f64> = (0..32).map(|i| (i as f64 * 0.21).sin()).collect();
        let spectrum = real_forward(&signal).unwrap();
        let recovered = real_inverse(&spectrum).unwrap();
        for (a, b) in signal.iter().zip(recovered.iter()) {
            assert!((a - b).abs() < 1e-8, "{a} vs {b}");
        }
    }

    #[test]
    fn matches_complex_fft_on_zero_imaginary_input() {
        let signal: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let spectrum = real_forward(&signal).unwrap();
        let mut complex_input: Vec<Complex64> =
            signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        complex_forward(&mut complex_input).unwrap();
        for (a, b) in spectrum.iter().zip(complex_input.iter()) {
            assert!((a - b).norm() < 1e-8, "{a} vs {b}");
        }
    }
}
