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
//! FFT kernel: an in-place complex transform with a power-of-two fast path,
//! a Bluestein fallback for arbitrary lengths, and a real-input variant that
//! halves the work for real-valued signals.
mod bluestein;
mod radix;
mod real;
mod twiddles;

pub use real::{real_forward, real_inverse};

use crate::error::WaveletError;
use num_complex::Complex64;

/// Forward complex FFT, in place. Dispatches to the radix-2 kernel when
/// `buf.len()` is a power of two, Bluestein's algorithm otherwise.
pub fn complex_forward(buf: &mut [Complex64]) -> Result<(), WaveletError> {
    if buf.len().is_power_of_two() {
        radix::fft_radix2_inplace(buf, false)
    } else {
        bluestein::fft_bluestein_inplace(buf, false)
    }
}

/// Inverse complex FFT, in place, including the `1/n` normalization (unlike
/// the lower-level kernels, which leave scaling to their caller).
pub fn complex_inverse(buf: &mut [Complex64]) -> Result<(), WaveletError> {
    let n = buf.len();
    if n == 0 {
        return Ok(());
    }
    if n.is_power_of_two() {
        radix::fft_radix2_inplace(buf, true)?;
    } else {
        bluestein::fft_bluestein_inplace(buf, true)?;
    }
    let scale = 1.0 / n as f64;
    for v in buf.iter_mut() {
        *v *= scale;
    }
    Ok(())
}

/// Smallest power of two `>= n`. Used throughout the convolution/pooling
/// paths to size FFT work buffers.
pub fn next_pow2(n: usize) -> usize {
    n.next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_correctly_for_pow2_and_non_pow2() {
        for &n in &[8usize, 9, 16, 17, 100] {
            let input: Vec<Complex64> = (0..n)
                .map(|i| Complex64::new((i as f64).sin(), 0.0))
                .collect();
            let mut buf = input.clone();
            complex_forward(&mut buf).unwrap();
            complex_inverse(&mut buf).unwrap();
            for (a, b) in buf.iter().zip(input.iter()) {
                assert!((a - b).norm() < 1e-7, "n={n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn next_pow2_rounds_up() {
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(5), 8);
        assert_eq!(next_pow2(8), 8);
    }

    #[test]
    fn bluestein_impulse_spectrum_has_unit_magnitude() {
        let n = 500;
        let mut buf = vec![Complex64::new(0.0, 0.0); n];
        buf[0] = Complex64::new(1.0, 0.0);
        complex_forward(&mut buf).unwrap();
        for v in &buf {
            assert!((v.norm() - 1.0).abs() <= 1e-10, "{} deviates from unit magnitude", v.norm());
        }
    }
}
