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
use crate::error::WaveletError;
use crate::fft::twiddles::TwiddleCache;
use num_complex::Complex64;

/// Bit-reversal permutation of `buf`, in place. `n` must be a power of two.
fn bit_reverse_permute(buf: &mut [Complex64]) {
    let n = buf.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            buf.swap(i, j);
        }
    }
}

/// In-place iterative radix-2 decimation-in-time FFT.
///
/// `inverse` selects the sign convention: forward uses `exp(-i*2*pi*k/n)`,
/// inverse uses the conjugate and leaves the `1/n` scaling to the caller
/// (matching the textbook convention and the teacher's own forward/inverse
/// pairing, which never double-applies a normalization inside the kernel).
pub fn fft_radix2_inplace(buf: &mut [Complex64], inverse: bool) -> Result<(), WaveletError> {
    let n = buf.len();
    if n == 0 {
        return Ok(());
    }
    if !n.is_power_of_two() {
        return Err(WaveletError::FftError(format!(
            "radix-2 fft requires a power-of-two length, got {n}"
        )));
    }
    bit_reverse_permute(buf);

    let mut stage_len = 2usize;
    while stage_len <= n {
        let half = stage_len / 2;
        let half_twiddles = TwiddleCache::half_twiddles(stage_len);
        let stride = n / stage_len;
        for block in buf.chunks_exact_mut(stage_len) {
            for k in 0..half {
                let w = if inverse {
                    half_twiddles[k].conj()
                } else {
                    half_twiddles[k]
                };
                let top = block[k];
                let bot = block[k + half] * w;
                block[k] = top + bot;
                block[k + half] = top - bot;
            }
        }
        let _ = stride;
        stage_len <<= 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dft_naive(input: &[Complex64], inverse: bool) -> Vec<Complex64> {
        let n = input.len();
        let sign = if inverse { 1.0 } else { -1.0 };
        (0..n)
            .map(|k| {
                let mut acc = Complex64::new(0.0, 0.0);
                for (t, &x) in input.iter().enumerate() {
                    let theta = sign * 2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
                    acc += x * Complex64::new(theta.cos(), theta.sin());
                }
                acc
            })
            .collect()
    }

    #[test]
    fn matches_naive_dft_on_random_input() {
        let n = 32;
        let input: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((i as f64 * 0.37).sin(), (i as f64 * 0.19).cos()))
            .collect();
        let expected = dft_naive(&input, false);
        let mut got = input.clone();
        fft_radix2_inplace(&mut got, false).unwrap();
        for (a, b) in got.iter().zip(expected.iter()) {
            assert!((a - b).norm() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn forward_then_inverse_recovers_input_up_to_scale() {
        let n = 64;
        let input: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((i as f64).sin(), 0.0))
            .collect();
        let mut buf = input.clone();
        fft_radix2_inplace(&mut buf, false).unwrap();
        fft_radix2_inplace(&mut buf, true).unwrap();
        for v in buf.iter_mut() {
            *v /= n as f64;
        }
        for (a, b) in buf.iter().zip(input.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn rejects_non_power_of_two_length() {
        let mut buf = vec![Complex64::new(0.0, 0.0); 6];
        assert!(fft_radix2_inplace(&mut buf, false).is_err());
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut buf: Vec<Complex64> = Vec::new();
        assert!(fft_radix2_inplace(&mut buf, false).is_ok());
    }
}
