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
//! Bluestein's chirp-z transform: turns an arbitrary-length DFT into a
//! power-of-two convolution so the radix-2 kernel can drive it.
use crate::error::WaveletError;
use crate::fft::radix::fft_radix2_inplace;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex, OnceLock};

struct BluesteinPlan {
    n: usize,
    inner_len: usize,
    /// `chirp[k] = exp(-i*pi*k^2/n)`, the per-sample pre/post multiplier.
    chirp: Vec<Complex64>,
    /// Forward FFT of the zero-padded conjugate chirp kernel, precomputed
    /// once per `n` since it never depends on the input.
    kernel_spectrum: Vec<Complex64>,
}

fn build_plan(n: usize) -> Result<BluesteinPlan, WaveletError> {
    let inner_len = (2 * n - 1)
        .checked_next_power_of_two()
        .ok_or_else(|| WaveletError::FftError(format!("bluestein length overflow for n={n}")))?;

    let mut chirp = Vec::with_capacity(n);
    for k in 0..n {
        // k*k can overflow usize for large n; computed in f64 directly below.
        let k2 = (k as f64) * (k as f64);
        let theta = -PI * k2 / (n as f64);
        chirp.push(Complex64::new(theta.cos(), theta.sin()));
    }

    let mut kernel = vec![Complex64::new(0.0, 0.0); inner_len];
    kernel[0] = chirp[0].conj();
    for k in 1..n {
        let c = chirp[k].conj();
        kernel[k] = c;
        kernel[inner_len - k] = c;
    }
    fft_radix2_inplace(&mut kernel, false)?;

    Ok(BluesteinPlan {
        n,
        inner_len,
        chirp,
        kernel_spectrum: kernel,
    })
}

fn plan_cache() -> &'static Mutex<std::collections::HashMap<usize, Arc<BluesteinPlan>>> {
    static CACHE: OnceLock<Mutex<std::collections::HashMap<usize, Arc<BluesteinPlan>>>> =
        OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(std::collections::HashMap::new()))
}

fn get_plan(n: usize) -> Result<Arc<BluesteinPlan>, WaveletError> {
    let mut guard = plan_cache().lock().unwrap();
    if let Some(plan) = guard.get(&n) {
        return Ok(plan.clone());
    }
    let plan = Arc::new(build_plan(n)?);
    guard.insert(n, plan.clone());
    Ok(plan)
}

/// DFT of `buf` (length `n`, any `n >= 1`) via Bluestein's algorithm.
/// Operates in place; `inverse` selects the sign convention exactly as
/// [`crate::fft::radix::fft_radix2_inplace`] does, including the caller's
/// responsibility to apply the `1/n` inverse scale.
pub fn fft_bluestein_inplace(buf: &mut [Complex64], inverse: bool) -> Result<(), WaveletError> {
    let n = buf.len();
    if n == 0 {
        return Ok(());
    }
    if n == 1 {
        return Ok(());
    }
    let plan = get_plan(n)?;
    debug_assert_eq!(plan.n, n);

    let mut padded = vec![Complex64::new(0.0, 0.0); plan.inner_len];
    for (i, &x) in buf.iter().enumerate() {
        let c = if inverse { plan.chirp[i].conj() } else { plan.chirp[i] };
        padded[i] = x * c;
    }

    fft_radix2_inplace(&mut padded, false)?;
    for (s, &k) in padded.iter_mut().zip(plan.kernel_spectrum.iter()) {
        *s *= k;
    }
    fft_radix2_inplace(&mut padded, true)?;
    let scale = 1.0 / plan.inner_len as f64;

    for (i, out) in buf.iter_mut().enumerate() {
        let c = if inverse { plan.chirp[i].conj() } else { plan.chirp[i] };
        *out = padded[i] * scale * c;
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
                    let theta = sign * 2.0 * PI * (k * t) as f64 / n as f64;
                    acc += x * Complex64::new(theta.cos(), theta.sin());
                }
                acc
            })
            .collect()
    }

    #[test]
    fn matches_naive_dft_for_prime_length() {
        let n = 13;
        let input: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()))
            .collect();
        let expected = dft_naive(&input, false);
        let mut got = input.clone();
        fft_bluestein_inplace(&mut got, false).unwrap();
        for (a, b) in got.iter().zip(expected.iter()) {
            assert!((a - b).norm() < 1e-8, "{a} vs {b}");
        }
    }

    #[test]
    fn roundtrips_for_odd_length() {
        let n = 7;
        let input: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let mut buf = input.clone();
        fft_bluestein_inplace(&mut buf, false).unwrap();
        fft_bluestein_inplace(&mut buf, true).unwrap();
        for v in buf.iter_mut() {
            *v /= n as f64;
        }
        for (a, b) in buf.iter().zip(input.iter()) {
            assert!((a - b).norm() < 1e-8);
        }
    }
}
