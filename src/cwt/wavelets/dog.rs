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
//! Derivative-of-Gaussian wavelet of arbitrary integer order `m`
//! (Torrence & Compo 1998): `psi_hat(w) = i^m / sqrt(Gamma(m+1/2)) * w^m *
//! exp(-w^2/2)`. Order 2 is the Mexican hat.
use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use crate::error::try_vec;
use num_complex::Complex64;
use pxfm::f_exp;

/// `Gamma(m + 1/2)` for integer `m >= 0`, via the half-integer closed form
/// `Gamma(m+1/2) = (2m)! / (4^m * m!) * sqrt(pi)`.
fn half_integer_gamma(m: u32) -> f64 {
    let mut double_fact_ratio = 1.0f64;
    // (2m)! / (4^m * m!) telescopes to a product over k=1..=m of (2k-1)/2.
    for k in 1..=m {
        double_fact_ratio *= (2.0 * k as f64 - 1.0) / 2.0;
    }
    double_fact_ratio * std::f64::consts::PI.sqrt()
}

/// `i^m` for integer `m`, cycling through `{1, -i, -1, i}`.
fn i_pow(m: u32) -> Complex64 {
    match m % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, -1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, 1.0),
    }
}

#[derive(Debug, Copy, Clone)]
pub struct DogWavelet {
    order: u32,
    normalization: f64,
    phase: Complex64,
}

impl DogWavelet {
    pub fn new(order: u32) -> Self {
        let normalization = 1.0 / half_integer_gamma(order).sqrt();
        Self {
            order,
            normalization,
            phase: i_pow(order),
        }
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}

impl Default for DogWavelet {
    /// Order 2, the Mexican hat.
    fn default() -> Self {
        Self::new(2)
    }
}

impl CwtWavelet for DogWavelet {
    fn make_wavelet(&self, omegas: &[f64]) -> Result<Vec<Complex64>, WaveletError> {
        let mut out = try_vec![Complex64::new(0.0, 0.0); omegas.len()];
        for (dst, &w) in out.iter_mut().zip(omegas.iter()) {
            let magnitude = self.normalization * w.powi(self.order as i32) * f_exp(-0.5 * w * w);
            *dst = self.phase * magnitude;
        }
        Ok(out)
    }

    fn central_frequency(&self) -> f64 {
        (self.order as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_two_is_real_valued_mexican_hat() {
        let wavelet = DogWavelet::new(2);
        let omegas = [0.5, 1.0, 1.41421356, 2.0];
        let values = wavelet.make_wavelet(&omegas).unwrap();
        for v in values {
            assert!(v.im.abs() < 1e-12);
        }
    }

    #[test]
    fn order_one_is_purely_imaginary() {
        let wavelet = DogWavelet::new(1);
        let values = wavelet.make_wavelet(&[1.0, 2.0]).unwrap();
        for v in values {
            assert!(v.re.abs() < 1e-12);
        }
    }

    #[test]
    fn vanishes_at_zero_frequency() {
        let wavelet = DogWavelet::default();
        let values = wavelet.make_wavelet(&[0.0]).unwrap();
        assert!(values[0].norm() < 1e-12);
    }

    #[test]
    fn central_frequency_matches_sqrt_order() {
        let wavelet = DogWavelet::new(4);
        assert!((wavelet.central_frequency() - 2.0).abs() < 1e-12);
    }
}
