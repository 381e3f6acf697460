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
//! Paul wavelet of arbitrary integer order `m` (Torrence & Compo 1998): a
//! one-sided, strictly-analytic filter with no energy at negative angular
//! frequency, making it well suited to tracking a signal's instantaneous
//! phase.
use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use crate::error::try_vec;
use num_complex::Complex64;
use pxfm::f_exp;

fn factorial(n: u32) -> f64 {
    (1..=n).fold(1.0f64, |acc, k| acc * k as f64)
}

#[derive(Debug, Copy, Clone)]
pub struct PaulWavelet {
    order: u32,
    normalization: f64,
}

impl PaulWavelet {
    pub fn new(order: u32) -> Self {
        let normalization =
            2f64.powi(order as i32) / (order as f64 * factorial(2 * order - 1)).sqrt();
        Self { order, normalization }
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}

impl Default for PaulWavelet {
    fn default() -> Self {
        Self::new(4)
    }
}

impl CwtWavelet for PaulWavelet {
    fn make_wavelet(&self, omegas: &[f64]) -> Result<Vec<Complex64>, WaveletError> {
        let mut out = try_vec![Complex64::new(0.0, 0.0); omegas.len()];
        for (dst, &w) in out.iter_mut().zip(omegas.iter()) {
            let magnitude = if w > 0.0 {
                self.normalization * w.powi(self.order as i32) * f_exp(-w)
            } else {
                0.0
            };
            *dst = Complex64::new(magnitude, 0.0);
        }
        Ok(out)
    }

    fn central_frequency(&self) -> f64 {
        self.order as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_non_positive_frequency() {
        let wavelet = PaulWavelet::default();
        let values = wavelet.make_wavelet(&[-1.0, 0.0]).unwrap();
        for v in values {
            assert_eq!(v, Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn peaks_near_order() {
        let wavelet = PaulWavelet::new(4);
        let omegas: Vec<f64> = (1..200).map(|i| i as f64 * 0.05).collect();
        let values = wavelet.make_wavelet(&omegas).unwrap();
        let (peak_idx, _) = values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.re.partial_cmp(&b.1.re).unwrap())
            .unwrap();
        assert!((omegas[peak_idx] - wavelet.order as f64).abs() < 0.3);
    }

    #[test]
    fn requires_order_at_least_one() {
        // order - 1 underflows at order 0, which is never a valid Paul order.
        let wavelet = PaulWavelet::new(1);
        assert!(wavelet.make_wavelet(&[1.0]).unwrap()[0].re > 0.0);
    }
}
