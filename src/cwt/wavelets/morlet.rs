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
//! Morlet wavelet: a complex sinusoid under a Gaussian envelope, with the
//! DC-correction term (`ks`) that keeps it admissible (zero mean) for any
//! center frequency instead of only asymptotically for large `mu`.
use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use crate::error::try_vec;
use crate::mla::fmla;
use num_complex::Complex64;
use pxfm::f_exp;

const TWO_SQRT_BY_PI_POWER_0_25: f64 = 0.751_125_544_465_43; // 2^0.5 / pi^0.25

#[derive(Debug, Copy, Clone)]
pub struct MorletWavelet {
    mu: f64,
    ks: f64,
    c1: f64,
}

impl MorletWavelet {
    /// `mu` is the wavelet's center angular frequency. Common choices are
    /// 5-6 for a compact time-domain support; the default trades time
    /// localization for a sharper frequency peak.
    pub fn new(mu: f64) -> Self {
        let cs = (1.0 + f_exp(-mu * mu) - 2.0 * f_exp(-0.75 * mu * mu)).sqrt().recip();
        let ks = -f_exp(-0.5 * mu * mu);
        let c1 = cs * TWO_SQRT_BY_PI_POWER_0_25;
        Self { mu, ks, c1 }
    }
}

impl Default for MorletWavelet {
    fn default() -> Self {
        Self::new(13.4)
    }
}

impl CwtWavelet for MorletWavelet {
    fn make_wavelet(&self, omegas: &[f64]) -> Result<Vec<Complex64>, WaveletError> {
        let mut out = try_vec![Complex64::new(0.0, 0.0); omegas.len()];
        for (dst, &w) in out.iter_mut().zip(omegas.iter()) {
            let dwmu = w - self.mu;
            let a = self.c1 * fmla(self.ks, f_exp(-0.5 * w * w), f_exp(-0.5 * dwmu * dwmu));
            *dst = Complex64::new(a, 0.0);
        }
        Ok(out)
    }

    fn central_frequency(&self) -> f64 {
        self.mu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_near_center_frequency() {
        let wavelet = MorletWavelet::default();
        let omegas: Vec<f64> = (0..200).map(|i| i as f64 * 0.2).collect();
        let values = wavelet.make_wavelet(&omegas).unwrap();
        let (peak_idx, _) = values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.re.partial_cmp(&b.1.re).unwrap())
            .unwrap();
        let peak_omega = omegas[peak_idx];
        assert!((peak_omega - wavelet.mu).abs() < 0.5);
    }

    #[test]
    fn default_has_positive_normalization() {
        let wavelet = MorletWavelet::default();
        assert!(wavelet.c1 > 0.0);
    }
}
