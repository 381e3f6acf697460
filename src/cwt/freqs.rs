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
//! Angular-frequency grid used by the CWT executor, and the scale-to-Hz
//! conversion that reads a wavelet's frequency response back off it.
use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use crate::error::try_vec;
use std::sync::Arc;

/// The unscaled FFT-bin angular-frequency grid for a length-`n` spectrum,
/// in the standard Torrence & Compo (1998) convention: bins past Nyquist
/// are folded to negative frequency rather than left increasing past `pi`.
/// Every wavelet scale `a` dilates this grid by `a` before evaluating
/// `psi_hat` at it.
pub(crate) fn gen_psi(n: usize) -> Result<Vec<f64>, WaveletError> {
    if n == 0 {
        return Err(WaveletError::InvalidSignal(
            "cannot build an angular-frequency grid for a zero-length filter".into(),
        ));
    }
    let mut psi = try_vec![0.0f64; n];
    let nf = n as f64;
    for (k, dst) in psi.iter_mut().enumerate() {
        *dst = if k <= n / 2 {
            2.0 * std::f64::consts::PI * k as f64 / nf
        } else {
            2.0 * std::f64::consts::PI * (k as f64 - nf) / nf
        };
    }
    Ok(psi)
}

/// For each scale, the frequency (in the same units as `sampling_frequency`)
/// at which the dilated wavelet's Fourier-domain response peaks.
pub fn scale_to_frequencies(
    wavelet: &Arc<dyn CwtWavelet>,
    scales: &[f64],
    sampling_frequency: f64,
    filter_length: usize,
) -> Result<Vec<f64>, WaveletError> {
    if filter_length == 0 {
        return Err(WaveletError::InvalidSignal(
            "filter_length must be non-zero".into(),
        ));
    }
    let psi = gen_psi(filter_length)?;
    let mut max_indices = try_vec![0usize; scales.len()];
    let mut current_psi = try_vec![0.0f64; filter_length];

    for (index, &scale) in max_indices.iter_mut().zip(scales.iter()) {
        for (dst, &p) in current_psi.iter_mut().zip(psi.iter()) {
            *dst = p * scale;
        }

        let wavelet_fft = wavelet.make_wavelet(&current_psi)?;
        if wavelet_fft.len() != filter_length {
            return Err(WaveletError::FftError(
                "wavelet kernel returned the wrong length for the frequency grid".into(),
            ));
        }
        *index = wavelet_fft
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.re.partial_cmp(&b.1.re).unwrap())
            .map(|(idx, _)| idx)
            .unwrap_or(0);
    }

    let idx_scale = sampling_frequency / filter_length as f64;
    Ok(max_indices.iter().map(|&idx| idx as f64 * idx_scale).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwt::wavelets::morlet::MorletWavelet;

    #[test]
    fn gen_psi_folds_bins_past_nyquist_negative() {
        let psi = gen_psi(8).unwrap();
        assert_eq!(psi[0], 0.0);
        assert!(psi[5] < 0.0);
    }

    #[test]
    fn rejects_zero_length() {
        assert!(gen_psi(0).is_err());
    }

    #[test]
    fn frequency_decreases_as_scale_increases() {
        let wavelet: Arc<dyn CwtWavelet> = Arc::new(MorletWavelet::default());
        let scales = [1.0, 2.0, 4.0, 8.0];
        let freqs = scale_to_frequencies(&wavelet, &scales, 100.0, 256).unwrap();
        for w in freqs.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }
}
