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
use crate::filters::FilterBank;
use crate::modwt::single::{forward_single_level, inverse_single_level};
use crate::modwt::Boundary;

/// Pyramidal multi-level MODWT decomposition: wavelet coefficients at each
/// level plus one final-level scaling (approximation) series, all the same
/// length as the original signal.
#[derive(Debug, Clone)]
pub struct MultiLevelModwt {
    /// `details[j]` holds the level-`j+1` wavelet coefficients `W_{j+1}`.
    pub details: Vec<Vec<f64>>,
    /// Final-level scaling coefficients `V_J`.
    pub approximation: Vec<f64>,
}

impl MultiLevelModwt {
    pub fn levels(&self) -> usize {
        self.details.len()
    }

    /// Energy (sum of squares) carried by each detail level, followed by the
    /// approximation's own energy as the last entry — Parseval's relation
    /// for the MODWT says these sum to the signal's total energy.
    pub fn energy_per_level(&self) -> Vec<f64> {
        let mut energies: Vec<f64> = self
            .details
            .iter()
            .map(|d| d.iter().map(|v| v * v).sum())
            .collect();
        energies.push(self.approximation.iter().map(|v| v * v).sum());
        energies
    }
}

/// Cascade `signal` through `levels` stages of [`forward_single_level`],
/// feeding each stage's scaling output into the next and upsampling the
/// filter pair at every stage per the standard MODWT pyramid algorithm.
pub fn forward_multi_level(
    signal: &[f64],
    filters: &FilterBank,
    boundary: Boundary,
    levels: u32,
) -> Result<MultiLevelModwt, WaveletError> {
    if levels == 0 {
        return Err(WaveletError::InvalidFilter(
            "multi-level modwt requires levels >= 1".into(),
        ));
    }
    let mut details = Vec::with_capacity(levels as usize);
    let mut approx = signal.to_vec();
    for level in 1..=levels {
        let (v, w) = forward_single_level(&approx, filters, boundary, level)?;
        details.push(w);
        approx = v;
    }
    Ok(MultiLevelModwt {
        details,
        approximation: approx,
    })
}

/// Like [`forward_multi_level`], but stops the cascade early instead of
/// running to a caller-fixed depth: after each level is computed, the level's
/// detail energy is compared against `energy_fraction` of the signal's total
/// energy, and decomposition stops as soon as a level falls below that
/// fraction (or `max_levels` is reached, whichever comes first). Always
/// produces at least one level.
pub fn forward_multi_level_adaptive(
    signal: &[f64],
    filters: &FilterBank,
    boundary: Boundary,
    max_levels: u32,
    energy_fraction: f64,
) -> Result<MultiLevelModwt, WaveletError> {
    if max_levels == 0 {
        return Err(WaveletError::InvalidFilter(
            "multi-level modwt requires levels >= 1".into(),
        ));
    }
    if !(0.0..1.0).contains(&energy_fraction) {
        return Err(WaveletError::InvalidFilter(format!(
            "energy_fraction must be in [0, 1), got {energy_fraction}"
        )));
    }
    let total_energy: f64 = signal.iter().map(|v| v * v).sum();
    let mut details = Vec::new();
    let mut approx = signal.to_vec();
    for level in 1..=max_levels {
        let (v, w) = forward_single_level(&approx, filters, boundary, level)?;
        let detail_energy: f64 = w.iter().map(|x| x * x).sum();
        details.push(w);
        approx = v;
        if total_energy > 0.0 && detail_energy < energy_fraction * total_energy {
            break;
        }
    }
    Ok(MultiLevelModwt {
        details,
        approximation: approx,
    })
}

/// Invert a [`MultiLevelModwt`] back to the original-length signal by
/// running [`inverse_single_level`] from the coarsest level down to level 1.
pub fn inverse_multi_level(
    result: &MultiLevelModwt,
    filters: &FilterBank,
    boundary: Boundary,
) -> Result<Vec<f64>, WaveletError> {
    if result.details.is_empty() {
        return Err(WaveletError::InvalidFilter(
            "multi-level modwt result has no detail levels".into(),
        ));
    }
    let mut v = result.approximation.clone();
    for (idx, w) in result.details.iter().enumerate().rev() {
        let level = (idx + 1) as u32;
        v = inverse_single_level(&v, w, filters, boundary, level)?;
    }
    Ok(v)
}

/// Reconstruct from level `k`: re-synthesize using only `A_J` and the detail
/// levels `W_{k+1..J}`, treating `W_1..W_k` as removed. `k == 0` is the full
/// reconstruction (equivalent to [`inverse_multi_level`]); `k == levels()` is
/// the approximation alone, upsampled back through every stage with the
/// corresponding detail held at zero. This is the denoising primitive: drop
/// the finest-scale (most noise-dominated) levels and resynthesize.
pub fn modwt_reconstruct_from(
    result: &MultiLevelModwt,
    filters: &FilterBank,
    boundary: Boundary,
    k: u32,
) -> Result<Vec<f64>, WaveletError> {
    if result.details.is_empty() {
        return Err(WaveletError::InvalidFilter(
            "multi-level modwt result has no detail levels".into(),
        ));
    }
    let levels = result.details.len() as u32;
    if k > levels {
        return Err(WaveletError::InvalidFilter(format!(
            "reconstruct_from level {k} exceeds decomposition depth {levels}"
        )));
    }
    let mut v = result.approximation.clone();
    for (idx, w) in result.details.iter().enumerate().rev() {
        let level = (idx + 1) as u32;
        if level <= k {
            let zeroed = vec![0.0; w.len()];
            v = inverse_single_level(&v, &zeroed, filters, boundary, level)?;
        } else {
            v = inverse_single_level(&v, w, filters, boundary, level)?;
        }
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{lookup, Wavelet};

    #[test]
    fn three_level_haar_periodic_roundtrips() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal: Vec<f64> = (0..32).map(|i| (i as f64 * 0.2).sin() + 0.5).collect();
        let decomposed = forward_multi_level(&signal, &fb, Boundary::Periodic, 3).unwrap();
        assert_eq!(decomposed.levels(), 3);
        let recon = inverse_multi_level(&decomposed, &fb, Boundary::Periodic).unwrap();
        for (a, b) in signal.iter().zip(recon.iter()) {
            assert!((a - b).abs() < 1e-8, "{a} vs {b}");
        }
    }

    #[test]
    fn energy_per_level_sums_to_signal_energy() {
        let fb = lookup(Wavelet::Daubechies(4)).unwrap();
        let signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.05).cos()).collect();
        let decomposed = forward_multi_level(&signal, &fb, Boundary::Periodic, 4).unwrap();
        let total: f64 = decomposed.energy_per_level().iter().sum();
        let signal_energy: f64 = signal.iter().map(|v| v * v).sum();
        assert!(
            (total - signal_energy).abs() / signal_energy < 1e-6,
            "total {total} vs signal energy {signal_energy}"
        );
    }

    #[test]
    fn rejects_zero_levels() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal = vec![1.0, 2.0, 3.0, 4.0];
        assert!(forward_multi_level(&signal, &fb, Boundary::Periodic, 0).is_err());
    }

    #[test]
    fn reconstruct_from_zero_matches_full_inverse() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal: Vec<f64> = (0..32).map(|i| (i as f64 * 0.2).sin() + 0.5).collect();
        let decomposed = forward_multi_level(&signal, &fb, Boundary::Periodic, 3).unwrap();
        let full = inverse_multi_level(&decomposed, &fb, Boundary::Periodic).unwrap();
        let from_zero = modwt_reconstruct_from(&decomposed, &fb, Boundary::Periodic, 0).unwrap();
        for (a, b) in full.iter().zip(from_zero.iter()) {
            assert!((a - b).abs() < 1e-12, "{a} vs {b}");
        }
    }

    #[test]
    fn reconstruct_from_top_level_matches_approximation_only_synthesis() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal: Vec<f64> = (0..32).map(|i| (i as f64 * 0.2).sin() + 0.5).collect();
        let decomposed = forward_multi_level(&signal, &fb, Boundary::Periodic, 3).unwrap();
        let levels = decomposed.levels() as u32;
        let coarsest = modwt_reconstruct_from(&decomposed, &fb, Boundary::Periodic, levels).unwrap();

        let mut zeroed = decomposed.clone();
        for w in zeroed.details.iter_mut() {
            w.iter_mut().for_each(|v| *v = 0.0);
        }
        let expected = inverse_multi_level(&zeroed, &fb, Boundary::Periodic).unwrap();
        for (a, b) in coarsest.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{a} vs {b}");
        }
    }

    #[test]
    fn reconstruct_from_drops_fine_scale_energy() {
        let fb = lookup(Wavelet::Daubechies(4)).unwrap();
        let n = 256;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                (i as f64 * 0.05).sin() + 0.3 * (i as f64 * 1.7).sin()
            })
            .collect();
        let decomposed = forward_multi_level(&signal, &fb, Boundary::ZeroPadding, 4).unwrap();
        let full = inverse_multi_level(&decomposed, &fb, Boundary::ZeroPadding).unwrap();
        let denoised = modwt_reconstruct_from(&decomposed, &fb, Boundary::ZeroPadding, 1).unwrap();

        let residual_full: f64 = full
            .iter()
            .zip(signal.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        let residual_denoised: f64 = denoised
            .iter()
            .zip(signal.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        assert!(residual_denoised > residual_full);
    }

    #[test]
    fn adaptive_stops_before_max_levels_on_smooth_signal() {
        let fb = lookup(Wavelet::Daubechies(4)).unwrap();
        let n = 512;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 256.0).sin())
            .collect();
        let decomposed =
            forward_multi_level_adaptive(&signal, &fb, Boundary::ZeroPadding, 8, 0.01).unwrap();
        assert!(decomposed.levels() < 8);
    }

    #[test]
    fn adaptive_never_exceeds_max_levels() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let decomposed =
            forward_multi_level_adaptive(&signal, &fb, Boundary::Periodic, 3, 0.0).unwrap();
        assert!(decomposed.levels() <= 3);
    }

    #[test]
    fn adaptive_rejects_invalid_energy_fraction() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal: Vec<f64> = (0..16).map(|i| i as f64).collect();
        assert!(
            forward_multi_level_adaptive(&signal, &fb, Boundary::Periodic, 4, 1.0).is_err()
        );
        assert!(
            forward_multi_level_adaptive(&signal, &fb, Boundary::Periodic, 4, -0.1).is_err()
        );
    }

    #[test]
    fn reconstruct_from_rejects_level_beyond_depth() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let signal: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let decomposed = forward_multi_level(&signal, &fb, Boundary::Periodic, 2).unwrap();
        assert!(modwt_reconstruct_from(&decomposed, &fb, Boundary::Periodic, 3).is_err());
    }
}
