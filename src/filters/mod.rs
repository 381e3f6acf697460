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
//! Named wavelets resolved to decomposition/reconstruction filter pairs.
mod coefficients;

use crate::error::WaveletError;
use std::fmt;

/// A discrete orthogonal wavelet this crate carries exact coefficients for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wavelet {
    Haar,
    Daubechies(u8),
    Symlet(u8),
    Coiflet(u8),
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wavelet::Haar => write!(f, "haar"),
            Wavelet::Daubechies(n) => write!(f, "db{n}"),
            Wavelet::Symlet(n) => write!(f, "sym{n}"),
            Wavelet::Coiflet(n) => write!(f, "coif{n}"),
        }
    }
}

/// Every wavelet the registry carries exact taps for, in the order C4's
/// listing operation reports them.
pub const REGISTERED: &[Wavelet] = &[
    Wavelet::Haar,
    Wavelet::Daubechies(2),
    Wavelet::Daubechies(4),
    Wavelet::Daubechies(6),
    Wavelet::Daubechies(8),
    Wavelet::Symlet(2),
    Wavelet::Symlet(4),
    Wavelet::Symlet(8),
    Wavelet::Coiflet(1),
    Wavelet::Coiflet(2),
];

/// Decomposition (`h0`/`h1`) and reconstruction (`g0`/`g1`) filter taps for
/// one wavelet, already rescaled by `1/sqrt(2)` for direct use in the MODWT
/// (see [`FilterBank::modwt_rescale`] for the derivation).
#[derive(Debug, Clone)]
pub struct FilterBank {
    pub wavelet: Wavelet,
    /// DWT low-pass decomposition filter (scaling filter), orthonormal.
    pub h0: Vec<f64>,
    /// DWT high-pass decomposition filter (wavelet filter), the QMF of `h0`.
    pub h1: Vec<f64>,
    /// Low-pass reconstruction filter: `h0` time-reversed.
    pub g0: Vec<f64>,
    /// High-pass reconstruction filter: `h1` time-reversed.
    pub g1: Vec<f64>,
}

impl FilterBank {
    fn from_scaling_taps(wavelet: Wavelet, h0: Vec<f64>) -> Self {
        let n = h0.len();
        let h1: Vec<f64> = h0
            .iter()
            .enumerate()
            .map(|(i, &x)| if i % 2 == 0 { -x } else { x })
            .rev()
            .collect();
        let g0: Vec<f64> = h0.iter().rev().copied().collect();
        let g1: Vec<f64> = h1.iter().rev().copied().collect();
        debug_assert_eq!(h1.len(), n);
        Self {
            wavelet,
            h0,
            h1,
            g0,
            g1,
        }
    }

    /// MODWT-scaled copy of this filter bank: every tap divided by
    /// `sqrt(2)`, which turns the orthonormal DWT pair into the
    /// `1/sqrt(2)`-normalized pair the maximal overlap transform uses so
    /// that its output variance matches the input's at every level.
    pub fn modwt_rescale(&self) -> FilterBank {
        let s = std::f64::consts::SQRT_2;
        FilterBank {
            wavelet: self.wavelet,
            h0: self.h0.iter().map(|v| v / s).collect(),
            h1: self.h1.iter().map(|v| v / s).collect(),
            g0: self.g0.iter().map(|v| v / s).collect(),
            g1: self.g1.iter().map(|v| v / s).collect(),
        }
    }

    /// Insert `2^(level-1) - 1` zeros between consecutive taps, the
    /// upsampling the pyramidal multi-level MODWT cascade applies to every
    /// filter beyond level 1.
    pub fn upsample_for_level(taps: &[f64], level: u32) -> Vec<f64> {
        if level <= 1 {
            return taps.to_vec();
        }
        let gap = 1usize << (level - 1);
        let mut out = vec![0.0; (taps.len() - 1) * gap + 1];
        for (i, &t) in taps.iter().enumerate() {
            out[i * gap] = t;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.h0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h0.is_empty()
    }
}

fn split_name(name: &str) -> (String, u8) {
    let lower = name.to_ascii_lowercase();
    if lower == "haar" {
        return ("haar".to_string(), 1);
    }
    let digits_at = lower.find(|c: char| c.is_ascii_digit());
    match digits_at {
        Some(idx) => {
            let order: u8 = lower[idx..].parse().unwrap_or(0);
            (lower[..idx].to_string(), order)
        }
        None => (lower, 0),
    }
}

/// Look up a filter bank by enum value. Every [`Wavelet`] variant this crate
/// can construct is guaranteed present in [`REGISTERED`], so this never
/// fails for a value a caller actually has in hand — it exists for the
/// string-based [`lookup_by_name`] to delegate into after parsing.
pub fn lookup(wavelet: Wavelet) -> Result<FilterBank, WaveletError> {
    let (family, order) = match wavelet {
        Wavelet::Haar => ("haar", 1),
        Wavelet::Daubechies(n) => ("db", n),
        Wavelet::Symlet(n) => ("sym", n),
        Wavelet::Coiflet(n) => ("coif", n),
    };
    let taps = coefficients::scaling_taps(family, order)
        .ok_or_else(|| WaveletError::UnknownWavelet(wavelet.to_string()))?;
    Ok(FilterBank::from_scaling_taps(wavelet, taps.to_vec()))
}

/// Look up a filter bank by name (`"db4"`, `"sym8"`, `"coif1"`, `"haar"`,
/// case-insensitive). Returns [`WaveletError::UnknownWavelet`] for any name
/// not in [`REGISTERED`], including names from families this crate
/// recognizes in principle (e.g. `"db10"`) but does not carry exact taps
/// for.
pub fn lookup_by_name(name: &str) -> Result<FilterBank, WaveletError> {
    let (family, order) = split_name(name);
    let taps = coefficients::scaling_taps(&family, order)
        .ok_or_else(|| WaveletError::UnknownWavelet(name.to_string()))?;
    let wavelet = match family.as_str() {
        "haar" => Wavelet::Haar,
        "db" => Wavelet::Daubechies(order),
        "sym" => Wavelet::Symlet(order),
        "coif" => Wavelet::Coiflet(order),
        _ => return Err(WaveletError::UnknownWavelet(name.to_string())),
    };
    Ok(FilterBank::from_scaling_taps(wavelet, taps.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_wavelet_resolves() {
        for &w in REGISTERED {
            assert!(lookup(w).is_ok(), "{w} should resolve");
        }
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let a = lookup_by_name("DB4").unwrap();
        let b = lookup_by_name("db4").unwrap();
        assert_eq!(a.h0, b.h0);
    }

    #[test]
    fn unregistered_name_is_unknown_wavelet() {
        let err = lookup_by_name("db10").unwrap_err();
        assert!(matches!(err, WaveletError::UnknownWavelet(_)));
    }

    #[test]
    fn qmf_high_pass_is_orthogonal_to_low_pass() {
        let fb = lookup(Wavelet::Daubechies(4)).unwrap();
        let dot: f64 = fb.h0.iter().zip(fb.h1.iter()).map(|(a, b)| a * b).sum();
        assert!(dot.abs() < 1e-10, "h0.h1 = {dot}");
    }

    #[test]
    fn modwt_rescale_halves_energy() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let rescaled = fb.modwt_rescale();
        let energy_before: f64 = fb.h0.iter().map(|v| v * v).sum();
        let energy_after: f64 = rescaled.h0.iter().map(|v| v * v).sum();
        assert!((energy_after - energy_before / 2.0).abs() < 1e-12);
    }

    #[test]
    fn upsample_inserts_correct_zero_count() {
        let taps = [1.0, 2.0, 3.0];
        let up = FilterBank::upsample_for_level(&taps, 3);
        // gap = 2^(3-1) = 4, so length = (3-1)*4 + 1 = 9
        assert_eq!(up.len(), 9);
        assert_eq!(up[0], 1.0);
        assert_eq!(up[4], 2.0);
        assert_eq!(up[8], 3.0);
        assert!(up[1..4].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn upsample_for_level_one_is_identity() {
        let taps = [1.0, 2.0, 3.0];
        assert_eq!(FilterBank::upsample_for_level(&taps, 1), taps.to_vec());
    }
}
