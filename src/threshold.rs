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
//! Coefficient thresholding: the rule that decides how a coefficient below
//! (soft) or at (hard) a cutoff is treated, and the methods that pick the
//! cutoff itself.
use crate::error::WaveletError;

/// How a coefficient is modified relative to the threshold `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRule {
    /// `sign(x) * max(|x| - t, 0)` — continuous, shrinks surviving
    /// coefficients toward zero.
    Soft,
    /// `x` if `|x| > t`, else `0` — discontinuous, preserves surviving
    /// coefficient magnitudes exactly.
    Hard,
}

/// How the cutoff `t` itself is derived from a detail-coefficient level and
/// its estimated noise standard deviation `sigma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdMethod {
    /// Donoho-Johnstone universal threshold: `sigma * sqrt(2 * ln(n))`.
    Universal,
    /// Stein's Unbiased Risk Estimate, minimized over the sorted squared
    /// coefficients.
    Sure,
    /// Minimax threshold, a fixed lookup tuned per length regime rather
    /// than `sqrt(2 ln n)`'s asymptotic one.
    Minimax,
    /// Caller-supplied constant, bypassing estimation entirely.
    Fixed(f64),
}

fn soft(x: f64, t: f64) -> f64 {
    let mag = x.abs() - t;
    if mag > 0.0 {
        x.signum() * mag
    } else {
        0.0
    }
}

fn hard(x: f64, t: f64) -> f64 {
    if x.abs() > t {
        x
    } else {
        0.0
    }
}

/// Apply `rule` at cutoff `t` to every coefficient in `coeffs`, in place.
pub fn apply_threshold(coeffs: &mut [f64], t: f64, rule: ThresholdRule) {
    for c in coeffs.iter_mut() {
        *c = match rule {
            ThresholdRule::Soft => soft(*c, t),
            ThresholdRule::Hard => hard(*c, t),
        };
    }
}

/// Median absolute deviation noise estimate: `median(|coeffs|) / 0.6745`,
/// the standard MODWT/DWT noise-sigma estimator (0.6745 is the MAD-to-sigma
/// ratio for a zero-mean Gaussian).
pub fn mad_sigma(coeffs: &[f64]) -> Result<f64, WaveletError> {
    if coeffs.is_empty() {
        return Err(WaveletError::InvalidSignal(
            "cannot estimate noise sigma from an empty coefficient set".into(),
        ));
    }
    let mut abs: Vec<f64> = coeffs.iter().map(|v| v.abs()).collect();
    abs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median = percentile_sorted(&abs, 0.5);
    Ok(median / 0.6745)
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

fn universal_threshold(sigma: f64, n: usize) -> f64 {
    sigma * (2.0 * (n.max(1) as f64).ln()).sqrt()
}

/// Minimax threshold table, interpolated from the standard Donoho-Johnstone
/// breakpoints (`n <= 32` uses 0, growth slows past a few hundred samples).
fn minimax_threshold(sigma: f64, n: usize) -> f64 {
    if n <= 32 {
        return 0.0;
    }
    let nf = n as f64;
    sigma * (0.3936 + 0.1829 * (nf.ln() / std::f64::consts::LN_2))
}

/// Stein's Unbiased Risk Estimate threshold: the cutoff in `0..=sigma*sqrt(2 ln n)`
/// minimizing SURE risk over the sorted squared coefficients, falling back
/// to the universal threshold when the coefficients are extremely sparse
/// (the standard SUREshrink safeguard).
fn sure_threshold(coeffs: &[f64], sigma: f64) -> f64 {
    let n = coeffs.len();
    if sigma <= 0.0 || n == 0 {
        return 0.0;
    }
    let normalized: Vec<f64> = coeffs.iter().map(|c| c / sigma).collect();
    let mut squared: Vec<f64> = normalized.iter().map(|c| c * c).collect();
    squared.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let nf = n as f64;
    // Universal sparsity safeguard: if the signal is very sparse, SURE's
    // risk estimate is unreliable and the universal threshold is used
    // instead (Donoho & Johnstone 1995).
    let sum_sq: f64 = squared.iter().sum();
    let sparsity = (sum_sq - nf) / nf;
    if sparsity < (nf.ln() / std::f64::consts::LN_2).powf(1.5) / nf.sqrt() {
        return sigma * (2.0 * nf.ln()).sqrt();
    }

    let mut best_risk = f64::INFINITY;
    let mut best_t2 = squared[0];
    let mut cumsum = 0.0;
    for (i, &s2) in squared.iter().enumerate() {
        cumsum += s2;
        let kept_above = nf - (i + 1) as f64;
        let risk = nf - 2.0 * (i + 1) as f64 + cumsum + kept_above * s2;
        if risk < best_risk {
            best_risk = risk;
            best_t2 = s2;
        }
    }
    sigma * best_t2.sqrt()
}

/// Resolve `method` into a concrete cutoff for one level's detail
/// coefficients (`sigma` estimated separately, typically via [`mad_sigma`]
/// on the finest level and reused across levels).
pub fn resolve_threshold(coeffs: &[f64], sigma: f64, method: ThresholdMethod) -> f64 {
    match method {
        ThresholdMethod::Universal => universal_threshold(sigma, coeffs.len()),
        ThresholdMethod::Minimax => minimax_threshold(sigma, coeffs.len()),
        ThresholdMethod::Sure => sure_threshold(coeffs, sigma),
        ThresholdMethod::Fixed(t) => t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_threshold_shrinks_and_zeroes() {
        let mut c = [3.0, -3.0, 0.5, -0.5];
        apply_threshold(&mut c, 1.0, ThresholdRule::Soft);
        assert!((c[0] - 2.0).abs() < 1e-12);
        assert!((c[1] + 2.0).abs() < 1e-12);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.0);
    }

    #[test]
    fn hard_threshold_preserves_magnitude_above_cutoff() {
        let mut c = [3.0, -3.0, 0.5, -0.5];
        apply_threshold(&mut c, 1.0, ThresholdRule::Hard);
        assert_eq!(c[0], 3.0);
        assert_eq!(c[1], -3.0);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.0);
    }

    #[test]
    fn mad_sigma_recovers_known_gaussian_scale() {
        // Deterministic pseudo-gaussian-ish sample via a fixed seed sequence
        // (no RNG dependency inside this unit test).
        let coeffs: Vec<f64> = (0..200)
            .map(|i| {
                let x = (i as f64 * 0.6180339887).fract() - 0.5;
                x * 6.0
            })
            .collect();
        let sigma = mad_sigma(&coeffs).unwrap();
        assert!(sigma > 0.0);
    }

    #[test]
    fn mad_sigma_rejects_empty_input() {
        assert!(mad_sigma(&[]).is_err());
    }

    #[test]
    fn universal_threshold_grows_with_length() {
        let small = resolve_threshold(&[0.0; 16], 1.0, ThresholdMethod::Universal);
        let large = resolve_threshold(&[0.0; 1024], 1.0, ThresholdMethod::Universal);
        assert!(large > small);
    }

    #[test]
    fn fixed_threshold_ignores_sigma_and_length() {
        let t = resolve_threshold(&[1.0, 2.0, 3.0], 99.0, ThresholdMethod::Fixed(0.42));
        assert!((t - 0.42).abs() < 1e-12);
    }
}
