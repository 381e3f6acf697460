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
//! Scale-grid generation: log-piecewise (octave/voices-per-octave, the usual
//! scalogram axis) and linear.
use crate::cwt::scale_bounds::linspace;
use crate::error::WaveletError;
use crate::error::try_vec;

fn octave_span(min_scale: f64, max_scale: f64, nv: f64) -> Result<(isize, isize), WaveletError> {
    let na = (nv * (max_scale / min_scale).log2()).ceil() as isize;
    let mn_pow = (nv * min_scale.log2()).floor() as isize;
    let mx_pow = mn_pow + na;
    if mx_pow < mn_pow {
        return Err(WaveletError::InvalidFilter(
            "scale range produced an empty octave span; check min_scale < max_scale".into(),
        ));
    }
    Ok((mn_pow, mx_pow))
}

/// `2^(p/nv)` for `p` in the octave span covering `[min_scale, max_scale]`
/// at `nv` voices per octave.
pub(crate) fn log_piecewise_scales(
    min_scale: f64,
    max_scale: f64,
    nv: f64,
) -> Result<Vec<f64>, WaveletError> {
    let (mn_pow, mx_pow) = octave_span(min_scale, max_scale, nv)?;
    let mut base_scales = try_vec![0.0f64; (mx_pow - mn_pow) as usize];
    for (i, dst) in base_scales.iter_mut().enumerate() {
        let p = i as isize + mn_pow;
        *dst = (p as f64 / nv).exp2();
    }
    Ok(base_scales)
}

/// Evenly-spaced scales spanning the same octave range `log_piecewise_scales`
/// would, with the scale count chosen so the spacing doesn't exceed one
/// unit at the top of the range.
pub(crate) fn linear_scales(min_scale: f64, max_scale: f64, nv: f64) -> Result<Vec<f64>, WaveletError> {
    let (mn_pow, mx_pow) = octave_span(min_scale, max_scale, nv)?;
    let min_scale = (mn_pow as f64 / nv).exp2();
    let max_scale = (mx_pow as f64 / nv).exp2();
    let na = (max_scale / min_scale).ceil() as usize;
    linspace(min_scale, max_scale, na)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_piecewise_covers_requested_range() {
        let scales = log_piecewise_scales(1.0, 32.0, 8.0).unwrap();
        assert!(!scales.is_empty());
        assert!(scales.first().unwrap() <= &1.0);
        assert!(scales.last().unwrap() >= &32.0);
    }

    #[test]
    fn linear_scales_are_non_decreasing() {
        let scales = linear_scales(1.0, 16.0, 4.0).unwrap();
        for w in scales.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(log_piecewise_scales(32.0, 1.0, 8.0).is_err());
    }
}
