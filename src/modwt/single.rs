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
use crate::modwt::Boundary;

fn tap_at(buf: &[f64], idx: isize, boundary: Boundary) -> f64 {
    let n = buf.len() as isize;
    if n == 0 {
        return 0.0;
    }
    match boundary {
        Boundary::Periodic => buf[idx.rem_euclid(n) as usize],
        Boundary::ZeroPadding => {
            if idx < 0 || idx >= n {
                0.0
            } else {
                buf[idx as usize]
            }
        }
    }
}

fn correlate(signal: &[f64], filter: &[f64], boundary: Boundary) -> Vec<f64> {
    let n = signal.len();
    (0..n)
        .map(|t| {
            filter
                .iter()
                .enumerate()
                .fold(0.0, |acc, (l, &h)| acc + h * tap_at(signal, t as isize - l as isize, boundary))
        })
        .collect()
}

fn correlate_backward(buf: &[f64], filter: &[f64], boundary: Boundary) -> Vec<f64> {
    let n = buf.len();
    (0..n)
        .map(|t| {
            filter
                .iter()
                .enumerate()
                .fold(0.0, |acc, (l, &h)| acc + h * tap_at(buf, t as isize + l as isize, boundary))
        })
        .collect()
}

fn validate_signal(signal: &[f64]) -> Result<(), WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::InvalidSignal("signal is empty".into()));
    }
    if signal.iter().any(|v| !v.is_finite()) {
        return Err(WaveletError::InvalidSignal(
            "signal contains a non-finite sample".into(),
        ));
    }
    Ok(())
}

/// One level of the maximal overlap DWT: `(scaling coefficients V_j, wavelet
/// coefficients W_j)`, both the same length as `signal`.
///
/// `level` selects the upsampled filter (level 1 uses the base filters
/// unchanged); use [`crate::filters::FilterBank::upsample_for_level`]
/// indirectly through this function rather than pre-upsampling the bank
/// yourself.
pub fn forward_single_level(
    signal: &[f64],
    filters: &FilterBank,
    boundary: Boundary,
    level: u32,
) -> Result<(Vec<f64>, Vec<f64>), WaveletError> {
    validate_signal(signal)?;
    if level == 0 {
        return Err(WaveletError::InvalidFilter(
            "modwt level must be >= 1".into(),
        ));
    }
    let rescaled = filters.modwt_rescale();
    let h0 = FilterBank::upsample_for_level(&rescaled.h0, level);
    let h1 = FilterBank::upsample_for_level(&rescaled.h1, level);
    if h0.len() > signal.len() && matches!(boundary, Boundary::Periodic) {
        return Err(WaveletError::IncompatibleLength {
            expected: h0.len(),
            actual: signal.len(),
        });
    }
    let v = correlate(signal, &h0, boundary);
    let w = correlate(signal, &h1, boundary);
    Ok((v, w))
}

/// Inverse of one level of [`forward_single_level`]. Exact (to floating
/// point error) under [`Boundary::Periodic`]; under [`Boundary::ZeroPadding`]
/// boundary samples carry reconstruction error proportional to filter
/// length, which is an expected, documented property of that boundary mode
/// rather than a bug.
pub fn inverse_single_level(
    v: &[f64],
    w: &[f64],
    filters: &FilterBank,
    boundary: Boundary,
    level: u32,
) -> Result<Vec<f64>, WaveletError> {
    if v.len() != w.len() {
        return Err(WaveletError::IncompatibleLength {
            expected: v.len(),
            actual: w.len(),
        });
    }
    validate_signal(v)?;
    validate_signal(w)?;
    if level == 0 {
        return Err(WaveletError::InvalidFilter(
            "modwt level must be >= 1".into(),
        ));
    }
    let rescaled = filters.modwt_rescale();
    let h0 = FilterBank::upsample_for_level(&rescaled.h0, level);
    let h1 = FilterBank::upsample_for_level(&rescaled.h1, level);
    let from_v = correlate_backward(v, &h0, boundary);
    let from_w = correlate_backward(w, &h1, boundary);
    Ok(from_v
        .into_iter()
        .zip(from_w)
        .map(|(a, b)| a + b)
        .collect())
}
