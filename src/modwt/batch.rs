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
//! Batch MODWT: `b` equal-length signals packed into one interleaved buffer
//! (`sample0_sig0..sample0_sigB-1, sample1_sig0..`) so the lane kernel can
//! update every signal's accumulator for a given `(t, l)` tap in one call.
use crate::error::WaveletError;
use crate::filters::FilterBank;
use crate::modwt::Boundary;
use crate::simd::lane_kernel;

fn lane_at(buf: &[f64], t: isize, n: usize, b: usize, boundary: Boundary) -> Option<usize> {
    let n = n as isize;
    match boundary {
        Boundary::Periodic => Some((t.rem_euclid(n) as usize) * b),
        Boundary::ZeroPadding => {
            if t < 0 || t >= n {
                None
            } else {
                Some((t as usize) * b)
            }
        }
    }
}

fn validate_batch(buf: &[f64], n: usize, b: usize) -> Result<(), WaveletError> {
    if n == 0 || b == 0 {
        return Err(WaveletError::InvalidSignal(
            "batch modwt requires non-zero sample count and batch width".into(),
        ));
    }
    if buf.len() != n * b {
        return Err(WaveletError::IncompatibleLength {
            expected: n * b,
            actual: buf.len(),
        });
    }
    if buf.iter().any(|v| !v.is_finite()) {
        return Err(WaveletError::InvalidSignal(
            "batch contains a non-finite sample".into(),
        ));
    }
    Ok(())
}

fn correlate_batch(
    buf: &[f64],
    n: usize,
    b: usize,
    filter: &[f64],
    boundary: Boundary,
) -> Vec<f64> {
    let kernel = lane_kernel();
    let mut out = vec![0.0; n * b];
    for t in 0..n {
        let row = &mut out[t * b..(t + 1) * b];
        for (l, &h) in filter.iter().enumerate() {
            if h == 0.0 {
                continue;
            }
            if let Some(src_start) = lane_at(buf, t as isize - l as isize, n, b, boundary) {
                kernel.axpy(row, &buf[src_start..src_start + b], h);
            }
        }
    }
    out
}

/// One MODWT level applied to all `b` signals in `buf` (length `n*b`,
/// interleaved) at once. Returns `(v, w)`, each length `n*b` in the same
/// layout as `buf`.
pub fn forward_batch_single_level(
    buf: &[f64],
    n: usize,
    b: usize,
    filters: &FilterBank,
    boundary: Boundary,
    level: u32,
) -> Result<(Vec<f64>, Vec<f64>), WaveletError> {
    validate_batch(buf, n, b)?;
    if level == 0 {
        return Err(WaveletError::InvalidFilter(
            "modwt level must be >= 1".into(),
        ));
    }
    let rescaled = filters.modwt_rescale();
    let h0 = FilterBank::upsample_for_level(&rescaled.h0, level);
    let h1 = FilterBank::upsample_for_level(&rescaled.h1, level);
    let v = correlate_batch(buf, n, b, &h0, boundary);
    let w = correlate_batch(buf, n, b, &h1, boundary);
    Ok((v, w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{lookup, Wavelet};
    use crate::modwt::single::forward_single_level;

    #[test]
    fn batch_of_one_matches_single_signal_path() {
        let fb = lookup(Wavelet::Daubechies(4)).unwrap();
        let signal: Vec<f64> = (0..20).map(|i| (i as f64 * 0.3).sin()).collect();
        let (v_ref, w_ref) =
            forward_single_level(&signal, &fb, Boundary::Periodic, 1).unwrap();
        let (v_batch, w_batch) =
            forward_batch_single_level(&signal, signal.len(), 1, &fb, Boundary::Periodic, 1)
                .unwrap();
        for (a, b) in v_ref.iter().zip(v_batch.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
        for (a, b) in w_ref.iter().zip(w_batch.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn batch_processes_each_signal_independently() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let n = 8;
        let sig_a: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let sig_b: Vec<f64> = (0..n).map(|i| -(i as f64)).collect();
        let mut interleaved = vec![0.0; n * 2];
        for t in 0..n {
            interleaved[t * 2] = sig_a[t];
            interleaved[t * 2 + 1] = sig_b[t];
        }
        let (v, _w) =
            forward_batch_single_level(&interleaved, n, 2, &fb, Boundary::Periodic, 1).unwrap();
        let (v_a, _) = forward_single_level(&sig_a, &fb, Boundary::Periodic, 1).unwrap();
        let (v_b, _) = forward_single_level(&sig_b, &fb, Boundary::Periodic, 1).unwrap();
        for t in 0..n {
            assert!((v[t * 2] - v_a[t]).abs() < 1e-10);
            assert!((v[t * 2 + 1] - v_b[t]).abs() < 1e-10);
        }
    }

    #[test]
    fn rejects_length_mismatch() {
        let fb = lookup(Wavelet::Haar).unwrap();
        let buf = vec![0.0; 10];
        assert!(forward_batch_single_level(&buf, 3, 4, &fb, Boundary::Periodic, 1).is_err());
    }
}
