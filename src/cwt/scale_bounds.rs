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
//! Numerical root/peak-finding over a continuous wavelet's magnitude
//! response, used to bound the range of scales for which its Fourier-domain
//! support actually falls inside the signal's Nyquist range.
use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use crate::error::try_vec;
use crate::mla::fmla;
use std::sync::Arc;

pub(crate) fn linspace(start: f64, end: f64, samples: usize) -> Result<Vec<f64>, WaveletError> {
    if samples == 0 {
        return Ok(Vec::new());
    }
    if samples == 1 {
        return Ok(vec![start]);
    }
    let delta = (end - start) / (samples - 1) as f64;
    let mut result = try_vec![0.0f64; samples];
    for (i, dst) in result.iter_mut().enumerate() {
        *dst = if i == samples - 1 {
            end
        } else {
            fmla(i as f64, delta, start)
        };
    }
    Ok(result)
}

fn linspace_exclusive(start: f64, end: f64, samples: usize) -> Result<Vec<f64>, WaveletError> {
    if samples == 0 {
        return Ok(Vec::new());
    }
    let step = (end - start) / samples as f64;
    let mut result = try_vec![0.0f64; samples];
    for (i, dst) in result.iter_mut().enumerate() {
        *dst = fmla(i as f64, step, start);
    }
    Ok(result)
}

fn find_maximum(
    wavelet: &Arc<dyn CwtWavelet>,
    step_size: f64,
    steps_per_search: usize,
    step_start: f64,
    step_limit: f64,
    min_value: f64,
) -> Result<(f64, f64), WaveletError> {
    let increment = steps_per_search as f64 * step_size;

    let mut largest_max = min_value;
    let mut input_value = step_start;
    let mut search_idx = 0usize;

    loop {
        let start = step_start + increment * search_idx as f64;
        let end = start + increment;

        let input_values = linspace_exclusive(start, end, steps_per_search)?;
        let output_values: Vec<f64> = wavelet
            .make_wavelet(&input_values)?
            .into_iter()
            .map(|v| fmla(v.re, v.re, v.im * v.im).sqrt())
            .collect();

        if input_values.len() != output_values.len() {
            return Err(WaveletError::FftError(
                "wavelet kernel returned the wrong length for its input grid".into(),
            ));
        }

        let mut output_max = f64::NEG_INFINITY;
        let mut argmax = 0usize;
        for (i, &v) in output_values.iter().enumerate() {
            if v > output_max {
                output_max = v;
                argmax = i;
            }
        }

        if output_max > largest_max {
            largest_max = output_max;
            input_value = input_values[argmax];
        } else if output_max < largest_max {
            break;
        }

        search_idx += 1;

        if *input_values.last().unwrap_or(&0.0) > step_limit {
            return Err(WaveletError::InvalidFilter(format!(
                "could not find wavelet magnitude maximum within (step_size={step_size}, \
steps_per_search={steps_per_search}, step_start={step_start}, step_limit={step_limit})"
            )));
        }
    }

    Ok((input_value, largest_max))
}

fn find_first_occurrence(
    wavelet: &Arc<dyn CwtWavelet>,
    value: f64,
    step_size: f64,
    steps_per_search: usize,
    step_start: f64,
    step_limit: f64,
) -> Result<(f64, f64), WaveletError> {
    let increment = steps_per_search as f64 * step_size;

    let mut search_idx = 0usize;
    let mut step_limit_exceeded = false;
    let mut input_values: Vec<f64>;
    let mut output_values: Vec<f64>;
    let idx;

    loop {
        let start = fmla(increment, search_idx as f64, step_start);
        let end = start + increment;

        input_values = linspace_exclusive(start, end, steps_per_search)?;

        if *input_values.last().unwrap_or(&0.0) > step_limit {
            step_limit_exceeded = true;
            for v in &mut input_values {
                *v = v.min(step_limit);
            }
        }

        output_values = wavelet
            .make_wavelet(&input_values)?
            .into_iter()
            .map(|v| fmla(v.re, v.re, v.im * v.im).sqrt())
            .collect();

        if input_values.len() != output_values.len() {
            return Err(WaveletError::FftError(
                "wavelet kernel returned the wrong length for its input grid".into(),
            ));
        }

        let mut mxdiff = 0.0f64;
        for w in output_values.windows(2) {
            mxdiff = mxdiff.max((w[1] - w[0]).abs());
        }

        let mut found = false;
        let mut best_idx = 0usize;
        let mut best_err = f64::INFINITY;
        for (i, &v) in output_values.iter().enumerate() {
            let err = (v - value).abs();
            if err <= mxdiff && err < best_err {
                best_err = err;
                best_idx = i;
                found = true;
            }
        }

        if found {
            idx = best_idx;
            break;
        }

        search_idx += 1;
        if step_limit_exceeded {
            return Err(WaveletError::InvalidFilter(format!(
                "could not find an input value producing output {value} within \
(step_size={step_size}, steps_per_search={steps_per_search}, step_start={step_start}, \
step_limit={step_limit})"
            )));
        }
    }

    Ok((input_values[idx], output_values[idx]))
}

pub(crate) fn find_min_scale(wavelet: &Arc<dyn CwtWavelet>, cutoff: f64) -> Result<f64, WaveletError> {
    let (w_peak, peak) = find_maximum(wavelet, 1e-3, 10000, 0.0, 1000.0, -1.0)?;
    let (step_start, step_limit) = if cutoff > 0.0 {
        (w_peak, 10.0 * w_peak)
    } else {
        (0.0, w_peak)
    };
    let (w_cutoff, _) =
        find_first_occurrence(wavelet, cutoff.abs() * peak, 1e-3, 10000, step_start, step_limit)?;
    Ok(w_cutoff * std::f64::consts::FRAC_1_PI)
}

fn find_wrap_index(n_divs: &[f64]) -> Option<usize> {
    n_divs
        .iter()
        .map(|x| x.fract())
        .collect::<Vec<_>>()
        .windows(2)
        .enumerate()
        .find(|(_, w)| w[1] - w[0] < -0.8)
        .map(|(i, _)| i)
}

pub(crate) fn find_max_scale(
    wavelet: &Arc<dyn CwtWavelet>,
    n: usize,
    min_cutoff: f64,
    max_cutoff: f64,
) -> Result<f64, WaveletError> {
    if max_cutoff <= 0.0 || min_cutoff <= 0.0 {
        return Err(WaveletError::InvalidFilter(format!(
            "max_cutoff and min_cutoff must be positive (got {min_cutoff}, {max_cutoff})"
        )));
    } else if max_cutoff <= min_cutoff {
        return Err(WaveletError::InvalidFilter(format!(
            "max_cutoff must exceed min_cutoff (got {min_cutoff}, {max_cutoff})"
        )));
    }

    let (w_peak, peak) = find_maximum(wavelet, 1e-3, 10000, 0.0, 1000.0, -1.0)?;

    // Instead of searching for symmetric xi-spacing about the peak, pick
    // points above a cutoff ratio of peak magnitude and find the one whose
    // spacing divides the distance from there to zero an integer number of
    // times.
    let (w_cutoff, _) = find_first_occurrence(wavelet, min_cutoff * peak, 1e-3, 10000, 0.0, w_peak)?;

    let step = 1.0 / n as f64;
    let mut w_ltp = Vec::new();
    let mut v = w_cutoff;
    while v < w_peak {
        w_ltp.push(v);
        v += step;
    }

    let all_but_last = &w_ltp[..w_ltp.len().saturating_sub(1)];
    let div_size: Vec<f64> = all_but_last.iter().map(|&x| (w_peak - x) * 2.0).collect();
    let n_divs: Vec<f64> = all_but_last
        .iter()
        .zip(div_size.iter())
        .map(|(&a, &b)| a / b)
        .collect();

    let idx = find_wrap_index(&n_divs).ok_or_else(|| {
        WaveletError::InvalidFilter(
            "failed to find sufficiently-integer frequency-grid divisions; try widening \
(min_cutoff, max_cutoff)"
                .into(),
        )
    })?;
    let div_scale = div_size[idx + 1];
    let w_1div = std::f64::consts::PI / (n / 2) as f64;
    let _ = max_cutoff; // validated above; not otherwise used in this search
    Ok(div_scale / w_1div)
}

#[derive(Debug, Clone, Copy)]
pub struct MinMaxScale {
    pub min: f64,
    pub max: f64,
}

pub fn find_min_max_scales(
    wavelet: &Arc<dyn CwtWavelet>,
    cutoff: f64,
) -> Result<MinMaxScale, WaveletError> {
    let min = find_min_scale(wavelet, cutoff)?;
    const M: usize = 4096;
    let max = find_max_scale(wavelet, M, 0.6, 0.8)?;
    Ok(MinMaxScale { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwt::wavelets::morlet::MorletWavelet;

    #[test]
    fn linspace_endpoints_are_exact() {
        let v = linspace(0.0, 10.0, 5).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[4], 10.0);
    }

    #[test]
    fn min_max_scales_bracket_morlet_peak() {
        let wavelet: Arc<dyn CwtWavelet> = Arc::new(MorletWavelet::default());
        let bounds = find_min_max_scales(&wavelet, 0.5).unwrap();
        assert!(bounds.min > 0.0);
        assert!(bounds.max > bounds.min);
    }
}
