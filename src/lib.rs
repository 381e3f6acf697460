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
#![allow(clippy::excessive_precision)]
//! Maximal overlap discrete wavelet transform (MODWT) with a continuous
//! wavelet transform (CWT) front-end for time-frequency analysis, plus a
//! streaming denoiser built on top of both.
//!
//! - [`modwt`]: shift-invariant, any-length forward/inverse decomposition,
//!   multi-level cascades, and batched transforms over many signals at once.
//! - [`cwt`]: scale-to-frequency scalograms via per-scale FFT convolution.
//! - [`denoise`]: a block-streaming denoiser built from `modwt` + [`threshold`].
//! - [`filters`]: the registry of named discrete wavelets (Haar, Daubechies,
//!   Symlet, Coiflet) resolved to filter-bank taps.
pub mod convolve;
pub mod cwt;
pub mod denoise;
pub mod error;
mod fft;
pub mod filters;
mod mla;
pub mod modwt;
pub mod pool;
pub mod schedule;
mod simd;
pub mod threshold;

pub use cwt::{
    cwt, cwt_with_scales, ContinuousWavelet, CwtExecutor, CwtOptions, CwtWavelet, ScaleType,
};
pub use denoise::{DenoiserOptions, DenoisedBlock, StreamingDenoiser};
pub use error::WaveletError;
pub use filters::Wavelet;
pub use modwt::{
    forward_batch_single_level, forward_multi_level, forward_multi_level_adaptive,
    forward_single_level, inverse_multi_level, inverse_single_level, modwt_reconstruct_from,
    Boundary, MultiLevelModwt,
};
pub use schedule::{CancellationToken, PerfProfile};
pub use threshold::{ThresholdMethod, ThresholdRule};
