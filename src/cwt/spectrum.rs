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
//! Per-scale spectrum arithmetic for the CWT executor: `dst = input *
//! conj(other) * normalize_value`, applied across a whole spectrum at once.
//! Dispatched once per process to whichever kernel the host CPU supports,
//! mirroring [`crate::simd::lane_kernel`]'s dispatch for the batch MODWT path.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod avx;
#[cfg(target_arch = "aarch64")]
mod neon;
mod scalar;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sse;

use num_complex::Complex64;
use std::sync::{Arc, OnceLock};

/// Fused conjugate-multiply-and-normalize over a whole spectrum.
pub trait SpectrumArithmetic: Send + Sync {
    /// `dst[i] = input[i] * conj(other[i]) * normalize_value` for every `i`.
    /// All three slices must share a length.
    fn mul_by_b_conj_normalize(
        &self,
        dst: &mut [Complex64],
        input: &[Complex64],
        other: &[Complex64],
        normalize_value: f64,
    );
}

fn detect_spectrum() -> Arc<dyn SpectrumArithmetic> {
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
    {
        if std::is_x86_feature_detected!("avx2") && std::is_x86_feature_detected!("fma") {
            return Arc::new(avx::AvxSpectrumF64);
        }
    }
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        if std::is_x86_feature_detected!("sse4.2") {
            return Arc::new(sse::Sse42SpectrumF64);
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        return Arc::new(neon::NeonSpectrumF64);
    }
    #[allow(unreachable_code)]
    Arc::new(scalar::ScalarSpectrumF64)
}

/// Process-wide, runtime-feature-detected spectrum kernel, resolved once and
/// reused for the lifetime of the process.
pub fn spectrum_arithmetic() -> Arc<dyn SpectrumArithmetic> {
    static KERNEL: OnceLock<Arc<dyn SpectrumArithmetic>> = OnceLock::new();
    KERNEL.get_or_init(detect_spectrum).clone()
}
