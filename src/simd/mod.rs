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
//! Lane-wise kernel used by the batch MODWT path (C7): every call is the
//! same `dst[i] += src[i] * scalar` update applied across the batch axis of
//! an interleaved `[sample][signal]` buffer, at whatever unroll width suits
//! the host's vector width.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod avx;
mod neon;
mod scalar;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sse;

use std::sync::{Arc, OnceLock};

/// One lane-wise fused-multiply-add step over a batch-width slice.
pub trait BatchLaneKernel: Send + Sync {
    /// `dst[i] = fma(src[i], scalar, dst[i])` for every `i`. `dst` and `src`
    /// must be the same length; excess beyond the kernel's native width is
    /// handled internally, so callers never need to chunk the batch
    /// dimension themselves.
    fn axpy(&self, dst: &mut [f64], src: &[f64], scalar: f64);
}

fn detect_kernel() -> Arc<dyn BatchLaneKernel> {
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
    {
        if std::is_x86_feature_detected!("avx2") && std::is_x86_feature_detected!("fma") {
            return Arc::new(avx::Avx2Kernel);
        }
    }
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        if std::is_x86_feature_detected!("sse4.2") {
            return Arc::new(sse::Sse42Kernel);
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        return Arc::new(neon::NeonKernel);
    }
    #[allow(unreachable_code)]
    Arc::new(scalar::ScalarKernel)
}

/// Process-wide, runtime-feature-detected lane kernel, resolved once and
/// reused for the lifetime of the process — mirrors the CWT spectrum
/// arithmetic dispatch, just for the batch MODWT's accumulate-step instead
/// of a conjugate-multiply.
pub fn lane_kernel() -> Arc<dyn BatchLaneKernel> {
    static KERNEL: OnceLock<Arc<dyn BatchLaneKernel>> = OnceLock::new();
    KERNEL.get_or_init(detect_kernel).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kernel_agrees_with_scalar_reference() {
        let src: Vec<f64> = (0..37).map(|i| i as f64 * 0.5).collect();
        let scalar_v = 1.75;
        let kernels: Vec<Arc<dyn BatchLaneKernel>> = vec![
            Arc::new(scalar::ScalarKernel),
            Arc::new(neon::NeonKernel),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Arc::new(avx::Avx2Kernel),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Arc::new(sse::Sse42Kernel),
        ];
        let mut reference = vec![0.0; src.len()];
        scalar::ScalarKernel.axpy(&mut reference, &src, scalar_v);

        for kernel in kernels {
            let mut dst = vec![0.0; src.len()];
            kernel.axpy(&mut dst, &src, scalar_v);
            for (a, b) in dst.iter().zip(reference.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn process_wide_kernel_resolves_and_is_stable() {
        let k1 = lane_kernel();
        let k2 = lane_kernel();
        assert!(Arc::ptr_eq(&k1, &k2));
    }
}
