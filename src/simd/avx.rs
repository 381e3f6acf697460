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
use crate::simd::BatchLaneKernel;

/// AVX2-width tier: four `f64` lanes per iteration, matching a 256-bit
/// vector register. Pure safe Rust — `chunks_exact(4)` gives the compiler
/// everything it needs to emit the same vpfmadd231pd the teacher's raw
/// intrinsics did, without committing this crate to per-arch `unsafe`.
pub struct Avx2Kernel;

impl BatchLaneKernel for Avx2Kernel {
    fn axpy(&self, dst: &mut [f64], src: &[f64], scalar: f64) {
        let mut chunks = dst.chunks_exact_mut(4).zip(src.chunks_exact(4));
        for (d, s) in &mut chunks {
            d[0] = crate::mla::fmla(s[0], scalar, d[0]);
            d[1] = crate::mla::fmla(s[1], scalar, d[1]);
            d[2] = crate::mla::fmla(s[2], scalar, d[2]);
            d[3] = crate::mla::fmla(s[3], scalar, d[3]);
        }
        let rem = dst.len() - dst.len() % 4;
        for (d, &s) in dst[rem..].iter_mut().zip(src[rem..].iter()) {
            *d = crate::mla::fmla(s, scalar, *d);
        }
    }
}
