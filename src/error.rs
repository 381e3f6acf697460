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
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Errors produced by the transform core.
///
/// These are semantic kinds a caller can act on directly — retry, surface to
/// a user, close a stream — rather than an opaque wrapper over a lower-level
/// failure.
#[derive(Debug)]
pub enum WaveletError {
    /// Signal is null/empty or contains a non-finite sample.
    InvalidSignal(String),
    /// Filter is empty, has non-finite coefficients, or fails the
    /// perfect-reconstruction relation.
    InvalidFilter(String),
    /// Two buffers that must share a length (e.g. inverse MODWT's
    /// approximation/detail pair) do not.
    IncompatibleLength { expected: usize, actual: usize },
    /// A wavelet name does not resolve to a registered filter bank or
    /// continuous-wavelet constructor.
    UnknownWavelet(String),
    /// Allocation failed while acquiring a buffer of the given element count.
    ResourceExhaustion(usize),
    /// Operation attempted on a denoiser stream that has already been closed.
    StreamClosed,
    /// Operation was cancelled via its cancellation token before completion.
    Cancelled,
    /// An FFT-internal precondition was violated, e.g. a wavelet kernel
    /// returned the wrong length for the requested frequency grid.
    FftError(String),
}

impl Display for WaveletError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WaveletError::InvalidSignal(msg) => write!(f, "invalid signal: {msg}"),
            WaveletError::InvalidFilter(msg) => write!(f, "invalid filter: {msg}"),
            WaveletError::IncompatibleLength { expected, actual } => write!(
                f,
                "incompatible length: expected {expected} but got {actual}"
            ),
            WaveletError::UnknownWavelet(name) => write!(f, "unknown wavelet: {name}"),
            WaveletError::ResourceExhaustion(n) => {
                write!(f, "failed to allocate buffer with {n} elements")
            }
            WaveletError::StreamClosed => write!(f, "operation on a closed stream"),
            WaveletError::Cancelled => write!(f, "operation cancelled"),
            WaveletError::FftError(msg) => write!(f, "fft error: {msg}"),
        }
    }
}

impl Error for WaveletError {}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::error::WaveletError::ResourceExhaustion($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_non_empty() {
        let kinds = [
            WaveletError::InvalidSignal("empty".into()),
            WaveletError::InvalidFilter("non-finite tap".into()),
            WaveletError::IncompatibleLength {
                expected: 4,
                actual: 5,
            },
            WaveletError::UnknownWavelet("db99".into()),
            WaveletError::ResourceExhaustion(1 << 20),
            WaveletError::StreamClosed,
            WaveletError::Cancelled,
            WaveletError::FftError("bad length".into()),
        ];
        for kind in kinds {
            assert!(!kind.to_string().is_empty());
        }
    }
}
