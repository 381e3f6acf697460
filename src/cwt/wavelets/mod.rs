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
//! Continuous wavelet families, tagged-union dispatched like [`crate::filters::Wavelet`]
//! rather than passed around as trait objects by the caller.
pub mod dog;
pub mod morlet;
pub mod paul;

use crate::cwt::wavelet::CwtWavelet;
use crate::error::WaveletError;
use dog::DogWavelet;
use morlet::MorletWavelet;
use paul::PaulWavelet;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousWavelet {
    /// Morlet with the given center angular frequency.
    Morlet(f64),
    /// Paul wavelet of the given integer order (`>= 1`).
    Paul(u32),
    /// Derivative-of-Gaussian wavelet of the given integer order (`>= 1`).
    Dog(u32),
}

impl Default for ContinuousWavelet {
    fn default() -> Self {
        ContinuousWavelet::Morlet(13.4)
    }
}

impl fmt::Display for ContinuousWavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuousWavelet::Morlet(mu) => write!(f, "morlet({mu})"),
            ContinuousWavelet::Paul(n) => write!(f, "paul{n}"),
            ContinuousWavelet::Dog(n) => write!(f, "dog{n}"),
        }
    }
}

impl ContinuousWavelet {
    pub fn build(&self) -> Result<Arc<dyn CwtWavelet>, WaveletError> {
        match *self {
            ContinuousWavelet::Morlet(mu) => {
                if !mu.is_finite() || mu <= 0.0 {
                    return Err(WaveletError::InvalidFilter(
                        "morlet center frequency must be finite and positive".into(),
                    ));
                }
                Ok(Arc::new(MorletWavelet::new(mu)))
            }
            ContinuousWavelet::Paul(n) => {
                if n == 0 {
                    return Err(WaveletError::InvalidFilter(
                        "paul wavelet order must be >= 1".into(),
                    ));
                }
                Ok(Arc::new(PaulWavelet::new(n)))
            }
            ContinuousWavelet::Dog(n) => {
                if n == 0 {
                    return Err(WaveletError::InvalidFilter(
                        "dog wavelet order must be >= 1".into(),
                    ));
                }
                Ok(Arc::new(DogWavelet::new(n)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_order_paul_and_dog() {
        assert!(ContinuousWavelet::Paul(0).build().is_err());
        assert!(ContinuousWavelet::Dog(0).build().is_err());
    }

    #[test]
    fn rejects_non_positive_morlet_frequency() {
        assert!(ContinuousWavelet::Morlet(0.0).build().is_err());
        assert!(ContinuousWavelet::Morlet(-1.0).build().is_err());
    }

    #[test]
    fn default_is_morlet() {
        assert!(matches!(ContinuousWavelet::default(), ContinuousWavelet::Morlet(_)));
    }
}
