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
use num_complex::Complex64;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex, OnceLock};

/// `w[k] = exp(-2*pi*i*k/n)` for `k in 0..n/2`, the half-table a radix-2 DIT
/// pass walks through (the other half is the negation of this one).
fn build_half_twiddles(n: usize) -> Arc<Vec<Complex64>> {
    let half = n / 2;
    let mut table = Vec::with_capacity(half.max(1));
    for k in 0..half {
        let theta = -2.0 * PI * (k as f64) / (n as f64);
        table.push(Complex64::new(theta.cos(), theta.sin()));
    }
    Arc::new(table)
}

fn cache() -> &'static Mutex<HashMap<usize, Arc<Vec<Complex64>>>> {
    static CACHE: OnceLock<Mutex<HashMap<usize, Arc<Vec<Complex64>>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Process-wide twiddle-factor cache keyed by transform length. Populated
/// lazily and shared across every FFT call in the process; a repeated
/// length (the common case — transform size rarely changes mid-run) never
/// recomputes trigonometric values.
pub struct TwiddleCache;

impl TwiddleCache {
    /// Half-length forward twiddle table for an `n`-point radix-2 transform.
    pub fn half_twiddles(n: usize) -> Arc<Vec<Complex64>> {
        let mut guard = cache().lock().unwrap();
        guard
            .entry(n)
            .or_insert_with(|| build_half_twiddles(n))
            .clone()
    }

    /// Drop every cached table. Exposed for long-running processes that
    /// cycle through many distinct transform lengths and want to reclaim
    /// the cache's memory.
    pub fn clear() {
        cache().lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_twiddles_have_unit_modulus() {
        let table = TwiddleCache::half_twiddles(16);
        assert_eq!(table.len(), 8);
        for w in table.iter() {
            assert!((w.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cache_returns_same_values_on_repeat() {
        let a = TwiddleCache::half_twiddles(64);
        let b = TwiddleCache::half_twiddles(64);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }
}
