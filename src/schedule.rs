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
//! Work distribution for the per-scale CWT loop: a bounded `rayon` pool,
//! an auto-tuning profile deciding when fan-out is worth it, and a
//! cooperative cancellation token a long-running call can poll.
use crate::error::WaveletError;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Thresholds controlling when a call pays the cost of fanning out across
/// the worker pool versus running the straight-line sequential path.
/// Below the threshold, per-task overhead (thread wakeup, work-stealing)
/// dwarfs the work itself.
#[derive(Debug, Clone, Copy)]
pub struct PerfProfile {
    /// Minimum per-call element count before SIMD-kernel dispatch (as
    /// opposed to a scalar loop) pays for itself.
    pub simd_lane_threshold: usize,
    /// Minimum FFT length before the forward/inverse transform is worth
    /// planning as a full kernel rather than handled as a tiny special case.
    pub fft_parallel_threshold: usize,
    /// Minimum scale count before the per-scale CWT loop is handed to the
    /// worker pool instead of run on the calling thread.
    pub scale_parallel_threshold: usize,
}

impl Default for PerfProfile {
    fn default() -> Self {
        Self {
            simd_lane_threshold: 32,
            fft_parallel_threshold: 4096,
            scale_parallel_threshold: 8,
        }
    }
}

/// A shared, clonable flag a long-running call can poll to stop early.
/// Cancelling does not interrupt work already in flight on another thread;
/// it only stops new units of work from starting.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

fn global_pool() -> &'static ThreadPool {
    static POOL: OnceLock<ThreadPool> = OnceLock::new();
    POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("modwave-worker-{i}"))
            .build()
            .expect("failed to size the default worker pool from available parallelism")
    })
}

/// Run `f` once per index in `0..count`, on the shared worker pool when
/// `count >= threshold` and on the calling thread otherwise, stopping (with
/// [`WaveletError::Cancelled`]) as soon as `cancel` is observed cancelled or
/// any unit of work returns an error.
pub fn parallel_map<T, F>(
    count: usize,
    threshold: usize,
    cancel: Option<&CancellationToken>,
    f: F,
) -> Result<Vec<T>, WaveletError>
where
    T: Send,
    F: Fn(usize) -> Result<T, WaveletError> + Sync + Send,
{
    let guarded = |idx: usize| -> Result<T, WaveletError> {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                return Err(WaveletError::Cancelled);
            }
        }
        f(idx)
    };

    if count >= threshold {
        global_pool().install(|| (0..count).into_par_iter().map(guarded).collect())
    } else {
        (0..count).map(guarded).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn sequential_and_parallel_paths_agree() {
        let seq = parallel_map(16, usize::MAX, None, |i| Ok::<_, WaveletError>(i * i)).unwrap();
        let par = parallel_map(16, 0, None, |i| Ok::<_, WaveletError>(i * i)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn cancellation_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let err = parallel_map(8, 0, Some(&token), |i| Ok::<_, WaveletError>(i)).unwrap_err();
        assert!(matches!(err, WaveletError::Cancelled));
    }

    #[test]
    fn propagates_first_error() {
        let calls = AtomicUsize::new(0);
        let result = parallel_map(8, usize::MAX, None, |i| {
            calls.fetch_add(1, Ordering::Relaxed);
            if i == 3 {
                Err(WaveletError::InvalidSignal("boom".into()))
            } else {
                Ok(i)
            }
        });
        assert!(result.is_err());
    }
}
