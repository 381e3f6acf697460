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
//! Streaming MODWT denoiser: a ring-buffered block pipeline that estimates
//! noise from each block's finest detail level, thresholds every level, and
//! hands the reconstructed block to whichever subscribers are listening.
use crate::error::WaveletError;
use crate::filters::{lookup_by_name, FilterBank};
use crate::modwt::{forward_multi_level, inverse_multi_level, Boundary};
use crate::threshold::{apply_threshold, mad_sigma, resolve_threshold, ThresholdMethod, ThresholdRule};
use std::collections::VecDeque;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};

/// Per-call configuration for [`StreamingDenoiser`].
#[derive(Debug, Clone, Copy)]
pub struct DenoiserOptions {
    pub block_size: usize,
    pub levels: u32,
    pub boundary: Boundary,
    pub rule: ThresholdRule,
    pub method: ThresholdMethod,
    /// Exponential-moving-average weight applied to each new block's sigma
    /// estimate, `0 < alpha <= 1`. `1.0` disables smoothing (each block uses
    /// only its own estimate).
    pub mad_ema_alpha: f64,
    /// Number of trailing finest-detail samples (across block boundaries)
    /// the MAD estimator is computed over, `>= 32`. Wider windows smooth the
    /// noise estimate at the cost of reacting more slowly to a genuine
    /// change in noise level.
    pub noise_window: usize,
    /// Multiplier applied to the smoothed sigma estimate before it reaches
    /// the threshold rule (`>= 0`). `1.0` leaves the method's own threshold
    /// formula unscaled; values above `1.0` threshold more aggressively.
    pub threshold_multiplier: f64,
}

impl Default for DenoiserOptions {
    fn default() -> Self {
        Self {
            block_size: 256,
            levels: 3,
            boundary: Boundary::Periodic,
            rule: ThresholdRule::Soft,
            method: ThresholdMethod::Universal,
            mad_ema_alpha: 0.2,
            noise_window: 256,
            threshold_multiplier: 1.0,
        }
    }
}

/// One denoised block, in the order it was produced.
#[derive(Debug, Clone)]
pub struct DenoisedBlock {
    pub sequence: u64,
    pub samples: Vec<f64>,
    pub sigma_estimate: f64,
}

/// Ring-buffered streaming denoiser. Feed samples with [`push`](Self::push);
/// whenever enough samples have accumulated for a full block, it is
/// denoised and broadcast to every subscriber registered via
/// [`subscribe`](Self::subscribe), in strict sequence order — block `k+1` is
/// never emitted before block `k`.
#[derive(Debug)]
pub struct StreamingDenoiser {
    options: DenoiserOptions,
    filters: FilterBank,
    ring: VecDeque<f64>,
    noise_samples: VecDeque<f64>,
    ema_sigma: Option<f64>,
    next_sequence: u64,
    subscribers: Vec<SyncSender<DenoisedBlock>>,
    closed: bool,
}

impl StreamingDenoiser {
    pub fn new(wavelet: &str, options: DenoiserOptions) -> Result<Self, WaveletError> {
        if options.block_size == 0 {
            return Err(WaveletError::InvalidSignal(
                "denoiser block size must be non-zero".into(),
            ));
        }
        if options.mad_ema_alpha <= 0.0 || options.mad_ema_alpha > 1.0 {
            return Err(WaveletError::InvalidFilter(
                "mad_ema_alpha must be in (0, 1]".into(),
            ));
        }
        if options.noise_window < 32 {
            return Err(WaveletError::InvalidFilter(
                "noise_window must be >= 32".into(),
            ));
        }
        if options.threshold_multiplier < 0.0 {
            return Err(WaveletError::InvalidFilter(
                "threshold_multiplier must be >= 0".into(),
            ));
        }
        Ok(Self {
            options,
            filters: lookup_by_name(wavelet)?,
            ring: VecDeque::with_capacity(options.block_size * 2),
            noise_samples: VecDeque::with_capacity(options.noise_window),
            ema_sigma: None,
            next_sequence: 0,
            subscribers: Vec::new(),
            closed: false,
        })
    }

    /// Register a new subscriber with a bounded mailbox of `capacity`
    /// blocks. A full mailbox is back-pressure, surfaced to the pusher as
    /// [`WaveletError::ResourceExhaustion`] rather than dropped silently.
    pub fn subscribe(&mut self, capacity: usize) -> Receiver<DenoisedBlock> {
        let (tx, rx) = sync_channel(capacity.max(1));
        self.subscribers.push(tx);
        rx
    }

    /// Push new samples into the ring buffer, denoising and emitting every
    /// full block that results. Returns the blocks emitted by this call (for
    /// callers not using [`subscribe`](Self::subscribe)) as well as
    /// broadcasting them to subscribers.
    pub fn push(&mut self, samples: &[f64]) -> Result<Vec<DenoisedBlock>, WaveletError> {
        if self.closed {
            return Err(WaveletError::StreamClosed);
        }
        if samples.iter().any(|v| !v.is_finite()) {
            return Err(WaveletError::InvalidSignal(
                "streaming input contains a non-finite sample".into(),
            ));
        }
        self.ring.extend(samples.iter().copied());

        let mut emitted = Vec::new();
        while self.ring.len() >= self.options.block_size {
            let block: Vec<f64> = self.ring.drain(..self.options.block_size).collect();
            let denoised = self.denoise_block(&block)?;
            self.broadcast(&denoised)?;
            emitted.push(denoised);
        }
        Ok(emitted)
    }

    fn denoise_block(&mut self, block: &[f64]) -> Result<DenoisedBlock, WaveletError> {
        let mut decomposed =
            forward_multi_level(block, &self.filters, self.options.boundary, self.options.levels)?;

        let finest = decomposed
            .details
            .first()
            .ok_or_else(|| WaveletError::InvalidFilter("no detail levels to denoise".into()))?;

        self.noise_samples.extend(finest.iter().copied());
        while self.noise_samples.len() > self.options.noise_window {
            self.noise_samples.pop_front();
        }
        let window: Vec<f64> = self.noise_samples.iter().copied().collect();
        let instantaneous_sigma = mad_sigma(&window)?;
        let sigma = match self.ema_sigma {
            Some(prev) => {
                prev * (1.0 - self.options.mad_ema_alpha) + instantaneous_sigma * self.options.mad_ema_alpha
            }
            None => instantaneous_sigma,
        };
        self.ema_sigma = Some(sigma);
        let scaled_sigma = sigma * self.options.threshold_multiplier;

        for detail in decomposed.details.iter_mut() {
            let t = resolve_threshold(detail, scaled_sigma, self.options.method);
            apply_threshold(detail, t, self.options.rule);
        }

        let samples = inverse_multi_level(&decomposed, &self.filters, self.options.boundary)?;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Ok(DenoisedBlock {
            sequence,
            samples,
            sigma_estimate: sigma,
        })
    }

    fn broadcast(&mut self, block: &DenoisedBlock) -> Result<(), WaveletError> {
        let mut disconnected = Vec::new();
        let mut full_capacity = None;
        for (i, tx) in self.subscribers.iter().enumerate() {
            match tx.try_send(block.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => full_capacity = Some(i),
                Err(TrySendError::Disconnected(_)) => disconnected.push(i),
            }
        }
        for i in disconnected.into_iter().rev() {
            self.subscribers.remove(i);
        }
        if full_capacity.is_some() {
            return Err(WaveletError::ResourceExhaustion(block.samples.len()));
        }
        Ok(())
    }

    /// Close the stream. Any buffered partial block shorter than
    /// `block_size` is discarded — there is no well-defined MODWT
    /// decomposition for a truncated block — and subsequent
    /// [`push`](Self::push) calls return [`WaveletError::StreamClosed`].
    pub fn close(&mut self) {
        self.closed = true;
        self.ring.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn pending_samples(&self) -> usize {
        self.ring.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_noisy_signal(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let clean = (i as f64 * 0.15).sin() * 2.0;
                let noise = ((i as f64 * 12.9898).sin() * 43758.5453).fract() * 0.2;
                clean + noise
            })
            .collect()
    }

    #[test]
    fn emits_blocks_in_strict_sequence_order() {
        let mut denoiser =
            StreamingDenoiser::new("db4", DenoiserOptions { block_size: 64, ..Default::default() })
                .unwrap();
        let signal = synthetic_noisy_signal(64 * 5);
        let blocks = denoiser.push(&signal).unwrap();
        assert_eq!(blocks.len(), 5);
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.sequence, i as u64);
        }
    }

    #[test]
    fn partial_block_is_buffered_not_emitted() {
        let mut denoiser =
            StreamingDenoiser::new("haar", DenoiserOptions { block_size: 32, ..Default::default() })
                .unwrap();
        let blocks = denoiser.push(&vec![0.1; 20]).unwrap();
        assert!(blocks.is_empty());
        assert_eq!(denoiser.pending_samples(), 20);
    }

    #[test]
    fn push_after_close_is_stream_closed_error() {
        let mut denoiser =
            StreamingDenoiser::new("haar", DenoiserOptions { block_size: 16, ..Default::default() })
                .unwrap();
        denoiser.close();
        let err = denoiser.push(&[0.0; 4]).unwrap_err();
        assert!(matches!(err, WaveletError::StreamClosed));
    }

    #[test]
    fn subscriber_receives_emitted_blocks() {
        let mut denoiser =
            StreamingDenoiser::new("db2", DenoiserOptions { block_size: 32, ..Default::default() })
                .unwrap();
        let rx = denoiser.subscribe(4);
        let signal = synthetic_noisy_signal(32 * 2);
        denoiser.push(&signal).unwrap();
        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.sequence, 0);
        assert_eq!(second.sequence, 1);
    }

    #[test]
    fn full_subscriber_mailbox_reports_resource_exhaustion() {
        let mut denoiser =
            StreamingDenoiser::new("db2", DenoiserOptions { block_size: 16, ..Default::default() })
                .unwrap();
        let _rx = denoiser.subscribe(1);
        let signal = synthetic_noisy_signal(16 * 3);
        let err = denoiser.push(&signal).unwrap_err();
        assert!(matches!(err, WaveletError::ResourceExhaustion(_)));
    }

    #[test]
    fn ema_smooths_sigma_across_blocks() {
        let mut denoiser = StreamingDenoiser::new(
            "db4",
            DenoiserOptions {
                block_size: 64,
                mad_ema_alpha: 0.1,
                ..Default::default()
            },
        )
        .unwrap();
        let signal = synthetic_noisy_signal(64 * 4);
        let blocks = denoiser.push(&signal).unwrap();
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.sigma_estimate >= 0.0));
    }

    #[test]
    fn rejects_non_finite_input() {
        let mut denoiser =
            StreamingDenoiser::new("haar", DenoiserOptions::default()).unwrap();
        assert!(denoiser.push(&[f64::NAN]).is_err());
    }

    #[test]
    fn rejects_noise_window_below_minimum() {
        let err = StreamingDenoiser::new(
            "haar",
            DenoiserOptions { noise_window: 31, ..Default::default() },
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidFilter(_)));
    }

    #[test]
    fn rejects_negative_threshold_multiplier() {
        let err = StreamingDenoiser::new(
            "haar",
            DenoiserOptions { threshold_multiplier: -1.0, ..Default::default() },
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidFilter(_)));
    }

    #[test]
    fn larger_threshold_multiplier_shrinks_more_energy() {
        let signal = synthetic_noisy_signal(64 * 4);

        let mut mild = StreamingDenoiser::new(
            "db4",
            DenoiserOptions { block_size: 64, threshold_multiplier: 0.5, ..Default::default() },
        )
        .unwrap();
        let mild_blocks = mild.push(&signal).unwrap();

        let mut aggressive = StreamingDenoiser::new(
            "db4",
            DenoiserOptions { block_size: 64, threshold_multiplier: 4.0, ..Default::default() },
        )
        .unwrap();
        let aggressive_blocks = aggressive.push(&signal).unwrap();

        let mild_energy: f64 = mild_blocks
            .iter()
            .flat_map(|b| b.samples.iter())
            .map(|v| v * v)
            .sum();
        let aggressive_energy: f64 = aggressive_blocks
            .iter()
            .flat_map(|b| b.samples.iter())
            .map(|v| v * v)
            .sum();
        assert!(aggressive_energy <= mild_energy);
    }

    #[test]
    fn noise_window_persists_across_block_boundaries() {
        let mut denoiser = StreamingDenoiser::new(
            "db2",
            DenoiserOptions { block_size: 16, noise_window: 64, ..Default::default() },
        )
        .unwrap();
        let signal = synthetic_noisy_signal(16 * 6);
        denoiser.push(&signal).unwrap();
        assert!(denoiser.noise_samples.len() <= 64);
        assert!(!denoiser.noise_samples.is_empty());
    }
}
