//! End-to-end scenarios against the public facade only.
use modwave::filters::{lookup, Wavelet};
use modwave::{
    cwt, forward_batch_single_level, forward_single_level, inverse_single_level, Boundary,
    ContinuousWavelet, CwtOptions, DenoiserOptions, StreamingDenoiser,
};

fn assert_close(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() <= tol, "{x} vs {y} exceeds {tol}");
    }
}

#[test]
fn haar_periodic_roundtrip_power_of_two() {
    let fb = lookup(Wavelet::Haar).unwrap();
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let (v, w) = forward_single_level(&x, &fb, Boundary::Periodic, 1).unwrap();
    assert_eq!(v.len(), x.len());
    assert_eq!(w.len(), x.len());
    let reconstructed = inverse_single_level(&v, &w, &fb, Boundary::Periodic, 1).unwrap();
    assert_close(&reconstructed, &x, 1e-12);
}

#[test]
fn haar_periodic_roundtrip_non_power_of_two() {
    let fb = lookup(Wavelet::Haar).unwrap();
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let (v, w) = forward_single_level(&x, &fb, Boundary::Periodic, 1).unwrap();
    assert_eq!(v.len(), 7);
    assert_eq!(w.len(), 7);
    let reconstructed = inverse_single_level(&v, &w, &fb, Boundary::Periodic, 1).unwrap();
    assert_close(&reconstructed, &x, 1e-12);
}

#[test]
fn db4_zero_padding_energy_dominated_by_approximation() {
    let fb = lookup(Wavelet::Daubechies(4)).unwrap();
    let n = 512;
    let signal: Vec<f64> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 32.0).sin())
        .collect();
    let (v, w) = forward_single_level(&signal, &fb, Boundary::ZeroPadding, 1).unwrap();
    let energy_v: f64 = v.iter().map(|x| x * x).sum();
    let energy_w: f64 = w.iter().map(|x| x * x).sum();
    assert!(
        energy_v > 10.0 * energy_w,
        "approximation energy {energy_v} should dominate detail energy {energy_w} by > 10x"
    );
}

#[test]
fn streaming_denoiser_emits_expected_block_count_and_converges() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(42);
    let total = 2000usize;
    let signal: Vec<f64> = (0..total)
        .map(|i| {
            let clean = (2.0 * std::f64::consts::PI * i as f64 / 64.0).sin();
            let noise: f64 = rng.r#gen::<f64>();
            clean + 0.2 * (noise - 0.5) * 2.0
        })
        .collect();

    let options = DenoiserOptions {
        block_size: 256,
        ..Default::default()
    };
    let mut denoiser = StreamingDenoiser::new("haar", options).unwrap();

    let mut all_blocks = Vec::new();
    for chunk in signal.chunks(137) {
        let blocks = denoiser.push(chunk).unwrap();
        all_blocks.extend(blocks);
    }
    denoiser.close();

    assert_eq!(all_blocks.len(), total / 256);

    let block4_sigma = all_blocks[3].sigma_estimate;
    assert!(
        (block4_sigma - 0.2).abs() <= 0.2 * 0.2,
        "sigma estimate {block4_sigma} should be within 20% of 0.2 by block 4"
    );
}

#[test]
fn cwt_morlet_chirp_dominant_scale_tracks_instantaneous_frequency() {
    let n = 2048;
    let signal: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            (2.0 * std::f64::consts::PI * (5.0 + 40.0 * t) * t).sin()
        })
        .collect();

    let (coeffs, scales) = cwt(
        &signal,
        ContinuousWavelet::Morlet(13.4),
        CwtOptions {
            scale_type: modwave::ScaleType::Log,
            nv: 4.0,
            l1_norm: false,
        },
    )
    .unwrap();

    let sample_times = [n / 8, n / 2, n - n / 8];
    let mut dominant = Vec::new();
    for &t in &sample_times {
        let (best_idx, _) = coeffs
            .iter()
            .enumerate()
            .map(|(i, row)| (i, row[t].norm()))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        dominant.push(scales[best_idx]);
    }
    assert!(dominant[0] >= dominant[1]);
    assert!(dominant[1] >= dominant[2]);
}

#[test]
fn batch_forward_matches_single_signal_forward() {
    let fb = lookup(Wavelet::Daubechies(4)).unwrap();
    let signals: Vec<Vec<f64>> = (0..4)
        .map(|b| (0..64).map(|i| ((i + b * 3) as f64 * 0.1).cos()).collect())
        .collect();

    let n = 64;
    let bcount = signals.len();
    let mut interleaved = vec![0.0f64; n * bcount];
    for (b, sig) in signals.iter().enumerate() {
        for (i, &v) in sig.iter().enumerate() {
            interleaved[i * bcount + b] = v;
        }
    }

    let (v_batch, w_batch) =
        forward_batch_single_level(&interleaved, n, bcount, &fb, Boundary::Periodic, 1).unwrap();

    for (b, sig) in signals.iter().enumerate() {
        let (v_single, w_single) = forward_single_level(sig, &fb, Boundary::Periodic, 1).unwrap();
        for i in 0..n {
            assert!((v_batch[i * bcount + b] - v_single[i]).abs() <= 1e-9);
            assert!((w_batch[i * bcount + b] - w_single[i]).abs() <= 1e-9);
        }
    }
}
