//! Timing side-channel check for `timing_safe_equal`.
//!
//! Compares the time to reject inputs that differ in the first byte against
//! inputs that differ in the last byte. A short-circuiting comparison would
//! reject the first class measurably faster. Welch's t-statistic on the two
//! distributions must stay below 4.5.
//!
//! This is a statistical test. Scheduler noise can produce false positives
//! on a loaded machine; the samples are interleaved to cancel drift.

use std::time::Instant;

use coffer_crypto::{constant_time_eq, CryptoProvider, RingCryptoProvider};

const SAMPLES: usize = 10_000;
const T_THRESHOLD: f64 = 4.5;
const INPUT_LEN: usize = 4096;

#[allow(clippy::cast_precision_loss)]
fn welch_t_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return f64::NAN;
    }

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let mean_a: f64 = a.iter().sum::<f64>() / n_a;
    let mean_b: f64 = b.iter().sum::<f64>() / n_b;

    let var_a: f64 = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / (n_a - 1.0);
    let var_b: f64 = b.iter().map(|x| (x - mean_b).powi(2)).sum::<f64>() / (n_b - 1.0);

    let denominator = (var_a / n_a + var_b / n_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (mean_a - mean_b) / denominator
}

/// Time `f` on both classes, interleaved, and return |t|.
#[allow(clippy::cast_precision_loss)]
fn measure(mut f: impl FnMut(&[u8], &[u8]) -> bool) -> f64 {
    let reference = vec![0xA5u8; INPUT_LEN];
    let mut early = reference.clone();
    early[0] ^= 0xFF;
    let mut late = reference.clone();
    late[INPUT_LEN - 1] ^= 0xFF;
    let (reference, early, late) = (reference.as_slice(), early.as_slice(), late.as_slice());

    for _ in 0..100 {
        std::hint::black_box(f(reference, early));
        std::hint::black_box(f(reference, late));
    }

    let mut times_early = Vec::with_capacity(SAMPLES);
    let mut times_late = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        let start = Instant::now();
        std::hint::black_box(f(std::hint::black_box(reference), std::hint::black_box(early)));
        times_early.push(start.elapsed().as_nanos() as f64);

        let start = Instant::now();
        std::hint::black_box(f(std::hint::black_box(reference), std::hint::black_box(late)));
        times_late.push(start.elapsed().as_nanos() as f64);
    }

    welch_t_statistic(&times_early, &times_late).abs()
}

#[test]
fn constant_time_eq_no_timing_leak() {
    let abs_t = measure(constant_time_eq);
    eprintln!("constant_time_eq: |t| = {abs_t:.2} (threshold: {T_THRESHOLD})");
    assert!(
        abs_t < T_THRESHOLD,
        "constant_time_eq timing depends on mismatch position: |t| = {abs_t:.2}"
    );
}

#[test]
fn timing_safe_equal_no_timing_leak() {
    let provider = RingCryptoProvider::new();
    let abs_t = measure(|a, b| provider.timing_safe_equal(a, b).unwrap());
    eprintln!("timing_safe_equal: |t| = {abs_t:.2} (threshold: {T_THRESHOLD})");
    assert!(
        abs_t < T_THRESHOLD,
        "timing_safe_equal timing depends on mismatch position: |t| = {abs_t:.2}"
    );
}

#[test]
fn welch_t_test_identical_distributions() {
    let a = vec![1.0; 100];
    let b = vec![1.0; 100];
    assert!(welch_t_statistic(&a, &b).abs() < 0.001);
}

#[test]
fn welch_t_test_different_distributions() {
    let a: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i % 3)).collect();
    let b: Vec<f64> = (0..1000).map(|i| 200.0 + f64::from(i % 3)).collect();
    assert!(welch_t_statistic(&a, &b).abs() > 100.0);
}
