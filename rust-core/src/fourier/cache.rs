//! Precomputed trigonometric and permutation tables
//!
//! Tables depend only on the spectrum size, so one set is built per
//! distinct size and shared by every transform of that size.

use super::method::DftMethod;
use crate::error::{Result, SpectrumError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Immutable table set for one spectrum size
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    method: DftMethod,

    /// Bit-reversal permutation of `0..size` (FFT only, empty otherwise)
    bitrev: Vec<usize>,

    /// Brute force: cos(-2πi/N) for i in 0..=N/2.
    /// FFT: cos(-2π/stage) for stage = 2, 4, ..., N.
    cos: Vec<f32>,

    /// Sine counterpart of `cos`
    sin: Vec<f32>,
}

impl CacheEntry {
    /// Build the tables `method` needs for `spectrum_size`
    pub fn build(method: DftMethod, spectrum_size: usize) -> Self {
        match method {
            DftMethod::BruteForce => {
                let (cos, sin) = dft_cossin_table(spectrum_size);
                Self {
                    method,
                    bitrev: Vec::new(),
                    cos,
                    sin,
                }
            }
            DftMethod::Fft => {
                let (cos, sin) = fft_cossin_table(spectrum_size);
                Self {
                    method,
                    bitrev: fft_bitrev_table(spectrum_size),
                    cos,
                    sin,
                }
            }
        }
    }

    /// Algorithm these tables were built for
    pub fn method(&self) -> DftMethod {
        self.method
    }

    pub fn bitrev(&self) -> &[usize] {
        &self.bitrev
    }

    pub fn cos(&self) -> &[f32] {
        &self.cos
    }

    pub fn sin(&self) -> &[f32] {
        &self.sin
    }
}

/// Classic in-place bit-reversal permutation of `0..size`
fn fft_bitrev_table(size: usize) -> Vec<usize> {
    let mut table: Vec<usize> = (0..size).collect();
    let mut j = 0;

    for i in 0..size {
        if j > i {
            table.swap(i, j);
        }

        let mut m = size >> 1;
        while m >= 1 && j >= m {
            j -= m;
            m >>= 1;
        }

        j += m;
    }

    table
}

/// One twiddle pair per doubling stage 2, 4, ..., size
fn fft_cossin_table(size: usize) -> (Vec<f32>, Vec<f32>) {
    let mut cos = Vec::new();
    let mut sin = Vec::new();

    let mut dft_size = 2;
    while dft_size <= size {
        let theta = -2.0 * PI / dft_size as f32;
        cos.push(theta.cos());
        sin.push(theta.sin());
        dft_size <<= 1;
    }

    (cos, sin)
}

/// Per-bin base rotation for bins 0..=size/2
fn dft_cossin_table(size: usize) -> (Vec<f32>, Vec<f32>) {
    let tab_size = size / 2 + 1;

    (0..tab_size)
        .map(|i| {
            let theta = (-2.0 * PI * i as f32) / size as f32;
            (theta.cos(), theta.sin())
        })
        .unzip()
}

/// Shared store of table sets keyed by spectrum size
///
/// Entries are built lazily on first request and never evicted. The key is
/// the size alone: the first caller decides which table shape a size gets.
/// Callers always derive the method from the size with
/// [`DftMethod::best_for`], so a size is never requested under two methods.
///
/// Lookup and insertion run under a single lock, so concurrent first
/// requests for the same size build its tables exactly once. Share the
/// cache between transforms and threads with an `Arc`.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: Mutex<HashMap<usize, Arc<CacheEntry>>>,
    builds: AtomicUsize,
}

impl TableCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tables for `spectrum_size`, building them with `method` if absent
    pub fn get_entry(&self, method: DftMethod, spectrum_size: usize) -> Arc<CacheEntry> {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(&spectrum_size) {
            tracing::trace!(spectrum_size, "dft table cache hit");
            return Arc::clone(entry);
        }

        let entry = Arc::new(CacheEntry::build(method, spectrum_size));
        self.builds.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            spectrum_size,
            method = method.name(),
            bitrev_len = entry.bitrev.len(),
            twiddle_len = entry.cos.len(),
            "built dft tables"
        );

        entries.insert(spectrum_size, Arc::clone(&entry));
        entry
    }

    /// Build tables for every size in `sizes` ahead of concurrent use
    pub fn prewarm(&self, sizes: &[usize]) -> Result<()> {
        if let Some(&size) = sizes.iter().find(|&&size| size < 2) {
            return Err(SpectrumError::SpectrumTooSmall { size });
        }

        for &size in sizes {
            self.get_entry(DftMethod::best_for(size), size);
        }

        Ok(())
    }

    /// Check whether tables for `spectrum_size` are already built
    pub fn contains(&self, spectrum_size: usize) -> bool {
        self.entries.lock().contains_key(&spectrum_size)
    }

    /// Number of cached sizes
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Total number of table sets built over the cache lifetime
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}
