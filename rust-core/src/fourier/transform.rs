//! Real-input DFT producing a normalized magnitude spectrum
//!
//! Two kernels are available, chosen once from the spectrum size:
//! a direct summation for arbitrary sizes and an in-place radix-2
//! decimation-in-time FFT for powers of two.
//!
//! Both kernels step through angles by repeated complex multiplication with a
//! cached base rotation instead of calling `sin`/`cos` per term. Each step adds
//! roughly one f32 epsilon (~6e-8) of rounding to the running rotation, so after
//! k steps the phase and magnitude drift is bounded by about k·6e-8 relative.
//! The brute-force kernel makes up to N steps per bin; the FFT makes at most
//! N/2 steps in its last stage. For the sizes used in visualization this stays
//! well below 1e-3 and the tables are kept exactly as computed.

use super::cache::{CacheEntry, TableCache};
use super::method::DftMethod;
use super::scale::complex_to_norm_scale;
use crate::error::{Result, SpectrumError};
use num_complex::Complex;
use std::sync::Arc;

/// DFT of a fixed size with its own scratch buffers
///
/// Buffers are overwritten on every [`Transform::perform`]; an instance must
/// not be shared between concurrent callers.
#[derive(Debug)]
pub struct Transform {
    /// Number of real input samples read per call
    samples_in: usize,

    /// Transform length
    spectrum_size: usize,

    method: DftMethod,

    /// Tables for `spectrum_size`, shared with every other transform of that size
    tables: Arc<CacheEntry>,

    /// Working buffers (length = spectrum_size)
    real: Vec<f32>,
    imag: Vec<f32>,
}

impl Transform {
    /// Create a transform
    ///
    /// The transform length is the larger of `spectrum_size` and `samples_in`,
    /// so a request smaller than the input grows to fit it.
    ///
    /// # Arguments
    /// * `cache` - Table cache shared by all transforms in the application
    /// * `spectrum_size` - Requested transform length
    /// * `samples_in` - Input samples read per call (at least 1); positions
    ///   past it are treated as zero
    pub fn new(cache: &TableCache, spectrum_size: usize, samples_in: usize) -> Result<Self> {
        let spectrum_size = spectrum_size.max(samples_in);

        if spectrum_size < 2 {
            return Err(SpectrumError::SpectrumTooSmall { size: spectrum_size });
        }

        if samples_in == 0 {
            return Err(SpectrumError::InvalidSampleCount {
                samples_in,
                spectrum_size,
            });
        }

        let method = DftMethod::best_for(spectrum_size);
        let mut tables = cache.get_entry(method, spectrum_size);

        if tables.method() != method {
            // Someone seeded the cache with the wrong shape for this size
            tracing::warn!(
                spectrum_size,
                cached = tables.method().name(),
                wanted = method.name(),
                "cached dft tables have the wrong shape, building private tables"
            );
            tables = Arc::new(CacheEntry::build(method, spectrum_size));
        }

        tracing::debug!(spectrum_size, samples_in, method = method.name(), "created transform");

        Ok(Self {
            samples_in,
            spectrum_size,
            method,
            tables,
            real: vec![0.0; spectrum_size],
            imag: vec![0.0; spectrum_size],
        })
    }

    /// Compute the normalized magnitude spectrum of `input`
    ///
    /// Writes `|X[k]| / spectrum_size` for k in `0..spectrum_size/2` into
    /// `output`. Reads the first `samples_in` values of `input`.
    pub fn perform(&mut self, output: &mut [f32], input: &[f32]) -> Result<()> {
        let bins = self.num_bins();

        if output.len() < bins {
            return Err(SpectrumError::OutputTooShort {
                needed: bins,
                actual: output.len(),
            });
        }

        if input.len() < self.samples_in {
            return Err(SpectrumError::InputTooShort {
                needed: self.samples_in,
                actual: input.len(),
            });
        }

        let input = &input[..self.samples_in];

        match self.method {
            DftMethod::BruteForce => {
                brute_force(&self.tables, &mut self.real, &mut self.imag, input)
            }
            DftMethod::Fft => {
                fft_radix2_dit(&self.tables, &mut self.real, &mut self.imag, input)
            }
        }

        complex_to_norm_scale(
            &mut output[..bins],
            &self.real[..bins],
            &self.imag[..bins],
            1.0 / self.spectrum_size as f32,
        );

        Ok(())
    }

    /// Unnormalized complex bins from the last `perform` call
    pub fn complex_spectrum(&self) -> Vec<Complex<f32>> {
        self.real[..self.num_bins()]
            .iter()
            .zip(&self.imag)
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }

    pub fn spectrum_size(&self) -> usize {
        self.spectrum_size
    }

    pub fn samples_in(&self) -> usize {
        self.samples_in
    }

    pub fn method(&self) -> DftMethod {
        self.method
    }

    /// Number of magnitude values written by `perform`
    pub fn num_bins(&self) -> usize {
        self.spectrum_size / 2
    }
}

/// Direct DFT of bins `0..=N/2`, where N is `real.len()`
///
/// Samples past the end of `input` contribute nothing, which is the same as
/// zero-padding to N.
fn brute_force(tables: &CacheEntry, real: &mut [f32], imag: &mut [f32], input: &[f32]) {
    let n = real.len();
    let cos = tables.cos();
    let sin = tables.sin();

    for i in 0..=n / 2 {
        let wpr = cos[i];
        let wpi = sin[i];

        let mut xr = 0.0f32;
        let mut xi = 0.0f32;

        let mut wr = 1.0f32;
        let mut wi = 0.0f32;

        for &x in input {
            xr += x * wr;
            xi += x * wi;

            let wtemp = wr;
            wr = wr * wpr - wi * wpi;
            wi = wtemp * wpi + wi * wpr;
        }

        real[i] = xr;
        imag[i] = xi;
    }
}

/// In-place radix-2 decimation-in-time FFT of length `real.len()`
fn fft_radix2_dit(tables: &CacheEntry, real: &mut [f32], imag: &mut [f32], input: &[f32]) {
    let n = real.len();
    let cos = tables.cos();
    let sin = tables.sin();

    // Scatter into bit-reversed order, zero-padding short input
    for (slot, &idx) in real.iter_mut().zip(tables.bitrev()) {
        *slot = input.get(idx).copied().unwrap_or(0.0);
    }
    imag.fill(0.0);

    let mut dft_size = 2;
    let mut t = 0;

    while dft_size <= n {
        let wpr = cos[t];
        let wpi = sin[t];

        let mut wr = 1.0f32;
        let mut wi = 0.0f32;

        let half_dft_size = dft_size >> 1;

        for m in 0..half_dft_size {
            for i in (m..n).step_by(dft_size) {
                let j = i + half_dft_size;

                let tempr = wr * real[j] - wi * imag[j];
                let tempi = wr * imag[j] + wi * real[j];

                real[j] = real[i] - tempr;
                imag[j] = imag[i] - tempi;

                real[i] += tempr;
                imag[i] += tempi;
            }

            let wtemp = wr;
            wr = wtemp * wpr - wi * wpi;
            wi = wi * wpr + wtemp * wpi;
        }

        dft_size <<= 1;
        t += 1;
    }
}
