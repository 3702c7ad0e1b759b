//! Transform algorithm selection

/// Algorithm used by a transform, fixed when the transform is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DftMethod {
    /// Direct summation over all samples, O(N²/2).
    /// Works for any spectrum size.
    BruteForce,

    /// Radix-2 decimation-in-time FFT, O(N log N).
    /// Only valid for power-of-two sizes.
    Fft,
}

impl DftMethod {
    /// Pick the fastest algorithm that supports `spectrum_size`
    pub fn best_for(spectrum_size: usize) -> Self {
        if spectrum_size.is_power_of_two() {
            DftMethod::Fft
        } else {
            DftMethod::BruteForce
        }
    }

    /// Short name used in logs and Python reprs
    pub fn name(&self) -> &'static str {
        match self {
            DftMethod::BruteForce => "brute-force",
            DftMethod::Fft => "fft-radix2-dit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_method() {
        for size in [2, 4, 8, 256, 4096] {
            assert_eq!(DftMethod::best_for(size), DftMethod::Fft);
        }
        for size in [3, 6, 100, 1000, 4095] {
            assert_eq!(DftMethod::best_for(size), DftMethod::BruteForce);
        }
    }
}
