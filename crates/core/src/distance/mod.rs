//! Distance metrics and kernel dispatch.
//!
//! Two metrics are supported: squared Euclidean (smaller is better) and inner
//! product (larger is better). Ranking code never looks at the metric's natural
//! polarity; it works on *badness*, where smaller is always better:
//! `badness = distance` for squared Euclidean and `badness = -similarity` for
//! inner product.
//!
//! The fastest kernel the CPU supports is detected once per process and bound
//! into a [`DistanceKernel`] as a plain function pointer at index construction,
//! so the hot loops never branch on the metric or the instruction set.

/// Scalar reference kernels (fallback and tail handler).
pub mod scalar;
/// AVX2+FMA and NEON kernels.
pub mod simd;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Signature shared by every distance kernel.
pub type KernelFn = fn(&[f32], &[f32]) -> f32;

/// Distance metric, fixed per index at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Squared Euclidean distance (L2²). Range: \[0, ∞). Lower = more similar.
    #[default]
    #[serde(alias = "l2")]
    L2Squared,
    /// Inner product. Higher = more similar.
    #[serde(alias = "ip")]
    InnerProduct,
}

impl Metric {
    /// Converts a natural score into badness (smaller is always better).
    #[inline]
    pub fn to_badness(self, score: f32) -> f32 {
        match self {
            Metric::L2Squared => score,
            Metric::InnerProduct => -score,
        }
    }

    /// Converts badness back into the metric's natural score.
    #[inline]
    pub fn from_badness(self, badness: f32) -> f32 {
        // Negation is its own inverse.
        self.to_badness(badness)
    }

    /// Returns `true` if larger natural scores rank first.
    pub fn higher_is_better(self) -> bool {
        matches!(self, Metric::InnerProduct)
    }

    /// Canonical option string of the metric.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::L2Squared => "l2_squared",
            Metric::InnerProduct => "inner_product",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l2" | "l2_squared" => Ok(Metric::L2Squared),
            "ip" | "inner_product" => Ok(Metric::InnerProduct),
            other => Err(Error::invalid(format!("unknown metric: {other}"))),
        }
    }
}

/// Instruction set a kernel table is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    /// 256-bit AVX2 with fused multiply-add (x86_64, runtime detected).
    Avx2Fma,
    /// 128-bit NEON (always present on aarch64).
    Neon,
    /// Portable scalar loops.
    Scalar,
}

static DETECTED_ISA: OnceLock<Isa> = OnceLock::new();

impl Isa {
    /// Returns the fastest instruction set available on this CPU.
    /// Probed on first call, cached for the lifetime of the process.
    pub fn detect() -> Isa {
        *DETECTED_ISA.get_or_init(|| {
            let isa = Isa::probe();
            tracing::debug!("distance kernels resolved to {:?}", isa);
            isa
        })
    }

    #[allow(unreachable_code)]
    fn probe() -> Isa {
        #[cfg(target_arch = "aarch64")]
        {
            return Isa::Neon;
        }
        #[cfg(target_arch = "x86_64")]
        {
            if std::arch::is_x86_feature_detected!("avx2")
                && std::arch::is_x86_feature_detected!("fma")
            {
                return Isa::Avx2Fma;
            }
        }
        Isa::Scalar
    }

    /// Returns `true` if kernels for this instruction set can run here.
    pub fn is_supported(self) -> bool {
        match self {
            Isa::Scalar => true,
            other => other == Isa::detect(),
        }
    }

    /// Kernel table for this instruction set. Falls back to the scalar table
    /// when the instruction set is not supported by the running CPU.
    pub fn kernels(self) -> KernelSet {
        if !self.is_supported() {
            return KernelSet::SCALAR;
        }
        match self {
            #[cfg(target_arch = "x86_64")]
            Isa::Avx2Fma => KernelSet {
                l2_squared: simd::l2_squared_avx2,
                inner_product: simd::inner_product_avx2,
            },
            #[cfg(target_arch = "aarch64")]
            Isa::Neon => KernelSet {
                l2_squared: simd::l2_squared_neon,
                inner_product: simd::inner_product_neon,
            },
            _ => KernelSet::SCALAR,
        }
    }
}

/// One kernel per metric for a given instruction set.
#[derive(Debug, Clone, Copy)]
pub struct KernelSet {
    pub l2_squared: KernelFn,
    pub inner_product: KernelFn,
}

impl KernelSet {
    /// Portable scalar kernels.
    pub const SCALAR: KernelSet = KernelSet {
        l2_squared: scalar::l2_squared,
        inner_product: scalar::inner_product,
    };

    /// Kernel computing `metric`'s natural score.
    pub fn for_metric(&self, metric: Metric) -> KernelFn {
        match metric {
            Metric::L2Squared => self.l2_squared,
            Metric::InnerProduct => self.inner_product,
        }
    }
}

/// A metric bound to its kernel. Resolved once, then called per vector pair.
#[derive(Debug, Clone, Copy)]
pub struct DistanceKernel {
    metric: Metric,
    isa: Isa,
    score_fn: KernelFn,
}

impl DistanceKernel {
    /// Binds `metric` to the fastest kernel available on this CPU.
    pub fn new(metric: Metric) -> Self {
        Self::with_isa(metric, Isa::detect())
    }

    /// Binds `metric` to the kernels of `isa`, or to the scalar kernels if
    /// `isa` cannot run on this CPU.
    pub fn with_isa(metric: Metric, isa: Isa) -> Self {
        let isa = if isa.is_supported() { isa } else { Isa::Scalar };
        Self {
            metric,
            isa,
            score_fn: isa.kernels().for_metric(metric),
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn isa(&self) -> Isa {
        self.isa
    }

    /// Natural score between `a` and `b` (distance or similarity).
    #[inline]
    pub fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        (self.score_fn)(a, b)
    }

    /// Badness between `a` and `b`: smaller is better for every metric.
    #[inline]
    pub fn badness(&self, a: &[f32], b: &[f32]) -> f32 {
        self.metric.to_badness((self.score_fn)(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_vec(rng: &mut ChaCha8Rng, len: usize) -> Vec<f32> {
        (0..len).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect()
    }

    fn assert_close(got: f32, want: f32, magnitude: f32) {
        let tol = 1e-4 * magnitude.max(1.0);
        assert!(
            (got - want).abs() <= tol,
            "kernel mismatch: got {got}, want {want} (tol {tol})"
        );
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("l2".parse::<Metric>().unwrap(), Metric::L2Squared);
        assert_eq!("l2_squared".parse::<Metric>().unwrap(), Metric::L2Squared);
        assert_eq!("ip".parse::<Metric>().unwrap(), Metric::InnerProduct);
        assert_eq!(
            "inner_product".parse::<Metric>().unwrap(),
            Metric::InnerProduct
        );
        let err = "cosine".parse::<Metric>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_metric_display_parses_back() {
        for metric in [Metric::L2Squared, Metric::InnerProduct] {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_badness_polarity() {
        assert_eq!(Metric::L2Squared.to_badness(3.0), 3.0);
        assert_eq!(Metric::InnerProduct.to_badness(3.0), -3.0);
        assert_eq!(Metric::InnerProduct.from_badness(-3.0), 3.0);
        assert!(Metric::InnerProduct.higher_is_better());
        assert!(!Metric::L2Squared.higher_is_better());
    }

    #[test]
    fn test_detect_is_stable() {
        let first = Isa::detect();
        assert_eq!(Isa::detect(), first);
        assert!(first.is_supported());
        assert!(Isa::Scalar.is_supported());
    }

    #[test]
    fn test_unsupported_isa_falls_back_to_scalar() {
        let unsupported = [Isa::Avx2Fma, Isa::Neon]
            .into_iter()
            .find(|isa| !isa.is_supported())
            .expect("at most one vector ISA is supported");
        let kernel = DistanceKernel::with_isa(Metric::L2Squared, unsupported);
        assert_eq!(kernel.isa(), Isa::Scalar);
    }

    #[test]
    fn test_vector_kernels_match_scalar_with_tails() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let fast = Isa::detect().kernels();
        // Covers empty input, sub-lane lengths, exact multiples, and tails.
        for len in 0..=41 {
            let a = random_vec(&mut rng, len);
            let b = random_vec(&mut rng, len);

            let want = scalar::l2_squared(&a, &b);
            assert_close((fast.l2_squared)(&a, &b), want, want);

            let want = scalar::inner_product(&a, &b);
            let magnitude: f32 = a.iter().zip(&b).map(|(x, y)| (x * y).abs()).sum();
            assert_close((fast.inner_product)(&a, &b), want, magnitude);
        }
    }

    #[test]
    fn test_l2_self_distance_is_exact_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let a = random_vec(&mut rng, 37);
        for isa in [Isa::detect(), Isa::Scalar] {
            let kernel = DistanceKernel::with_isa(Metric::L2Squared, isa);
            assert_eq!(kernel.score(&a, &a), 0.0);
        }
    }

    #[test]
    fn test_kernel_badness() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let ip = DistanceKernel::new(Metric::InnerProduct);
        assert!((ip.score(&a, &b) - 32.0).abs() < 1e-4);
        assert!((ip.badness(&a, &b) + 32.0).abs() < 1e-4);
        let l2 = DistanceKernel::new(Metric::L2Squared);
        assert!((l2.badness(&a, &b) - 27.0).abs() < 1e-4);
    }

    #[test]
    fn test_metric_serde_names() {
        let json = serde_json::to_string(&Metric::InnerProduct).unwrap();
        assert_eq!(json, "\"inner_product\"");
        let m: Metric = serde_json::from_str("\"l2\"").unwrap();
        assert_eq!(m, Metric::L2Squared);
    }
}
