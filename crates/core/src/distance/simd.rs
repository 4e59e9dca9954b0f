//! SIMD-accelerated distance kernels.
//!
//! Provides AVX2+FMA (x86_64) and NEON (aarch64) implementations that process
//! [`LANE_WIDTH`] floats per step with fused multiply-add accumulation, then
//! sum the lanes horizontally. Leftover elements go through the scalar kernel.
//!
//! Summation order differs from the scalar path (lane-grouped, then
//! horizontal), so results are close but not bit-identical.

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use super::scalar;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::config::LANE_WIDTH;

// ============================================================================
// AVX2 + FMA implementations (x86_64)
// ============================================================================

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Squared Euclidean distance, AVX2+FMA.
///
/// Only installed into a kernel table after runtime detection of AVX2 and FMA.
#[cfg(target_arch = "x86_64")]
pub(super) fn l2_squared_avx2(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: `Isa::kernels` hands this out only when AVX2 and FMA were detected.
    unsafe { avx2_l2_squared(a, b) }
}

/// Inner product, AVX2+FMA.
///
/// Only installed into a kernel table after runtime detection of AVX2 and FMA.
#[cfg(target_arch = "x86_64")]
pub(super) fn inner_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: `Isa::kernels` hands this out only when AVX2 and FMA were detected.
    unsafe { avx2_inner_product(a, b) }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
unsafe fn avx2_l2_squared(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut sum = _mm256_setzero_ps();
    let chunks = len / LANE_WIDTH;
    for i in 0..chunks {
        let base = i * LANE_WIDTH;
        let va = _mm256_loadu_ps(a_ptr.add(base));
        let vb = _mm256_loadu_ps(b_ptr.add(base));
        let diff = _mm256_sub_ps(va, vb);
        sum = _mm256_fmadd_ps(diff, diff, sum);
    }

    let tail = chunks * LANE_WIDTH;
    avx2_hsum(sum) + scalar::l2_squared(&a[tail..len], &b[tail..len])
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
unsafe fn avx2_inner_product(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut sum = _mm256_setzero_ps();
    let chunks = len / LANE_WIDTH;
    for i in 0..chunks {
        let base = i * LANE_WIDTH;
        let va = _mm256_loadu_ps(a_ptr.add(base));
        let vb = _mm256_loadu_ps(b_ptr.add(base));
        sum = _mm256_fmadd_ps(va, vb, sum);
    }

    let tail = chunks * LANE_WIDTH;
    avx2_hsum(sum) + scalar::inner_product(&a[tail..len], &b[tail..len])
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn avx2_hsum(v: __m256) -> f32 {
    let mut lanes = [0.0f32; LANE_WIDTH];
    _mm256_storeu_ps(lanes.as_mut_ptr(), v);
    lanes.iter().sum()
}

// ============================================================================
// NEON implementations (aarch64)
// ============================================================================

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// Squared Euclidean distance, NEON (two 4-wide accumulators).
#[cfg(target_arch = "aarch64")]
pub(super) fn l2_squared_neon(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: NEON is mandatory on aarch64; loads stay within `len`.
    unsafe { neon_l2_squared(a, b) }
}

/// Inner product, NEON (two 4-wide accumulators).
#[cfg(target_arch = "aarch64")]
pub(super) fn inner_product_neon(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: NEON is mandatory on aarch64; loads stay within `len`.
    unsafe { neon_inner_product(a, b) }
}

#[cfg(target_arch = "aarch64")]
unsafe fn neon_l2_squared(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut s0 = vdupq_n_f32(0.0);
    let mut s1 = vdupq_n_f32(0.0);

    let chunks = len / LANE_WIDTH;
    for i in 0..chunks {
        let base = i * LANE_WIDTH;
        let d0 = vsubq_f32(vld1q_f32(a_ptr.add(base)), vld1q_f32(b_ptr.add(base)));
        let d1 = vsubq_f32(
            vld1q_f32(a_ptr.add(base + 4)),
            vld1q_f32(b_ptr.add(base + 4)),
        );
        s0 = vfmaq_f32(s0, d0, d0);
        s1 = vfmaq_f32(s1, d1, d1);
    }

    let tail = chunks * LANE_WIDTH;
    vaddvq_f32(vaddq_f32(s0, s1)) + scalar::l2_squared(&a[tail..len], &b[tail..len])
}

#[cfg(target_arch = "aarch64")]
unsafe fn neon_inner_product(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut s0 = vdupq_n_f32(0.0);
    let mut s1 = vdupq_n_f32(0.0);

    let chunks = len / LANE_WIDTH;
    for i in 0..chunks {
        let base = i * LANE_WIDTH;
        s0 = vfmaq_f32(s0, vld1q_f32(a_ptr.add(base)), vld1q_f32(b_ptr.add(base)));
        s1 = vfmaq_f32(
            s1,
            vld1q_f32(a_ptr.add(base + 4)),
            vld1q_f32(b_ptr.add(base + 4)),
        );
    }

    let tail = chunks * LANE_WIDTH;
    vaddvq_f32(vaddq_f32(s0, s1)) + scalar::inner_product(&a[tail..len], &b[tail..len])
}
