//! Scalar reference kernels.
//!
//! Always correct on every platform. Used as the fallback when no vector unit
//! is available and as the tail handler of the vectorized kernels.

/// Squared Euclidean distance: sum of squared elementwise differences.
#[inline]
pub fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        let d = x - y;
        sum += d * d;
    }
    sum
}

/// Inner product: sum of elementwise products.
#[inline]
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_squared_345() {
        let a = [0.0, 0.0, 0.0];
        let b = [3.0, 4.0, 0.0];
        assert_eq!(l2_squared(&a, &b), 25.0);
    }

    #[test]
    fn test_l2_squared_self_is_zero() {
        let a = [0.25, -1.5, 3.0, 7.75, -0.125];
        assert_eq!(l2_squared(&a, &a), 0.0);
    }

    #[test]
    fn test_inner_product() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(inner_product(&a, &b), 32.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(l2_squared(&[], &[]), 0.0);
        assert_eq!(inner_product(&[], &[]), 0.0);
    }
}
