//! Floating-point operation counts used to report throughput.

use band_blas::Scalar;

/// Flops of a multiply-add and of a lone multiply.
#[inline]
fn costs<T: Scalar>() -> (f64, f64) {
    if T::IS_COMPLEX { (8., 6.) } else { (2., 1.) }
}

/// Effective bandwidth, a band wider than the matrix counts as full.
#[inline]
fn bandwidth(n: usize, k: usize) -> f64 {
    k.min(n.saturating_sub(1)) as f64
}

pub fn hbmv_flop_count<T: Scalar>(n: usize, k: usize) -> f64 {
    let (fma, mul) = costs::<T>();
    let n_ = n as f64;
    let k = bandwidth(n, k);
    let elements = n_ * (2. * k + 1.) - k * (k + 1.);
    // alpha and beta each scale n elements
    fma * elements + 2. * mul * n_
}

pub fn tbmv_flop_count<T: Scalar>(n: usize, k: usize) -> f64 {
    let (fma, _) = costs::<T>();
    let n_ = n as f64;
    let k = bandwidth(n, k);
    let elements = n_ * (k + 1.) - k * (k + 1.) / 2.;
    fma * elements
}

#[inline]
pub fn hbmv_gflop_count<T: Scalar>(n: usize, k: usize) -> f64 {
    hbmv_flop_count::<T>(n, k) / 1e9
}

#[inline]
pub fn tbmv_gflop_count<T: Scalar>(n: usize, k: usize) -> f64 {
    tbmv_flop_count::<T>(n, k) / 1e9
}

#[test]
fn test_counts() {
    use band_blas::c64;

    // full 3x3 Hermitian: 9 elements
    assert_eq!(hbmv_flop_count::<f32>(3, 2), 2. * 9. + 2. * 3.);
    assert_eq!(hbmv_flop_count::<c64>(3, 7), 8. * 9. + 12. * 3.);
    // bidiagonal 4x4: 7 elements
    assert_eq!(tbmv_flop_count::<f64>(4, 1), 14.);
    assert_eq!(tbmv_gflop_count::<f64>(0, 3), 0.);
    assert_eq!(hbmv_gflop_count::<f64>(0, 3), 0.);
}
