use band_blas::{Increment, Scalar};

/// Outcome of an element-wise comparison.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum UnitCheck {
    Pass,
    /// First logical element out of bounds, as `(re, im)` pairs.
    Mismatch {
        index: usize,
        expected: (f64, f64),
        actual: (f64, f64),
        ulps: u64,
    },
}

impl UnitCheck {
    #[inline]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Relative Frobenius error of a result against the reference.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NormCheck {
    pub error: f64,
    pub tolerance: f64,
}

impl NormCheck {
    #[inline]
    pub fn passed(&self) -> bool {
        self.error <= self.tolerance
    }
}

/// Compares `n` logical elements within the unit-check budget of `T`.
#[inline]
pub fn unit_check<T: Scalar>(n: usize, inc: Increment, expected: &[T], actual: &[T]) -> UnitCheck {
    unit_check_ulps(n, inc, expected, actual, T::UNIT_ULPS)
}

/// Compares `n` logical elements, `max_ulps == 0` asks for bitwise equal values.
pub fn unit_check_ulps<T: Scalar>(
    n: usize,
    inc: Increment,
    expected: &[T],
    actual: &[T],
    max_ulps: u64,
) -> UnitCheck {
    for i in 0..n {
        let p = inc.index(i, n);
        let (e, a) = (expected[p], actual[p]);
        let ulps = e.ulps(a);
        if ulps > max_ulps {
            return UnitCheck::Mismatch {
                index: i,
                expected: e.parts(),
                actual: a.parts(),
                ulps,
            };
        }
    }
    UnitCheck::Pass
}

pub fn norm_check<T: Scalar>(n: usize, inc: Increment, expected: &[T], actual: &[T]) -> NormCheck {
    let mut up = 0.;
    let mut down = 0.;
    for i in 0..n {
        let p = inc.index(i, n);
        up += (expected[p] - actual[p]).abs_sqr();
        down += expected[p].abs_sqr();
    }
    let error = if down > 0. { (up / down).sqrt() } else { up.sqrt() };
    NormCheck {
        error,
        tolerance: T::norm_tolerance(),
    }
}
