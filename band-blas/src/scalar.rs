use num_complex::Complex;
use num_traits::{One, Zero};
use std::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Sub},
};

/// Runtime tag of a [`Scalar`] type, for libraries with one entry point per precision.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum DataType {
    f32,
    f64,
    c32,
    c64,
}

/// Element type of the banded routines: real or complex, single or double precision.
///
/// For real types the conjugate is the identity, so the Hermitian routines
/// degenerate to their symmetric counterparts.
pub trait Scalar:
    'static
    + Copy
    + Send
    + Sync
    + PartialEq
    + fmt::Debug
    + fmt::LowerExp
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + MulAssign
{
    const NAME: &'static str;
    const DATA_TYPE: DataType;
    const IS_COMPLEX: bool;
    /// Largest distance in units of the last place accepted by the unit check.
    const UNIT_ULPS: u64 = 4;
    /// Machine epsilon of the underlying real type.
    const EPSILON: f64;

    fn conj(self) -> Self;
    /// Keeps the real part, drops the imaginary part.
    fn real(self) -> Self;
    fn from_parts(re: f64, im: f64) -> Self;
    fn parts(self) -> (f64, f64);
    /// Largest ulp distance between the matching parts of `self` and `other`.
    fn ulps(self, other: Self) -> u64;

    #[inline]
    fn abs_sqr(self) -> f64 {
        let (re, im) = self.parts();
        re * re + im * im
    }

    /// Relative Frobenius error accepted by the norm check.
    #[inline]
    fn norm_tolerance() -> f64 {
        Self::EPSILON * 16.
    }
}

fn ulps_f32(a: f32, b: f32) -> u64 {
    if a == b {
        return 0;
    }
    if a.is_nan() || b.is_nan() {
        return u64::MAX;
    }
    // maps sign-magnitude bits onto a monotonic integer axis
    fn key(x: f32) -> i64 {
        let i = x.to_bits() as i32 as i64;
        if i < 0 { i32::MIN as i64 - i } else { i }
    }
    (key(a) - key(b)).unsigned_abs()
}

fn ulps_f64(a: f64, b: f64) -> u64 {
    if a == b {
        return 0;
    }
    if a.is_nan() || b.is_nan() {
        return u64::MAX;
    }
    fn key(x: f64) -> i128 {
        let i = x.to_bits() as i64;
        (if i < 0 { i64::MIN - i } else { i }) as i128
    }
    u64::try_from((key(a) - key(b)).unsigned_abs()).unwrap_or(u64::MAX)
}

macro_rules! impl_real {
    ($ty:ident => $ulps:ident) => {
        impl Scalar for $ty {
            const NAME: &'static str = stringify!($ty);
            const DATA_TYPE: DataType = DataType::$ty;
            const IS_COMPLEX: bool = false;
            const EPSILON: f64 = <$ty>::EPSILON as _;

            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn real(self) -> Self {
                self
            }
            #[inline]
            fn from_parts(re: f64, _im: f64) -> Self {
                re as _
            }
            #[inline]
            fn parts(self) -> (f64, f64) {
                (self as _, 0.)
            }
            #[inline]
            fn ulps(self, other: Self) -> u64 {
                $ulps(self, other)
            }
        }
    };
}

macro_rules! impl_complex {
    ($ty:ty => $name:ident, $ulps:ident) => {
        impl Scalar for Complex<$ty> {
            const NAME: &'static str = stringify!($name);
            const DATA_TYPE: DataType = DataType::$name;
            const IS_COMPLEX: bool = true;
            const EPSILON: f64 = <$ty>::EPSILON as _;

            #[inline]
            fn conj(self) -> Self {
                Complex::conj(&self)
            }
            #[inline]
            fn real(self) -> Self {
                Complex::new(self.re, 0.)
            }
            #[inline]
            fn from_parts(re: f64, im: f64) -> Self {
                Complex::new(re as _, im as _)
            }
            #[inline]
            fn parts(self) -> (f64, f64) {
                (self.re as _, self.im as _)
            }
            #[inline]
            fn ulps(self, other: Self) -> u64 {
                $ulps(self.re, other.re).max($ulps(self.im, other.im))
            }
        }
    };
}

impl_real!(f32 => ulps_f32);
impl_real!(f64 => ulps_f64);
impl_complex!(f32 => c32, ulps_f32);
impl_complex!(f64 => c64, ulps_f64);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ulps() {
        assert_eq!(1.0f32.ulps(1.0), 0);
        assert_eq!(0.0f32.ulps(-0.0), 0);
        assert_eq!(1.0f32.ulps(f32::from_bits(1.0f32.to_bits() + 3)), 3);
        assert_eq!(f32::from_bits(1).ulps(-f32::from_bits(1)), 2);
        assert_eq!(1.0f64.ulps(f64::from_bits(1.0f64.to_bits() + 1)), 1);
        assert_eq!(f64::NAN.ulps(1.), u64::MAX);

        let a = Complex::new(1.0f32, 2.0);
        let b = Complex::new(1.0f32, f32::from_bits(2.0f32.to_bits() + 5));
        assert_eq!(a.ulps(b), 5);
    }

    #[test]
    fn test_data_type() {
        assert_eq!(<f64 as Scalar>::DATA_TYPE, DataType::f64);
        assert_eq!(<Complex<f32> as Scalar>::NAME, "c32");
        assert_eq!(<Complex<f32> as Scalar>::DATA_TYPE, DataType::c32);
    }

    #[test]
    fn test_parts() {
        let z = Complex::<f64>::from_parts(1.5, -2.);
        assert_eq!(z.parts(), (1.5, -2.));
        assert_eq!(Scalar::conj(z).parts(), (1.5, 2.));
        assert_eq!(z.real().parts(), (1.5, 0.));
        assert_eq!(f32::from_parts(3., 7.).parts(), (3., 0.));
        assert_eq!(z.abs_sqr(), 6.25);
        assert!(<f32 as Scalar>::norm_tolerance() > <f64 as Scalar>::norm_tolerance());
    }
}
