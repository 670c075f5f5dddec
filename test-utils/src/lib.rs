mod check;
mod init;

pub use check::{NormCheck, UnitCheck, norm_check, unit_check, unit_check_ulps};
pub use init::{init, init_vector, random, seeded};

use band_blas::{Increment, Scalar};
use std::{fmt, io::Write};

/// Maximum absolute difference and relative L1 difference of two buffers.
pub fn diff<T: Scalar>(result: &[T], ans: &[T]) -> (f64, f64) {
    assert_eq!(result.len(), ans.len());
    let mut max_abs_diff = 0.;
    let mut up = 0.;
    let mut down = 0.;
    for (&r, &a) in result.iter().zip(ans) {
        let diff = (r - a).abs_sqr().sqrt();
        max_abs_diff = f64::max(max_abs_diff, diff);
        up += diff;
        down += a.abs_sqr().sqrt();
    }
    (max_abs_diff, up / down)
}

/// Logical elements of a strided vector, in order.
pub fn gather<T: Scalar>(buf: &[T], n: usize, inc: Increment) -> Vec<T> {
    (0..n).map(|i| buf[inc.index(i, n)]).collect()
}

/// Writes a vector on one line, after a header with its length.
pub fn write_vector<T: fmt::LowerExp>(to: &mut impl Write, buf: &[T]) -> std::io::Result<()> {
    writeln!(to, "<{}>", buf.len())?;
    for it in buf {
        write!(to, "{it:.3e} ")?;
    }
    writeln!(to)
}

#[test]
fn test_diff() {
    let (max, rel) = diff(&[1.0f32, 2., 4.], &[1., 2., 3.]);
    assert_eq!(max, 1.);
    assert_eq!(rel, 1. / 6.);

    let c = band_blas::c64::new;
    let (max, _) = diff(&[c(3., 4.)], &[c(0., 0.)]);
    assert_eq!(max, 5.);
}

#[test]
fn test_gather() {
    let inc = Increment::new(-2).unwrap();
    assert_eq!(gather(&[1, 0, 2, 0, 3].map(f64::from), 3, inc), [3., 2., 1.]);
}

#[test]
fn test_log() {
    let mut out = Vec::new();
    write_vector(&mut out, &[1., 2.5, -30.]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "<3>\n1.000e0 2.500e0 -3.000e1 \n");

    let mut out = Vec::new();
    write_vector(&mut out, &[band_blas::c32::new(1., -2.)]).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("<1>\n1.000e0"));

    let mut out = Vec::new();
    write_vector::<f32>(&mut out, &[]).unwrap();
    assert_eq!(out, b"<0>\n\n");
}
