//! CPU reference of the banded level-2 routines, walking the band in place.
//!
//! Storage and stride conventions follow reference BLAS: column-major band
//! storage and negative increments starting at the far end of the vector.

use crate::{Diagonal, Fill, Increment, Operation, Scalar};

/// `y := alpha * A * x + beta * y`, `A` Hermitian with `k` super-diagonals.
///
/// Only the real part of the diagonal is read.
#[allow(clippy::too_many_arguments)]
pub fn hbmv<T: Scalar>(
    fill: Fill,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    x: &[T],
    incx: Increment,
    beta: T,
    y: &mut [T],
    incy: Increment,
) {
    if n == 0 || (alpha.is_zero() && beta.is_one()) {
        return;
    }
    let ix = |i| incx.index(i, n);
    let iy = |i| incy.index(i, n);

    if !beta.is_one() {
        for i in 0..n {
            let y = &mut y[iy(i)];
            *y = if beta.is_zero() { T::zero() } else { beta * *y };
        }
    }
    if alpha.is_zero() {
        return;
    }

    match fill {
        Fill::Upper => {
            for j in 0..n {
                let col = &a[j * lda..];
                let temp1 = alpha * x[ix(j)];
                let mut temp2 = T::zero();
                for i in j.saturating_sub(k)..j {
                    let aij = col[k + i - j];
                    y[iy(i)] += temp1 * aij;
                    temp2 += aij.conj() * x[ix(i)];
                }
                y[iy(j)] += temp1 * col[k].real() + alpha * temp2;
            }
        }
        Fill::Lower => {
            for j in 0..n {
                let col = &a[j * lda..];
                let temp1 = alpha * x[ix(j)];
                let mut temp2 = T::zero();
                y[iy(j)] += temp1 * col[0].real();
                for i in j + 1..n.min(j + k + 1) {
                    let aij = col[i - j];
                    y[iy(i)] += temp1 * aij;
                    temp2 += aij.conj() * x[ix(i)];
                }
                y[iy(j)] += alpha * temp2;
            }
        }
    }
}

/// `x := op(A) * x`, `A` triangular with `k` off-diagonals.
#[allow(clippy::too_many_arguments)]
pub fn tbmv<T: Scalar>(
    fill: Fill,
    trans: Operation,
    diag: Diagonal,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    x: &mut [T],
    incx: Increment,
) {
    if n == 0 {
        return;
    }
    let ix = |i| incx.index(i, n);
    let non_unit = diag == Diagonal::NonUnit;
    let op = |v: T| {
        if trans == Operation::ConjTrans {
            v.conj()
        } else {
            v
        }
    };

    match (trans, fill) {
        (Operation::NoTrans, Fill::Upper) => {
            for j in 0..n {
                let col = &a[j * lda..];
                let temp = x[ix(j)];
                for i in j.saturating_sub(k)..j {
                    x[ix(i)] += temp * col[k + i - j];
                }
                if non_unit {
                    x[ix(j)] *= col[k];
                }
            }
        }
        (Operation::NoTrans, Fill::Lower) => {
            for j in (0..n).rev() {
                let col = &a[j * lda..];
                let temp = x[ix(j)];
                for i in (j + 1..n.min(j + k + 1)).rev() {
                    x[ix(i)] += temp * col[i - j];
                }
                if non_unit {
                    x[ix(j)] *= col[0];
                }
            }
        }
        (_, Fill::Upper) => {
            for j in (0..n).rev() {
                let col = &a[j * lda..];
                let mut temp = x[ix(j)];
                if non_unit {
                    temp *= op(col[k]);
                }
                for i in (j.saturating_sub(k)..j).rev() {
                    temp += op(col[k + i - j]) * x[ix(i)];
                }
                x[ix(j)] = temp;
            }
        }
        (_, Fill::Lower) => {
            for j in 0..n {
                let col = &a[j * lda..];
                let mut temp = x[ix(j)];
                if non_unit {
                    temp *= op(col[0]);
                }
                for i in j + 1..n.min(j + k + 1) {
                    temp += op(col[i - j]) * x[ix(i)];
                }
                x[ix(j)] = temp;
            }
        }
    }
}
