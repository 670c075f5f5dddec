//! A device emulated in host memory.
//!
//! Device buffers are independent host allocations, so host and device copies
//! only meet through explicit memcpy. The routines compute every output element
//! as a row of the full matrix, looked up element by element in the band, which
//! shares no code path with [`crate::reference`]. A ledger counts every resource
//! for inspection.

use crate::{
    Band, BlasError, Device, Diagonal, Fill, Increment, Operation, Scalar, Session, Status,
};
use std::{cell::Cell, mem::size_of, ops::Deref};

/// Operations of the emulated device that can be told to fail.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FaultPoint {
    Open,
    Malloc,
    MemcpyH2d,
    MemcpyD2h,
    Hbmv,
    Tbmv,
}

/// Resource counters of a [`HostDevice`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Ledger {
    /// Sessions currently open.
    pub sessions: usize,
    /// Buffers currently alive.
    pub buffers: usize,
    /// Bytes currently allocated.
    pub bytes: usize,
    pub allocations: usize,
    pub copies: usize,
    pub launches: usize,
}

impl Ledger {
    /// Nothing is held by the device.
    #[inline]
    pub const fn is_released(&self) -> bool {
        self.sessions == 0 && self.buffers == 0 && self.bytes == 0
    }

    /// The device was never used.
    #[inline]
    pub fn is_untouched(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Default, Debug)]
pub struct HostDevice {
    ledger: Cell<Ledger>,
    fault: Option<(FaultPoint, Status)>,
    corrupt: Option<usize>,
}

impl HostDevice {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `point` report `status` instead of running.
    #[inline]
    pub fn with_fault(self, point: FaultPoint, status: Status) -> Self {
        Self {
            fault: Some((point, status)),
            ..self
        }
    }

    /// Makes the routines return a wrong value at logical output element `index`.
    #[inline]
    pub fn with_corrupted_output(self, index: usize) -> Self {
        Self {
            corrupt: Some(index),
            ..self
        }
    }

    #[inline]
    pub fn ledger(&self) -> Ledger {
        self.ledger.get()
    }

    fn update(&self, f: impl FnOnce(&mut Ledger)) {
        let mut ledger = self.ledger.get();
        f(&mut ledger);
        self.ledger.set(ledger)
    }

    fn inject(&self, point: FaultPoint, op: &'static str) -> Result<(), BlasError> {
        match self.fault {
            Some((p, status)) if p == point => {
                log::trace!("host device: injected {status} at {op}");
                Err(BlasError::device(op, status))
            }
            _ => Ok(()),
        }
    }

    fn corrupt<T: Scalar>(&self, out: &mut [T], n: usize, inc: Increment) {
        if let Some(i) = self.corrupt.filter(|&i| i < n) {
            log::trace!("host device: corrupted output element {i}");
            out[inc.index(i, n)] += T::one()
        }
    }
}

impl Device for HostDevice {
    type Session<'dev> = HostSession<'dev>;

    #[inline]
    fn name(&self) -> &str {
        "host"
    }

    fn open(&self) -> Result<Self::Session<'_>, BlasError> {
        self.inject(FaultPoint::Open, "open")?;
        self.update(|l| l.sessions += 1);
        Ok(HostSession(self))
    }
}

pub struct HostSession<'dev>(&'dev HostDevice);

impl Drop for HostSession<'_> {
    #[inline]
    fn drop(&mut self) {
        self.0.update(|l| l.sessions -= 1)
    }
}

pub struct HostBuffer<'dev, T> {
    data: Vec<T>,
    dev: &'dev HostDevice,
}

impl<T> Drop for HostBuffer<'_, T> {
    #[inline]
    fn drop(&mut self) {
        let bytes = size_of::<T>() * self.data.len();
        self.dev.update(|l| {
            l.buffers -= 1;
            l.bytes -= bytes
        })
    }
}

impl<T> Deref for HostBuffer<'_, T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

fn invalid(op: &'static str) -> BlasError {
    BlasError::device(op, Status::InvalidValue)
}

impl<'dev> Session for HostSession<'dev> {
    type Buffer<T: Scalar> = HostBuffer<'dev, T>;

    fn malloc<T: Scalar>(&self, len: usize) -> Result<Self::Buffer<T>, BlasError> {
        self.0.inject(FaultPoint::Malloc, "malloc")?;
        let bytes = len
            .checked_mul(size_of::<T>())
            .ok_or(BlasError::device("malloc", Status::AllocFailed))?;
        self.0.update(|l| {
            l.buffers += 1;
            l.bytes += bytes;
            l.allocations += 1
        });
        log::trace!("host device: malloc {len} x {}", T::NAME);
        Ok(HostBuffer {
            data: vec![T::zero(); len],
            dev: self.0,
        })
    }

    fn memcpy_h2d<T: Scalar>(
        &self,
        dst: &mut Self::Buffer<T>,
        src: &[T],
    ) -> Result<(), BlasError> {
        self.0.inject(FaultPoint::MemcpyH2d, "memcpy_h2d")?;
        if dst.data.len() != src.len() {
            return Err(invalid("memcpy_h2d"));
        }
        dst.data.copy_from_slice(src);
        self.0.update(|l| l.copies += 1);
        Ok(())
    }

    fn memcpy_d2h<T: Scalar>(&self, dst: &mut [T], src: &Self::Buffer<T>) -> Result<(), BlasError> {
        self.0.inject(FaultPoint::MemcpyD2h, "memcpy_d2h")?;
        if dst.len() != src.data.len() {
            return Err(invalid("memcpy_d2h"));
        }
        dst.copy_from_slice(&src.data);
        self.0.update(|l| l.copies += 1);
        Ok(())
    }

    fn hbmv<T: Scalar>(
        &self,
        fill: Fill,
        n: usize,
        k: usize,
        alpha: T,
        a: &Self::Buffer<T>,
        lda: usize,
        x: &Self::Buffer<T>,
        incx: Increment,
        beta: T,
        y: &mut Self::Buffer<T>,
        incy: Increment,
    ) -> Result<(), BlasError> {
        const OP: &str = "hbmv";
        self.0.inject(FaultPoint::Hbmv, OP)?;
        let band = Band { fill, n, k, lda };
        if lda < k + 1
            || a.len() < band.required_len()
            || x.len() < incx.span(n)
            || y.len() < incy.span(n)
        {
            return Err(invalid(OP));
        }
        self.0.update(|l| l.launches += 1);
        if n == 0 || (alpha.is_zero() && beta.is_one()) {
            return Ok(());
        }

        // a missing element of the stored triangle is the conjugate of its mirror
        let element = |r, c| match (band.index(r, c), band.index(c, r)) {
            (Some(p), _) if r == c => a[p].real(),
            (Some(p), _) => a[p],
            (None, Some(p)) => a[p].conj(),
            (None, None) => T::zero(),
        };
        let x = gather(&x.data, n, incx);
        for i in 0..n {
            let ax = band
                .neighbors(i)
                .fold(T::zero(), |acc, j| acc + element(i, j) * x[j]);
            let y = &mut y.data[incy.index(i, n)];
            *y = if beta.is_zero() {
                alpha * ax
            } else {
                alpha * ax + beta * *y
            }
        }
        self.0.corrupt(&mut y.data, n, incy);
        Ok(())
    }

    fn tbmv<T: Scalar>(
        &self,
        fill: Fill,
        trans: Operation,
        diag: Diagonal,
        n: usize,
        k: usize,
        a: &Self::Buffer<T>,
        lda: usize,
        x: &mut Self::Buffer<T>,
        incx: Increment,
    ) -> Result<(), BlasError> {
        const OP: &str = "tbmv";
        self.0.inject(FaultPoint::Tbmv, OP)?;
        let band = Band { fill, n, k, lda };
        if lda < k + 1 || a.len() < band.required_len() || x.len() < incx.span(n) {
            return Err(invalid(OP));
        }
        self.0.update(|l| l.launches += 1);
        if n == 0 {
            return Ok(());
        }

        let element = |r, c| match band.index(r, c) {
            Some(_) if r == c && diag == Diagonal::Unit => T::one(),
            Some(p) => a[p],
            None => T::zero(),
        };
        let op = |i, j| match trans {
            Operation::NoTrans => element(i, j),
            Operation::Trans => element(j, i),
            Operation::ConjTrans => element(j, i).conj(),
        };
        let old = gather(&x.data, n, incx);
        for i in 0..n {
            x.data[incx.index(i, n)] = band
                .neighbors(i)
                .fold(T::zero(), |acc, j| acc + op(i, j) * old[j])
        }
        self.0.corrupt(&mut x.data, n, incx);
        Ok(())
    }
}

fn gather<T: Scalar>(buf: &[T], n: usize, inc: Increment) -> Vec<T> {
    (0..n).map(|i| buf[inc.index(i, n)]).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ledger() {
        let dev = HostDevice::new();
        assert!(dev.ledger().is_untouched());
        {
            let session = dev.open().unwrap();
            let a = session.from_host(&[1.0f32, 2., 3.]).unwrap();
            let _b = session.malloc::<f64>(4).unwrap();
            let ledger = dev.ledger();
            assert_eq!(ledger.sessions, 1);
            assert_eq!(ledger.buffers, 2);
            assert_eq!(ledger.bytes, 12 + 32);
            assert_eq!(ledger.copies, 1);

            let mut host = [0.0f32; 3];
            session.memcpy_d2h(&mut host, &a).unwrap();
            assert_eq!(host, [1., 2., 3.]);
            assert!(session.memcpy_d2h(&mut [0.0f32; 2], &a).is_err());
        }
        let ledger = dev.ledger();
        assert!(ledger.is_released());
        assert_eq!(ledger.allocations, 2);
        assert_eq!(ledger.copies, 2);
    }

    #[test]
    fn test_fault() {
        let dev = HostDevice::new().with_fault(FaultPoint::Malloc, Status::AllocFailed);
        let session = dev.open().unwrap();
        let err = session.malloc::<f32>(8).err().unwrap();
        assert_eq!(err.status(), Status::AllocFailed);
        drop(session);
        assert!(dev.ledger().is_released());

        let dev = HostDevice::new().with_fault(FaultPoint::Open, Status::NotInitialized);
        assert!(matches!(
            dev.open(),
            Err(BlasError::Device {
                op: "open",
                status: Status::NotInitialized
            })
        ));
        assert!(dev.ledger().is_untouched());
    }

    #[test]
    fn test_hbmv_by_rows() {
        // |1 2 0|   |1|   | 5|
        // |2 3 4| · |2| = |20|
        // |0 4 5|   |3|   |23|
        let dev = HostDevice::new();
        let session = dev.open().unwrap();
        let a = session.from_host(&[0., 1., 2., 3., 4., 5.]).unwrap();
        let x = session.from_host(&[1., 2., 3.]).unwrap();
        let mut y = session.from_host(&[1., 1., 1.]).unwrap();
        let one = Increment::ONE;
        session
            .hbmv(Fill::Upper, 3, 1, 2., &a, 2, &x, one, -1., &mut y, one)
            .unwrap();
        assert_eq!(&*y, [9., 39., 45.]);

        let err = session
            .hbmv(Fill::Upper, 3, 2, 1., &a, 2, &x, one, 0., &mut y, one)
            .unwrap_err();
        assert_eq!(err.status(), Status::InvalidValue);
        assert_eq!(dev.ledger().launches, 1);
    }

    #[test]
    fn test_tbmv_strided() {
        // |1 2 0|
        // |0 3 4|
        // |0 0 5|
        let dev = HostDevice::new();
        let session = dev.open().unwrap();
        let a = session.from_host(&[0., 1., 2., 3., 4., 5.]).unwrap();
        let mut x = session.from_host(&[3., 0., 2., 0., 1.]).unwrap();
        let inc = Increment::new(-2).unwrap();
        let (upper, no_trans, non_unit) = (Fill::Upper, Operation::NoTrans, Diagonal::NonUnit);
        session
            .tbmv(upper, no_trans, non_unit, 3, 1, &a, 2, &mut x, inc)
            .unwrap();
        assert_eq!(&*x, [15., 0., 18., 0., 5.]);
    }

    #[test]
    fn test_large_narrow_band() {
        // tridiagonal of ones, far too large to expand into a dense matrix
        const N: usize = 300_000;
        let dev = HostDevice::new();
        let session = dev.open().unwrap();
        let a = session.from_host(&vec![1.0f64; 2 * N]).unwrap();
        let x = session.from_host(&vec![1.0f64; N]).unwrap();
        let mut y = session.malloc(N).unwrap();
        let one = Increment::ONE;
        session
            .hbmv(Fill::Lower, N, 1, 1., &a, 2, &x, one, 0., &mut y, one)
            .unwrap();
        assert_eq!((y[0], y[1], y[N / 2], y[N - 1]), (2., 3., 3., 2.));

        let mut x = session.from_host(&vec![1.0f64; N]).unwrap();
        let (upper, trans, unit) = (Fill::Upper, Operation::Trans, Diagonal::Unit);
        session
            .tbmv(upper, trans, unit, N, 1, &a, 2, &mut x, one)
            .unwrap();
        // transposed, the first row holds only the diagonal
        assert_eq!((x[0], x[1], x[N - 1]), (1., 2., 2.));
        assert_eq!(dev.ledger().bytes, 8 * 5 * N);
    }

    #[test]
    fn test_corrupted_output() {
        let dev = HostDevice::new().with_corrupted_output(1);
        let session = dev.open().unwrap();
        let a = session.from_host(&[0., 1., 2., 3., 4., 5.]).unwrap();
        let mut x = session.from_host(&[3., 0., 2., 0., 1.]).unwrap();
        let inc = Increment::new(-2).unwrap();
        let (upper, no_trans, non_unit) = (Fill::Upper, Operation::NoTrans, Diagonal::NonUnit);
        session
            .tbmv(upper, no_trans, non_unit, 3, 1, &a, 2, &mut x, inc)
            .unwrap();
        // logical element 1 sits in the middle
        assert_eq!(&*x, [15., 0., 19., 0., 5.]);
    }
}
