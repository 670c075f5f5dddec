use crate::{BlasError, Diagonal, Fill, Increment, Operation, Scalar};

/// A device able to run the banded routines.
pub trait Device {
    type Session<'dev>: Session
    where
        Self: 'dev;

    fn name(&self) -> &str;

    /// Creates a library handle; dropping the session destroys it.
    fn open(&self) -> Result<Self::Session<'_>, BlasError>;
}

/// A live library handle on a device.
///
/// Buffers release their device memory when dropped, so every early return
/// through `?` leaves nothing behind.
pub trait Session {
    type Buffer<T: Scalar>;

    fn malloc<T: Scalar>(&self, len: usize) -> Result<Self::Buffer<T>, BlasError>;

    fn memcpy_h2d<T: Scalar>(&self, dst: &mut Self::Buffer<T>, src: &[T])
    -> Result<(), BlasError>;

    fn memcpy_d2h<T: Scalar>(&self, dst: &mut [T], src: &Self::Buffer<T>)
    -> Result<(), BlasError>;

    /// Waits for every submitted operation, a no-op for synchronous devices.
    #[inline]
    fn synchronize(&self) -> Result<(), BlasError> {
        Ok(())
    }

    fn from_host<T: Scalar>(&self, src: &[T]) -> Result<Self::Buffer<T>, BlasError> {
        let mut buf = self.malloc(src.len())?;
        self.memcpy_h2d(&mut buf, src)?;
        Ok(buf)
    }

    /// `y := alpha * A * x + beta * y` on device memory.
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<(), BlasError>;

    /// `x := op(A) * x` on device memory.
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<(), BlasError>;
}
