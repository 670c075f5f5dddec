use crate::{
    Cublas,
    bindings::{cublasDiagType_t, cublasFillMode_t, cublasOperation_t},
};
use band_blas::{
    Band, BlasError, DataType, Device, Diagonal, Fill, Increment, Operation, Scalar, Session,
    Status,
};
use cuda::{AsRaw, Context, ContextGuard, DevMem, DriverError};
use std::ffi::{c_int, c_void};

/// An NVIDIA GPU driven through cuBLAS.
pub struct CublasDevice {
    ctx: Context,
    name: String,
}

/// Maps a driver failure of `op` onto the library status it stands for.
fn driver(op: &'static str, status: Status) -> impl FnOnce(DriverError) -> BlasError {
    move |e| {
        log::debug!("{op}: {e}");
        let status = if e.is_out_of_memory() {
            Status::AllocFailed
        } else {
            status
        };
        BlasError::device(op, status)
    }
}

impl CublasDevice {
    /// Opens the first device, `None` if the machine has none.
    pub fn fetch() -> Result<Option<Self>, BlasError> {
        const OP: &str = "init";
        if cuda::init().is_err() {
            return Ok(None);
        }
        let Some(dev) = cuda::Device::fetch().map_err(driver(OP, Status::NotInitialized))? else {
            return Ok(None);
        };
        let name = dev.name().map_err(driver(OP, Status::NotInitialized))?;
        let ctx = dev
            .retain_primary()
            .map_err(driver(OP, Status::NotInitialized))?;
        log::info!("cublas device: {name}");
        Ok(Some(Self { ctx, name }))
    }
}

impl Device for CublasDevice {
    type Session<'dev> = CublasSession<'dev>;

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<Self::Session<'_>, BlasError> {
        let guard = self
            .ctx
            .push()
            .map_err(driver("open", Status::NotInitialized))?;
        Ok(CublasSession {
            blas: Cublas::new(&guard)?,
            guard,
            ctx: &self.ctx,
        })
    }
}

/// A cuBLAS handle with the device context pushed on the calling thread.
pub struct CublasSession<'dev> {
    // the handle goes before the context is popped
    blas: Cublas<'dev>,
    guard: ContextGuard<'dev>,
    ctx: &'dev Context,
}

fn int(op: &'static str, value: usize) -> Result<c_int, BlasError> {
    c_int::try_from(value).map_err(|_| BlasError::device(op, Status::InvalidValue))
}

fn inc(op: &'static str, inc: Increment) -> Result<c_int, BlasError> {
    c_int::try_from(inc.get()).map_err(|_| BlasError::device(op, Status::InvalidValue))
}

fn fill_mode(fill: Fill) -> cublasFillMode_t {
    match fill {
        Fill::Upper => cublasFillMode_t::CUBLAS_FILL_MODE_UPPER,
        Fill::Lower => cublasFillMode_t::CUBLAS_FILL_MODE_LOWER,
    }
}

fn operation(trans: Operation) -> cublasOperation_t {
    match trans {
        Operation::NoTrans => cublasOperation_t::CUBLAS_OP_N,
        Operation::Trans => cublasOperation_t::CUBLAS_OP_T,
        Operation::ConjTrans => cublasOperation_t::CUBLAS_OP_C,
    }
}

fn diag_type(diag: Diagonal) -> cublasDiagType_t {
    match diag {
        Diagonal::NonUnit => cublasDiagType_t::CUBLAS_DIAG_NON_UNIT,
        Diagonal::Unit => cublasDiagType_t::CUBLAS_DIAG_UNIT,
    }
}

#[inline]
fn dev_ptr<T>(mem: &DevMem<'_, T>) -> *mut c_void {
    unsafe { mem.as_raw() as usize as *mut c_void }
}

#[inline]
fn host_ptr<T>(val: &T) -> *const c_void {
    (val as *const T).cast()
}

impl<'dev> Session for CublasSession<'dev> {
    type Buffer<T: Scalar> = DevMem<'dev, T>;

    fn malloc<T: Scalar>(&self, len: usize) -> Result<Self::Buffer<T>, BlasError> {
        self.ctx
            .malloc(len)
            .map_err(driver("malloc", Status::AllocFailed))
    }

    fn memcpy_h2d<T: Scalar>(
        &self,
        dst: &mut Self::Buffer<T>,
        src: &[T],
    ) -> Result<(), BlasError> {
        if dst.len() != src.len() {
            return Err(BlasError::device("memcpy_h2d", Status::InvalidValue));
        }
        dst.copy_in(src)
            .map_err(driver("memcpy_h2d", Status::MappingError))
    }

    fn memcpy_d2h<T: Scalar>(&self, dst: &mut [T], src: &Self::Buffer<T>) -> Result<(), BlasError> {
        if dst.len() != src.len() {
            return Err(BlasError::device("memcpy_d2h", Status::InvalidValue));
        }
        src.copy_out(dst)
            .map_err(driver("memcpy_d2h", Status::MappingError))
    }

    fn synchronize(&self) -> Result<(), BlasError> {
        self.guard
            .synchronize()
            .map_err(driver("synchronize", Status::ExecutionFailed))
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
        // the library cannot see buffer lengths
        let band = Band { fill, n, k, lda };
        if lda < k + 1
            || a.len() < band.required_len()
            || x.len() < incx.span(n)
            || y.len() < incy.span(n)
        {
            return Err(BlasError::device(OP, Status::InvalidValue));
        }

        let handle = unsafe { self.blas.as_raw() };
        let uplo = fill_mode(fill);
        let (n, k, lda) = (int(OP, n)?, int(OP, k)?, int(OP, lda)?);
        let (incx, incy) = (inc(OP, incx)?, inc(OP, incy)?);
        let (alpha, beta) = (host_ptr(&alpha), host_ptr(&beta));
        let (a, x, y) = (dev_ptr(a), dev_ptr(x), dev_ptr(y));

        macro_rules! hbmv {
            ($f:ident) => {
                cublas!(
                    OP,
                    $f(
                        handle,
                        uplo,
                        n,
                        k,
                        alpha.cast(),
                        a.cast_const().cast(),
                        lda,
                        x.cast_const().cast(),
                        incx,
                        beta.cast(),
                        y.cast(),
                        incy
                    )
                )
            };
        }
        match T::DATA_TYPE {
            DataType::f32 => hbmv!(cublasSsbmv_v2),
            DataType::f64 => hbmv!(cublasDsbmv_v2),
            DataType::c32 => hbmv!(cublasChbmv_v2),
            DataType::c64 => hbmv!(cublasZhbmv_v2),
        }
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
        let band = Band { fill, n, k, lda };
        if lda < k + 1 || a.len() < band.required_len() || x.len() < incx.span(n) {
            return Err(BlasError::device(OP, Status::InvalidValue));
        }

        let handle = unsafe { self.blas.as_raw() };
        let (uplo, trans, diag) = (fill_mode(fill), operation(trans), diag_type(diag));
        let (n, k, lda, incx) = (int(OP, n)?, int(OP, k)?, int(OP, lda)?, inc(OP, incx)?);
        let (a, x) = (dev_ptr(a), dev_ptr(x));

        macro_rules! tbmv {
            ($f:ident) => {
                cublas!(
                    OP,
                    $f(
                        handle,
                        uplo,
                        trans,
                        diag,
                        n,
                        k,
                        a.cast_const().cast(),
                        lda,
                        x.cast(),
                        incx
                    )
                )
            };
        }
        match T::DATA_TYPE {
            DataType::f32 => tbmv!(cublasStbmv_v2),
            DataType::f64 => tbmv!(cublasDtbmv_v2),
            DataType::c32 => tbmv!(cublasCtbmv_v2),
            DataType::c64 => tbmv!(cublasZtbmv_v2),
        }
    }
}
