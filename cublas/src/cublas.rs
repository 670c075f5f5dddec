use crate::bindings::cublasHandle_t;
use band_blas::BlasError;
use cuda::{AsRaw, ContextGuard};
use std::{marker::PhantomData, ptr::null_mut};

/// A cuBLAS handle bound to the context that was current when it was created.
pub struct Cublas<'ctx>(cublasHandle_t, PhantomData<&'ctx ()>);

impl Drop for Cublas<'_> {
    #[inline]
    fn drop(&mut self) {
        if let Err(e) = cublas!("cublasDestroy", cublasDestroy_v2(self.0)) {
            log::warn!("failed to release cublas handle: {e}")
        }
    }
}

impl AsRaw for Cublas<'_> {
    type Raw = cublasHandle_t;
    #[inline]
    unsafe fn as_raw(&self) -> Self::Raw {
        self.0
    }
}

impl<'ctx> Cublas<'ctx> {
    #[inline]
    pub fn new(_ctx: &ContextGuard<'ctx>) -> Result<Self, BlasError> {
        let mut handle = null_mut();
        cublas!("cublasCreate", cublasCreate_v2(&mut handle))?;
        Ok(Self(handle, PhantomData))
    }
}
