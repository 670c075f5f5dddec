use crate::{AsRaw, Device, DriverError, bindings::CUcontext, release};
use std::{marker::PhantomData, ptr::null_mut};

/// The primary context of a device, retained for the lifetime of this value.
#[derive(PartialEq, Eq, Hash, Debug)]
pub struct Context {
    ctx: CUcontext,
    dev: Device,
}

impl Device {
    #[inline]
    pub fn retain_primary(&self) -> Result<Context, DriverError> {
        let dev = unsafe { self.as_raw() };
        let mut ctx = null_mut();
        driver!(cuDevicePrimaryCtxRetain(&mut ctx, dev))?;
        Ok(Context { ctx, dev: *self })
    }
}

impl Drop for Context {
    #[inline]
    fn drop(&mut self) {
        let dev = unsafe { self.dev.as_raw() };
        release("primary context", driver!(cuDevicePrimaryCtxRelease_v2(dev)))
    }
}

unsafe impl Send for Context {}
unsafe impl Sync for Context {}

impl Context {
    /// Makes this context current on the calling thread until the guard drops.
    #[inline]
    pub fn push(&self) -> Result<ContextGuard<'_>, DriverError> {
        driver!(cuCtxPushCurrent_v2(self.ctx))?;
        Ok(ContextGuard(self.ctx, PhantomData))
    }
}

#[repr(transparent)]
pub struct ContextGuard<'ctx>(CUcontext, PhantomData<&'ctx Context>);

impl Drop for ContextGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        let mut top = null_mut();
        release("current context", driver!(cuCtxPopCurrent_v2(&mut top)));
        debug_assert_eq!(top, self.0)
    }
}

impl ContextGuard<'_> {
    /// Waits for all work queued in the current context.
    #[inline]
    pub fn synchronize(&self) -> Result<(), DriverError> {
        driver!(cuCtxSynchronize())
    }
}
