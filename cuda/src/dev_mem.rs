use crate::{
    AsRaw, Context, DriverError,
    bindings::{CUdeviceptr, CUresult},
    release,
};
use std::{alloc::Layout, marker::PhantomData, mem::size_of_val};

/// `len` elements of `T` in device memory, freed on drop.
///
/// An empty buffer owns no allocation and its pointer is null.
pub struct DevMem<'ctx, T> {
    ptr: CUdeviceptr,
    len: usize,
    ctx: &'ctx Context,
    _phantom: PhantomData<T>,
}

impl Context {
    pub fn malloc<T: Copy>(&self, len: usize) -> Result<DevMem<'_, T>, DriverError> {
        let bytes = Layout::array::<T>(len)
            .map_err(|_| DriverError(CUresult::CUDA_ERROR_OUT_OF_MEMORY))?
            .size();
        let mut ptr = 0;
        if bytes > 0 {
            let _guard = self.push()?;
            driver!(cuMemAlloc_v2(&mut ptr, bytes))?
        }
        Ok(DevMem {
            ptr,
            len,
            ctx: self,
            _phantom: PhantomData,
        })
    }
}

impl<T> Drop for DevMem<'_, T> {
    fn drop(&mut self) {
        if self.ptr == 0 {
            return;
        }
        match self.ctx.push() {
            Ok(_guard) => release("device memory", driver!(cuMemFree_v2(self.ptr))),
            Err(e) => release("device memory", Err(e)),
        }
    }
}

impl<T> AsRaw for DevMem<'_, T> {
    type Raw = CUdeviceptr;
    #[inline]
    unsafe fn as_raw(&self) -> Self::Raw {
        self.ptr
    }
}

impl<T: Copy> DevMem<'_, T> {
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn copy_in(&mut self, src: &[T]) -> Result<(), DriverError> {
        if src.len() != self.len {
            return Err(DriverError(CUresult::CUDA_ERROR_INVALID_VALUE));
        }
        if self.ptr == 0 {
            return Ok(());
        }
        let _guard = self.ctx.push()?;
        driver!(cuMemcpyHtoD_v2(
            self.ptr,
            src.as_ptr().cast(),
            size_of_val(src)
        ))
    }

    pub fn copy_out(&self, dst: &mut [T]) -> Result<(), DriverError> {
        if dst.len() != self.len {
            return Err(DriverError(CUresult::CUDA_ERROR_INVALID_VALUE));
        }
        if self.ptr == 0 {
            return Ok(());
        }
        let _guard = self.ctx.push()?;
        driver!(cuMemcpyDtoH_v2(
            dst.as_mut_ptr().cast(),
            self.ptr,
            size_of_val(dst)
        ))
    }
}

#[test]
fn test_copy() {
    if crate::init().is_err() {
        return;
    }
    let Some(dev) = crate::Device::fetch().unwrap() else {
        return;
    };
    let ctx = dev.retain_primary().unwrap();
    println!("{}", dev.name().unwrap());

    let src = (0..1000u32).collect::<Vec<_>>();
    let mut mem = ctx.malloc::<u32>(src.len()).unwrap();
    mem.copy_in(&src).unwrap();
    let mut dst = vec![0; src.len()];
    mem.copy_out(&mut dst).unwrap();
    assert_eq!(src, dst);
    assert!(mem.copy_in(&src[1..]).is_err());

    let empty = ctx.malloc::<f64>(0).unwrap();
    assert!(empty.is_empty());
    empty.copy_out(&mut []).unwrap();
}
