#![cfg(nvidia)]

#[macro_use]
pub mod bindings {
    #![allow(unused, non_upper_case_globals, non_camel_case_types, non_snake_case)]
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

    /// Calls a driver function, turning its `CUresult` into a `Result`.
    #[macro_export]
    macro_rules! driver {
        ($f:expr) => {{
            #[allow(unused_imports)]
            use $crate::bindings::*;
            #[allow(unused_unsafe, clippy::macro_metavars_in_unsafe)]
            let err = unsafe { $f };
            if err == CUresult::CUDA_SUCCESS {
                Ok(())
            } else {
                Err($crate::DriverError(err))
            }
        }};
    }
}

mod context;
mod dev_mem;
mod device;

pub use context::{Context, ContextGuard};
pub use dev_mem::DevMem;
pub use device::Device;

pub trait AsRaw {
    type Raw;

    /// # Safety
    ///
    /// The caller must ensure that the returned item is dropped before the original item.
    unsafe fn as_raw(&self) -> Self::Raw;
}

/// A driver call returned something other than `CUDA_SUCCESS`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
#[error("cuda driver returned {0:?}")]
pub struct DriverError(pub bindings::CUresult);

impl DriverError {
    #[inline]
    pub fn is_out_of_memory(self) -> bool {
        self.0 == bindings::CUresult::CUDA_ERROR_OUT_OF_MEMORY
    }
}

/// The driver loaded but found nothing to run on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
#[error("no cuda device available")]
pub struct NoDevice;

#[inline(always)]
pub fn init() -> Result<(), NoDevice> {
    driver!(cuInit(0)).map_err(|e| {
        log::debug!("cuInit: {e}");
        NoDevice
    })
}

/// Releases a driver resource from a destructor, where failures can only be reported.
fn release(what: &str, result: Result<(), DriverError>) {
    if let Err(e) = result {
        log::warn!("failed to release {what}: {e}")
    }
}
