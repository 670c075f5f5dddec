use crate::{AsRaw, DriverError, bindings as cuda};
use std::ffi::{CStr, c_int};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct Device(cuda::CUdevice);

impl AsRaw for Device {
    type Raw = cuda::CUdevice;
    #[inline]
    unsafe fn as_raw(&self) -> Self::Raw {
        self.0
    }
}

impl Device {
    #[inline]
    pub fn new(index: c_int) -> Result<Self, DriverError> {
        let mut device = 0;
        driver!(cuDeviceGet(&mut device, index))?;
        Ok(Self(device))
    }

    #[inline]
    pub fn count() -> Result<usize, DriverError> {
        let mut count = 0;
        driver!(cuDeviceGetCount(&mut count))?;
        Ok(count as _)
    }

    /// The first device, if any.
    #[inline]
    pub fn fetch() -> Result<Option<Self>, DriverError> {
        if Self::count()? > 0 {
            Self::new(0).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn name(&self) -> Result<String, DriverError> {
        let mut name = [0u8; 256];
        driver!(cuDeviceGetName(
            name.as_mut_ptr().cast(),
            name.len() as _,
            self.0
        ))?;
        Ok(CStr::from_bytes_until_nul(&name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default())
    }
}
