#![cfg(nvidia)]

#[macro_use]
#[allow(unused, non_upper_case_globals, non_camel_case_types, non_snake_case)]
pub mod bindings {
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

    /// Calls a cuBLAS function, tagging a failed status with `$op`.
    macro_rules! cublas {
        ($op:expr, $f:expr) => {{
            #[allow(unused_imports)]
            use $crate::bindings::*;
            #[allow(unused_unsafe, clippy::macro_metavars_in_unsafe)]
            let err = unsafe { $f };
            band_blas::check(band_blas::Status::from_raw(err as _), $op)
        }};
    }
}

mod cublas;
mod device;

pub use cublas::Cublas;
pub use device::{CublasDevice, CublasSession};

#[cfg(test)]
mod test;
