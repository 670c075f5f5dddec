//! Banded level-2 BLAS: element types, modes, a CPU reference and the device abstraction.

mod band;
mod device;
mod mode;
mod scalar;
mod status;

pub mod host;
pub mod reference;

pub use band::{Band, Increment};
pub use device::{Device, Session};
pub use mode::{Diagonal, Fill, Operation};
pub use num_complex::Complex;
pub use scalar::{DataType, Scalar};
pub use status::{BlasError, Status, check};

#[allow(non_camel_case_types)]
pub type c32 = Complex<f32>;
#[allow(non_camel_case_types)]
pub type c64 = Complex<f64>;
