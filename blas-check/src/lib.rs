//! Correctness tests of banded level-2 routines against a CPU reference.
//!
//! Each routine test takes the flat [`Arguments`] record, parses it into typed
//! parameters, runs the routine once on a [`band_blas::Device`] and once on the
//! host reference, and returns a [`CheckReport`].

mod arg;
mod flops;
mod hbmv;
mod param;
mod report;
mod tbmv;

pub use arg::Arguments;
pub use flops::{hbmv_flop_count, hbmv_gflop_count, tbmv_flop_count, tbmv_gflop_count};
pub use hbmv::testing_hbmv;
pub use param::{HbmvParams, TbmvParams};
pub use report::{CheckReport, Timing};
pub use tbmv::testing_tbmv;
pub use test_utils::{NormCheck, UnitCheck};
