use band_blas::{Increment, Scalar};
use std::{fmt, time::Duration};
use test_utils::{NormCheck, UnitCheck, gather, write_vector};

/// Wall-clock time of the device call and of the reference call.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Timing {
    pub device: Duration,
    pub reference: Option<Duration>,
    pub gflop: f64,
}

impl Timing {
    #[inline]
    pub fn device_gflops(&self) -> f64 {
        self.gflop / self.device.as_secs_f64()
    }

    #[inline]
    pub fn reference_gflops(&self) -> Option<f64> {
        self.reference.map(|t| self.gflop / t.as_secs_f64())
    }
}

/// What a routine test observed. A mismatch is a result, not an error.
#[derive(Clone, PartialEq, Debug)]
pub struct CheckReport {
    pub routine: &'static str,
    pub ty: &'static str,
    pub device: String,
    pub unit: Option<UnitCheck>,
    pub norm: Option<NormCheck>,
    pub timing: Option<Timing>,
}

impl CheckReport {
    pub(crate) fn new<T: Scalar>(routine: &'static str, device: &str) -> Self {
        Self {
            routine,
            ty: T::NAME,
            device: device.into(),
            unit: None,
            norm: None,
            timing: None,
        }
    }

    /// Every requested check passed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.unit.is_none_or(|c| c.passed()) && self.norm.is_none_or(|c| c.passed())
    }

    /// Logs the outcome, dumping both vectors when a check failed.
    pub(crate) fn log<T: Scalar>(&self, n: usize, inc: Increment, expected: &[T], actual: &[T]) {
        if let Some(timing) = &self.timing {
            log::info!(
                "{}<{}> on {}: device {:?} ({:.3} GFLOP/s)",
                self.routine,
                self.ty,
                self.device,
                timing.device,
                timing.device_gflops(),
            );
            if let (Some(time), Some(gflops)) = (timing.reference, timing.reference_gflops()) {
                log::info!("reference {time:?} ({gflops:.3} GFLOP/s)")
            }
        }
        if self.passed() {
            log::debug!("{self}");
            return;
        }
        log::warn!("{self}");
        if log::log_enabled!(log::Level::Warn) {
            let (max_abs, rel) =
                test_utils::diff(&gather(actual, n, inc), &gather(expected, n, inc));
            let mut dump = Vec::new();
            for (name, buf) in [("reference", expected), ("device", actual)] {
                dump.extend_from_slice(format!("{name} ").as_bytes());
                let _ = write_vector(&mut dump, &gather(buf, n, inc));
            }
            log::warn!(
                "max abs diff {max_abs:.3e}, rel diff {rel:.3e}\n{}",
                String::from_utf8_lossy(&dump)
            )
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}<{}> on {}:", self.routine, self.ty, self.device)?;
        match self.unit {
            None => {}
            Some(UnitCheck::Pass) => write!(f, " unit check passed")?,
            Some(UnitCheck::Mismatch {
                index,
                expected,
                actual,
                ulps,
            }) => write!(
                f,
                " unit check failed at {index}: expected {expected:?}, got {actual:?} ({ulps} ulps)"
            )?,
        }
        if let Some(norm) = self.norm {
            write!(
                f,
                " norm error {:.3e} (tolerance {:.3e})",
                norm.error, norm.tolerance
            )?
        }
        Ok(())
    }
}

#[test]
fn test_gflops() {
    let timing = Timing {
        device: Duration::from_millis(250),
        reference: Some(Duration::from_secs(2)),
        gflop: 1.,
    };
    assert_eq!(timing.device_gflops(), 4.);
    assert_eq!(timing.reference_gflops(), Some(0.5));
    let timing = Timing {
        reference: None,
        ..timing
    };
    assert_eq!(timing.reference_gflops(), None);
}

#[test]
fn test_passed() {
    let mut report = CheckReport::new::<f32>("hbmv", "host");
    assert!(report.passed());
    assert_eq!(report.to_string(), "hbmv<f32> on host:");

    report.unit = Some(UnitCheck::Pass);
    report.norm = Some(NormCheck {
        error: 0.,
        tolerance: 1e-6,
    });
    assert!(report.passed());

    report.norm = Some(NormCheck {
        error: 1.,
        tolerance: 1e-6,
    });
    assert!(!report.passed());

    report.norm = None;
    report.unit = Some(UnitCheck::Mismatch {
        index: 3,
        expected: (1., 0.),
        actual: (2., 0.),
        ulps: 8388608,
    });
    assert!(!report.passed());
    assert!(report.to_string().contains("unit check failed at 3"));
}
