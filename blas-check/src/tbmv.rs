use crate::{Arguments, CheckReport, TbmvParams, Timing, flops::tbmv_gflop_count};
use band_blas::{BlasError, Device, Scalar, Session, reference};
use std::time::Instant;
use test_utils::{init, init_vector, norm_check, seeded, unit_check};

/// Runs `tbmv` once on `device` and checks it against the CPU reference.
pub fn testing_tbmv<T: Scalar, D: Device>(
    args: &Arguments,
    device: &D,
) -> Result<CheckReport, BlasError> {
    let params = TbmvParams::try_from(args)?;
    log::debug!("tbmv<{}> on {}: {params}", T::NAME, device.name());
    let TbmvParams {
        fill,
        trans,
        diag,
        m,
        k,
        lda,
        incx,
    } = params;

    let mut ha = vec![T::zero(); params.a_len()?];
    let mut hx = vec![T::zero(); params.x_len()?];

    let mut rng = seeded(args.seed);
    init(&mut rng, &mut ha, m, m, lda);
    init_vector(&mut rng, &mut hx, m, incx);
    // the device overwrites its x, the reference overwrites this one
    let mut hres = hx.clone();

    let session = device.open()?;
    let da = session.from_host(&ha)?;
    let mut dx = session.from_host(&hx)?;

    let time = Instant::now();
    session.tbmv(fill, trans, diag, m, k, &da, lda, &mut dx, incx)?;
    session.synchronize()?;
    let device_time = time.elapsed();

    session.memcpy_d2h(&mut hres, &dx)?;

    let mut report = CheckReport::new::<T>("tbmv", device.name());
    let mut reference_time = None;
    if args.unit_check || args.norm_check {
        let time = Instant::now();
        reference::tbmv(fill, trans, diag, m, k, &ha, lda, &mut hx, incx);
        reference_time = Some(time.elapsed());

        if args.unit_check {
            report.unit = Some(unit_check(m, incx, &hx, &hres))
        }
        if args.norm_check {
            report.norm = Some(norm_check(m, incx, &hx, &hres))
        }
    }
    if args.timing {
        report.timing = Some(Timing {
            device: device_time,
            reference: reference_time,
            gflop: tbmv_gflop_count::<T>(m, k),
        })
    }
    report.log(m, incx, &hx, &hres);
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;
    use band_blas::{
        Diagonal, Fill, Operation, Status, c32, c64,
        host::{FaultPoint, HostDevice},
    };

    fn run<T: Scalar>(args: &Arguments) -> CheckReport {
        let _ = env_logger::builder().is_test(true).try_init();
        let dev = HostDevice::new();
        let report = testing_tbmv::<T, _>(args, &dev).unwrap();
        assert!(dev.ledger().is_released());
        report
    }

    #[test]
    fn test_all_modes() {
        for fill in Fill::ALL {
            for trans in Operation::ALL {
                for diag in Diagonal::ALL {
                    for inc in [1, 3, -2] {
                        let args = Arguments::default()
                            .m(17)
                            .k(4)
                            .lda(17)
                            .incx(inc)
                            .uplo_option(fill.as_char())
                            .trans_a_option(trans.as_char())
                            .diag_option(diag.as_char())
                            .norm_check(true);
                        for report in [
                            run::<f32>(&args),
                            run::<f64>(&args),
                            run::<c32>(&args),
                            run::<c64>(&args),
                        ] {
                            assert!(report.passed(), "{args:?}: {report}")
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_mismatch_is_reported() {
        let _ = env_logger::builder().is_test(true).try_init();
        for (inc, index) in [(1, 0), (-2, 7), (3, 12)] {
            let args = Arguments::default()
                .m(13)
                .k(2)
                .lda(13)
                .incx(inc)
                .trans_a_option('C')
                .norm_check(true);
            let dev = HostDevice::new().with_corrupted_output(index);
            let report = testing_tbmv::<c64, _>(&args, &dev).unwrap();
            assert!(!report.passed(), "{report}");
            match report.unit {
                Some(test_utils::UnitCheck::Mismatch {
                    index: at,
                    expected,
                    actual,
                    ..
                }) => {
                    assert_eq!(at, index);
                    assert_eq!(actual.0, expected.0 + 1.);
                    assert_eq!(actual.1, expected.1)
                }
                other => panic!("expected a mismatch, got {other:?}"),
            }
            assert!(dev.ledger().is_released());
        }
    }

    #[test]
    fn test_invalid() {
        for args in [
            Arguments::default().m(-1),
            Arguments::default().k(-1),
            Arguments::default().m(8).lda(7),
            Arguments::default().m(8).lda(8).incx(0),
            Arguments::default().m(8).lda(8).trans_a_option('x'),
        ] {
            let dev = HostDevice::new();
            let err = testing_tbmv::<f32, _>(&args, &dev).unwrap_err();
            assert_eq!(err.status(), Status::InvalidValue);
            assert!(dev.ledger().is_untouched());
        }
    }

    #[test]
    fn test_device_rejects_narrow_lda() {
        // lda covers m but not the band: only the device notices
        let args = Arguments::default().m(4).k(5).lda(4);
        let dev = HostDevice::new();
        let err = testing_tbmv::<f64, _>(&args, &dev).unwrap_err();
        assert_eq!(
            err,
            BlasError::Device {
                op: "tbmv",
                status: Status::InvalidValue
            }
        );
        let ledger = dev.ledger();
        assert!(ledger.is_released());
        assert_eq!(ledger.allocations, 2);
        assert_eq!(ledger.launches, 0);
    }

    #[test]
    fn test_device_failure() {
        let args = Arguments::default().m(12).k(2).lda(12);
        let dev = HostDevice::new().with_fault(FaultPoint::Tbmv, Status::ExecutionFailed);
        let err = testing_tbmv::<c64, _>(&args, &dev).unwrap_err();
        assert_eq!(err.status(), Status::ExecutionFailed);
        assert!(dev.ledger().is_released());
        assert_eq!(dev.ledger().copies, 2);
    }
}
