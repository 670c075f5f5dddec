use crate::{Arguments, CheckReport, HbmvParams, Timing, flops::hbmv_gflop_count};
use band_blas::{BlasError, Device, Scalar, Session, reference};
use std::time::Instant;
use test_utils::{init, init_vector, norm_check, seeded, unit_check};

/// Runs `hbmv` once on `device` and checks it against the CPU reference.
///
/// Invalid arguments are rejected before the device is touched. A failed
/// device operation aborts the test and its status is returned; every buffer
/// and the session are released on the way out.
pub fn testing_hbmv<T: Scalar, D: Device>(
    args: &Arguments,
    device: &D,
) -> Result<CheckReport, BlasError> {
    let params = HbmvParams::try_from(args)?;
    log::debug!("hbmv<{}> on {}: {params}", T::NAME, device.name());
    let HbmvParams {
        fill,
        n,
        k,
        lda,
        incx,
        incy,
    } = params;

    let alpha = args.get_alpha::<T>();
    let beta = args.get_beta::<T>();

    // Naming: dX lives in device memory, hX in host memory
    let mut ha = vec![T::zero(); params.a_len()?];
    let mut hx = vec![T::zero(); params.x_len()?];
    let mut hy = vec![T::zero(); params.y_len()?];

    let mut rng = seeded(args.seed);
    init(&mut rng, &mut ha, k + 1, n, lda);
    init_vector(&mut rng, &mut hx, n, incx);
    init_vector(&mut rng, &mut hy, n, incy);
    // reference output starts from the same y
    let mut hz = hy.clone();

    let session = device.open()?;
    let da = session.from_host(&ha)?;
    let dx = session.from_host(&hx)?;
    let mut dy = session.from_host(&hy)?;

    let time = Instant::now();
    session.hbmv(fill, n, k, alpha, &da, lda, &dx, incx, beta, &mut dy, incy)?;
    session.synchronize()?;
    let device_time = time.elapsed();

    session.memcpy_d2h(&mut hy, &dy)?;

    let mut report = CheckReport::new::<T>("hbmv", device.name());
    let mut reference_time = None;
    if args.unit_check || args.norm_check {
        let time = Instant::now();
        reference::hbmv(fill, n, k, alpha, &ha, lda, &hx, incx, beta, &mut hz, incy);
        reference_time = Some(time.elapsed());

        if args.unit_check {
            report.unit = Some(unit_check(n, incy, &hz, &hy))
        }
        // norm check must follow the unit check
        if args.norm_check {
            report.norm = Some(norm_check(n, incy, &hz, &hy))
        }
    }
    if args.timing {
        report.timing = Some(Timing {
            device: device_time,
            reference: reference_time,
            gflop: hbmv_gflop_count::<T>(n, k),
        })
    }
    report.log(n, incy, &hz, &hy);
    Ok(report)
}
