use crate::CublasDevice;
use band_blas::{Device, Scalar, Session, Status, c32, c64};
use blas_check::{Arguments, testing_hbmv, testing_tbmv};

fn device() -> Option<CublasDevice> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dev = CublasDevice::fetch().unwrap();
    if dev.is_none() {
        println!("no cuda device, skipped")
    }
    dev
}

fn hbmv<T: Scalar>(dev: &CublasDevice, args: &Arguments) {
    let report = testing_hbmv::<T, _>(args, dev).unwrap();
    assert!(report.passed(), "{report}")
}

fn tbmv<T: Scalar>(dev: &CublasDevice, args: &Arguments) {
    let report = testing_tbmv::<T, _>(args, dev).unwrap();
    assert!(report.passed(), "{report}")
}

#[test]
fn test_hbmv() {
    let Some(dev) = device() else { return };
    for uplo in ['U', 'L'] {
        for (incx, incy) in [(1, 1), (2, -3)] {
            let args = Arguments::default()
                .n(257)
                .k(7)
                .lda(9)
                .incx(incx)
                .incy(incy)
                .uplo_option(uplo)
                .alpha(2., -1.)
                .beta(0.5, 0.)
                .norm_check(true)
                .timing(true);
            hbmv::<f32>(&dev, &args);
            hbmv::<f64>(&dev, &args);
            hbmv::<c32>(&dev, &args);
            hbmv::<c64>(&dev, &args);
        }
    }
}

#[test]
fn test_tbmv() {
    let Some(dev) = device() else { return };
    for trans in ['N', 'T', 'C'] {
        for diag in ['N', 'U'] {
            let args = Arguments::default()
                .m(300)
                .k(4)
                .lda(300)
                .incx(-2)
                .trans_a_option(trans)
                .diag_option(diag)
                .norm_check(true);
            tbmv::<f32>(&dev, &args);
            tbmv::<f64>(&dev, &args);
            tbmv::<c32>(&dev, &args);
            tbmv::<c64>(&dev, &args);
        }
    }
}

#[test]
fn test_empty_buffers() {
    let Some(dev) = device() else { return };
    let session = dev.open().unwrap();
    let buf = session.malloc::<c64>(0).unwrap();
    session.memcpy_d2h(&mut [], &buf).unwrap();
    let err = session.memcpy_d2h(&mut [c64::default()], &buf).unwrap_err();
    assert_eq!(err.status(), Status::InvalidValue);
    assert!(testing_hbmv::<f64, _>(&Arguments::default().n(0), &dev)
        .unwrap()
        .passed())
}
