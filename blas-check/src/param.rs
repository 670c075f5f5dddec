use crate::Arguments;
use band_blas::{BlasError, Diagonal, Fill, Increment, Operation};
use std::fmt;

/// Parameters of a banded Hermitian matrix-vector test.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HbmvParams {
    pub fill: Fill,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
    pub incx: Increment,
    pub incy: Increment,
}

/// Parameters of a banded triangular matrix-vector test.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TbmvParams {
    pub fill: Fill,
    pub trans: Operation,
    pub diag: Diagonal,
    pub m: usize,
    pub k: usize,
    pub lda: usize,
    pub incx: Increment,
}

fn dim(value: i64, err: &'static str) -> Result<usize, BlasError> {
    usize::try_from(value).map_err(|_| BlasError::InvalidArgument(err))
}

fn inc(value: i64, err: &'static str) -> Result<Increment, BlasError> {
    isize::try_from(value)
        .ok()
        .and_then(Increment::new)
        .ok_or(BlasError::InvalidArgument(err))
}

fn len(inc: Increment, n: usize) -> Result<usize, BlasError> {
    inc.buffer_len(n)
        .ok_or(BlasError::InvalidArgument("vector size overflows"))
}

fn matrix_len(lda: usize, n: usize) -> Result<usize, BlasError> {
    lda.checked_mul(n)
        .ok_or(BlasError::InvalidArgument("matrix size overflows"))
}

impl TryFrom<&Arguments> for HbmvParams {
    type Error = BlasError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        let n = dim(args.n, "n < 0")?;
        let k = dim(args.k, "k < 0")?;
        let lda = dim(args.lda, "lda < k + 1")?;
        if lda <= k {
            return Err(BlasError::InvalidArgument("lda < k + 1"));
        }
        let ans = Self {
            fill: args.uplo_option.try_into()?,
            n,
            k,
            lda,
            incx: inc(args.incx, "incx == 0")?,
            incy: inc(args.incy, "incy == 0")?,
        };
        ans.a_len()?;
        ans.x_len()?;
        ans.y_len()?;
        Ok(ans)
    }
}

impl HbmvParams {
    #[inline]
    pub fn a_len(&self) -> Result<usize, BlasError> {
        matrix_len(self.lda, self.n)
    }

    #[inline]
    pub fn x_len(&self) -> Result<usize, BlasError> {
        len(self.incx, self.n)
    }

    #[inline]
    pub fn y_len(&self) -> Result<usize, BlasError> {
        len(self.incy, self.n)
    }
}

impl TryFrom<&Arguments> for TbmvParams {
    type Error = BlasError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        let m = dim(args.m, "m < 0")?;
        let k = dim(args.k, "k < 0")?;
        let lda = dim(args.lda, "lda < m")?;
        if lda < m {
            return Err(BlasError::InvalidArgument("lda < m"));
        }
        let ans = Self {
            fill: args.uplo_option.try_into()?,
            trans: args.trans_a_option.try_into()?,
            diag: args.diag_option.try_into()?,
            m,
            k,
            lda,
            incx: inc(args.incx, "incx == 0")?,
        };
        ans.a_len()?;
        ans.x_len()?;
        Ok(ans)
    }
}

impl TbmvParams {
    #[inline]
    pub fn a_len(&self) -> Result<usize, BlasError> {
        matrix_len(self.lda, self.m)
    }

    #[inline]
    pub fn x_len(&self) -> Result<usize, BlasError> {
        len(self.incx, self.m)
    }
}

impl fmt::Display for HbmvParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            fill,
            n,
            k,
            lda,
            incx,
            incy,
        } = self;
        write!(
            f,
            "uplo={fill} n={n} k={k} lda={lda} incx={incx} incy={incy}"
        )
    }
}

impl fmt::Display for TbmvParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            fill,
            trans,
            diag,
            m,
            k,
            lda,
            incx,
        } = self;
        write!(
            f,
            "uplo={fill} trans={trans} diag={diag} m={m} k={k} lda={lda} incx={incx}"
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn hbmv(args: Arguments) -> Result<HbmvParams, BlasError> {
        HbmvParams::try_from(&args)
    }

    fn tbmv(args: Arguments) -> Result<TbmvParams, BlasError> {
        TbmvParams::try_from(&args)
    }

    #[test]
    fn test_hbmv() {
        let params = hbmv(Arguments::default().n(4).k(2).lda(3)).unwrap();
        assert_eq!(params.a_len(), Ok(12));
        assert_eq!(params.x_len(), Ok(4));
        assert_eq!(
            params.to_string(),
            "uplo=U n=4 k=2 lda=3 incx=1 incy=1"
        );

        let params = hbmv(Arguments::default().n(3).incx(-2).incy(3)).unwrap();
        assert_eq!(params.x_len(), Ok(6));
        assert_eq!(params.y_len(), Ok(9));

        let err = |args| hbmv(args).unwrap_err();
        assert_eq!(
            err(Arguments::default().n(-1)),
            BlasError::InvalidArgument("n < 0")
        );
        assert_eq!(
            err(Arguments::default().k(-1)),
            BlasError::InvalidArgument("k < 0")
        );
        assert_eq!(
            err(Arguments::default().k(2).lda(1)),
            BlasError::InvalidArgument("lda < k + 1")
        );
        assert_eq!(
            err(Arguments::default().incx(0)),
            BlasError::InvalidArgument("incx == 0")
        );
        assert_eq!(
            err(Arguments::default().incy(0)),
            BlasError::InvalidArgument("incy == 0")
        );
        assert!(matches!(
            err(Arguments::default().uplo_option('X')),
            BlasError::InvalidArgument(_)
        ));
        assert_eq!(
            err(Arguments::default().n(i64::MAX).lda(i64::MAX)),
            BlasError::InvalidArgument("matrix size overflows")
        );
    }

    #[test]
    fn test_tbmv() {
        let params = tbmv(
            Arguments::default()
                .m(5)
                .k(1)
                .lda(5)
                .trans_a_option('c')
                .diag_option('U'),
        )
        .unwrap();
        assert_eq!(params.trans, Operation::ConjTrans);
        assert_eq!(params.diag, Diagonal::Unit);
        assert_eq!(params.a_len(), Ok(25));

        // n and incy play no part
        assert!(tbmv(Arguments::default().m(4).lda(4).n(-1).incy(0)).is_ok());

        let err = |args| tbmv(args).unwrap_err();
        assert_eq!(
            err(Arguments::default().m(-1)),
            BlasError::InvalidArgument("m < 0")
        );
        assert_eq!(
            err(Arguments::default().m(4).lda(3)),
            BlasError::InvalidArgument("lda < m")
        );
        assert_eq!(
            err(Arguments::default().m(4).lda(4).incx(0)),
            BlasError::InvalidArgument("incx == 0")
        );
        assert!(err(Arguments::default().m(4).lda(4).diag_option('?')).status()
            == band_blas::Status::InvalidValue);
    }
}
