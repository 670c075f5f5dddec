use band_blas::Scalar;

/// Flat configuration of one routine test, in the shape the orchestration layer hands over.
///
/// Values are unchecked; the routine tests parse them into typed parameters
/// before touching any resource.
#[derive(Clone, PartialEq, Debug)]
pub struct Arguments {
    pub m: i64,
    pub n: i64,
    pub k: i64,
    pub lda: i64,
    pub incx: i64,
    pub incy: i64,

    pub alpha: f64,
    pub alphai: f64,
    pub beta: f64,
    pub betai: f64,

    pub uplo_option: char,
    pub trans_a_option: char,
    pub diag_option: char,

    pub unit_check: bool,
    pub norm_check: bool,
    pub timing: bool,
    pub seed: u64,
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            m: 128,
            n: 128,
            k: 2,
            lda: 128,
            incx: 1,
            incy: 1,

            alpha: 1.,
            alphai: 0.,
            beta: 0.,
            betai: 0.,

            uplo_option: 'U',
            trans_a_option: 'N',
            diag_option: 'N',

            unit_check: true,
            norm_check: false,
            timing: false,
            seed: 1,
        }
    }
}

macro_rules! setters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        impl Arguments {
            $(
                #[inline]
                pub fn $field(mut self, $field: $ty) -> Self {
                    self.$field = $field;
                    self
                }
            )+
        }
    };
}

setters! {
    m: i64,
    n: i64,
    k: i64,
    lda: i64,
    incx: i64,
    incy: i64,
    uplo_option: char,
    trans_a_option: char,
    diag_option: char,
    unit_check: bool,
    norm_check: bool,
    timing: bool,
    seed: u64,
}

impl Arguments {
    #[inline]
    pub fn alpha(mut self, re: f64, im: f64) -> Self {
        self.alpha = re;
        self.alphai = im;
        self
    }

    #[inline]
    pub fn beta(mut self, re: f64, im: f64) -> Self {
        self.beta = re;
        self.betai = im;
        self
    }

    /// Both increments at once.
    #[inline]
    pub fn inc(self, inc: i64) -> Self {
        self.incx(inc).incy(inc)
    }

    /// `alpha` in the element type; real types drop the imaginary part.
    #[inline]
    pub fn get_alpha<T: Scalar>(&self) -> T {
        T::from_parts(self.alpha, self.alphai)
    }

    #[inline]
    pub fn get_beta<T: Scalar>(&self) -> T {
        T::from_parts(self.beta, self.betai)
    }
}

#[test]
fn test_arguments() {
    use band_blas::c32;

    let args = Arguments::default()
        .n(4)
        .k(2)
        .lda(3)
        .inc(-2)
        .alpha(1.5, -0.5)
        .uplo_option('L');
    assert_eq!((args.n, args.k, args.lda), (4, 2, 3));
    assert_eq!((args.incx, args.incy), (-2, -2));
    assert_eq!(args.uplo_option, 'L');
    assert_eq!(args.m, 128);
    assert_eq!(args.get_alpha::<c32>(), c32::new(1.5, -0.5));
    assert_eq!(args.get_alpha::<f64>(), 1.5);
    assert_eq!(args.get_beta::<f32>(), 0.);
}
