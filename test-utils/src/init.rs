use band_blas::{Increment, Scalar};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator every test reseeds before filling its inputs.
#[inline]
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Small integers in `1..=10` for every part, exact in every precision.
#[inline]
pub fn random<T: Scalar>(rng: &mut impl Rng) -> T {
    let re: i32 = rng.random_range(1..=10);
    let im: i32 = if T::IS_COMPLEX {
        rng.random_range(1..=10)
    } else {
        0
    };
    T::from_parts(re.into(), im.into())
}

/// Fills the leading `rows x cols` block of a column-major buffer.
pub fn init<T: Scalar>(rng: &mut impl Rng, buf: &mut [T], rows: usize, cols: usize, ld: usize) {
    for j in 0..cols {
        for i in 0..rows {
            buf[i + j * ld] = random(rng)
        }
    }
}

/// Fills the `n` logical elements of a strided vector.
#[inline]
pub fn init_vector<T: Scalar>(rng: &mut impl Rng, buf: &mut [T], n: usize, inc: Increment) {
    init(rng, buf, 1, n, inc.abs())
}
