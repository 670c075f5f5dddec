use crate::Fill;
use std::{fmt, num::NonZeroIsize, ops::Range};

/// Non-zero step between consecutive logical vector elements.
///
/// A negative increment walks the buffer from its far end: logical element
/// `0` sits at `(n - 1) * |inc|`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct Increment(NonZeroIsize);

impl Increment {
    pub const ONE: Self = Self(NonZeroIsize::new(1).unwrap());

    #[inline]
    pub const fn new(inc: isize) -> Option<Self> {
        match NonZeroIsize::new(inc) {
            Some(inc) => Some(Self(inc)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> isize {
        self.0.get()
    }

    #[inline]
    pub const fn abs(self) -> usize {
        self.0.get().unsigned_abs()
    }

    /// Buffer length holding `n` logical elements.
    #[inline]
    pub const fn buffer_len(self, n: usize) -> Option<usize> {
        n.checked_mul(self.abs())
    }

    /// Smallest buffer length that reaches `n` logical elements.
    #[inline]
    pub const fn span(self, n: usize) -> usize {
        match n {
            0 => 0,
            n => (n - 1) * self.abs() + 1,
        }
    }

    /// Buffer position of logical element `i` out of `n`.
    #[inline]
    pub const fn index(self, i: usize, n: usize) -> usize {
        debug_assert!(i < n);
        if self.0.get() > 0 {
            i * self.abs()
        } else {
            (n - 1 - i) * self.abs()
        }
    }
}

impl fmt::Display for Increment {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Column-major band storage: `k + 1` stored rows, `lda` elements per column.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Band {
    pub fill: Fill,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
}

impl Band {
    /// Position of matrix element `(r, c)` in the packed buffer,
    /// `None` if it lies outside the stored triangle of the band.
    #[inline]
    pub fn index(&self, r: usize, c: usize) -> Option<usize> {
        if r >= self.n || c >= self.n {
            return None;
        }
        let row = match self.fill {
            Fill::Upper if r <= c && c - r <= self.k => self.k + r - c,
            Fill::Lower if c <= r && r - c <= self.k => r - c,
            _ => return None,
        };
        Some(row + c * self.lda)
    }

    /// Indices within `k` of `i`: the only columns of row `i`, or rows of
    /// column `i`, that can hold a non-zero.
    #[inline]
    pub fn neighbors(&self, i: usize) -> Range<usize> {
        i.saturating_sub(self.k)..self.n.min(i + self.k + 1)
    }

    /// Buffer length the storage scheme reads, `0` for an empty matrix.
    #[inline]
    pub fn required_len(&self) -> usize {
        match self.n {
            0 => 0,
            n => (n - 1) * self.lda + self.k + 1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_increment() {
        assert!(Increment::new(0).is_none());
        assert_eq!(Increment::ONE.get(), 1);

        let inc = Increment::new(2).unwrap();
        assert_eq!(inc.buffer_len(4), Some(8));
        assert_eq!(inc.span(4), 7);
        assert_eq!(inc.span(0), 0);
        assert_eq!((0..4).map(|i| inc.index(i, 4)).collect::<Vec<_>>(), [0, 2, 4, 6]);

        let inc = Increment::new(-3).unwrap();
        assert_eq!(inc.abs(), 3);
        assert_eq!((0..3).map(|i| inc.index(i, 3)).collect::<Vec<_>>(), [6, 3, 0]);
        assert_eq!(inc.buffer_len(usize::MAX), None);
    }

    #[test]
    fn test_band() {
        // |a0 a1 a2 . |
        // |   b0 b1 b2|
        // |      c0 c1|
        // |         d0|
        let band = Band {
            fill: Fill::Upper,
            n: 4,
            k: 2,
            lda: 3,
        };
        assert_eq!(band.index(0, 0), Some(2));
        assert_eq!(band.index(0, 2), Some(6));
        assert_eq!(band.index(1, 3), Some(9));
        assert_eq!(band.index(0, 3), None);
        assert_eq!(band.index(2, 1), None);
        assert_eq!(band.neighbors(3), 1..4);
        assert_eq!(band.neighbors(0), 0..3);
        assert_eq!(band.required_len(), 12);

        let band = Band {
            fill: Fill::Lower,
            ..band
        };
        assert_eq!(band.index(0, 0), Some(0));
        assert_eq!(band.index(2, 0), Some(2));
        assert_eq!(band.index(3, 2), Some(7));
        assert_eq!(band.index(3, 0), None);
        assert_eq!(band.neighbors(2), 0..4);
    }
}
