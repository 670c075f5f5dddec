use crate::BlasError;
use std::fmt;

/// Which triangle of the band is stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Fill {
    Upper,
    Lower,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operation {
    NoTrans,
    Trans,
    ConjTrans,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Diagonal {
    NonUnit,
    Unit,
}

impl TryFrom<char> for Fill {
    type Error = BlasError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'U' => Ok(Self::Upper),
            'L' => Ok(Self::Lower),
            _ => Err(BlasError::InvalidArgument("fill mode must be 'U' or 'L'")),
        }
    }
}

impl TryFrom<char> for Operation {
    type Error = BlasError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Self::NoTrans),
            'T' => Ok(Self::Trans),
            'C' => Ok(Self::ConjTrans),
            _ => Err(BlasError::InvalidArgument(
                "transpose mode must be 'N', 'T' or 'C'",
            )),
        }
    }
}

impl TryFrom<char> for Diagonal {
    type Error = BlasError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Self::NonUnit),
            'U' => Ok(Self::Unit),
            _ => Err(BlasError::InvalidArgument("diagonal mode must be 'N' or 'U'")),
        }
    }
}

impl Fill {
    pub const ALL: [Self; 2] = [Self::Upper, Self::Lower];

    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::Upper => 'U',
            Self::Lower => 'L',
        }
    }
}

impl Operation {
    pub const ALL: [Self; 3] = [Self::NoTrans, Self::Trans, Self::ConjTrans];

    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::NoTrans => 'N',
            Self::Trans => 'T',
            Self::ConjTrans => 'C',
        }
    }
}

impl Diagonal {
    pub const ALL: [Self; 2] = [Self::NonUnit, Self::Unit];

    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::NonUnit => 'N',
            Self::Unit => 'U',
        }
    }
}

macro_rules! display_as_char {
    ($($ty:ty)+) => {
        $(
            impl fmt::Display for $ty {
                #[inline]
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "{}", self.as_char())
                }
            }
        )+
    };
}

display_as_char!(Fill Operation Diagonal);

#[test]
fn test_parse() {
    assert_eq!(Fill::try_from('u'), Ok(Fill::Upper));
    assert_eq!(Fill::try_from('L'), Ok(Fill::Lower));
    assert!(Fill::try_from('X').is_err());
    assert_eq!(Operation::try_from('c'), Ok(Operation::ConjTrans));
    assert!(Operation::try_from('H').is_err());
    assert_eq!(Diagonal::try_from('U'), Ok(Diagonal::Unit));
    for op in Operation::ALL {
        assert_eq!(Operation::try_from(op.as_char()), Ok(op));
    }
    assert_eq!(Diagonal::NonUnit.to_string(), "N");
}
