use serde::{Deserialize, Serialize};
use std::ops::Neg;

use Dir::*;

use crate::error::{Error, ErrorType};

// the discriminants are the numeric codes the input layer sends
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub enum Dir {
    R = 0,
    L = 1,
    U = 2,
    D = 3,
}

impl TryFrom<u8> for Dir {
    type Error = Error;

    fn try_from(num: u8) -> Result<Self, Self::Error> {
        match num {
            0 => Ok(R),
            1 => Ok(L),
            2 => Ok(U),
            3 => Ok(D),
            _ => Err(Error::from(ErrorType::InvalidDirection(num))),
        }
    }
}

impl From<Dir> for u8 {
    fn from(dir: Dir) -> Self {
        dir as u8
    }
}

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            R => L,
            L => R,
            U => D,
            D => U,
        }
    }
}

impl Dir {
    pub fn iter() -> impl Iterator<Item = Self> {
        [R, L, U, D].iter().copied()
    }

    /// (row, col) offset of a single step, rows grow downwards
    pub fn delta(self) -> (isize, isize) {
        match self {
            R => (0, 1),
            L => (0, -1),
            U => (-1, 0),
            D => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, R | L)
    }
}

#[test]
fn test_dir_codes() {
    for dir in Dir::iter() {
        assert_eq!(Dir::try_from(u8::from(dir)).unwrap(), dir);
    }
    assert!(Dir::try_from(4).is_err());
    assert!(Dir::try_from(255).is_err());
}

#[test]
fn test_dir_neg() {
    for dir in Dir::iter() {
        assert_ne!(-dir, dir);
        assert_eq!(-(-dir), dir);
        let (dr, dc) = dir.delta();
        assert_eq!((-dir).delta(), (-dr, -dc));
    }
}
