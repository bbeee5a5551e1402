//! The CD format uses binary-coded decimal (BCD) for the timecode stored in
//! the header of every data sector, probably in order to make it easier to
//! display those informations on the first CD players.

use std::fmt;
use std::str::FromStr;

use crate::CdError;

/// A single packed BCD value in the range 0-99 (2 digits, 4bits per
/// digit).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bcd(u8);

impl Bcd {
    /// BCD 00
    pub const ZERO: Bcd = Bcd(0);

    /// Lookup table from binary 0..=99 to packed BCD
    pub const TABLE: [Bcd; 100] = {
        let mut table = [Bcd(0); 100];
        let mut i = 0;

        while i < 100 {
            table[i] = Bcd((((i / 10) << 4) | (i % 10)) as u8);
            i += 1;
        }

        table
    };

    /// Build a `Bcd` from an `u8` in BCD format. Returns `None` if
    /// the value provided is not valid BCD.
    pub const fn from_bcd(b: u8) -> Option<Bcd> {
        if b <= 0x99 && (b & 0xf) <= 0x9 {
            Some(Bcd(b))
        } else {
            None
        }
    }

    /// Build a `Bcd` from a binary `u8`. Returns `None` if the value
    /// is greater than 99.
    pub const fn from_binary(b: u8) -> Option<Bcd> {
        if b > 99 {
            None
        } else {
            Some(Bcd::TABLE[b as usize])
        }
    }

    /// Returns the BCD as an u8
    pub const fn bcd(self) -> u8 {
        self.0
    }

    /// Convert the BCD as a binary byte
    pub const fn binary(self) -> u8 {
        let b = self.0;

        (b >> 4) * 10 + (b & 0xf)
    }
}

impl FromStr for Bcd {
    type Err = CdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = u8::from_str(s).map_err(|_| CdError::BadBcd)?;

        Bcd::from_binary(b).ok_or(CdError::BadBcd)
    }
}

impl fmt::Display for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

impl fmt::Debug for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[test]
fn conversions() {
    assert!(Bcd::from_bcd(0) == Some(Bcd(0)));
    assert!(Bcd::from_bcd(1) == Some(Bcd(1)));
    assert!(Bcd::from_bcd(0x42) == Some(Bcd(0x42)));
    assert!(Bcd::from_bcd(0x1a).is_none());
    assert!(Bcd::from_bcd(0xf2).is_none());

    assert!(Bcd::from_binary(0) == Some(Bcd(0)));
    assert!(Bcd::from_binary(1) == Some(Bcd(1)));
    assert!(Bcd::from_binary(42) == Some(Bcd(0x42)));
    assert!(Bcd::from_binary(74) == Some(Bcd(0x74)));
    assert!(Bcd::from_binary(100).is_none());
    assert!(Bcd::from_binary(0xff).is_none());

    for i in 0..100 {
        assert_eq!(Bcd::TABLE[i as usize].binary(), i);
    }
}

#[test]
fn from_str() {
    assert!(Bcd::from_str("00").ok() == Some(Bcd(0)));
    assert!(Bcd::from_str("0").ok() == Some(Bcd(0)));
    assert!(Bcd::from_str("4").ok() == Some(Bcd(4)));
    assert!(Bcd::from_str("04").ok() == Some(Bcd(4)));
    assert!(Bcd::from_str("99").ok() == Some(Bcd(0x99)));
    assert!(Bcd::from_str("099").ok() == Some(Bcd(0x99)));
    assert!(Bcd::from_str("42").ok() == Some(Bcd(0x42)));

    assert!(Bcd::from_str("0x00").is_err());
    assert!(Bcd::from_str("0xab").is_err());
    assert!(Bcd::from_str("ab").is_err());
    assert!(Bcd::from_str("100").is_err());
    assert!(Bcd::from_str("0100").is_err());
    assert!(Bcd::from_str("-2").is_err());
}
