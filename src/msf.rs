//! Sector timecodes.
//!
//! Every data sector stores its own position in bytes 12 to 14 of its
//! header as a "minute:second:frame" triplet of BCD values. A frame is a
//! sector, there are 75 of them per second. Since the position can be
//! derived from the sector index the encoder may drop it.

use std::fmt;
use std::str::FromStr;

use crate::bcd::Bcd;
use crate::CdError;

/// Number of sectors per second of playback
pub const FRAMES_PER_SECOND: u32 = 75;

/// Number of sectors per minute of playback
pub const FRAMES_PER_MINUTE: u32 = 60 * FRAMES_PER_SECOND;

/// Timecode of a sector. Ordering follows the position on the disc.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Msf(Bcd, Bcd, Bcd);

impl Msf {
    /// 00:00:00
    pub const ZERO: Msf = Msf(Bcd::ZERO, Bcd::ZERO, Bcd::ZERO);

    /// 99:59:74, the last position a header can express
    pub const MAX: Msf = Msf(Bcd::TABLE[99], Bcd::TABLE[59], Bcd::TABLE[74]);

    /// Parse a timecode as stored in a sector header. Returns `None` if a
    /// byte isn't valid BCD or if the seconds or frames are out of range.
    pub const fn from_bytes(bytes: &[u8; 3]) -> Option<Msf> {
        match (
            Bcd::from_bcd(bytes[0]),
            Bcd::from_bcd(bytes[1]),
            Bcd::from_bcd(bytes[2]),
        ) {
            (Some(m), Some(s), Some(f)) if s.bcd() < 0x60 && f.bcd() < 0x75 => Some(Msf(m, s, f)),
            _ => None,
        }
    }

    /// The three bytes as they're stored in a sector header
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.0.bcd(), self.1.bcd(), self.2.bcd()]
    }

    /// Absolute sector index, 00:00:00 being index 0. The first sector of
    /// a disc's program area is at 00:02:00 so it has index 150.
    pub const fn sector_index(self) -> u32 {
        self.0.binary() as u32 * FRAMES_PER_MINUTE
            + self.1.binary() as u32 * FRAMES_PER_SECOND
            + self.2.binary() as u32
    }

    /// Timecode of the sector at `index`, `None` past 99:59:74
    pub const fn from_sector_index(index: u32) -> Option<Msf> {
        let m = index / FRAMES_PER_MINUTE;

        if m > 99 {
            return None;
        }

        let s = (index / FRAMES_PER_SECOND) % 60;
        let f = index % FRAMES_PER_SECOND;

        Some(Msf(
            Bcd::TABLE[m as usize],
            Bcd::TABLE[s as usize],
            Bcd::TABLE[f as usize],
        ))
    }
}

impl fmt::Display for Msf {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}:{}:{}", self.0, self.1, self.2)
    }
}

impl fmt::Debug for Msf {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Msf({})", self)
    }
}

/// Parses "mm:ss:ff"
impl FromStr for Msf {
    type Err = CdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 3];
        let mut parts = s.split(':');

        for b in bytes.iter_mut() {
            let part = parts.next().ok_or(CdError::InvalidMsf)?;

            *b = Bcd::from_str(part)?.bcd();
        }

        if parts.next().is_some() {
            return Err(CdError::InvalidMsf);
        }

        Msf::from_bytes(&bytes).ok_or(CdError::InvalidMsf)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sector_index() {
        for index in [0, 1, 74, 75, 149, 150, 4_499, 4_500, 333_000, 449_999] {
            let msf = Msf::from_sector_index(index).unwrap();

            assert_eq!(msf.sector_index(), index);
            assert_eq!(Msf::from_bytes(&msf.to_bytes()), Some(msf));
        }

        assert_eq!(Msf::MAX.sector_index(), 449_999);
        assert_eq!(Msf::ZERO.sector_index(), 0);
    }

    #[test]
    fn header_bytes() {
        assert_eq!(Msf::from_sector_index(150).unwrap().to_bytes(), [0x00, 0x02, 0x00]);
        assert_eq!(Msf::from_sector_index(759).unwrap().to_bytes(), [0x00, 0x10, 0x09]);
        assert_eq!(Msf::from_sector_index(449_999), Some(Msf::MAX));
        assert!(Msf::from_sector_index(450_000).is_none());
    }

    #[test]
    fn invalid_bytes() {
        assert!(Msf::from_bytes(&[0x00, 0x60, 0x00]).is_none());
        assert!(Msf::from_bytes(&[0x00, 0x00, 0x75]).is_none());
        assert!(Msf::from_bytes(&[0x0a, 0x00, 0x00]).is_none());
        assert!(Msf::from_bytes(&[0xa0, 0x00, 0x00]).is_none());
    }

    #[test]
    fn ordering() {
        let a = Msf::from_sector_index(150).unwrap();
        let b = Msf::from_sector_index(151).unwrap();
        let c = Msf::from_sector_index(4_500).unwrap();

        assert!(a < b);
        assert!(b < c);
        assert!(c < Msf::MAX);
    }

    #[test]
    fn from_str() {
        assert_eq!(Msf::from_str("00:02:00").unwrap().sector_index(), 150);
        assert_eq!(Msf::from_str("99:59:74").unwrap(), Msf::MAX);
        assert_eq!(Msf::ZERO.to_string(), "00:00:00");

        for s in ["", "00", "00:00", "00:00:00:00", "00:60:00", "00:00:75", "1a:00:00"] {
            assert!(Msf::from_str(s).is_err(), "{:?}", s);
        }
    }
}
