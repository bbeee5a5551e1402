//! CD sector interface and layout table.
//!
//! Every sector is 2352 bytes long. Audio (CD-DA) sectors are raw PCM data,
//! data (CD-ROM) sectors start with a 16 byte header followed by one of the
//! layouts below:
//!
//! ```text
//! Mode 1
//!        0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
//! 0000h 00 FF FF FF FF FF FF FF FF FF FF 00 [-MSF -] 01
//! 0010h [---DATA...
//! 0800h                                     ...DATA---]
//! 0810h [---EDC---] 00 00 00 00 00 00 00 00 [---ECC...
//! 0920h                                      ...ECC---]
//!
//! Mode 2 (XA), form 1
//! 0000h 00 FF FF FF FF FF FF FF FF FF FF 00 [-MSF -] 02
//! 0010h [--FLAGS--] [--FLAGS--] [---DATA...
//! 0810h             ...DATA---] [---EDC---] [---ECC...
//! 0920h                                      ...ECC---]
//!
//! Mode 2 (XA), form 2
//! 0000h 00 FF FF FF FF FF FF FF FF FF FF 00 [-MSF -] 02
//! 0010h [--FLAGS--] [--FLAGS--] [---DATA...
//! 0920h                         ...DATA---] [---EDC---]
//! ```
//!
//! Plain Mode 2 sectors have 0x920 bytes of data right after the header.

use std::fmt;
use std::ops::Range;

use crate::msf::Msf;
use crate::optimization::Optimizations;
use crate::{CdError, CdResult};

/// Size of a raw sector, without subchannel data
pub const SECTOR_SIZE: usize = 2352;

/// Sync pattern at the start of every CD-ROM sector
pub const SYNC_PATTERN: [u8; 12] = [
    0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00,
];

/// A byte range within a sector or an encoded stream
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Offset of the first byte
    pub offset: usize,
    /// Number of bytes
    pub len: usize,
}

impl Span {
    /// Build a new span
    pub const fn new(offset: usize, len: usize) -> Span {
        Span { offset, len }
    }

    /// Offset one past the last byte
    pub const fn end(self) -> usize {
        self.offset + self.len
    }

    /// Span as a `Range`, suitable for slicing
    pub const fn range(self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// The individual fields a sector layout is made of
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Field {
    /// 12 byte sync pattern
    Sync,
    /// 3 byte BCD timecode
    Msf,
    /// Mode byte
    Mode,
    /// Mode 2 XA sub-header, two identical 4 byte copies
    XaSubHeader,
    /// User data. For CD-DA this is the whole sector.
    UserData,
    /// Error detection code
    Edc,
    /// Mode 1 reserved bytes, normally zero
    Blanks,
    /// P and Q error correction codes
    Ecc,
}

impl Field {
    /// The optimization that strips this field
    pub const fn optimization(self) -> Optimizations {
        match self {
            Field::Sync => Optimizations::REMOVE_SYNC,
            Field::Msf => Optimizations::REMOVE_MSF,
            Field::Mode => Optimizations::REMOVE_MODE,
            Field::XaSubHeader => Optimizations::REMOVE_REDUNDANT_FLAG,
            Field::UserData => Optimizations::REMOVE_GAP,
            Field::Edc => Optimizations::REMOVE_EDC,
            Field::Blanks => Optimizations::REMOVE_BLANKS,
            Field::Ecc => Optimizations::REMOVE_ECC,
        }
    }
}

/// A field and its position within the raw sector
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FieldSpan {
    /// Field type
    pub field: Field,
    /// Position in the raw sector
    pub span: Span,
}

impl FieldSpan {
    const fn new(field: Field, offset: usize, len: usize) -> FieldSpan {
        FieldSpan {
            field,
            span: Span::new(offset, len),
        }
    }

    /// Number of bytes this field takes in the encoded stream when
    /// `applied` optimizations are in effect
    pub fn encoded_len(&self, applied: Optimizations) -> usize {
        if !applied.contains(self.field.optimization()) {
            return self.span.len;
        }

        match self.field {
            // Only the redundant copy is dropped
            Field::XaSubHeader => self.span.len / 2,
            _ => 0,
        }
    }
}

const SYNC: FieldSpan = FieldSpan::new(Field::Sync, 0x000, 0x00c);
const MSF: FieldSpan = FieldSpan::new(Field::Msf, 0x00c, 0x003);
const MODE: FieldSpan = FieldSpan::new(Field::Mode, 0x00f, 0x001);
const XA_SUBHEADER: FieldSpan = FieldSpan::new(Field::XaSubHeader, 0x010, 0x008);
const ECC: FieldSpan = FieldSpan::new(Field::Ecc, 0x81c, 0x114);

const CDDA_LAYOUT: [FieldSpan; 1] = [FieldSpan::new(Field::UserData, 0x000, 0x930)];

const MODE1_LAYOUT: [FieldSpan; 7] = [
    SYNC,
    MSF,
    MODE,
    FieldSpan::new(Field::UserData, 0x010, 0x800),
    FieldSpan::new(Field::Edc, 0x810, 0x004),
    FieldSpan::new(Field::Blanks, 0x814, 0x008),
    ECC,
];

const MODE2_LAYOUT: [FieldSpan; 4] = [
    SYNC,
    MSF,
    MODE,
    FieldSpan::new(Field::UserData, 0x010, 0x920),
];

// The EDC and ECC of these sectors are zeroed as well, they're part of the
// gap.
const MODE2_XA_GAP_LAYOUT: [FieldSpan; 5] = [
    SYNC,
    MSF,
    MODE,
    XA_SUBHEADER,
    FieldSpan::new(Field::UserData, 0x018, 0x918),
];

const MODE2_XA1_LAYOUT: [FieldSpan; 7] = [
    SYNC,
    MSF,
    MODE,
    XA_SUBHEADER,
    FieldSpan::new(Field::UserData, 0x018, 0x800),
    FieldSpan::new(Field::Edc, 0x818, 0x004),
    ECC,
];

const MODE2_XA2_LAYOUT: [FieldSpan; 6] = [
    SYNC,
    MSF,
    MODE,
    XA_SUBHEADER,
    FieldSpan::new(Field::UserData, 0x018, 0x914),
    FieldSpan::new(Field::Edc, 0x92c, 0x004),
];

/// Sector layouts recognized by the classifier
///
/// The numeric values are stable and may be stored alongside encoded
/// sectors.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SectorType {
    /// Not classified
    Unknown = 0,
    /// Audio sector, or anything without a sync pattern
    Cdda = 1,
    /// Audio sector containing only zeroes
    CddaGap = 2,
    /// Mode 1 sector with valid EDC and ECC
    Mode1 = 3,
    /// Mode 1 sector with valid EDC and ECC and zeroed user data
    Mode1Gap = 4,
    /// Mode 1 sector whose EDC or ECC doesn't match. Could be damaged or a
    /// copy protection.
    Mode1Raw = 5,
    /// Mode 2 sector without a recognizable XA form
    Mode2 = 6,
    /// Mode 2 sector with everything after the header zeroed
    Mode2Gap = 7,
    /// Mode 2 XA sector zeroed after the sub-header, EDC and ECC included.
    /// Found in some PlayStation games.
    Mode2XaGap = 8,
    /// Mode 2 XA Form 1 sector
    Mode2Xa1 = 9,
    /// Mode 2 XA Form 1 sector with zeroed user data
    Mode2Xa1Gap = 10,
    /// Mode 2 XA Form 2 sector
    Mode2Xa2 = 11,
    /// Mode 2 XA Form 2 sector with zeroed user data
    Mode2Xa2Gap = 12,
    /// Data sector with a mode byte other than 1 or 2
    ModeX = 13,
}

impl SectorType {
    /// Every classifiable sector type, in numeric order
    pub const ALL: [SectorType; 13] = [
        SectorType::Cdda,
        SectorType::CddaGap,
        SectorType::Mode1,
        SectorType::Mode1Gap,
        SectorType::Mode1Raw,
        SectorType::Mode2,
        SectorType::Mode2Gap,
        SectorType::Mode2XaGap,
        SectorType::Mode2Xa1,
        SectorType::Mode2Xa1Gap,
        SectorType::Mode2Xa2,
        SectorType::Mode2Xa2Gap,
        SectorType::ModeX,
    ];

    /// Convert back from the numeric value. Returns `None` for unknown
    /// values.
    pub fn from_u8(v: u8) -> Option<SectorType> {
        match v {
            0 => Some(SectorType::Unknown),
            _ => SectorType::ALL.get(usize::from(v) - 1).copied(),
        }
    }

    /// Fields of this sector type in the order they appear in the raw
    /// sector, which is also the order they're encoded in.
    pub fn layout(self) -> &'static [FieldSpan] {
        match self {
            SectorType::Unknown => &[],
            SectorType::Cdda | SectorType::CddaGap => &CDDA_LAYOUT,
            SectorType::Mode1 | SectorType::Mode1Gap | SectorType::Mode1Raw => &MODE1_LAYOUT,
            SectorType::Mode2 | SectorType::Mode2Gap | SectorType::ModeX => &MODE2_LAYOUT,
            SectorType::Mode2XaGap => &MODE2_XA_GAP_LAYOUT,
            SectorType::Mode2Xa1 | SectorType::Mode2Xa1Gap => &MODE2_XA1_LAYOUT,
            SectorType::Mode2Xa2 | SectorType::Mode2Xa2Gap => &MODE2_XA2_LAYOUT,
        }
    }

    /// Position of `field` in the raw sector, if this type has it
    pub fn field(self, field: Field) -> Option<Span> {
        self.layout()
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.span)
    }

    /// Position of the user data in the raw sector
    pub fn payload(self) -> Option<Span> {
        self.field(Field::UserData)
    }

    /// Portion of the raw sector covered by the EDC
    pub fn edc_coverage(self) -> Option<Span> {
        match self {
            SectorType::Mode1 | SectorType::Mode1Gap | SectorType::Mode1Raw => {
                Some(Span::new(0x000, 0x810))
            }
            SectorType::Mode2Xa1 | SectorType::Mode2Xa1Gap => Some(Span::new(0x010, 0x808)),
            SectorType::Mode2Xa2 | SectorType::Mode2Xa2Gap => Some(Span::new(0x010, 0x91c)),
            _ => None,
        }
    }

    /// True if the user data is all zeroes
    pub fn is_gap(self) -> bool {
        matches!(
            self,
            SectorType::CddaGap
                | SectorType::Mode1Gap
                | SectorType::Mode2Gap
                | SectorType::Mode2XaGap
                | SectorType::Mode2Xa1Gap
                | SectorType::Mode2Xa2Gap
        )
    }

    /// True for audio sectors
    pub fn is_cdda(self) -> bool {
        matches!(self, SectorType::Cdda | SectorType::CddaGap)
    }

    /// True for all Mode 1 variants
    pub fn is_mode1(self) -> bool {
        matches!(
            self,
            SectorType::Mode1 | SectorType::Mode1Gap | SectorType::Mode1Raw
        )
    }

    /// True for all Mode 2 XA variants
    pub fn is_xa(self) -> bool {
        self.field(Field::XaSubHeader).is_some()
    }

    /// Value of the mode byte for this sector type, `None` if it can't be
    /// derived from the type alone
    pub fn mode_byte(self) -> Option<u8> {
        match self {
            SectorType::Unknown | SectorType::Cdda | SectorType::CddaGap | SectorType::ModeX => {
                None
            }
            t if t.is_mode1() => Some(1),
            _ => Some(2),
        }
    }

    /// The optimizations that have an effect on this sector type
    pub fn supported_optimizations(self) -> Optimizations {
        let mut opts = self
            .layout()
            .iter()
            .fold(Optimizations::empty(), |o, f| o | f.field.optimization());

        if !self.is_gap() {
            opts.remove(Optimizations::REMOVE_GAP);
        }

        if self.mode_byte().is_none() {
            opts.remove(Optimizations::REMOVE_MODE);
        }

        // Everything past the user data is stored verbatim, the codes
        // don't match it
        if self == SectorType::Mode1Raw {
            opts.remove(
                Optimizations::REMOVE_EDC | Optimizations::REMOVE_BLANKS | Optimizations::REMOVE_ECC,
            );
        }

        opts
    }

    /// Size of a sector of this type once encoded with `opts`. Flags that
    /// aren't supported by this type are ignored.
    pub fn encoded_size(self, opts: Optimizations) -> usize {
        let applied = opts & self.supported_optimizations();

        self.layout().iter().map(|f| f.encoded_len(applied)).sum()
    }
}

impl fmt::Display for SectorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            SectorType::Unknown => "UNKNOWN",
            SectorType::Cdda => "CDDA",
            SectorType::CddaGap => "CDDA_GAP",
            SectorType::Mode1 => "MODE1",
            SectorType::Mode1Gap => "MODE1_GAP",
            SectorType::Mode1Raw => "MODE1_RAW",
            SectorType::Mode2 => "MODE2",
            SectorType::Mode2Gap => "MODE2_GAP",
            SectorType::Mode2XaGap => "MODE2_XA_GAP",
            SectorType::Mode2Xa1 => "MODE2_XA1",
            SectorType::Mode2Xa1Gap => "MODE2_XA1_GAP",
            SectorType::Mode2Xa2 => "MODE2_XA2",
            SectorType::Mode2Xa2Gap => "MODE2_XA2_GAP",
            SectorType::ModeX => "MODEX",
        };

        f.write_str(s)
    }
}

/// Structure containing a single raw sector
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    /// Actual sector data
    #[cfg_attr(feature = "serde", serde(with = "serde_big_array::BigArray"))]
    data: [u8; SECTOR_SIZE],
}

impl Sector {
    /// Wrap raw sector data
    pub fn new(data: [u8; SECTOR_SIZE]) -> Sector {
        Sector { data }
    }

    /// Create a sector containing only zeroes
    pub fn empty() -> Sector {
        Sector {
            data: [0; SECTOR_SIZE],
        }
    }

    /// Copy a sector out of `bytes`, which must be exactly `SECTOR_SIZE`
    /// long.
    pub fn from_bytes(bytes: &[u8]) -> CdResult<Sector> {
        let data = sector_array(bytes)?;

        Ok(Sector { data: *data })
    }

    /// Retreive the entire sector data
    pub fn data_2352(&self) -> &[u8; SECTOR_SIZE] {
        &self.data
    }

    /// Load up the full 2352 bytes of sector data. The `loader` function
    /// will be called with a mutable reference to the sector data.
    pub fn set_data_2352<F, E>(&mut self, loader: F) -> Result<(), E>
    where
        F: FnOnce(&mut [u8; SECTOR_SIZE]) -> Result<(), E>,
    {
        loader(&mut self.data)
    }

    /// Returns the raw 16 byte CD-ROM header for this sector
    pub fn cd_rom_header_raw(&self) -> &[u8; 16] {
        array_ref![self.data, 0, 16]
    }

    /// Parse the CD-ROM header and return it. Fails if the sync pattern,
    /// the timecode or the mode is invalid.
    pub fn cdrom_header(&self) -> CdResult<CdRomHeader> {
        let header = self.cd_rom_header_raw();

        if header[..12] != SYNC_PATTERN {
            return Err(CdError::BadSyncPattern);
        }

        let msf = Msf::from_bytes(array_ref![header, 12, 3]).ok_or(CdError::BadBcd)?;

        let mode = match header[15] {
            1 => CdRomMode::Mode1,
            2 => CdRomMode::Mode2,
            _ => return Err(CdError::BadFormat),
        };

        Ok(CdRomHeader { msf, mode })
    }

    /// Retrieve the CD-ROM XA Mode2 subheader. Returns `CdError::BadFormat`
    /// if this is not a Mode 2 sector.
    pub fn mode2_xa_subheader(&self) -> CdResult<XaSubHeader> {
        if self.cdrom_header()?.mode != CdRomMode::Mode2 {
            return Err(CdError::BadFormat);
        }

        Ok(XaSubHeader::from_sector(&self.data))
    }
}

impl fmt::Debug for Sector {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.cdrom_header() {
            Ok(h) => write!(fmt, "Sector {{ {} {:?} }}", h.msf, h.mode),
            Err(_) => write!(fmt, "Sector {{ raw }}"),
        }
    }
}

/// Check that `bytes` is exactly one raw sector long and view it as an
/// array
pub(crate) fn sector_array(bytes: &[u8]) -> CdResult<&[u8; SECTOR_SIZE]> {
    match bytes.len() {
        0 => Err(CdError::NoData),
        n if n < SECTOR_SIZE => Err(CdError::NoEnoughData {
            expected: SECTOR_SIZE,
            got: n,
        }),
        n if n > SECTOR_SIZE => Err(CdError::TooMuchData {
            expected: SECTOR_SIZE,
            got: n,
        }),
        _ => Ok(array_ref![bytes, 0, SECTOR_SIZE]),
    }
}

/// Decoded CD-ROM sector header
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CdRomHeader {
    /// Sector MSF
    pub msf: Msf,
    /// CD-ROM mode for this sector
    pub mode: CdRomMode,
}

/// Mode for a CD-ROM sector
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CdRomMode {
    /// Mode1 ("Regular" CD-ROM)
    Mode1 = 1,
    /// Mode2 (Used for various other sub-formats, such as CD-ROM XA)
    Mode2 = 2,
}

/// Mode 2 XA sub-header (from the CDi "green book"):
///
///   byte 0: File Number
///   byte 1: Channel Number
///   byte 2: Submode
///   byte 3: Coding Information
///   byte 4-7: copy of bytes 0-3
///
/// The subheader starts at byte 16 of CD-ROM XA sectors, just after the
/// CD-ROM header. The data is copied twice for data integrity but both
/// copies should be identical.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct XaSubHeader([u8; 8]);

impl XaSubHeader {
    /// Extract the sub-header from a raw sector
    pub fn from_sector(sector: &[u8; SECTOR_SIZE]) -> XaSubHeader {
        XaSubHeader(*array_ref![sector, 0x10, 8])
    }

    /// Return the first Submode
    pub fn submode(&self) -> XaSubmode {
        XaSubmode(self.0[2])
    }

    /// True if both copies of the sub-header are identical
    pub fn copies_match(&self) -> bool {
        self.0[..4] == self.0[4..]
    }
}

/// The Submode byte in a Mode 2 XA sub-header
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct XaSubmode(pub u8);

impl XaSubmode {
    /// Return the sector form
    pub fn form(self) -> XaForm {
        let form2 = self.0 & (1 << 5) != 0;

        if form2 {
            XaForm::Form2
        } else {
            XaForm::Form1
        }
    }
}

/// CD-ROM XA Mode 2 sectors have two possible forms (advertised in the
/// subheader)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum XaForm {
    /// Mode 2 Form 1: 2048 bytes of data, 4 bytes of error detection and
    /// 276 bytes of error correction
    Form1 = 0,
    /// Mode 2 Form 2: 2324 bytes of data, 4 bytes of "quality control".
    Form2 = 1,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn layouts_are_contiguous() {
        for t in SectorType::ALL {
            let layout = t.layout();
            let mut pos = layout[0].span.offset;

            for f in layout {
                assert_eq!(f.span.offset, pos, "{} {:?}", t, f.field);
                pos = f.span.end();
            }

            assert_eq!(pos, SECTOR_SIZE, "{}", t);
        }
    }

    #[test]
    fn payload_sizes() {
        assert_eq!(SectorType::Cdda.payload(), Some(Span::new(0x000, 0x930)));
        assert_eq!(SectorType::Mode1.payload(), Some(Span::new(0x010, 0x800)));
        assert_eq!(SectorType::Mode2.payload(), Some(Span::new(0x010, 0x920)));
        assert_eq!(SectorType::Mode2Xa1.payload(), Some(Span::new(0x018, 0x800)));
        assert_eq!(SectorType::Mode2Xa2.payload(), Some(Span::new(0x018, 0x914)));
        assert_eq!(SectorType::Unknown.payload(), None);
    }

    #[test]
    fn encoded_sizes() {
        assert_eq!(SectorType::Mode1.encoded_size(Optimizations::empty()), SECTOR_SIZE);
        assert_eq!(SectorType::Mode1.encoded_size(Optimizations::all()), 0x800);
        assert_eq!(SectorType::Mode1Gap.encoded_size(Optimizations::all()), 0);
        assert_eq!(SectorType::Mode1Raw.encoded_size(Optimizations::all()), 0x920);
        assert_eq!(SectorType::Mode2Xa1.encoded_size(Optimizations::all()), 0x804);
        assert_eq!(SectorType::Mode2Xa2.encoded_size(Optimizations::all()), 0x918);
        assert_eq!(SectorType::Mode2Xa2Gap.encoded_size(Optimizations::all()), 4);
        assert_eq!(SectorType::Mode2XaGap.encoded_size(Optimizations::all()), 4);
        assert_eq!(SectorType::CddaGap.encoded_size(Optimizations::all()), 0);
        assert_eq!(SectorType::Cdda.encoded_size(Optimizations::all()), SECTOR_SIZE);
        // The mode byte can't be regenerated
        assert_eq!(SectorType::ModeX.encoded_size(Optimizations::all()), 0x921);
        assert_eq!(SectorType::Unknown.encoded_size(Optimizations::all()), 0);

        // Blanks only exist in Mode 1
        assert_eq!(
            SectorType::Mode2Xa1.encoded_size(Optimizations::REMOVE_BLANKS),
            SECTOR_SIZE
        );
    }

    #[test]
    fn numeric_values() {
        for t in SectorType::ALL {
            assert_eq!(SectorType::from_u8(t as u8), Some(t));
        }

        assert_eq!(SectorType::from_u8(0), Some(SectorType::Unknown));
        assert_eq!(SectorType::from_u8(14), None);
        assert_eq!(SectorType::from_u8(0xff), None);
    }

    #[test]
    fn sector_lengths() {
        assert!(matches!(Sector::from_bytes(&[]), Err(CdError::NoData)));
        assert!(matches!(
            Sector::from_bytes(&[0; 2000]),
            Err(CdError::NoEnoughData { got: 2000, .. })
        ));
        assert!(matches!(
            Sector::from_bytes(&[0; 2353]),
            Err(CdError::TooMuchData { got: 2353, .. })
        ));
        assert!(Sector::from_bytes(&[0; SECTOR_SIZE]).is_ok());
    }

    #[test]
    fn header() {
        let mut data = [0u8; SECTOR_SIZE];

        assert!(matches!(
            Sector::new(data).cdrom_header(),
            Err(CdError::BadSyncPattern)
        ));

        data[..12].copy_from_slice(&SYNC_PATTERN);
        data[12..16].copy_from_slice(&[0x00, 0x02, 0x16, 0x02]);
        data[0x10..0x18].copy_from_slice(&[1, 2, 0x20, 0, 1, 2, 0x20, 0]);

        let sector = Sector::new(data);
        let header = sector.cdrom_header().unwrap();

        assert_eq!(header.msf, Msf::from_sector_index(166).unwrap());
        assert_eq!(header.mode, CdRomMode::Mode2);

        let sub = sector.mode2_xa_subheader().unwrap();
        assert!(sub.copies_match());
        assert_eq!(sub.submode().form(), XaForm::Form2);

        data[14] = 0x1a;
        assert!(matches!(Sector::new(data).cdrom_header(), Err(CdError::BadBcd)));

        data[14] = 0x16;
        data[15] = 1;
        assert!(matches!(
            Sector::new(data).mode2_xa_subheader(),
            Err(CdError::BadFormat)
        ));
    }
}
