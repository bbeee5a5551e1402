//! Lossless codec for raw CD sectors.
//!
//! A raw 2352 byte CD-ROM sector carries a lot of data that can be derived
//! from the rest of the sector or from its position on the disc: the sync
//! pattern, the MSF timecode, the mode byte, the error detection and
//! correction codes and, for gap sectors, the user data itself. This crate
//! classifies raw sectors, strips whatever can be rebuilt and rebuilds the
//! original sector bit-exact from the result.
//!
//! ```
//! use ecmcodec::{Decoder, EccEdc, Encoder, Optimizations, SECTOR_SIZE};
//!
//! let tables = EccEdc::new();
//! let encoder = Encoder::new(&tables);
//! let decoder = Decoder::new(&tables);
//!
//! // An audio gap: nothing needs to be stored
//! let raw = [0u8; SECTOR_SIZE];
//! let encoded = encoder.encode(&raw, Optimizations::all(), false).unwrap();
//! assert!(encoded.data().is_empty());
//!
//! let mut rebuilt = [0xffu8; SECTOR_SIZE];
//! decoder
//!     .decode(
//!         encoded.data(),
//!         encoded.sector_type(),
//!         encoded.optimizations(),
//!         0,
//!         &mut rebuilt,
//!     )
//!     .unwrap();
//! assert_eq!(rebuilt, raw);
//! ```
//!
//! The lookup tables in `EccEdc` are immutable once built and can be shared
//! by reference between any number of encoders and decoders, on any number
//! of threads.

#![warn(missing_docs)]

#[macro_use]
extern crate arrayref;

pub use bcd::Bcd;
pub use classifier::{is_gap, Classifier};
pub use decoder::Decoder;
pub use ecc::EccEdc;
pub use encoder::{EncodeSummary, EncodedSector, Encoder};
pub use msf::Msf;
pub use optimization::Optimizations;
pub use sector::{Field, Sector, SectorType, Span, SECTOR_SIZE};

use thiserror::Error;

pub mod bcd;
pub mod classifier;
pub mod decoder;
pub mod ecc;
pub mod encoder;
pub mod msf;
pub mod optimization;
pub mod sector;


/// Size of a sector of type `sector_type` once encoded with `opts`. Useful
/// to size buffers before calling `Encoder::encode_into`.
pub fn encoded_size(sector_type: SectorType, opts: Optimizations) -> usize {
    sector_type.encoded_size(opts)
}

/// Error type for sector operations.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum CdError {
    #[error("No sector data provided")]
    NoData,
    #[error("Not enough data: expected {expected} bytes, got {got}")]
    NoEnoughData { expected: usize, got: usize },
    #[error("Too much data: expected {expected} bytes, got {got}")]
    TooMuchData { expected: usize, got: usize },
    #[error("Output buffer too small: {required} bytes required, {available} available")]
    NoEnoughBufferSpace { required: usize, available: usize },
    #[error("Unknown sector type")]
    UnknownSectorType,
    #[error("Sector index {0} can't be expressed as an MSF")]
    SectorIndexOutOfRange(u32),
    #[error("Format missmatch. For instance when one attempts to retrieve CD-ROM XA data from a Mode 1 sector.")]
    BadFormat,
    #[error(
        "The sync pattern at the start of a CD-ROM sector (0x00, 0xff * 10, 0x00) was invalid"
    )]
    BadSyncPattern,
    #[error("Attempted to parse invalid BCD data")]
    BadBcd,
    #[error("Invalid MSF")]
    InvalidMsf,
}

/// Convenience type alias for a `Result<R, CdError>`
pub type CdResult<R> = std::result::Result<R, CdError>;

#[test]
fn cderror_display() {
    // Make sure that CdError implements Display. This should be true if we set an
    // `#[error("...")]` for every variant
    println!("{}", CdError::UnknownSectorType);
    assert_eq!(
        CdError::NoEnoughData {
            expected: 2352,
            got: 2000
        }
        .to_string(),
        "Not enough data: expected 2352 bytes, got 2000"
    );
}

#[test]
fn encoded_size_bounds() {
    for t in SectorType::ALL {
        for bits in 0..=u8::MAX {
            let opts = Optimizations::from_bits_truncate(bits);

            assert!(encoded_size(t, opts) <= SECTOR_SIZE, "{} {:?}", t, opts);
        }

        assert_eq!(encoded_size(t, Optimizations::empty()), SECTOR_SIZE);
    }
}
