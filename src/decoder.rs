//! Sector decoder: rebuilds raw sectors from their encoded form.

use crate::ecc::{write_u32_le, EccEdc, ECC_SIZE, ZERO_ADDRESS};
use crate::msf::Msf;
use crate::optimization::Optimizations;
use crate::sector::{Field, FieldSpan, Sector, SectorType, SECTOR_SIZE, SYNC_PATTERN};
use crate::{CdError, CdResult};

/// Sector decoder
#[derive(Copy, Clone)]
pub struct Decoder<'a> {
    tables: &'a EccEdc,
}

impl<'a> Decoder<'a> {
    /// Create a decoder using the given lookup tables
    pub fn new(tables: &'a EccEdc) -> Decoder<'a> {
        Decoder { tables }
    }

    /// Rebuild a raw sector into `out` from `encoded`.
    ///
    /// `sector_type` and `opts` must be the ones reported by the encoder.
    /// `sector_index` is the absolute position of the sector on the disc,
    /// it's only used when the timecode has to be regenerated. Bytes past
    /// the encoded size of the sector are ignored.
    ///
    /// A type or optimization set that doesn't match what the encoder
    /// produced results in garbage, not an error.
    pub fn decode(
        &self,
        encoded: &[u8],
        sector_type: SectorType,
        opts: Optimizations,
        sector_index: u32,
        out: &mut [u8],
    ) -> CdResult<()> {
        if out.len() < SECTOR_SIZE {
            log::debug!("decoder output buffer too small: {} bytes", out.len());
            return Err(CdError::NoEnoughBufferSpace {
                required: SECTOR_SIZE,
                available: out.len(),
            });
        }

        if sector_type == SectorType::Unknown {
            return Err(CdError::UnknownSectorType);
        }

        let applied = opts & sector_type.supported_optimizations();
        let required = sector_type.encoded_size(applied);

        if encoded.len() < required {
            log::debug!(
                "{} sector needs {} encoded bytes, got {}",
                sector_type,
                required,
                encoded.len()
            );
            return Err(CdError::NoEnoughData {
                expected: required,
                got: encoded.len(),
            });
        }

        let msf = if applied.contains(Optimizations::REMOVE_MSF) {
            let msf = Msf::from_sector_index(sector_index)
                .ok_or(CdError::SectorIndexOutOfRange(sector_index))?;

            Some(msf)
        } else {
            None
        };

        let out = array_mut_ref![out, 0, SECTOR_SIZE];
        let mut pos = 0;

        // Fields are rebuilt in layout order: the EDC and ECC are computed
        // over the fields that come before them.
        for f in sector_type.layout() {
            let len = f.encoded_len(applied);
            let src = &encoded[pos..pos + len];

            if len == f.span.len {
                log::trace!("{:?}: copying {} bytes from offset {}", f.field, len, pos);
                out[f.span.range()].copy_from_slice(src);
            } else {
                log::trace!("{:?}: regenerating {} bytes", f.field, f.span.len);
                self.regenerate(out, sector_type, f, src, msf);
            }

            pos += len;
        }

        Ok(())
    }

    /// Same as `decode` but returns a new `Sector`
    pub fn decode_sector(
        &self,
        encoded: &[u8],
        sector_type: SectorType,
        opts: Optimizations,
        sector_index: u32,
    ) -> CdResult<Sector> {
        let mut sector = Sector::empty();

        sector.set_data_2352(|data| {
            self.decode(encoded, sector_type, opts, sector_index, data)
        })?;

        Ok(sector)
    }

    /// Rebuild field `f` of `out`. `kept` holds whatever part of the field
    /// was kept in the encoded stream.
    fn regenerate(
        &self,
        out: &mut [u8; SECTOR_SIZE],
        sector_type: SectorType,
        f: &FieldSpan,
        kept: &[u8],
        msf: Option<Msf>,
    ) {
        let span = f.span;

        match f.field {
            Field::Sync => out[span.range()].copy_from_slice(&SYNC_PATTERN),
            Field::Msf => {
                if let Some(msf) = msf {
                    out[span.range()].copy_from_slice(&msf.to_bytes());
                }
            }
            Field::Mode => {
                if let Some(mode) = sector_type.mode_byte() {
                    out[span.offset] = mode;
                }
            }
            Field::XaSubHeader => {
                let half = span.len / 2;

                out[span.offset..span.offset + half].copy_from_slice(kept);
                out[span.offset + half..span.end()].copy_from_slice(kept);
            }
            Field::UserData | Field::Blanks => out[span.range()].fill(0),
            Field::Edc => {
                if let Some(coverage) = sector_type.edc_coverage() {
                    let edc = self.tables.edc_compute(&out[coverage.range()]);

                    write_u32_le(edc, &mut out[span.range()]);
                }
            }
            Field::Ecc => {
                let address = if sector_type.is_mode1() {
                    *array_ref![out, 0x00c, 4]
                } else {
                    ZERO_ADDRESS
                };

                let (head, ecc) = out.split_at_mut(span.offset);
                let ecc = array_mut_ref![ecc, 0, ECC_SIZE];

                self.tables.ecc_write_sector(&address, &head[0x010..], ecc);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static TABLES: EccEdc = EccEdc::new();

    #[test]
    fn output_too_small() {
        let decoder = Decoder::new(&TABLES);
        let mut out = [0u8; 100];

        assert!(matches!(
            decoder.decode(&[], SectorType::CddaGap, Optimizations::all(), 0, &mut out),
            Err(CdError::NoEnoughBufferSpace {
                required: SECTOR_SIZE,
                available: 100
            })
        ));
    }

    #[test]
    fn unknown_type() {
        let decoder = Decoder::new(&TABLES);
        let mut out = [0u8; SECTOR_SIZE];

        assert!(matches!(
            decoder.decode(&[], SectorType::Unknown, Optimizations::all(), 0, &mut out),
            Err(CdError::UnknownSectorType)
        ));
    }

    #[test]
    fn truncated_input() {
        let decoder = Decoder::new(&TABLES);
        let mut out = [0u8; SECTOR_SIZE];

        assert!(matches!(
            decoder.decode(&[0; 10], SectorType::Mode1, Optimizations::all(), 0, &mut out),
            Err(CdError::NoEnoughData {
                expected: 0x800,
                got: 10
            })
        ));
    }

    #[test]
    fn index_out_of_range() {
        let decoder = Decoder::new(&TABLES);
        let mut out = [0u8; SECTOR_SIZE];
        let index = Msf::MAX.sector_index() + 1;

        assert!(matches!(
            decoder.decode(&[], SectorType::Mode1Gap, Optimizations::all(), index, &mut out),
            Err(CdError::SectorIndexOutOfRange(i)) if i == index
        ));

        // Not an error when the timecode is kept
        let header = [0x99, 0x59, 0x74];
        let opts = Optimizations::all() - Optimizations::REMOVE_MSF;
        assert!(decoder
            .decode(&header, SectorType::Mode1Gap, opts, index, &mut out)
            .is_ok());
    }

    #[test]
    fn trailing_bytes_ignored() {
        let decoder = Decoder::new(&TABLES);
        let opts = Optimizations::all() - Optimizations::REMOVE_MSF;
        let exact = [0x00, 0x02, 0x00];
        let mut padded = [0xaa; 3 + 16];
        padded[..3].copy_from_slice(&exact);

        let a = decoder
            .decode_sector(&exact, SectorType::Mode2Gap, opts, 0)
            .unwrap();
        let b = decoder
            .decode_sector(&padded, SectorType::Mode2Gap, opts, 0)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(b.data_2352()[12..16], [0x00, 0x02, 0x00, 0x02]);
        assert!(b.data_2352()[0x010..].iter().all(|&v| v == 0));
    }

    #[test]
    fn cdda_gap() {
        let decoder = Decoder::new(&TABLES);
        let mut out = [0xffu8; SECTOR_SIZE];

        decoder
            .decode(&[], SectorType::CddaGap, Optimizations::REMOVE_GAP, 0, &mut out)
            .unwrap();

        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn mode1_gap_header() {
        let decoder = Decoder::new(&TABLES);

        let sector = decoder
            .decode_sector(&[], SectorType::Mode1Gap, Optimizations::all(), 150)
            .unwrap();
        let data = sector.data_2352();

        assert_eq!(data[..12], SYNC_PATTERN);
        assert_eq!(data[12..16], [0x00, 0x02, 0x00, 0x01]);
        assert!(data[0x010..0x810].iter().all(|&b| b == 0));
        assert!(data[0x814..0x81c].iter().all(|&b| b == 0));

        let header = sector.cdrom_header().unwrap();
        assert_eq!(header.msf.sector_index(), 150);
    }
}
