//! Sector encoder: strips the fields of a raw sector that can be rebuilt
//! from its type and position.

use crate::classifier::{is_gap, Classifier};
use crate::ecc::{read_u32_le, EccEdc};
use crate::msf::Msf;
use crate::optimization::Optimizations;
use crate::sector::{sector_array, Field, SectorType, Span, XaSubHeader, SECTOR_SIZE};
use crate::{CdError, CdResult};

/// Bookkeeping about an encoded sector
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EncodeSummary {
    /// Type of the source sector
    pub sector_type: SectorType,
    /// Optimizations actually applied. The decoder needs this exact set.
    pub optimizations: Optimizations,
    /// Position of the verbatim user data in the encoded stream. Empty if
    /// the user data was dropped as a gap.
    pub payload: Span,
    /// Number of bytes of encoded data
    pub size: usize,
}

/// An encoded sector along with its bookkeeping
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EncodedSector {
    data: Vec<u8>,
    summary: EncodeSummary,
}

impl EncodedSector {
    /// The encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume `self` and return the encoded bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Encoding bookkeeping
    pub fn summary(&self) -> &EncodeSummary {
        &self.summary
    }

    /// Type of the source sector
    pub fn sector_type(&self) -> SectorType {
        self.summary.sector_type
    }

    /// Optimizations actually applied
    pub fn optimizations(&self) -> Optimizations {
        self.summary.optimizations
    }

    /// The verbatim user data within the encoded bytes
    pub fn payload(&self) -> &[u8] {
        &self.data[self.summary.payload.range()]
    }
}

/// Sector encoder
#[derive(Copy, Clone)]
pub struct Encoder<'a> {
    classifier: Classifier<'a>,
}

impl<'a> Encoder<'a> {
    /// Create an encoder using the given lookup tables
    pub fn new(tables: &'a EccEdc) -> Encoder<'a> {
        Encoder {
            classifier: Classifier::new(tables),
        }
    }

    /// The classifier used to type incoming sectors
    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Encode the raw sector `bytes` with the `opts` optimizations.
    ///
    /// Optimizations that would prevent the sector from being rebuilt
    /// bit-exact are silently dropped unless `force` is set. The
    /// optimizations really applied are returned with the encoded data.
    ///
    /// Without the sector position `REMOVE_MSF` can't be validated, use
    /// `encode_at` to check the timecode as well.
    pub fn encode(
        &self,
        bytes: &[u8],
        opts: Optimizations,
        force: bool,
    ) -> CdResult<EncodedSector> {
        self.encode_vec(bytes, opts, force, None)
    }

    /// Same as `encode` for a sector located at absolute `sector_index`.
    /// `REMOVE_MSF` is dropped if the stored timecode doesn't match that
    /// position.
    pub fn encode_at(
        &self,
        bytes: &[u8],
        opts: Optimizations,
        force: bool,
        sector_index: u32,
    ) -> CdResult<EncodedSector> {
        self.encode_vec(bytes, opts, force, Some(sector_index))
    }

    /// Same as `encode` but writes the encoded data to `out`. Fails
    /// without writing anything if `out` is too small to hold it.
    pub fn encode_into(
        &self,
        bytes: &[u8],
        opts: Optimizations,
        force: bool,
        out: &mut [u8],
    ) -> CdResult<EncodeSummary> {
        let (sector, sector_type, applied) = self.prepare(bytes, opts, force, None)?;
        let required = sector_type.encoded_size(applied);

        if out.len() < required {
            log::debug!(
                "encoded {} sector needs {} bytes, buffer has {}",
                sector_type,
                required,
                out.len()
            );
            return Err(CdError::NoEnoughBufferSpace {
                required,
                available: out.len(),
            });
        }

        Ok(emit(sector, sector_type, applied, out))
    }

    /// Work out which of `requested` can safely be applied to `sector`.
    ///
    /// Flags that `sector_type` doesn't support are always dropped, this
    /// includes the EDC, ECC and reserved bytes of `Mode1Raw` sectors. When
    /// `force` is set nothing else is checked.
    pub fn applicable_optimizations(
        &self,
        sector: &[u8; SECTOR_SIZE],
        sector_type: SectorType,
        requested: Optimizations,
        force: bool,
        sector_index: Option<u32>,
    ) -> Optimizations {
        let mut applied = requested & sector_type.supported_optimizations();

        if force {
            return applied;
        }

        let mut downgrade = |flag: Optimizations, reason: &str| {
            if applied.contains(flag) {
                log::debug!("{} sector: not applying {:?}, {}", sector_type, flag, reason);
                applied.remove(flag);
            }
        };

        if !XaSubHeader::from_sector(sector).copies_match() && sector_type.is_xa() {
            downgrade(
                Optimizations::REMOVE_REDUNDANT_FLAG,
                "sub-header copies differ",
            );
        }

        if let (Some(coverage), Some(edc)) =
            (sector_type.edc_coverage(), sector_type.field(Field::Edc))
        {
            let computed = self.classifier.tables().edc_compute(&sector[coverage.range()]);

            if computed != read_u32_le(&sector[edc.range()]) {
                downgrade(Optimizations::REMOVE_EDC, "EDC mismatch");
            }
        }

        if let Some(blanks) = sector_type.field(Field::Blanks) {
            if !is_gap(&sector[blanks.range()]) {
                downgrade(Optimizations::REMOVE_BLANKS, "reserved bytes aren't zero");
            }
        }

        if let Some(index) = sector_index {
            let expected = Msf::from_sector_index(index).map(Msf::to_bytes);

            if expected.as_ref().map(|m| &m[..]) != Some(&sector[0x00c..0x00f]) {
                downgrade(
                    Optimizations::REMOVE_MSF,
                    "timecode doesn't match the sector position",
                );
            }
        }

        applied
    }

    fn encode_vec(
        &self,
        bytes: &[u8],
        opts: Optimizations,
        force: bool,
        sector_index: Option<u32>,
    ) -> CdResult<EncodedSector> {
        let (sector, sector_type, applied) = self.prepare(bytes, opts, force, sector_index)?;
        let mut data = vec![0; sector_type.encoded_size(applied)];
        let summary = emit(sector, sector_type, applied, &mut data);

        Ok(EncodedSector { data, summary })
    }

    fn prepare<'b>(
        &self,
        bytes: &'b [u8],
        opts: Optimizations,
        force: bool,
        sector_index: Option<u32>,
    ) -> CdResult<(&'b [u8; SECTOR_SIZE], SectorType, Optimizations)> {
        let sector = sector_array(bytes).map_err(|e| {
            log::debug!("can't encode sector: {}", e);
            e
        })?;

        let sector_type = self.classifier.classify(sector);
        if sector_type == SectorType::Unknown {
            return Err(CdError::UnknownSectorType);
        }

        let applied =
            self.applicable_optimizations(sector, sector_type, opts, force, sector_index);

        Ok((sector, sector_type, applied))
    }
}

/// Copy the fields of `sector` not stripped by `applied` to `out`, in
/// layout order. `out` must be large enough.
fn emit(
    sector: &[u8; SECTOR_SIZE],
    sector_type: SectorType,
    applied: Optimizations,
    out: &mut [u8],
) -> EncodeSummary {
    let mut pos = 0;
    let mut payload = Span::default();

    for f in sector_type.layout() {
        // Partially kept fields always keep their leading bytes
        let len = f.encoded_len(applied);
        let src = Span::new(f.span.offset, len);

        out[pos..pos + len].copy_from_slice(&sector[src.range()]);

        if f.field == Field::UserData {
            payload = Span::new(pos, len);
        }

        log::trace!(
            "{:?}: {} of {} bytes kept at offset {}",
            f.field,
            len,
            f.span.len,
            pos
        );

        pos += len;
    }

    debug_assert_eq!(pos, sector_type.encoded_size(applied));

    EncodeSummary {
        sector_type,
        optimizations: applied,
        payload,
        size: pos,
    }
}
