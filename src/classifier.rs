//! Sector type detection.

use crate::ecc::{read_u32_le, EccEdc, ECC_SIZE, ZERO_ADDRESS};
use crate::sector::{sector_array, SectorType, XaSubHeader, SECTOR_SIZE, SYNC_PATTERN};
use crate::CdResult;

/// Returns true if every byte in `span` is zero
pub fn is_gap(span: &[u8]) -> bool {
    span.iter().all(|&b| b == 0)
}

/// Works out the `SectorType` of raw sectors
#[derive(Copy, Clone)]
pub struct Classifier<'a> {
    tables: &'a EccEdc,
}

impl<'a> Classifier<'a> {
    /// Create a classifier using the given lookup tables
    pub fn new(tables: &'a EccEdc) -> Classifier<'a> {
        Classifier { tables }
    }

    /// The lookup tables used by this classifier
    pub fn tables(&self) -> &'a EccEdc {
        self.tables
    }

    /// Classify `bytes`, which must be a full raw sector
    pub fn classify_bytes(&self, bytes: &[u8]) -> CdResult<SectorType> {
        let sector = sector_array(bytes)?;

        Ok(self.classify(sector))
    }

    /// Classify a raw sector
    pub fn classify(&self, sector: &[u8; SECTOR_SIZE]) -> SectorType {
        let t = if sector[..12] != SYNC_PATTERN {
            // Anything without a sync pattern is treated as audio
            if is_gap(sector) {
                SectorType::CddaGap
            } else {
                SectorType::Cdda
            }
        } else {
            match sector[0x00f] {
                1 if is_gap(&sector[0x814..0x81c]) => self.classify_mode1(sector),
                2 => self.classify_mode2(sector),
                // Either an unknown mode or a Mode 1 sector with garbage in
                // the reserved bytes. Maybe a copy protection.
                _ => SectorType::ModeX,
            }
        };

        log::trace!("sector classified as {}", t);

        t
    }

    fn classify_mode1(&self, sector: &[u8; SECTOR_SIZE]) -> SectorType {
        let address = array_ref![sector, 0x00c, 4];
        let ecc_ok = self.tables.ecc_check_sector(
            address,
            &sector[0x010..0x81c],
            &sector[0x81c..0x81c + ECC_SIZE],
        );

        if !ecc_ok || !self.edc_matches(sector, 0x000, 0x810, 0x810) {
            // The sector can't be rebuilt from its data, keep it as-is
            return SectorType::Mode1Raw;
        }

        if is_gap(&sector[0x010..0x810]) {
            SectorType::Mode1Gap
        } else {
            SectorType::Mode1
        }
    }

    fn classify_mode2(&self, sector: &[u8; SECTOR_SIZE]) -> SectorType {
        if is_gap(&sector[0x010..0x930]) {
            return SectorType::Mode2Gap;
        }

        let subheader = XaSubHeader::from_sector(sector);

        if subheader.copies_match() && is_gap(&sector[0x018..0x930]) {
            return SectorType::Mode2XaGap;
        }

        let form1 = self.tables.ecc_check_sector(
            &ZERO_ADDRESS,
            &sector[0x010..0x81c],
            &sector[0x81c..0x81c + ECC_SIZE],
        ) && self.edc_matches(sector, 0x010, 0x818, 0x818);

        let t = if form1 {
            if is_gap(&sector[0x018..0x818]) {
                SectorType::Mode2Xa1Gap
            } else {
                SectorType::Mode2Xa1
            }
        } else if self.edc_matches(sector, 0x010, 0x92c, 0x92c) {
            if is_gap(&sector[0x018..0x92c]) {
                SectorType::Mode2Xa2Gap
            } else {
                SectorType::Mode2Xa2
            }
        } else {
            return SectorType::Mode2;
        };

        if t.is_xa() && !subheader.copies_match() {
            log::debug!("{} sector with mismatched sub-header copies", t);
        }

        t
    }

    /// Check the EDC stored at `edc_pos` against the one computed over
    /// `start..end`
    fn edc_matches(
        &self,
        sector: &[u8; SECTOR_SIZE],
        start: usize,
        end: usize,
        edc_pos: usize,
    ) -> bool {
        self.tables.edc_compute(&sector[start..end]) == read_u32_le(&sector[edc_pos..])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CdError;

    static TABLES: EccEdc = EccEdc::new();

    #[test]
    fn gap_boundaries() {
        let mut span = [0u8; 64];

        assert!(is_gap(&span));
        assert!(is_gap(&[]));

        for i in 0..span.len() {
            span[i] = 1;
            assert!(!is_gap(&span), "byte {}", i);
            span[i] = 0;
        }
    }

    #[test]
    fn audio() {
        let classifier = Classifier::new(&TABLES);
        let mut sector = [0u8; SECTOR_SIZE];

        assert_eq!(classifier.classify(&sector), SectorType::CddaGap);

        sector[SECTOR_SIZE - 1] = 0x42;
        assert_eq!(classifier.classify(&sector), SectorType::Cdda);

        // Almost a sync pattern
        sector[..12].copy_from_slice(&SYNC_PATTERN);
        sector[11] = 0x01;
        assert_eq!(classifier.classify(&sector), SectorType::Cdda);
    }

    #[test]
    fn unknown_mode() {
        let classifier = Classifier::new(&TABLES);
        let mut sector = [0u8; SECTOR_SIZE];

        sector[..12].copy_from_slice(&SYNC_PATTERN);
        sector[0x00f] = 0x03;
        assert_eq!(classifier.classify(&sector), SectorType::ModeX);

        // Mode 1 with non-zero reserved bytes
        sector[0x00f] = 0x01;
        sector[0x818] = 0xaa;
        assert_eq!(classifier.classify(&sector), SectorType::ModeX);
    }

    #[test]
    fn mode2_gaps() {
        let classifier = Classifier::new(&TABLES);
        let mut sector = [0u8; SECTOR_SIZE];

        sector[..12].copy_from_slice(&SYNC_PATTERN);
        sector[0x00f] = 0x02;
        assert_eq!(classifier.classify(&sector), SectorType::Mode2Gap);

        sector[0x010..0x018].copy_from_slice(&[0, 0, 0x20, 0, 0, 0, 0x20, 0]);
        assert_eq!(classifier.classify(&sector), SectorType::Mode2XaGap);

        // Sub-header copies differ, no EDC: plain Mode 2
        sector[0x014] = 1;
        assert_eq!(classifier.classify(&sector), SectorType::Mode2);
    }

    #[test]
    fn classification_is_pure() {
        let classifier = Classifier::new(&TABLES);
        let mut sector = [0u8; SECTOR_SIZE];

        sector[..12].copy_from_slice(&SYNC_PATTERN);
        sector[0x00f] = 0x01;
        sector[0x100] = 0x55;

        let copy = sector;
        let a = classifier.classify(&sector);
        let b = classifier.classify(&sector);

        assert_eq!(a, SectorType::Mode1Raw);
        assert_eq!(a, b);
        assert_eq!(sector, copy);
    }

    #[test]
    fn bad_lengths() {
        let classifier = Classifier::new(&TABLES);

        assert!(matches!(classifier.classify_bytes(&[]), Err(CdError::NoData)));
        assert!(matches!(
            classifier.classify_bytes(&[0; 100]),
            Err(CdError::NoEnoughData { .. })
        ));
        assert!(matches!(
            classifier.classify_bytes(&[0; 3000]),
            Err(CdError::TooMuchData { .. })
        ));
    }
}
