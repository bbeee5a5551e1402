//! Set of fields that may be stripped from a sector when encoding it.

use bitflags::bitflags;

bitflags! {
    /// Fields to strip from an encoded sector. Each flag covers one field
    /// of the sector layout; flags compose freely.
    ///
    /// The bit values are part of the encoded format: a container storing
    /// encoded sectors has to record the applied set alongside the data and
    /// hand it back to the decoder.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Optimizations: u8 {
        /// Remove the 12 byte sync pattern
        const REMOVE_SYNC = 1;
        /// Remove the MSF timecode, regenerated from the sector index
        const REMOVE_MSF = 1 << 1;
        /// Remove the mode byte
        const REMOVE_MODE = 1 << 2;
        /// Remove the 8 reserved zero bytes of Mode 1 sectors
        const REMOVE_BLANKS = 1 << 3;
        /// Keep a single copy of the Mode 2 XA sub-header
        const REMOVE_REDUNDANT_FLAG = 1 << 4;
        /// Remove the P/Q error correction code
        const REMOVE_ECC = 1 << 5;
        /// Remove the error detection code
        const REMOVE_EDC = 1 << 6;
        /// Remove the user data of gap sectors
        const REMOVE_GAP = 1 << 7;
    }
}

impl Default for Optimizations {
    fn default() -> Self {
        Optimizations::all()
    }
}

#[cfg(test)]
mod test {
    use super::Optimizations;

    #[test]
    fn bit_values() {
        assert_eq!(Optimizations::empty().bits(), 0);
        assert_eq!(Optimizations::REMOVE_SYNC.bits(), 0x01);
        assert_eq!(Optimizations::REMOVE_GAP.bits(), 0x80);
        assert_eq!(Optimizations::all().bits(), 0xff);
        assert_eq!(
            Optimizations::from_bits(0x41),
            Some(Optimizations::REMOVE_SYNC | Optimizations::REMOVE_EDC)
        );
    }

    #[test]
    fn set_operations() {
        let header =
            Optimizations::REMOVE_SYNC | Optimizations::REMOVE_MSF | Optimizations::REMOVE_MODE;
        let codes = Optimizations::REMOVE_EDC | Optimizations::REMOVE_ECC;

        assert_eq!((header | codes).bits().count_ones(), 5);
        assert!((header & codes).is_empty());
        assert_eq!((header | codes) - codes, header);
        assert!(Optimizations::default().contains(header | codes));
    }
}
