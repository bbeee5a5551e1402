//! Error detection (EDC) and error correction (ECC) codes of CD-ROM data
//! sectors.
//!
//! The EDC is a 32bit CRC using the reflected polynomial 0xD8018001,
//! stored little-endian. It's present in Mode 1 and in both forms of Mode 2
//! XA sectors.
//!
//! The ECC is a pair of interleaved Reed-Solomon product codes over GF(2^8)
//! (primitive polynomial 0x11D) called P and Q. Mode 1 and Mode 2 XA Form 1
//! sectors carry 172 bytes of P parity immediately followed by 172 bytes of
//! Q parity. Both codes cover a 4 byte "address" (the sector header for
//! Mode 1, all zeroes for Mode 2) followed by the sector data; the Q code
//! also covers the P parity.
//!
//! See ECMA-130 sections 14.3 and 14.5 and annex A for the details.

/// Number of bytes of P + Q parity in a sector
pub const ECC_SIZE: usize = 0x114;

/// Offset of the Q parity within the ECC field
pub const ECC_Q_OFFSET: usize = 0xac;

/// Number of data bytes (not counting the address) covered by the ECC
pub const ECC_DATA_SIZE: usize = 0x80c;

/// Address used in place of the header when computing the ECC of Mode 2
/// sectors. The header isn't protected in this mode.
pub const ZERO_ADDRESS: [u8; 4] = [0; 4];

/// Geometry of one of the two interleaved parity codes.
///
/// The bytes covered by the code are seen as a virtual array of
/// `major_count * minor_count` bytes. Each of the `major_count` code words
/// starts at `(major / 2) * major_mult + (major & 1)` and takes
/// `minor_count` bytes spaced `minor_inc` apart, wrapping around the end of
/// the array.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PqCode {
    /// Number of code words. Each one produces two parity bytes.
    pub major_count: usize,
    /// Number of bytes covered by each code word
    pub minor_count: usize,
    /// Distance between the start of consecutive pairs of code words
    pub major_mult: usize,
    /// Distance between two bytes of the same code word
    pub minor_inc: usize,
}

impl PqCode {
    /// The P code: 86 columns of 24 bytes
    pub const P: PqCode = PqCode {
        major_count: 86,
        minor_count: 24,
        major_mult: 2,
        minor_inc: 86,
    };

    /// The Q code: 52 diagonals of 43 bytes
    pub const Q: PqCode = PqCode {
        major_count: 52,
        minor_count: 43,
        major_mult: 86,
        minor_inc: 88,
    };

    /// Size of the virtual array walked by this code
    pub const fn size(self) -> usize {
        self.major_count * self.minor_count
    }

    /// Number of parity bytes produced by this code
    pub const fn parity_len(self) -> usize {
        self.major_count * 2
    }
}

/// Precomputed lookup tables for EDC and ECC computation. They're immutable
/// once built so a single instance can be shared by any number of
/// classifiers, encoders and decoders, including across threads.
#[derive(Clone)]
pub struct EccEdc {
    /// GF(2^8) multiplication by 2 ("forward" table)
    ecc_f: [u8; 256],
    /// Inverse of `x -> x ^ ecc_f[x]` ("backward" table)
    ecc_b: [u8; 256],
    /// Byte-wise EDC table
    edc: [u32; 256],
}

impl EccEdc {
    /// Build the lookup tables
    pub const fn new() -> EccEdc {
        let mut ecc_f = [0u8; 256];
        let mut ecc_b = [0u8; 256];
        let mut edc = [0u32; 256];

        let mut i = 0;
        while i < 256 {
            let j = (i << 1) ^ if i & 0x80 != 0 { 0x11d } else { 0 };

            ecc_f[i] = j as u8;
            ecc_b[i ^ j] = i as u8;

            let mut e = i as u32;
            let mut bit = 0;
            while bit < 8 {
                e = (e >> 1) ^ if e & 1 != 0 { 0xd801_8001 } else { 0 };
                bit += 1;
            }
            edc[i] = e;

            i += 1;
        }

        EccEdc { ecc_f, ecc_b, edc }
    }

    /// Compute the EDC of `data`
    pub fn edc_compute(&self, data: &[u8]) -> u32 {
        data.iter().fold(0u32, |edc, &b| {
            (edc >> 8) ^ self.edc[((edc ^ u32::from(b)) & 0xff) as usize]
        })
    }

    /// Compute the two parity bytes of code word `major` of `code`.
    ///
    /// `ecc` is only read for the code words that cover parity bytes (that
    /// is the Q code reading back the P parity).
    fn pq_word(
        &self,
        address: &[u8; 4],
        data: &[u8],
        ecc: &[u8],
        code: PqCode,
        major: usize,
    ) -> (u8, u8) {
        let size = code.size();
        let mut index = (major >> 1) * code.major_mult + (major & 1);
        let mut ecc_a = 0u8;
        let mut ecc_b = 0u8;

        for _ in 0..code.minor_count {
            let temp = if index < 4 {
                address[index]
            } else if index - 4 < data.len() {
                data[index - 4]
            } else {
                ecc[index - 4 - data.len()]
            };

            index += code.minor_inc;
            if index >= size {
                index -= size;
            }

            ecc_a ^= temp;
            ecc_b ^= temp;
            ecc_a = self.ecc_f[ecc_a as usize];
        }

        let ecc_a = self.ecc_b[(self.ecc_f[ecc_a as usize] ^ ecc_b) as usize];

        (ecc_a, ecc_a ^ ecc_b)
    }

    /// Check the parity of `code` stored at `ecc[offset..]`. The bytes
    /// covered by the code are `address`, then `data`, then `ecc`.
    pub fn ecc_checkpq(
        &self,
        address: &[u8; 4],
        data: &[u8],
        ecc: &[u8],
        code: PqCode,
        offset: usize,
    ) -> bool {
        let parity = &ecc[offset..offset + code.parity_len()];

        (0..code.major_count).all(|major| {
            let (a, b) = self.pq_word(address, data, ecc, code, major);

            parity[major] == a && parity[major + code.major_count] == b
        })
    }

    /// Generate the parity of `code` into `ecc[offset..]`. Same layout as
    /// `ecc_checkpq`.
    pub fn ecc_write_pq(
        &self,
        address: &[u8; 4],
        data: &[u8],
        ecc: &mut [u8],
        code: PqCode,
        offset: usize,
    ) {
        for major in 0..code.major_count {
            let (a, b) = self.pq_word(address, data, ecc, code, major);

            ecc[offset + major] = a;
            ecc[offset + major + code.major_count] = b;
        }
    }

    /// Returns true if both the P and Q parity in `ecc` match `address` and
    /// `data`. `data` must be `ECC_DATA_SIZE` long and `ecc` `ECC_SIZE`
    /// long.
    pub fn ecc_check_sector(&self, address: &[u8; 4], data: &[u8], ecc: &[u8]) -> bool {
        debug_assert_eq!(data.len(), ECC_DATA_SIZE);
        debug_assert_eq!(ecc.len(), ECC_SIZE);

        self.ecc_checkpq(address, data, ecc, PqCode::P, 0)
            && self.ecc_checkpq(address, data, ecc, PqCode::Q, ECC_Q_OFFSET)
    }

    /// Regenerate the P then Q parity for `address` and `data`. The P
    /// parity must be written first since Q covers it.
    pub fn ecc_write_sector(&self, address: &[u8; 4], data: &[u8], ecc: &mut [u8; ECC_SIZE]) {
        debug_assert_eq!(data.len(), ECC_DATA_SIZE);

        self.ecc_write_pq(address, data, ecc, PqCode::P, 0);
        self.ecc_write_pq(address, data, ecc, PqCode::Q, ECC_Q_OFFSET);
    }
}

impl Default for EccEdc {
    fn default() -> EccEdc {
        EccEdc::new()
    }
}

/// Read a little-endian u32 from the first 4 bytes of `bytes`
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(*array_ref![bytes, 0, 4])
}

/// Write `value` little-endian into the first 4 bytes of `out`
pub fn write_u32_le(value: u32, out: &mut [u8]) {
    *array_mut_ref![out, 0, 4] = value.to_le_bytes();
}
