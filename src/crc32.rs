//! CRC32 checksum implementation (PNG uses CRC-32/ISO-HDLC).

/// 256-entry lookup table for the reflected polynomial 0xEDB88320.
const CRC_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB88320
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Calculate the CRC32 checksum of `data`.
///
/// Standard parameters: initial value 0xFFFFFFFF, final XOR 0xFFFFFFFF.
/// This is the CRC used by PNG, gzip, and many other formats.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    crc32_with(data, 0xFFFF_FFFF, 0xFFFF_FFFF)
}

/// Calculate a CRC32 with explicit initial and final-XOR values.
///
/// Splitting the parameters lets a caller run the checksum across two
/// byte ranges without concatenating them: pass 0xFFFFFFFF / 0 for the
/// first range, then feed the result back as the initial value of the
/// second range with the usual 0xFFFFFFFF final XOR.
#[inline]
pub fn crc32_with(data: &[u8], initial: u32, final_xor: u32) -> u32 {
    let mut crc = initial;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC_TABLE[index];
    }
    crc ^ final_xor
}

/// Calculate CRC32 incrementally.
pub struct Crc32 {
    crc: u32,
}

impl Crc32 {
    /// Create a new CRC32 calculator.
    pub fn new() -> Self {
        Self { crc: 0xFFFF_FFFF }
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.crc ^ byte as u32) & 0xFF) as usize;
            self.crc = (self.crc >> 8) ^ CRC_TABLE[index];
        }
    }

    /// Finalize and return the CRC value.
    #[inline]
    pub fn finalize(self) -> u32 {
        self.crc ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_empty() {
        assert_eq!(crc32(&[]), 0x00000000);
    }

    #[test]
    fn test_crc32_check_value() {
        // Standard test: CRC32 of "123456789" should be 0xCBF43926
        assert_eq!(crc32(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_crc32_png_iend() {
        // The IEND chunk has no data; its CRC covers only the type bytes.
        assert_eq!(crc32(b"IEND"), 0xAE426082);
    }

    #[test]
    fn test_crc32_two_range_split() {
        // Running type and data as two ranges must equal one pass over both.
        let chunk_type = b"IDAT";
        let data = [0x78, 0x9C, 0x62, 0x00];

        let mut joined = chunk_type.to_vec();
        joined.extend_from_slice(&data);

        let first = crc32_with(chunk_type, 0xFFFF_FFFF, 0);
        let split = crc32_with(&data, first, 0xFFFF_FFFF);
        assert_eq!(split, crc32(&joined));
    }

    #[test]
    fn test_crc32_incremental() {
        let data = b"123456789";
        let mut crc = Crc32::new();
        crc.update(&data[..4]);
        crc.update(&data[4..]);
        assert_eq!(crc.finalize(), crc32(data));
    }

    #[test]
    fn test_single_bit_flip_changes_crc() {
        let data = b"some chunk payload";
        let reference = crc32(data);
        let mut corrupted = data.to_vec();
        corrupted[5] ^= 0x01;
        assert_ne!(crc32(&corrupted), reference);
    }
}
