// Ogg page checksum
//
// CRC-32 with polynomial 0x04c11db7, initial value 0, no bit reflection and
// no final xor. Computed over the whole page with the checksum field zeroed.

const fn table_entry(idx: u32) -> u32 {
    let mut r = idx << 24;
    let mut i = 0;
    while i < 8 {
        r = if r & 0x8000_0000 != 0 {
            (r << 1) ^ 0x04c1_1db7
        } else {
            r << 1
        };
        i += 1;
    }
    r
}

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = table_entry(i as u32);
        i += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = build_table();

/// Continue a checksum over `data`.
pub fn update(crc: u32, data: &[u8]) -> u32 {
    data.iter().fold(crc, |crc, &b| {
        (crc << 8) ^ CRC_TABLE[((crc >> 24) as u8 ^ b) as usize]
    })
}

/// Checksum over a sequence of byte slices, as if concatenated.
pub fn checksum(parts: &[&[u8]]) -> u32 {
    parts.iter().fold(0, |crc, part| update(crc, part))
}
