//! CRC16-XModem, the checksum appended to every StrKey.
//!
//! Polynomial 0x1021, initial value 0, no reflection, no final XOR. The
//! table is built at compile time.

const POLY: u16 = 0x1021;

const TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Computes the CRC16-XModem checksum of `data`.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, byte| {
        let index = ((crc >> 8) ^ u16::from(*byte)) as usize;
        (crc << 8) ^ TABLE[index]
    })
}

/// The checksum as it is laid out in a StrKey: little-endian.
pub fn checksum_bytes(data: &[u8]) -> [u8; 2] {
    crc16_xmodem(data).to_le_bytes()
}
