use crc::{Algorithm, Crc, NoTable};

/// CRC-16 as computed by the RNG90: poly 0x8005, init 0, input bytes reflected but the result is
/// not. This is not CRC-16/ARC, the chip rejects frames protected with that.
pub const CRC_16_RNG90: Algorithm<u16> = Algorithm {
    width: 16,
    poly: 0x8005,
    init: 0x0000,
    refin: true,
    refout: false,
    xorout: 0x0000,
    check: 0xbcdd,
    residue: 0x0000,
};

const CRC_RNG90: Crc<u16, NoTable> = Crc::<u16, NoTable>::new(&CRC_16_RNG90);

/// reverse the bit order within a byte
pub fn reflect(data: u8) -> u8 {
    data.reverse_bits()
}

/// checksum over `data`, zero for an empty slice
pub fn checksum(data: &[u8]) -> u16 {
    CRC_RNG90.checksum(data)
}
