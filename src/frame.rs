//! Framing of RNG90 commands and responses.
//!
//! Every frame is `[length][payload...][crc_lsb][crc_msb]`, where `length` counts all bytes of the
//! frame including itself and the checksum. Command frames written to the bus carry the word
//! address in front, outside of the checksummed frame.

use crate::crc16::checksum;
use crate::error::Error;

/// largest frame the driver accepts: length + 33 payload bytes + checksum
pub const FRAME_CAPACITY: usize = 36;

/// length + checksum, the smallest frame that carries anything
pub const FRAME_MIN: usize = 3;

/// declared length of every command frame
pub const COMMAND_LENGTH: u8 = 7;

/// a response frame, including its length byte and checksum
pub type Response = heapless::Vec<u8, FRAME_CAPACITY>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WordAddress {
    /// reset the I/O buffer, also wakes a sleeping chip
    Reset = 0x00,
    Sleep = 0x01,
    Command = 0x03,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Random = 0x16,
    Info = 0x30,
    SelfTest = 0x77,
}

/// writes the checksum of `frame[..length - 2]` to the last two bytes of the frame
///
/// frames declaring fewer than 2 bytes, or declaring more bytes than `frame` holds, are left as
/// they are
pub fn append_checksum(frame: &mut [u8]) {
    let Some(&length) = frame.first() else {
        return;
    };
    let length = length as usize;
    if length < 2 || length > frame.len() {
        return;
    }

    let crc = checksum(&frame[..length - 2]).to_le_bytes();
    frame[length - 2..length].copy_from_slice(&crc);
}

/// checks the trailing checksum of a frame against its contents
pub fn verify<E>(frame: &[u8]) -> Result<(), Error<E>> {
    let Some(&declared) = frame.first() else {
        return Err(Error::FrameLength(0));
    };
    let length = declared as usize;
    if length < 2 || length > frame.len() {
        return Err(Error::FrameLength(declared));
    }

    let expected = checksum(&frame[..length - 2]);
    let received = u16::from_le_bytes([frame[length - 2], frame[length - 1]]);

    if expected != received {
        Err(Error::Checksum { expected, received })
    } else {
        Ok(())
    }
}

pub fn validate(frame: &[u8]) -> bool {
    verify::<()>(frame).is_ok()
}

/// builds the bytes written to the bus for a command: word address, then the checksummed frame
pub fn command(opcode: Opcode, param1: u8, param2: u16) -> [u8; 8] {
    let param2 = param2.to_le_bytes();
    let mut buf = [
        WordAddress::Command as u8,
        COMMAND_LENGTH,
        opcode as u8,
        param1,
        param2[0],
        param2[1],
        0x00,
        0x00,
    ];
    append_checksum(&mut buf[1..]);
    buf
}
