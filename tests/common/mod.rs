#![allow(dead_code)]

use rng90::frame::{append_checksum, validate, FRAME_CAPACITY};
use rng90::{Rng90Driver, RNG90_ADDRESS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    Nack,
    Read,
}

/// RNG90 model answering commands like the real chip, with knobs to make it misbehave
pub struct SimChip {
    pub info: [u8; 4],
    pub self_test_status: u8,
    /// a sleeping chip does not acknowledge the write that wakes it
    pub asleep: bool,
    /// number of upcoming writes to reject
    pub nack_writes: usize,
    pub fail_reads: bool,
    pub corrupt_wake: bool,
    pub corrupt_info: bool,
    /// index of the random response whose checksum gets corrupted
    pub corrupt_random: Option<usize>,
    /// declared length of random responses instead of the real one
    pub random_length: Option<u8>,

    pub writes: Vec<Vec<u8>>,
    pub delays: Vec<u32>,
    pub random_exchanges: usize,
    output: Vec<u8>,
    cursor: usize,
}

impl SimChip {
    pub fn new() -> Self {
        Self {
            info: [0x00, 0x00, 0x90, 0x02],
            self_test_status: 0x00,
            asleep: true,
            nack_writes: 0,
            fail_reads: false,
            corrupt_wake: false,
            corrupt_info: false,
            corrupt_random: None,
            random_length: None,
            writes: Vec::new(),
            delays: Vec::new(),
            random_exchanges: 0,
            output: Vec::new(),
            cursor: 0,
        }
    }

    /// commands written with the given opcode
    pub fn commands(&self, opcode: u8) -> usize {
        self.writes
            .iter()
            .filter(|w| w.len() == 8 && w[0] == 0x03 && w[2] == opcode)
            .count()
    }

    fn respond(&mut self, frame: Vec<u8>) {
        self.output = frame;
        self.cursor = 0;
    }
}

/// `[len][body][crc]` with a valid checksum
pub fn framed(body: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; body.len() + 3];
    frame[0] = frame.len() as u8;
    frame[1..1 + body.len()].copy_from_slice(body);
    append_checksum(&mut frame);
    frame
}

/// byte `i` of the random stream
pub fn random_byte(i: usize) -> u8 {
    (i as u8).wrapping_mul(7).wrapping_add(3)
}

fn corrupt(frame: &mut [u8]) {
    let last = frame.len() - 1;
    frame[last] ^= 0x5a;
}

impl Rng90Driver for SimChip {
    type Error = SimError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), SimError> {
        assert_eq!(address, RNG90_ADDRESS);
        self.writes.push(bytes.to_vec());

        if self.nack_writes > 0 {
            self.nack_writes -= 1;
            return Err(SimError::Nack);
        }
        if self.asleep {
            self.asleep = false;
            return Err(SimError::Nack);
        }

        match bytes[0] {
            0x00 => {
                let mut frame = framed(&[0x11]);
                if self.corrupt_wake {
                    corrupt(&mut frame);
                }
                self.respond(frame);
            }
            0x01 => {
                self.asleep = true;
                self.respond(Vec::new());
            }
            0x03 => {
                assert!(validate(&bytes[1..]), "command checksum invalid: {bytes:02X?}");
                let frame = match bytes[2] {
                    0x30 => {
                        let mut frame = framed(&self.info);
                        if self.corrupt_info {
                            corrupt(&mut frame);
                        }
                        frame
                    }
                    0x77 => framed(&[self.self_test_status]),
                    0x16 => {
                        let n = self.random_exchanges;
                        self.random_exchanges += 1;
                        let body: Vec<u8> = (0..32).map(|j| random_byte(n * 32 + j)).collect();
                        let mut frame = framed(&body);
                        if self.corrupt_random == Some(n) {
                            corrupt(&mut frame);
                        }
                        if let Some(len) = self.random_length {
                            frame[0] = len;
                        }
                        frame
                    }
                    op => panic!("unexpected opcode 0x{op:02X}"),
                };
                self.respond(frame);
            }
            w => panic!("unexpected word address 0x{w:02X}"),
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buffer: &mut [u8], _hold_bus: bool) -> Result<(), SimError> {
        assert_eq!(address, RNG90_ADDRESS);
        assert!(buffer.len() < FRAME_CAPACITY);
        if self.fail_reads {
            return Err(SimError::Read);
        }
        for b in buffer.iter_mut() {
            *b = self.output.get(self.cursor).copied().unwrap_or(0xff);
            self.cursor += 1;
        }
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}
