use core::num::NonZeroU32;

use rand_core::{impls, CryptoRng, RngCore};

use crate::driver::Rng90Driver;
use crate::error::Error;
use crate::frame::{command, Opcode, FRAME_MIN};

use super::Rng90;

/// random bytes returned by a single Random command
pub const RANDOM_CHUNK: usize = 32;

const RNG_ERROR_CODE: NonZeroU32 = match NonZeroU32::new(rand_core::Error::CUSTOM_START + 0x90) {
    Some(code) => code,
    None => panic!(),
};

impl<D: Rng90Driver> Rng90<D> {
    /// Fills `buf` with random bytes, one Random command per 32 bytes.
    ///
    /// Wakes the chip if it sleeps. On error the contents of `buf` are unspecified.
    pub fn random(&mut self, buf: &mut [u8]) -> Result<(), Error<D::Error>> {
        if !self.is_initialized() {
            return Err(Error::NotInitialized);
        }
        self.ensure_awake()?;

        let timing = self.config.timing;
        // health tests run on the first random after boot unless a self-test did them already
        let mut wait_ms = if self.self_test_completed() {
            timing.random_ms
        } else {
            timing.random_after_boot_ms
        };

        let cmd = command(Opcode::Random, 0x00, 0x0000);

        for (i, chunk) in buf.chunks_mut(RANDOM_CHUNK).enumerate() {
            let response = self.exchange(&cmd, wait_ms, FRAME_MIN + chunk.len())?;
            chunk.copy_from_slice(&response[1..1 + chunk.len()]);

            self.log_debug(format_args!("RNG90 random chunk {i}: {} bytes", chunk.len()));
            wait_ms = timing.random_ms;
        }

        Ok(())
    }
}

impl<D: Rng90Driver> RngCore for Rng90<D> {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.random(dest) {
            panic!("RNG90 random failed: {e:?}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.random(dest).map_err(|_| rand_core::Error::from(RNG_ERROR_CODE))
    }
}

impl<D: Rng90Driver> CryptoRng for Rng90<D> {}
