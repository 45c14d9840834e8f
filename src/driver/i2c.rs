use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::Rng90Driver;

/// [`Rng90Driver`] on top of a blocking embedded-hal I2C bus
pub struct Rng90I2cDriver<I2C: I2c, DELAY: DelayNs> {
    pub i2c: I2C,
    pub delay: DELAY,
}

impl<I2C: I2c, DELAY: DelayNs> Rng90I2cDriver<I2C, DELAY> {
    pub fn new(i2c: I2C, delay: DELAY) -> Self {
        Self { i2c, delay }
    }

    pub fn release(self) -> (I2C, DELAY) {
        (self.i2c, self.delay)
    }
}

impl<I2C: I2c, DELAY: DelayNs> Rng90Driver for Rng90I2cDriver<I2C, DELAY> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes)
    }

    // embedded-hal always ends a read with a stop condition, the RNG90 keeps its output pointer
    // across reads so the remainder of a response can still be read separately
    fn read(&mut self, address: u8, buffer: &mut [u8], _hold_bus: bool) -> Result<(), Self::Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        self.i2c.read(address, buffer)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
