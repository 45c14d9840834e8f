pub mod i2c;

use core::fmt::Debug;

/// fixed 7-bit bus address of the RNG90
pub const RNG90_ADDRESS: u8 = 0x40;

/// Bus access used by [`crate::Rng90`]. Every call blocks until the transfer is done.
pub trait Rng90Driver {
    type Error: Debug;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// reads `buffer.len()` bytes. with `hold_bus` set the bus is not released after the read,
    /// so the following read continues the same response.
    fn read(&mut self, address: u8, buffer: &mut [u8], hold_bus: bool) -> Result<(), Self::Error>;

    fn delay_ms(&mut self, ms: u32);
}

impl<T: Rng90Driver + ?Sized> Rng90Driver for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8], hold_bus: bool) -> Result<(), Self::Error> {
        T::read(self, address, buffer, hold_bus)
    }

    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }
}
