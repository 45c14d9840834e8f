//! Driver for the Microchip RNG90 random number generator on I2C.
//!
//! ```ignore
//! let driver = Rng90I2cDriver::new(i2c, delay);
//! let mut rng = Rng90::new(driver);
//! rng.init()?;
//! assert_eq!(rng.self_test(SelfTestType::Full), SelfTestResult::Passed);
//! let mut key = [0u8; 48];
//! rng.random(&mut key)?;
//! rng.sleep();
//! ```

#![cfg_attr(not(test), no_std)]

mod chip;
pub mod config;
pub mod crc16;
pub mod driver;
mod error;
pub mod frame;

pub use chip::{DeviceInfo, Rng90, SelfTestResult, SelfTestType, RANDOM_CHUNK};
pub use config::{Config, Timing};
pub use driver::{i2c::Rng90I2cDriver, Rng90Driver, RNG90_ADDRESS};
pub use error::Error;
