mod info;
pub use info::DeviceInfo;

mod random;
pub use random::RANDOM_CHUNK;

mod selftest;
pub use selftest::*;

use log::{debug, warn};

use crate::config::Config;
use crate::driver::{Rng90Driver, RNG90_ADDRESS};
use crate::error::Error;
use crate::frame::{self, Response, WordAddress, FRAME_CAPACITY, FRAME_MIN};

/// wake status response length: length, status, checksum
const WAKE_RESPONSE_MIN: usize = 4;

/// what is known about an initialized chip
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Session {
    info: DeviceInfo,
    self_test_completed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    /// attached but never woken, assumed asleep
    Uninitialized,
    Awake(Session),
    Asleep(Session),
}

/// RNG90 attached to a bus
///
/// Calls block until the chip answered. One owner at a time, wrap it in a mutex to share it.
pub struct Rng90<D: Rng90Driver> {
    driver: D,
    state: State,
    config: Config,
}

impl<D: Rng90Driver> Rng90<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, Config::default())
    }

    pub fn with_config(driver: D, config: Config) -> Self {
        Self {
            driver,
            state: State::Uninitialized,
            config,
        }
    }

    /// replaces the bus, forgetting everything known about the previous chip
    pub fn attach(&mut self, driver: D) -> D {
        self.state = State::Uninitialized;
        core::mem::replace(&mut self.driver, driver)
    }

    pub fn release(self) -> D {
        self.driver
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn set_logging(&mut self, enabled: bool) {
        self.config.logging = enabled;
    }

    pub fn is_logging(&self) -> bool {
        self.config.logging
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.state != State::Uninitialized
    }

    pub fn is_sleeping(&self) -> bool {
        !matches!(self.state, State::Awake(_))
    }

    /// true once a self-test reported a pass on this chip
    pub fn self_test_completed(&self) -> bool {
        self.session().is_some_and(|s| s.self_test_completed)
    }

    /// identity read during init, `None` before init
    pub fn info(&self) -> Option<DeviceInfo> {
        self.session().map(|s| s.info)
    }

    pub fn rfu(&self) -> u8 {
        self.info().unwrap_or_default().rfu
    }

    pub fn device_id(&self) -> u8 {
        self.info().unwrap_or_default().device_id
    }

    pub fn silicon_id(&self) -> u8 {
        self.info().unwrap_or_default().silicon_id
    }

    pub fn silicon_rev(&self) -> u8 {
        self.info().unwrap_or_default().silicon_rev
    }

    fn session(&self) -> Option<&Session> {
        match &self.state {
            State::Uninitialized => None,
            State::Awake(s) | State::Asleep(s) => Some(s),
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.state {
            State::Uninitialized => None,
            State::Awake(s) | State::Asleep(s) => Some(s),
        }
    }

    /// Wakes the chip and reads its identity. Does nothing if already initialized.
    ///
    /// The chip may have been put to sleep before a software reset of the host, so this goes
    /// through the wake sequence in any case. A failed identity query does not fail init, the
    /// identity then reads as zeroes.
    pub fn init(&mut self) -> Result<(), Error<D::Error>> {
        if self.is_initialized() {
            return Ok(());
        }

        self.wake()?;

        let info = match self.load_info() {
            Ok(info) => info,
            Err(e) => {
                warn!("RNG90 info query failed: {e:?}");
                DeviceInfo::default()
            }
        };

        self.state = State::Awake(Session {
            info,
            self_test_completed: false,
        });
        Ok(())
    }

    /// Puts an initialized, awake chip to sleep.
    ///
    /// Failures are only logged, check [`Rng90::is_sleeping`] afterwards if it matters.
    pub fn sleep(&mut self) {
        let State::Awake(session) = self.state else {
            return;
        };

        if let Err(e) = self.driver.write(RNG90_ADDRESS, &[WordAddress::Sleep as u8]) {
            warn!("RNG90 sleep failed: {e:?}");
            return;
        }

        self.log_debug(format_args!("RNG90 sleeping"));
        self.state = State::Asleep(session);
    }

    /// wakes a sleeping chip before a command, initialized chips only
    fn ensure_awake(&mut self) -> Result<(), Error<D::Error>> {
        match self.state {
            State::Uninitialized => Err(Error::NotInitialized),
            State::Awake(_) => Ok(()),
            State::Asleep(session) => {
                self.wake()?;
                self.state = State::Awake(session);
                Ok(())
            }
        }
    }

    /// reset command, retried once after the wake time, then checks the status response
    fn wake(&mut self) -> Result<(), Error<D::Error>> {
        let reset = [WordAddress::Reset as u8];

        if let Err(e) = self.driver.write(RNG90_ADDRESS, &reset) {
            // device may be asleep and did not acknowledge
            self.log_debug(format_args!("RNG90 reset not acknowledged: {e:?}, retrying"));
            self.driver.delay_ms(self.config.timing.wake_ms);
            if let Err(e) = self.driver.write(RNG90_ADDRESS, &reset) {
                warn!("RNG90 wake/init error {e:?}");
                return Err(Error::Bus(e));
            }
        }

        let response = self.read_response(WAKE_RESPONSE_MIN)?;
        self.log_debug(format_args!("RNG90 wake response {:02X?}", response.as_slice()));
        Ok(())
    }

    /// writes a command frame, waits `wait_ms` and reads the checksummed response
    fn exchange(
        &mut self,
        command: &[u8],
        wait_ms: u32,
        min_len: usize,
    ) -> Result<Response, Error<D::Error>> {
        self.log_debug(format_args!("RNG90 command {command:02X?}"));

        if let Err(e) = self.driver.write(RNG90_ADDRESS, command) {
            warn!("RNG90 command write error {e:?}");
            return Err(Error::Bus(e));
        }

        self.driver.delay_ms(wait_ms);

        let response = self.read_response(min_len)?;
        self.log_debug(format_args!("RNG90 response {:02X?}", response.as_slice()));
        Ok(response)
    }

    /// Reads the length byte, then the rest of the frame, and checks the checksum.
    ///
    /// The declared length comes from the chip, anything outside `min_len..=FRAME_CAPACITY` is
    /// rejected before reading further.
    fn read_response(&mut self, min_len: usize) -> Result<Response, Error<D::Error>> {
        let mut length = [0u8; 1];
        if let Err(e) = self.driver.read(RNG90_ADDRESS, &mut length, true) {
            warn!("RNG90 read error {e:?}");
            return Err(Error::Bus(e));
        }

        let declared = length[0] as usize;
        if declared < min_len.max(FRAME_MIN) || declared > FRAME_CAPACITY {
            warn!("RNG90 response length {declared} out of range");
            return Err(Error::FrameLength(length[0]));
        }

        let mut response = Response::new();
        // cannot fail, declared <= FRAME_CAPACITY
        let _ = response.resize(declared, 0);
        response[0] = length[0];

        if let Err(e) = self.driver.read(RNG90_ADDRESS, &mut response[1..], false) {
            warn!("RNG90 read error {e:?}");
            return Err(Error::Bus(e));
        }

        match frame::verify(&response) {
            Ok(()) => {
                self.log_debug(format_args!("RNG90 CRC valid"));
                Ok(response)
            }
            Err(e) => {
                warn!("RNG90 response {:02X?} invalid: {e:?}", response.as_slice());
                Err(e)
            }
        }
    }

    fn log_debug(&self, args: core::fmt::Arguments<'_>) {
        if self.config.logging {
            debug!("{args}");
        }
    }
}
