use core::fmt;

use log::warn;

use crate::driver::Rng90Driver;
use crate::error::Error;
use crate::frame::{command, Opcode};

use super::Rng90;

/// length, status, checksum
const SELF_TEST_RESPONSE_MIN: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelfTestType {
    /// report the result of the last self-test without running one
    Status = 0x00,
    Drbg = 0x01,
    Sha256 = 0x20,
    /// DRBG and SHA-256
    Full = 0x21,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelfTestResult {
    Passed,
    DrbgFailed,
    DrbgNotRun,
    Sha256NotRun,
    NeitherRun,
    Sha256Failed,
    BothFailed,
    /// the exchange with the chip failed, never reported by the chip itself
    CommunicationError,
    /// status byte without a known meaning
    Unknown(u8),
}

impl SelfTestResult {
    /// decodes the status byte of a self-test response
    pub fn from_status(status: u8) -> Self {
        match status {
            0x00 => Self::Passed,
            0x01 => Self::DrbgFailed,
            0x02 => Self::DrbgNotRun,
            0x10 => Self::Sha256NotRun,
            0x12 => Self::NeitherRun,
            0x20 => Self::Sha256Failed,
            0x21 => Self::BothFailed,
            other => Self::Unknown(other),
        }
    }

    /// status byte as the chip reports it, 0xFF for a failed exchange
    pub fn status(&self) -> u8 {
        match self {
            Self::Passed => 0x00,
            Self::DrbgFailed => 0x01,
            Self::DrbgNotRun => 0x02,
            Self::Sha256NotRun => 0x10,
            Self::NeitherRun => 0x12,
            Self::Sha256Failed => 0x20,
            Self::BothFailed => 0x21,
            Self::CommunicationError => 0xff,
            Self::Unknown(status) => *status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::DrbgFailed => "DRBG failed",
            Self::DrbgNotRun => "DRBG not run",
            Self::Sha256NotRun => "SHA-256 not run",
            Self::NeitherRun => "neither test run",
            Self::Sha256Failed => "SHA-256 failed",
            Self::BothFailed => "both tests failed",
            Self::CommunicationError => "communication error",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for SelfTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<D: Rng90Driver> Rng90<D> {
    /// Runs or queries a self-test, waking the chip if it sleeps.
    ///
    /// Any failure talking to the chip comes back as [`SelfTestResult::CommunicationError`].
    pub fn self_test(&mut self, test: SelfTestType) -> SelfTestResult {
        match self.try_self_test(test) {
            Ok(result) => result,
            Err(e) => {
                warn!("RNG90 self-test {test:?} failed: {e:?}");
                SelfTestResult::CommunicationError
            }
        }
    }

    fn try_self_test(&mut self, test: SelfTestType) -> Result<SelfTestResult, Error<D::Error>> {
        if !self.is_initialized() {
            return Err(Error::NotInitialized);
        }
        self.ensure_awake()?;

        let timing = &self.config.timing;
        let wait_ms = match test {
            SelfTestType::Status => timing.self_test_status_ms,
            SelfTestType::Drbg => timing.self_test_drbg_ms,
            SelfTestType::Sha256 => timing.self_test_sha256_ms,
            SelfTestType::Full => timing.self_test_full_ms,
        };

        let cmd = command(Opcode::SelfTest, test as u8, 0x0000);
        let response = self.exchange(&cmd, wait_ms, SELF_TEST_RESPONSE_MIN)?;

        let result = SelfTestResult::from_status(response[1]);
        self.log_debug(format_args!(
            "RNG90 self-test {test:?}: 0x{:02X} ({result})",
            response[1]
        ));

        if result == SelfTestResult::Passed {
            if let Some(session) = self.session_mut() {
                session.self_test_completed = true;
            }
        }

        Ok(result)
    }
}
