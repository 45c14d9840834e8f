use crate::driver::Rng90Driver;
use crate::error::Error;
use crate::frame::{command, Opcode};

use super::Rng90;

/// length, four identity bytes, checksum
const INFO_RESPONSE_MIN: usize = 7;

/// identity reported by the Info command
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    /// reserved for future use
    pub rfu: u8,
    pub device_id: u8,
    pub silicon_id: u8,
    pub silicon_rev: u8,
}

impl<D: Rng90Driver> Rng90<D> {
    /// Info command. Sent while the chip is still marked uninitialized during init.
    pub(super) fn load_info(&mut self) -> Result<DeviceInfo, Error<D::Error>> {
        let cmd = command(Opcode::Info, 0x00, 0x0000);
        let response = self.exchange(&cmd, self.config.timing.info_ms, INFO_RESPONSE_MIN)?;

        let info = DeviceInfo {
            rfu: response[1],
            device_id: response[2],
            silicon_id: response[3],
            silicon_rev: response[4],
        };

        self.log_debug(format_args!(
            "RNG90 info: rfu=0x{:02X} device=0x{:02X} silicon=0x{:02X} rev=0x{:02X}",
            info.rfu, info.device_id, info.silicon_id, info.silicon_rev
        ));

        Ok(info)
    }
}
