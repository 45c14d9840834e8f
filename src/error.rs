use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// the bus transport failed
    Bus(E),
    /// response checksum does not match its contents
    Checksum { expected: u16, received: u16 },
    /// declared response length is too short for the exchange or exceeds the frame capacity
    FrameLength(u8),
    /// the device has not been initialized
    NotInitialized,
}

impl<E> Error<E> {
    /// bus error wrapped by this error, if any
    pub fn bus(&self) -> Option<&E> {
        match self {
            Error::Bus(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {e:?}"),
            Error::Checksum { expected, received } => write!(
                f,
                "checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}"
            ),
            Error::FrameLength(len) => write!(f, "invalid frame length {len}"),
            Error::NotInitialized => f.write_str("device not initialized"),
        }
    }
}
