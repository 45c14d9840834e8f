use serde::{Deserialize, Serialize};

/// delays between writing a command and reading its response, in milliseconds
///
/// defaults are the datasheet maximums rounded up
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    // maximum wake time is 1.8ms
    pub wake_ms: u32,
    // typical 0.28ms, max 0.40ms
    pub info_ms: u32,
    // typical 0.27ms, max 0.4ms
    pub self_test_status_ms: u32,
    // typical 25.3ms, max 31.8ms
    pub self_test_drbg_ms: u32,
    // typical 11.4ms, max 14.5ms
    pub self_test_sha256_ms: u32,
    // both tests back to back
    pub self_test_full_ms: u32,
    // typical 20.2ms, max 25.3ms
    pub random_ms: u32,
    // first random after boot runs the health tests, typical 57ms, max 72ms
    pub random_after_boot_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            wake_ms: 2,
            info_ms: 1,
            self_test_status_ms: 1,
            self_test_drbg_ms: 32,
            self_test_sha256_ms: 15,
            self_test_full_ms: 47,
            random_ms: 26,
            random_after_boot_ms: 72,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// log every exchange at debug level
    pub logging: bool,
    pub timing: Timing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let json = br#"{"logging":true,"timing":{"random_after_boot_ms":80}}"#;
        let (config, _): (Config, _) = serde_json_core::from_slice(json).unwrap();

        assert!(config.logging);
        assert_eq!(config.timing.random_after_boot_ms, 80);
        assert_eq!(config.timing.random_ms, 26);
        assert_eq!(config.timing.wake_ms, 2);
    }

    #[test]
    fn full_test_is_longest() {
        let t = Timing::default();
        assert!(t.self_test_full_ms >= t.self_test_drbg_ms);
        assert!(t.self_test_drbg_ms > t.self_test_sha256_ms);
        assert!(t.self_test_sha256_ms > t.self_test_status_ms);
    }
}
