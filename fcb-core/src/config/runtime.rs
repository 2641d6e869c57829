//! Runtime tuning

/// App loaded by `app_exit` and after a completed setup
pub const HOME_APP: &str = "home";

/// App loaded at boot when no valid owner record exists
pub const SETUP_APP: &str = "setup";

/// Runtime configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeConfig {
    /// Name of the designated idle app
    pub home_app: &'static str,
    /// Name of the first-boot configuration app
    pub setup_app: &'static str,
    /// Maximum serial bytes turned into events per loop step
    pub serial_drain_limit: usize,
    /// Sleep between idle loop steps, in milliseconds
    pub idle_sleep_ms: u32,
    /// Enable the debug print channel
    pub debug: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            home_app: HOME_APP,
            setup_app: SETUP_APP,
            serial_drain_limit: 64,
            idle_sleep_ms: 10,
            debug: false,
        }
    }
}
