//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer to the sensor failed
    Bus,
    /// Reading outside the sensor's specified range
    OutOfRange,
}

/// Trait for temperature sensors
///
/// The native unit is 1/16 °C, the resolution of the badge's sensor and
/// the unit the panel's compensation register expects.
pub trait TemperatureSensor {
    /// Read the current temperature in 1/16 °C steps
    ///
    /// For example, 19.0 °C is returned as 304.
    fn read_sixteenths(&mut self) -> Result<i16, SensorError>;

    /// Read the current temperature with 0.1 °C resolution
    ///
    /// For example, 45.5 °C is returned as 455.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        self.read_sixteenths()
            .map(|t| ((t as i32 * 10) / 16) as i16)
    }

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_sixteenths().map(|t| t / 16)
    }
}
