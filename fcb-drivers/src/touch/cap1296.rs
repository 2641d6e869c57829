//! CAP1296 capacitive touch controller
//!
//! Six touch pads behind a register interface on I2C address 0x28. The
//! controller pulls its ALERT line low when a pad is touched and holds it
//! until the INT bit in the main control register is cleared; reading the
//! status therefore always ends with a write of 0x00 to that register.

use fcb_core::traits::{Keys, TouchController, TouchError, TouchSink};
use fcb_hal::RegisterBus;

/// Default I2C address
pub const ADDRESS: u8 = 0x28;

/// Number of touch pads
pub const PAD_COUNT: u8 = 6;

/// CAP1296 register addresses
pub mod reg {
    /// Main control; bit 0 is the INT flag
    pub const MAIN_CONTROL: u8 = 0x00;
    /// Sensor input status, one bit per pad
    pub const SENSOR_INPUT_STATUS: u8 = 0x03;
    /// Sensor input enable
    pub const SENSOR_INPUT_ENABLE: u8 = 0x21;
    /// Interrupt enable
    pub const INTERRUPT_ENABLE: u8 = 0x27;
    /// Multiple touch configuration
    pub const MULTIPLE_TOUCH_CONFIG: u8 = 0x2A;
}

/// Multiple touch blocking enable
const MULT_BLK_EN: u8 = 0x80;

/// CAP1296 driver configuration
#[derive(Debug, Clone)]
pub struct Cap1296Config {
    /// Pads decoded when servicing an alert
    pub key_count: u8,
    /// Mask written when an empty key list is given
    pub default_key_mask: u8,
}

impl Default for Cap1296Config {
    fn default() -> Self {
        Self {
            key_count: PAD_COUNT,
            default_key_mask: 0x3F,
        }
    }
}

/// Bitmask with bit k set for each key k
///
/// An empty list yields `default`.
pub fn keys_to_mask(keys: &[u8], default: u8) -> Result<u8, TouchError> {
    if keys.is_empty() {
        return Ok(default);
    }
    keys.iter().try_fold(0u8, |mask, &key| {
        if key >= PAD_COUNT {
            Err(TouchError::InvalidKey(key))
        } else {
            Ok(mask | (1 << key))
        }
    })
}

/// Pad indices of the set bits among the lowest `key_count`, ascending
pub fn decode_keys(status: u8, key_count: u8) -> Keys {
    let mut keys = Keys::new();
    for key in 0..key_count.min(8) {
        if status & (1 << key) != 0 {
            let _ = keys.push(key);
        }
    }
    keys
}

/// CAP1296 over a register bus
pub struct Cap1296<BUS> {
    bus: BUS,
    config: Cap1296Config,
}

impl<BUS: RegisterBus> Cap1296<BUS> {
    pub fn new(bus: BUS, config: Cap1296Config) -> Self {
        Self { bus, config }
    }

    pub fn config(&self) -> &Cap1296Config {
        &self.config
    }

    /// Release the underlying bus
    pub fn release(self) -> BUS {
        self.bus
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), TouchError> {
        self.bus.write_u8(register, value).map_err(|_| TouchError::Bus)
    }
}

impl<BUS: RegisterBus> TouchController for Cap1296<BUS> {
    fn enable_keys(&mut self, keys: &[u8]) -> Result<(), TouchError> {
        let mask = keys_to_mask(keys, self.config.default_key_mask)?;
        debug!("CAP1296 keys enabled: {=u8:#x}", mask);
        self.write(reg::SENSOR_INPUT_ENABLE, mask)
    }

    fn enable_interrupt(&mut self, keys: &[u8]) -> Result<(), TouchError> {
        let mask = keys_to_mask(keys, self.config.default_key_mask)?;
        self.write(reg::INTERRUPT_ENABLE, mask)
    }

    fn enable_multitouch(&mut self, enable: bool, simultaneous_touches: u8) -> Result<(), TouchError> {
        let value = if enable {
            0x00
        } else {
            if !(1..=4).contains(&simultaneous_touches) {
                return Err(TouchError::InvalidTouchCount(simultaneous_touches));
            }
            MULT_BLK_EN | ((simultaneous_touches - 1) << 2)
        };
        self.write(reg::MULTIPLE_TOUCH_CONFIG, value)
    }

    fn read_status(&mut self) -> Result<u8, TouchError> {
        let status = self
            .bus
            .read_u8(reg::SENSOR_INPUT_STATUS)
            .map_err(|_| TouchError::Bus)?;
        // Clear INT so the next touch raises a new alert
        self.write(reg::MAIN_CONTROL, 0x00)?;
        Ok(status)
    }

    fn read_keys(&mut self, key_count: u8) -> Result<Keys, TouchError> {
        let status = self.read_status()?;
        Ok(decode_keys(status, key_count))
    }

    fn service_interrupt(&mut self, sink: &mut dyn TouchSink) -> Result<(), TouchError> {
        let keys = self.read_keys(self.config.key_count)?;
        sink.keys_pressed(&keys);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use fcb_hal::BusError;

    /// Register file that logs every write
    struct DummyBus {
        regs: [u8; 256],
        writes: Vec<(u8, u8)>,
        fail: bool,
    }

    impl DummyBus {
        fn new() -> Self {
            Self {
                regs: [0; 256],
                writes: Vec::new(),
                fail: false,
            }
        }

        fn with_status(status: u8) -> Self {
            let mut bus = Self::new();
            bus.regs[reg::SENSOR_INPUT_STATUS as usize] = status;
            bus
        }
    }

    impl RegisterBus for DummyBus {
        fn write(&mut self, register: u8, data: &[u8]) -> Result<(), BusError> {
            if self.fail {
                return Err(BusError::NoAcknowledge);
            }
            for (i, &b) in data.iter().enumerate() {
                self.regs[register as usize + i] = b;
                self.writes.push((register + i as u8, b));
            }
            Ok(())
        }

        fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
            if self.fail {
                return Err(BusError::NoAcknowledge);
            }
            for (i, b) in buf.iter_mut().enumerate() {
                *b = self.regs[register as usize + i];
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Collector {
        calls: Vec<Vec<u8>>,
    }

    impl TouchSink for Collector {
        fn keys_pressed(&mut self, keys: &[u8]) {
            self.calls.push(keys.to_vec());
        }
    }

    fn cap(bus: DummyBus) -> Cap1296<DummyBus> {
        Cap1296::new(bus, Cap1296Config::default())
    }

    #[test]
    fn test_key_masks() {
        assert_eq!(keys_to_mask(&[0, 2, 5], 0x3F), Ok(0b10_0101));
        assert_eq!(keys_to_mask(&[], 0x3F), Ok(0x3F));
        assert_eq!(keys_to_mask(&[1, 1], 0x3F), Ok(0b10));
        assert_eq!(keys_to_mask(&[0, 6], 0x3F), Err(TouchError::InvalidKey(6)));
    }

    #[test]
    fn test_enable_keys_and_interrupt() {
        let mut touch = cap(DummyBus::new());
        touch.enable_keys(&[0, 1]).unwrap();
        touch.enable_interrupt(&[]).unwrap();
        assert_eq!(touch.enable_keys(&[9]), Err(TouchError::InvalidKey(9)));

        let bus = touch.release();
        assert_eq!(
            bus.writes,
            vec![(reg::SENSOR_INPUT_ENABLE, 0b11), (reg::INTERRUPT_ENABLE, 0x3F)]
        );
    }

    #[test]
    fn test_custom_default_mask() {
        let config = Cap1296Config {
            default_key_mask: 0x0F,
            ..Cap1296Config::default()
        };
        let mut touch = Cap1296::new(DummyBus::new(), config);
        touch.enable_keys(&[]).unwrap();
        assert_eq!(touch.release().writes, vec![(reg::SENSOR_INPUT_ENABLE, 0x0F)]);
    }

    #[test]
    fn test_multitouch() {
        let mut touch = cap(DummyBus::new());
        touch.enable_multitouch(true, 1).unwrap();
        touch.enable_multitouch(false, 1).unwrap();
        touch.enable_multitouch(false, 4).unwrap();
        assert_eq!(
            touch.enable_multitouch(false, 0),
            Err(TouchError::InvalidTouchCount(0))
        );
        assert_eq!(
            touch.enable_multitouch(false, 5),
            Err(TouchError::InvalidTouchCount(5))
        );

        let bus = touch.release();
        assert_eq!(
            bus.writes,
            vec![
                (reg::MULTIPLE_TOUCH_CONFIG, 0x00),
                (reg::MULTIPLE_TOUCH_CONFIG, 0x80),
                (reg::MULTIPLE_TOUCH_CONFIG, 0x8C),
            ]
        );
    }

    #[test]
    fn test_read_status_rearms() {
        let mut touch = cap(DummyBus::with_status(0b10_0001));
        assert_eq!(touch.read_status(), Ok(0b10_0001));
        assert_eq!(touch.release().writes, vec![(reg::MAIN_CONTROL, 0x00)]);
    }

    #[test]
    fn test_read_keys_decodes_lsb_first() {
        let mut touch = cap(DummyBus::with_status(0b1010_0110));
        assert_eq!(touch.read_keys(6).unwrap().as_slice(), &[1, 2, 5]);
        assert_eq!(touch.read_keys(8).unwrap().as_slice(), &[1, 2, 5, 7]);
        assert_eq!(touch.read_keys(20).unwrap().as_slice(), &[1, 2, 5, 7]);
        assert!(touch.read_keys(0).unwrap().is_empty());
    }

    #[test]
    fn test_service_interrupt_forwards_keys() {
        let mut touch = cap(DummyBus::with_status(0b11));
        let mut sink = Collector::default();
        touch.service_interrupt(&mut sink).unwrap();

        assert_eq!(sink.calls, vec![vec![0, 1]]);
        // One status read, one re-arm write and nothing else
        assert_eq!(touch.release().writes, vec![(reg::MAIN_CONTROL, 0x00)]);
    }

    #[test]
    fn test_service_interrupt_honours_key_count() {
        let config = Cap1296Config {
            key_count: 5,
            ..Cap1296Config::default()
        };
        let mut touch = Cap1296::new(DummyBus::with_status(0b10_0001), config);
        let mut sink = Collector::default();
        touch.service_interrupt(&mut sink).unwrap();
        assert_eq!(sink.calls, vec![vec![0]]);
    }

    #[test]
    fn test_bus_error() {
        let mut bus = DummyBus::new();
        bus.fail = true;
        let mut touch = cap(bus);
        let mut sink = Collector::default();
        assert_eq!(touch.service_interrupt(&mut sink), Err(TouchError::Bus));
        assert!(sink.calls.is_empty());
    }
}
