//! Step/dir/enable driver for one joint
//!
//! Drives a trinamic-style stepper input stage: a direction level, a step
//! pulse per microstep, and an active-low enable for the holding current.
//! The driver owns nothing but timing: a pulse that the motor misses is
//! not detectable here, so correctness at this layer is the pulse width and
//! inter-pulse spacing contract (±10% of the configured values).

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;

use brachion_core::config::AxisConfig;
use brachion_core::motion::Direction;

/// Axis driver failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisError {
    /// A pin write failed. Not retried: once a pulse may have been lost,
    /// step timing can no longer be trusted.
    Gpio,
}

/// One joint's step/dir/enable interface
///
/// Generic over the pin type and delay source so the same driver runs on
/// real GPIO in firmware and on mocks in tests.
pub struct AxisDriver<P, D> {
    step_pin: P,
    dir_pin: P,
    enable_pin: P,
    delay: D,
    dir_inverted: bool,
    pulse_width_us: u32,
    enabled: bool,
}

impl<P: OutputPin, D: DelayNs> AxisDriver<P, D> {
    /// Create a driver over already-initialized pins
    ///
    /// The caller is responsible for the pins' electrical setup and their
    /// initial levels; the driver assumes the motor starts released.
    pub fn new(step_pin: P, dir_pin: P, enable_pin: P, delay: D, config: &AxisConfig) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            dir_inverted: config.dir_inverted,
            pulse_width_us: config.pulse_width_us,
            enabled: false,
        }
    }

    /// Perform one step in the given direction
    ///
    /// Asserts the direction level, holds the step line high for the pulse
    /// width and low for the same time, and returns once the pulse is
    /// physically complete.
    pub async fn step(&mut self, direction: Direction) -> Result<(), AxisError> {
        let dir_high = (direction == Direction::Reverse) != self.dir_inverted;
        self.dir_pin
            .set_state(PinState::from(dir_high))
            .map_err(|_| AxisError::Gpio)?;

        self.step_pin.set_high().map_err(|_| AxisError::Gpio)?;
        self.delay.delay_us(self.pulse_width_us).await;
        self.step_pin.set_low().map_err(|_| AxisError::Gpio)?;
        self.delay.delay_us(self.pulse_width_us).await;

        Ok(())
    }

    /// Sleep between steps
    pub async fn pause(&mut self, delay_us: u32) {
        self.delay.delay_us(delay_us).await;
    }

    /// Energize or release the holding current (enable line is active-low)
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), AxisError> {
        self.enable_pin
            .set_state(PinState::from(!enabled))
            .map_err(|_| AxisError::Gpio)?;
        self.enabled = enabled;
        Ok(())
    }

    /// Whether the holding current is energized
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct MockPinError;

    impl Error for MockPinError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Mock GPIO pin recording level changes
    struct MockPin {
        high: bool,
        rising_edges: u32,
        fail: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                rising_edges: 0,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = MockPinError;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), MockPinError> {
            if self.fail {
                return Err(MockPinError);
            }
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), MockPinError> {
            if self.fail {
                return Err(MockPinError);
            }
            self.high = false;
            Ok(())
        }
    }

    /// Mock delay accumulating requested sleep time
    struct MockDelay {
        waited_us: u64,
    }

    impl MockDelay {
        fn new() -> Self {
            Self { waited_us: 0 }
        }
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.waited_us += ns as u64 / 1_000;
        }
    }

    fn axis_config() -> AxisConfig {
        AxisConfig {
            pulley_teeth: 116,
            motor_teeth: 20,
            full_steps_per_rotation: 200,
            microsteps: 8,
            dir_inverted: false,
            pulse_width_us: 20,
        }
    }

    fn driver(config: &AxisConfig) -> AxisDriver<MockPin, MockDelay> {
        AxisDriver::new(
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            MockDelay::new(),
            config,
        )
    }

    #[test]
    fn test_step_pulses_step_line() {
        let mut axis = driver(&axis_config());

        for _ in 0..5 {
            block_on(axis.step(Direction::Forward)).unwrap();
        }

        assert_eq!(axis.step_pin.rising_edges, 5);
        assert!(!axis.step_pin.high, "step line must end low");
    }

    #[test]
    fn test_direction_levels() {
        let mut axis = driver(&axis_config());

        block_on(axis.step(Direction::Forward)).unwrap();
        assert!(!axis.dir_pin.high);

        block_on(axis.step(Direction::Reverse)).unwrap();
        assert!(axis.dir_pin.high);
    }

    #[test]
    fn test_direction_inverted_axis() {
        let config = AxisConfig {
            dir_inverted: true,
            ..axis_config()
        };
        let mut axis = driver(&config);

        block_on(axis.step(Direction::Forward)).unwrap();
        assert!(axis.dir_pin.high);

        block_on(axis.step(Direction::Reverse)).unwrap();
        assert!(!axis.dir_pin.high);
    }

    #[test]
    fn test_pulse_timing() {
        let mut axis = driver(&axis_config());

        for _ in 0..10 {
            block_on(axis.step(Direction::Forward)).unwrap();
        }

        // Each step holds the line high then low for one pulse width
        assert_eq!(axis.delay.waited_us, 10 * 2 * 20);
    }

    #[test]
    fn test_enable_is_active_low() {
        let mut axis = driver(&axis_config());
        assert!(!axis.is_enabled());

        axis.set_enabled(true).unwrap();
        assert!(axis.is_enabled());
        assert!(!axis.enable_pin.high);

        axis.set_enabled(false).unwrap();
        assert!(!axis.is_enabled());
        assert!(axis.enable_pin.high);
    }

    #[test]
    fn test_gpio_fault_propagates() {
        let config = axis_config();
        let mut axis = AxisDriver::new(
            MockPin::failing(),
            MockPin::new(),
            MockPin::new(),
            MockDelay::new(),
            &config,
        );

        assert_eq!(
            block_on(axis.step(Direction::Forward)),
            Err(AxisError::Gpio)
        );
    }
}
