//! Threshold calibration loop: the bench firmware variant.
//!
//! Mounting the sensor head in a real letterbox needs a feedback loop:
//! point the IR pair, drop a test letter, watch the LED. The calibration
//! build polls continuously with no radio and no sleep, so the LED tracks
//! the beam in close to real time while the threshold and geometry are
//! tuned.
//!
//! No state persists across iterations; the LED level is fully recomputed
//! from each fresh measurement.

use crate::adc::AdcChannel;
use crate::config::SensorConfig;
use crate::consts::CALIBRATION_POLL_MS;
use crate::detect::letter_present;
use crate::sensor::IrSensor;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// The calibration variant: sampler plus status LED, nothing else.
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// use letterbox_sensor::adc::AdcChannel;
/// use letterbox_sensor::calibrate::Calibrator;
/// use letterbox_sensor::config::SensorConfig;
/// use letterbox_sensor::sensor::IrSensor;
///
/// # struct FixedAdc(u16);
/// # impl AdcChannel for FixedAdc {
/// #     fn read(&mut self) -> u16 {
/// #         self.0
/// #     }
/// # }
/// # let emitter = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// # let power = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// # let status_led = Pin::new(&[PinTransaction::set(PinState::High)]);
/// let config = SensorConfig::calibration();
/// let sensor = IrSensor::new(emitter, power, FixedAdc(40), config.settle_delay_ms);
/// let mut calibrator = Calibrator::new(sensor, status_led, config);
/// let mut delay = NoopDelay::new();
///
/// // A reading of 40 clears the calibration threshold of 15.
/// assert!(calibrator.poll(&mut delay));
/// # calibrator.sensor.emitter.done();
/// # calibrator.sensor.power.done();
/// # calibrator.status_led.done();
/// ```
#[derive(Debug)]
pub struct Calibrator<EMIT, PWR, LED, ADC>
where
    EMIT: OutputPin,
    PWR: OutputPin,
    LED: OutputPin,
    ADC: AdcChannel,
{
    /// The IR reflectance sampler.
    pub sensor: IrSensor<EMIT, PWR, ADC>,
    /// Status LED mirroring the detection state.
    pub status_led: LED,
    config: SensorConfig,
}

impl<EMIT, PWR, LED, ADC> Calibrator<EMIT, PWR, LED, ADC>
where
    EMIT: OutputPin,
    PWR: OutputPin,
    LED: OutputPin,
    ADC: AdcChannel,
{
    /// Assembles the calibration variant.
    pub fn new(sensor: IrSensor<EMIT, PWR, ADC>, status_led: LED, config: SensorConfig) -> Self {
        Self {
            sensor,
            status_led,
            config,
        }
    }

    /// Startup blink: one long on/off pulse confirming the board is alive
    /// before polling starts.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        let _ = self.status_led.set_high();
        delay.delay_ms(self.config.status_blink_ms);
        let _ = self.status_led.set_low();
        delay.delay_ms(self.config.status_blink_ms);
    }

    /// One poll iteration: sample, classify, mirror the result on the LED.
    ///
    /// Returns the detection result so tests (or a curious `main`) can watch
    /// it without wiring up an LED.
    pub fn poll<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        let measurement = self.sensor.sample(delay);
        let present = letter_present(measurement, self.config.threshold);

        #[cfg(feature = "log")]
        log::trace!("measurement={} present={}", measurement, present);

        if present {
            let _ = self.status_led.set_high();
        } else {
            let _ = self.status_led.set_low();
        }
        present
    }

    /// Polls forever at the fixed calibration pace.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        loop {
            let _ = self.poll(delay);
            delay.delay_ms(CALIBRATION_POLL_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::vec::Vec;

    struct ScriptedAdc {
        readings: Vec<u16>,
        next: usize,
    }

    impl ScriptedAdc {
        fn new(readings: &[u16]) -> Self {
            Self {
                readings: readings.to_vec(),
                next: 0,
            }
        }
    }

    impl AdcChannel for ScriptedAdc {
        fn read(&mut self) -> u16 {
            let value = self.readings[self.next];
            self.next += 1;
            value
        }
    }

    fn pulsed_pin() -> PinMock {
        PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ])
    }

    #[test]
    fn test_led_follows_the_detection_state() {
        let led = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let sensor = IrSensor::new(
            PinMock::new(&[
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
            ]),
            PinMock::new(&[
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
            ]),
            // First poll averages 40 (above 15), second averages 3 (below).
            ScriptedAdc::new(&[40, 40, 40, 3, 3, 3]),
            15,
        );
        let mut calibrator = Calibrator::new(sensor, led, SensorConfig::calibration());
        let mut delay = NoopDelay::new();

        assert!(calibrator.poll(&mut delay));
        assert!(!calibrator.poll(&mut delay));

        calibrator.sensor.emitter.done();
        calibrator.sensor.power.done();
        calibrator.status_led.done();
    }

    #[test]
    fn test_reading_at_threshold_leaves_the_led_off() {
        let led = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let sensor = IrSensor::new(pulsed_pin(), pulsed_pin(), ScriptedAdc::new(&[15, 15, 15]), 15);
        let mut calibrator = Calibrator::new(sensor, led, SensorConfig::calibration());
        let mut delay = NoopDelay::new();

        assert!(!calibrator.poll(&mut delay));

        calibrator.sensor.emitter.done();
        calibrator.sensor.power.done();
        calibrator.status_led.done();
    }

    #[test]
    fn test_startup_blink_pulses_the_led_once() {
        let led = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let sensor = IrSensor::new(
            PinMock::new(&[]),
            PinMock::new(&[]),
            ScriptedAdc::new(&[]),
            15,
        );
        let mut calibrator = Calibrator::new(sensor, led, SensorConfig::calibration());
        let mut delay = NoopDelay::new();

        calibrator.init(&mut delay);

        calibrator.sensor.emitter.done();
        calibrator.sensor.power.done();
        calibrator.status_led.done();
    }
}
