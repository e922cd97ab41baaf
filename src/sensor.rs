//! IR reflectance sampler for the letterbox sensor head.
//!
//! The sensor head is an IR emitter/detector pair: an (invisible) IR LED
//! shines into the box, and the detector output is read through an ADC pin.
//! A letter lying in the beam path changes the reflected energy, which shows
//! up as a shift in the ADC reading.
//!
//! Both the emitter and the detector supply are switched off between
//! measurements to save power, so one [`sample()`](IrSensor::sample) call
//! powers the pair up, waits for the analog front end to settle, averages a
//! burst of readings, and powers the pair back down.

use crate::adc::AdcChannel;
use crate::consts::SAMPLE_COUNT;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Driver for the IR emitter/detector pair.
///
/// ## Type Parameters
///
/// - `EMIT`: output pin driving the IR emitter LED
/// - `PWR`: output pin supplying the detector diode
/// - `ADC`: analog channel wired to the detector output
///
/// Pin errors are ignored; the GPIO writes on the supported targets are
/// infallible.
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// use letterbox_sensor::adc::AdcChannel;
/// use letterbox_sensor::sensor::IrSensor;
///
/// struct ScriptedAdc {
///     readings: [u16; 3],
///     next: usize,
/// }
///
/// impl AdcChannel for ScriptedAdc {
///     fn read(&mut self) -> u16 {
///         let value = self.readings[self.next];
///         self.next += 1;
///         value
///     }
/// }
///
/// # let emitter = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// # let power = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// let adc = ScriptedAdc { readings: [10, 11, 12], next: 0 };
/// let mut sensor = IrSensor::new(emitter, power, adc, 25);
/// let mut delay = NoopDelay::new();
///
/// assert_eq!(sensor.sample(&mut delay), 11);
/// # sensor.emitter.done();
/// # sensor.power.done();
/// ```
#[derive(Debug)]
pub struct IrSensor<EMIT, PWR, ADC>
where
    EMIT: OutputPin,
    PWR: OutputPin,
    ADC: AdcChannel,
{
    /// IR emitter pin.
    pub emitter: EMIT,
    /// Detector supply pin.
    pub power: PWR,
    /// Analog channel wired to the detector output.
    pub adc: ADC,
    settle_delay_ms: u32,
}

impl<EMIT, PWR, ADC> IrSensor<EMIT, PWR, ADC>
where
    EMIT: OutputPin,
    PWR: OutputPin,
    ADC: AdcChannel,
{
    /// Creates a sensor from its pins and analog channel.
    ///
    /// `settle_delay_ms` is the pause between powering the IR pair and each
    /// ADC reading; see [`SensorConfig`](crate::config::SensorConfig) for the
    /// per-variant values.
    pub fn new(emitter: EMIT, power: PWR, adc: ADC, settle_delay_ms: u32) -> Self {
        Self {
            emitter,
            power,
            adc,
            settle_delay_ms,
        }
    }

    /// Takes one averaged reflectance measurement.
    ///
    /// Drives the emitter and detector supply high, waits the settle delay,
    /// then takes [`SAMPLE_COUNT`] readings with a further settle delay
    /// before each one, and powers the pair back down before returning.
    ///
    /// The result is the truncating integer mean of the readings; the
    /// fractional remainder is discarded. Readings of 10, 10, 11 average to
    /// 10, not 10.33; that precision loss is accepted.
    pub fn sample<D: DelayNs>(&mut self, delay: &mut D) -> u16 {
        let _ = self.emitter.set_high();
        let _ = self.power.set_high();

        delay.delay_ms(self.settle_delay_ms);
        let mut sum: u32 = 0;
        for _ in 0..SAMPLE_COUNT {
            delay.delay_ms(self.settle_delay_ms);
            sum += u32::from(self.adc.read());
        }

        let _ = self.emitter.set_low();
        let _ = self.power.set_low();

        (sum / SAMPLE_COUNT) as u16
    }
}
