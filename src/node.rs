//! Duty-cycled sensor node: the deployed firmware variant.
//!
//! This module provides the [`SensorNode`] struct, which ties the IR sampler,
//! the radio link, and the sleep driver together into the wake cycle the
//! deployed device runs forever:
//!
//! ```text
//! Sleeping -> CheckAction -> SampleAndTransmit -> RearmSleep -> Sleeping
//!                 |                                   ^
//!                 +----------- gate closed -----------+
//! ```
//!
//! The watchdog wakes the device roughly once a second, but the action gate
//! only opens once the configured sleep duration has elapsed; most wakes go
//! straight back to sleep. When the gate opens, the node measures, builds the
//! 7-byte uplink, hands it to the radio with the current frame counter, and
//! bumps the counter on success.
//!
//! ## Failure semantics
//!
//! The link is fire-and-forget. A rejected uplink is reported as
//! [`NodeError::Transmit`] and then forgotten: the frame counter does not
//! advance, nothing is retried, and the cycle re-arms sleep as usual. If the
//! deployment ever needs delivery guarantees, the two highest-value hardening
//! points are transmit acknowledgment with retry and range validation of the
//! ADC reading; both can be layered on top of the existing [`Radio`] and
//! [`AdcChannel`] contracts without changing them.

use crate::adc::AdcChannel;
use crate::config::SensorConfig;
use crate::detect::letter_present;
use crate::payload::UplinkPayload;
use crate::radio::{Radio, SessionKeys};
use crate::sensor::IrSensor;
use crate::sleep::SleepControl;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use thiserror::Error;

/// High-level state machine for the `SensorNode`, representing its position
/// in the wake cycle.
///
/// The state is updated at key transitions and is mainly useful for
/// inspection from tests and debuggers; between `service()` calls the node
/// always reads as [`Sleeping`](NodeState::Sleeping).
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum NodeState {
    ///   Parked in low-power sleep, waiting for the next watchdog wake.
    #[default]
    Sleeping,
    ///   Awake, deciding whether the action interval has elapsed.
    CheckAction,
    ///   Measuring reflectance and handing an uplink to the radio.
    SampleAndTransmit,
    ///   Re-applying the sleep duration before going back to sleep.
    RearmSleep,
}

/// What one wake cycle did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum CycleOutcome {
    ///   The action gate was closed; the node went straight back to sleep
    ///   without sampling or transmitting.
    Idle,
    ///   The node sampled, built this payload, and the radio accepted it.
    Sent(UplinkPayload),
}

/// Errors surfaced by the node.
///
/// `E` is the radio stack's own error type. The node never retries on error;
/// callers that want a retry policy can match on the variant and re-drive
/// the cycle themselves.
#[derive(Debug, Error)]
pub enum NodeError<E: Debug> {
    /// The radio stack failed to initialise during setup.
    #[error("radio initialisation failed: {0:?}")]
    RadioInit(E),
    /// The radio rejected an uplink. The frame counter did not advance and
    /// the frame is dropped.
    #[error("uplink transmission failed: {0:?}")]
    Transmit(E),
}

/// The deployed letterbox sensor node.
///
/// Owns the sampler, the status LED, the radio, the sleep driver, and the
/// only state that survives across wake cycles: the uplink frame counter.
/// Everything else is recomputed from scratch inside each cycle.
///
/// ## Type Parameters
///
/// - `EMIT`, `PWR`: output pins of the IR pair (see [`IrSensor`])
/// - `LED`: status LED output pin
/// - `ADC`: analog channel wired to the detector output
/// - `R`: the LoRaWAN radio stack
/// - `S`: the sleep/wake driver
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// use letterbox_sensor::adc::AdcChannel;
/// use letterbox_sensor::config::SensorConfig;
/// use letterbox_sensor::node::{CycleOutcome, SensorNode};
/// use letterbox_sensor::radio::{Radio, SessionKeys};
/// use letterbox_sensor::sensor::IrSensor;
/// use letterbox_sensor::sleep::SleepControl;
///
/// # struct FixedAdc(u16);
/// # impl AdcChannel for FixedAdc {
/// #     fn read(&mut self) -> u16 {
/// #         self.0
/// #     }
/// # }
/// # struct OkRadio;
/// # impl Radio for OkRadio {
/// #     type Error = core::convert::Infallible;
/// #     fn init(&mut self) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// #     fn set_keys(&mut self, _keys: &SessionKeys) {}
/// #     fn send_data(&mut self, _payload: &[u8; 7], _fcnt: u16) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// #     fn read_temperature(&mut self) -> u8 {
/// #         20
/// #     }
/// # }
/// # struct AlwaysDue;
/// # impl SleepControl for AlwaysDue {
/// #     fn set_sleep_duration(&mut self, _ticks: u16) {}
/// #     fn go_to_sleep(&mut self) {}
/// #     fn action_due(&mut self) -> bool {
/// #         true
/// #     }
/// #     fn read_voltage(&mut self) -> u16 {
/// #         3000
/// #     }
/// # }
/// # let emitter = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// # let power = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// # let status_led = Pin::new(&[PinTransaction::set(PinState::High), PinTransaction::set(PinState::Low)]);
/// let sensor = IrSensor::new(emitter, power, FixedAdc(45), 25);
/// let mut node = SensorNode::new(sensor, status_led, OkRadio, AlwaysDue, SensorConfig::deployed());
/// let mut delay = NoopDelay::new();
///
/// let keys = SessionKeys::new([0; 16], [0; 16], [0; 4]);
/// node.init(&mut delay, &keys).unwrap();
///
/// match node.service(&mut delay).unwrap() {
///     CycleOutcome::Sent(payload) => assert!(payload.letter_present()),
///     CycleOutcome::Idle => unreachable!(),
/// }
/// assert_eq!(node.frame_counter, 1);
/// # node.sensor.emitter.done();
/// # node.sensor.power.done();
/// # node.status_led.done();
/// ```
#[derive(Debug)]
pub struct SensorNode<EMIT, PWR, LED, ADC, R, S>
where
    EMIT: OutputPin,
    PWR: OutputPin,
    LED: OutputPin,
    ADC: AdcChannel,
    R: Radio,
    S: SleepControl,
{
    /// Current position in the wake cycle.
    pub state: NodeState,
    /// The IR reflectance sampler.
    pub sensor: IrSensor<EMIT, PWR, ADC>,
    /// Status LED, blinked once during [`init`](SensorNode::init).
    pub status_led: LED,
    /// The LoRaWAN radio stack.
    pub radio: R,
    /// The sleep/wake driver.
    pub sleep: S,
    /// Uplink sequence number.
    ///
    /// Starts at 0 at boot, advances by exactly 1 per accepted transmit,
    /// wraps at 0xFFFF, and is never persisted: a power cycle resets it.
    /// Only the transmit path writes it.
    pub frame_counter: u16,
    config: SensorConfig,
}

impl<EMIT, PWR, LED, ADC, R, S> SensorNode<EMIT, PWR, LED, ADC, R, S>
where
    EMIT: OutputPin,
    PWR: OutputPin,
    LED: OutputPin,
    ADC: AdcChannel,
    R: Radio,
    S: SleepControl,
{
    /// Assembles a node from its collaborators.
    ///
    /// Nothing touches the hardware yet; call [`init`](SensorNode::init)
    /// before the first [`service`](SensorNode::service).
    pub fn new(
        sensor: IrSensor<EMIT, PWR, ADC>,
        status_led: LED,
        radio: R,
        sleep: S,
        config: SensorConfig,
    ) -> Self {
        Self {
            state: NodeState::default(),
            sensor,
            status_led,
            radio,
            sleep,
            frame_counter: 0,
            config,
        }
    }

    /// The configuration this node runs with.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// One-time setup: sleep duration, radio bring-up, session keys, and a
    /// single short status blink.
    ///
    /// Leaves the node in [`NodeState::Sleeping`], ready for the service
    /// loop.
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
        keys: &SessionKeys,
    ) -> Result<(), NodeError<R::Error>> {
        self.sleep.set_sleep_duration(self.config.sleep_ticks);
        self.radio.init().map_err(NodeError::RadioInit)?;
        self.radio.set_keys(keys);

        let _ = self.status_led.set_high();
        delay.delay_ms(self.config.status_blink_ms);
        let _ = self.status_led.set_low();

        self.state = NodeState::Sleeping;
        Ok(())
    }

    /// Runs one full wake cycle and blocks in sleep until the next wake.
    ///
    /// If the sleep driver reports the action interval has elapsed, the node
    /// samples, builds a fresh payload, and transmits it with the current
    /// frame counter; otherwise it goes straight back to sleep. In either
    /// case the sleep duration is re-applied before sleeping; the
    /// re-assignment is idempotent but keeps the driver's setting
    /// authoritative every cycle.
    ///
    /// Returns after `go_to_sleep()` returns, i.e. on the next wake.
    pub fn service<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<CycleOutcome, NodeError<R::Error>> {
        self.state = NodeState::CheckAction;
        let outcome = if self.sleep.action_due() {
            self.state = NodeState::SampleAndTransmit;
            let measurement = self.sensor.sample(delay);
            let letter = letter_present(measurement, self.config.threshold);
            let voltage = self.sleep.read_voltage();
            let temperature = self.radio.read_temperature();
            let payload = UplinkPayload::new(
                letter,
                voltage,
                measurement,
                self.config.threshold,
                temperature,
            );

            #[cfg(feature = "log")]
            log::debug!(
                "uplink {}: measurement={} letter={} voltage={}mV",
                self.frame_counter,
                measurement,
                letter,
                voltage
            );

            match self.radio.send_data(payload.as_bytes(), self.frame_counter) {
                Ok(()) => {
                    self.frame_counter = self.frame_counter.wrapping_add(1);
                    Ok(CycleOutcome::Sent(payload))
                }
                Err(err) => Err(NodeError::Transmit(err)),
            }
        } else {
            Ok(CycleOutcome::Idle)
        };

        // The cycle always re-arms and sleeps, even after a failed transmit.
        self.state = NodeState::RearmSleep;
        self.sleep.set_sleep_duration(self.config.sleep_ticks);
        self.state = NodeState::Sleeping;
        self.sleep.go_to_sleep();

        outcome
    }

    /// Runs the wake cycle forever.
    ///
    /// Transmit failures are dropped on the floor, matching the
    /// fire-and-forget link semantics. Use [`service`](SensorNode::service)
    /// directly to observe outcomes.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        loop {
            let _ = self.service(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::UPLINK_LEN;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::vec::Vec;

    struct FixedAdc(u16);

    impl AdcChannel for FixedAdc {
        fn read(&mut self) -> u16 {
            self.0
        }
    }

    #[derive(Debug)]
    struct TxRejected;

    struct FakeRadio {
        inits: u32,
        keys: Option<SessionKeys>,
        sent: Vec<([u8; UPLINK_LEN], u16)>,
        reject: bool,
        temperature: u8,
    }

    impl FakeRadio {
        fn new() -> Self {
            Self {
                inits: 0,
                keys: None,
                sent: Vec::new(),
                reject: false,
                temperature: 20,
            }
        }
    }

    impl Radio for FakeRadio {
        type Error = TxRejected;

        fn init(&mut self) -> Result<(), Self::Error> {
            self.inits += 1;
            Ok(())
        }

        fn set_keys(&mut self, keys: &SessionKeys) {
            self.keys = Some(*keys);
        }

        fn send_data(
            &mut self,
            payload: &[u8; UPLINK_LEN],
            frame_counter: u16,
        ) -> Result<(), Self::Error> {
            if self.reject {
                return Err(TxRejected);
            }
            self.sent.push((*payload, frame_counter));
            Ok(())
        }

        fn read_temperature(&mut self) -> u8 {
            self.temperature
        }
    }

    struct FakeSleep {
        due_script: Vec<bool>,
        next_due: usize,
        durations: Vec<u16>,
        sleeps: u32,
        voltage: u16,
    }

    impl FakeSleep {
        fn new(due_script: &[bool]) -> Self {
            Self {
                due_script: due_script.to_vec(),
                next_due: 0,
                durations: Vec::new(),
                sleeps: 0,
                voltage: 3000,
            }
        }
    }

    impl SleepControl for FakeSleep {
        fn set_sleep_duration(&mut self, ticks: u16) {
            self.durations.push(ticks);
        }

        fn go_to_sleep(&mut self) {
            self.sleeps += 1;
        }

        fn action_due(&mut self) -> bool {
            let due = self.due_script.get(self.next_due).copied().unwrap_or(false);
            self.next_due += 1;
            due
        }

        fn read_voltage(&mut self) -> u16 {
            self.voltage
        }
    }

    fn pulsed_pin() -> PinMock {
        PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ])
    }

    fn idle_pin() -> PinMock {
        PinMock::new(&[])
    }

    fn release(mut node: SensorNode<PinMock, PinMock, PinMock, FixedAdc, FakeRadio, FakeSleep>) {
        node.sensor.emitter.done();
        node.sensor.power.done();
        node.status_led.done();
    }

    #[test]
    fn test_init_brings_up_radio_keys_and_blink() {
        let sensor = IrSensor::new(idle_pin(), idle_pin(), FixedAdc(0), 25);
        let mut node = SensorNode::new(
            sensor,
            pulsed_pin(),
            FakeRadio::new(),
            FakeSleep::new(&[]),
            SensorConfig::deployed(),
        );
        let mut delay = NoopDelay::new();
        let keys = SessionKeys::new([0xA5; 16], [0x5A; 16], [1, 2, 3, 4]);

        node.init(&mut delay, &keys).unwrap();

        assert_eq!(node.radio.inits, 1);
        assert_eq!(node.radio.keys, Some(keys));
        assert_eq!(node.sleep.durations, [1800]);
        assert_eq!(node.state, NodeState::Sleeping);
        release(node);
    }

    #[test]
    fn test_transmit_happens_only_when_the_gate_opens() {
        let sensor = IrSensor::new(pulsed_pin(), pulsed_pin(), FixedAdc(45), 25);
        let mut node = SensorNode::new(
            sensor,
            idle_pin(),
            FakeRadio::new(),
            FakeSleep::new(&[false, false, false, true]),
            SensorConfig::deployed(),
        );
        let mut delay = NoopDelay::new();

        for _ in 0..3 {
            assert_eq!(node.service(&mut delay).unwrap(), CycleOutcome::Idle);
        }
        assert!(node.radio.sent.is_empty());
        assert_eq!(node.frame_counter, 0);

        match node.service(&mut delay).unwrap() {
            CycleOutcome::Sent(payload) => assert!(payload.letter_present()),
            CycleOutcome::Idle => panic!("gate should have opened on the fourth wake"),
        }

        assert_eq!(node.radio.sent.len(), 1);
        assert_eq!(node.radio.sent[0].1, 0);
        assert_eq!(node.frame_counter, 1);
        // Every cycle slept and re-armed, transmitting or not.
        assert_eq!(node.sleep.sleeps, 4);
        assert_eq!(node.sleep.durations, [1800, 1800, 1800, 1800]);
        release(node);
    }

    #[test]
    fn test_uplink_carries_the_cycle_measurements() {
        let sensor = IrSensor::new(pulsed_pin(), pulsed_pin(), FixedAdc(45), 25);
        let mut sleep = FakeSleep::new(&[true]);
        sleep.voltage = 300;
        let mut node = SensorNode::new(
            sensor,
            idle_pin(),
            FakeRadio::new(),
            sleep,
            SensorConfig::deployed(),
        );
        let mut delay = NoopDelay::new();

        let _ = node.service(&mut delay).unwrap();

        let (bytes, frame_counter) = node.radio.sent[0];
        assert_eq!(bytes, [0xFF, 0x2C, 0x01, 0x2D, 0x00, 30, 20]);
        assert_eq!(frame_counter, 0);
        release(node);
    }

    #[test]
    fn test_rejected_uplink_keeps_the_frame_counter() {
        let sensor = IrSensor::new(pulsed_pin(), pulsed_pin(), FixedAdc(45), 25);
        let mut radio = FakeRadio::new();
        radio.reject = true;
        let mut node = SensorNode::new(
            sensor,
            idle_pin(),
            radio,
            FakeSleep::new(&[true]),
            SensorConfig::deployed(),
        );
        let mut delay = NoopDelay::new();

        assert!(matches!(
            node.service(&mut delay),
            Err(NodeError::Transmit(TxRejected))
        ));
        assert_eq!(node.frame_counter, 0);
        // The failed cycle still re-arms sleep and parks the node.
        assert_eq!(node.sleep.sleeps, 1);
        assert_eq!(node.sleep.durations, [1800]);
        assert_eq!(node.state, NodeState::Sleeping);
        release(node);
    }

    #[test]
    fn test_frame_counter_wraps_at_the_type_boundary() {
        let sensor = IrSensor::new(pulsed_pin(), pulsed_pin(), FixedAdc(45), 25);
        let mut node = SensorNode::new(
            sensor,
            idle_pin(),
            FakeRadio::new(),
            FakeSleep::new(&[true]),
            SensorConfig::deployed(),
        );
        node.frame_counter = u16::MAX;
        let mut delay = NoopDelay::new();

        let _ = node.service(&mut delay).unwrap();

        assert_eq!(node.radio.sent[0].1, u16::MAX);
        assert_eq!(node.frame_counter, 0);
        release(node);
    }

    #[test]
    fn test_counter_advances_once_per_accepted_transmit() {
        let pulses = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let sensor = IrSensor::new(PinMock::new(&pulses), PinMock::new(&pulses), FixedAdc(45), 25);
        let mut node = SensorNode::new(
            sensor,
            idle_pin(),
            FakeRadio::new(),
            FakeSleep::new(&[true, true, true]),
            SensorConfig::deployed(),
        );
        let mut delay = NoopDelay::new();

        for expected in 0..3u16 {
            let _ = node.service(&mut delay).unwrap();
            assert_eq!(node.radio.sent[expected as usize].1, expected);
        }
        assert_eq!(node.frame_counter, 3);
        release(node);
    }
}
