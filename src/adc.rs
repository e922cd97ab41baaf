//! Analog input seam for the reflectance sensor.
//!
//! `embedded-hal` 1.0 carries no one-shot ADC trait, so this crate defines
//! its own narrow contract. HAL crates (or board support crates) implement
//! [`AdcChannel`] for whatever ADC peripheral the sensor output is wired to;
//! host tests implement it with a scripted fake.

/// A single analog input channel read in one-shot, blocking mode.
///
/// The read is infallible: the hardware ADC always produces a conversion
/// result, and out-of-range values are not validated anywhere in this crate.
///
/// # Example
///
/// ```rust
/// use letterbox_sensor::adc::AdcChannel;
///
/// struct FixedAdc(u16);
///
/// impl AdcChannel for FixedAdc {
///     fn read(&mut self) -> u16 {
///         self.0
///     }
/// }
///
/// let mut adc = FixedAdc(512);
/// assert_eq!(adc.read(), 512);
/// ```
pub trait AdcChannel {
    /// Performs one blocking conversion and returns the raw counts.
    fn read(&mut self) -> u16;
}
