//! Module related to drivers for driving a 7-segment display with the HT16K33 chip. The most
//! common setup that uses the HT16K33 is Adafruit's 0.56" 7-segment display backpack which uses
//! the HT16K33 to provide I2C communication from microcontrollers to the display.
//!
//! The module contains two variants, a synchronous driver and an asynchronous driver. Both keep
//! a local copy of the display RAM (see [`SegmentBuffer`]); formatting calls render into it and
//! then flush the whole buffer in one I2C write.
//!
//! Bus errors are returned as the I2C implementation's own error type and are never retried.
//! Timeouts are whatever the I2C peripheral was configured with.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c as SyncI2c;
use embedded_hal_async::i2c::I2c as AsyncI2c;

use super::buffer::{InvalidPosition, Rendered, SegmentBuffer, MAX_DIGITS};
use super::segments::Symbol;
use crate::initalization::{
    InitializationError, InitializationState, Initialized, Uninitalized,
};

/// 7-bit I2C address of the HT16K33 with all address pins left floating
pub const HT16K33_ADDRESS: u8 = 0x70;
pub const MAX_BRIGHTNESS: u8 = 0xf;
pub const DEFAULT_BRIGHTNESS: u8 = MAX_BRIGHTNESS;
/// Temperatures are shown with at most this many decimal places
pub const MAX_TEMPERATURE_PLACES: u8 = 2;

const HT16K33_DISPLAY_ON: u8 = 0x01;

#[derive(Debug, Clone, Copy)]
#[repr(u8)]
enum HT16K33Commands {
    OscillatorOn = 0x21,
    DisplaySetup = 0x80,
    SetBrightness = 0xE0,
}

/// Blink rates supported by the HT16K33
///
/// The discriminant is the value of the chip's two blink bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BlinkRate {
    Off = 0,
    /// 2Hz blink (1 period every 1/2 second)
    Fast,
    /// 1Hz blink (1 period every second)
    Medium,
    /// 1/2Hz blink (1 period every 2 seconds)
    Slow,
}

impl BlinkRate {
    /// Converts the numeric blink modes used by callers that pass raw values
    ///
    /// - 0: blink off
    /// - 1: 2Hz blink
    /// - 2: 1Hz blink
    ///
    /// Anything higher is treated as off.
    pub fn from_raw(mode: u8) -> Self {
        match mode {
            1 => BlinkRate::Fast,
            2 => BlinkRate::Medium,
            _ => BlinkRate::Off,
        }
    }

    fn command(self) -> u8 {
        HT16K33Commands::DisplaySetup as u8 | HT16K33_DISPLAY_ON | ((self as u8) << 1)
    }
}

/// What the display was last asked to show
///
/// Purely informational, the driver never acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Integer,
    Float,
    Raw,
}

impl DisplayMode {
    fn for_places(decimal_places: u8) -> Self {
        if decimal_places == 0 {
            DisplayMode::Integer
        } else {
            DisplayMode::Float
        }
    }
}

/// A synchronous driver for the HT16K33 driving a 7-segment display. Can be used with any I2C
/// interface that implements the `embedded_hal::i2c::I2c` trait.
pub struct SyncI2C7SegDisplay<T: SyncI2c, S: InitializationState = Uninitalized> {
    tx: T,
    buffer: SegmentBuffer,
    brightness: u8,
    mode: DisplayMode,
    state: PhantomData<S>,
}

impl<T: SyncI2c> SyncI2C7SegDisplay<T, Uninitalized> {
    /// Creates a new synchronous driver instance for a display with `digits` digits
    ///
    /// The digit count is clamped into `1..=8`. In order to use the display, the driver needs to
    /// send initialization commands which can be achieved by calling `initialize()`.
    pub fn new(tx: T, digits: u8) -> Self {
        Self {
            tx,
            buffer: SegmentBuffer::new(digits),
            brightness: DEFAULT_BRIGHTNESS,
            mode: DisplayMode::Integer,
            state: PhantomData,
        }
    }

    /// Initializes the HT16K33 IC chip
    ///
    /// Upon initialization, commands are sent to turn on the HT16K33's oscillator, turn on
    /// the display without blinking, apply the stored brightness, and clear the display. The
    /// first failing command stops the sequence and the driver is handed back with the error.
    pub fn initialize(
        mut self,
    ) -> Result<SyncI2C7SegDisplay<T, Initialized>, InitializationError<Self, T::Error>> {
        match self.bring_up() {
            Ok(()) => Ok(self.into_state()),
            Err(error) => Err(InitializationError {
                driver: self,
                error,
            }),
        }
    }

    fn bring_up(&mut self) -> Result<(), T::Error> {
        self.write_command(HT16K33Commands::OscillatorOn as u8)?;
        self.write_command(BlinkRate::Off.command())?;
        self.apply_brightness(self.brightness)?;
        self.buffer.clear();
        self.flush()
    }
}

impl<T: SyncI2c, S: InitializationState> SyncI2C7SegDisplay<T, S> {
    /// Gives back the I2C interface
    pub fn release(self) -> T {
        self.tx
    }

    pub fn digits(&self) -> u8 {
        self.buffer.digits()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The local copy of the display RAM, leftmost digit first
    pub fn buffer(&self) -> &[u8; MAX_DIGITS] {
        self.buffer.segments()
    }

    /// Places a symbol in the buffer at `position`, optionally with its decimal point lit
    ///
    /// Raw `u8` symbol indices are accepted; anything outside the encoding table shows as blank.
    /// Nothing is sent until `write_display()`.
    pub fn set_digit(
        &mut self,
        position: u8,
        symbol: impl Into<Symbol>,
        dot: bool,
    ) -> Result<(), InvalidPosition> {
        self.buffer.set_digit(position, symbol.into(), dot)
    }

    /// Places a raw segment pattern in the buffer at `position`
    ///
    /// Nothing is sent until `write_display()`.
    pub fn set_segments(&mut self, position: u8, segments: u8) -> Result<(), InvalidPosition> {
        self.buffer.set_segments(position, segments)?;
        self.mode = DisplayMode::Raw;
        Ok(())
    }

    fn apply_brightness(&mut self, brightness: u8) -> Result<(), T::Error> {
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self.write_command(HT16K33Commands::SetBrightness as u8 | self.brightness)
    }

    fn write_command(&mut self, command: u8) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ht16k33 command {=u8:#x}", command);
        self.tx.write(HT16K33_ADDRESS, &[command])
    }

    fn flush(&mut self) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ht16k33 write {=[u8]:x}", &self.buffer.segments()[..]);
        self.tx.write(HT16K33_ADDRESS, &self.buffer.frame())
    }

    fn into_state<N: InitializationState>(self) -> SyncI2C7SegDisplay<T, N> {
        SyncI2C7SegDisplay {
            tx: self.tx,
            buffer: self.buffer,
            brightness: self.brightness,
            mode: self.mode,
            state: PhantomData,
        }
    }
}

impl<T: SyncI2c> SyncI2C7SegDisplay<T, Initialized> {
    /// Clears the display
    ///
    /// Blanks the buffer and sends it to the HT16K33 IC, turning off all segments and lights.
    pub fn clear(&mut self) -> Result<(), T::Error> {
        self.buffer.clear();
        self.flush()
    }

    /// Sets the brightness of the display
    ///
    /// Acceptable brightness values is a range from [0, 15]. Anything higher than 15 will be
    /// interpreted as a brightness of 15. The new level is remembered even if the write fails.
    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), T::Error> {
        self.apply_brightness(brightness)
    }

    /// Sets the blinkrate of the display
    ///
    /// The oscillator is switched on again first in case something turned it off. That write is
    /// best-effort: its failure is ignored and only the result of the blink command is returned.
    pub fn set_blink(&mut self, blinkrate: BlinkRate) -> Result<(), T::Error> {
        if self
            .write_command(HT16K33Commands::OscillatorOn as u8)
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("ht16k33 oscillator re-enable failed, setting blink anyway");
        }
        self.write_command(blinkrate.command())
    }

    /// Sends the buffer to the display
    ///
    /// All 8 digit slots are written regardless of the digit count.
    pub fn write_display(&mut self) -> Result<(), T::Error> {
        self.flush()
    }

    /// Shows an integer right-aligned on the display
    pub fn display_integer(&mut self, number: i32) -> Result<Rendered, T::Error> {
        self.display_number(f64::from(number), 0, Symbol::Blank)
    }

    /// Shows a float right-aligned with `decimal_places` fractional digits
    pub fn display_float(&mut self, number: f32, decimal_places: u8) -> Result<Rendered, T::Error> {
        self.display_number(f64::from(number), decimal_places, Symbol::Blank)
    }

    /// Shows a number right-aligned with `decimal_places` fractional digits, followed by
    /// `annotation` in the last digit unless it is `Symbol::Blank`
    ///
    /// The fractional part is rounded half-up. The number of decimal places is reduced to what
    /// the display can hold next to one integer digit and the annotation. If the number still
    /// does not fit, every digit shows a dash and `Rendered::Overflow` is returned.
    pub fn display_number(
        &mut self,
        number: f64,
        decimal_places: u8,
        annotation: Symbol,
    ) -> Result<Rendered, T::Error> {
        self.mode = DisplayMode::for_places(decimal_places);
        let rendered = self.buffer.render_number(number, decimal_places, annotation);
        #[cfg(feature = "defmt")]
        if rendered == Rendered::Overflow {
            defmt::debug!("ht16k33 value does not fit in {=u8} digits", self.buffer.digits());
        }
        self.flush()?;
        Ok(rendered)
    }

    /// Shows a temperature with at most 2 decimal places and a degree glyph in the last digit
    ///
    /// The number is flushed first, then the degree glyph replaces whatever ended up in the last
    /// digit and the buffer is flushed a second time.
    pub fn display_temperature(
        &mut self,
        temperature: f32,
        decimal_places: u8,
    ) -> Result<Rendered, T::Error> {
        let decimal_places = decimal_places.min(MAX_TEMPERATURE_PLACES);
        let temperature = f64::from(temperature);
        if !self.buffer.temperature_fits(temperature, decimal_places) {
            self.buffer.fill_dashes();
            self.flush()?;
            return Ok(Rendered::Overflow);
        }

        let rendered = self.display_number(temperature, decimal_places, Symbol::Blank)?;
        self.buffer.mark_degree();
        self.flush()?;
        Ok(rendered)
    }
}

/// An asynchronous driver for the HT16K33 driving a 7-segment display. Can be used with any I2C
/// interface that implements the `embedded_hal_async::i2c::I2c` trait.
pub struct AsyncI2C7SegDisplay<T: AsyncI2c, S: InitializationState = Uninitalized> {
    tx: T,
    buffer: SegmentBuffer,
    brightness: u8,
    mode: DisplayMode,
    state: PhantomData<S>,
}

impl<T: AsyncI2c> AsyncI2C7SegDisplay<T, Uninitalized> {
    /// Creates a new asynchronous driver instance for a display with `digits` digits
    ///
    /// The digit count is clamped into `1..=8`. In order to use the display, the driver needs to
    /// send initialization commands which can be achieved by calling `initialize()`.
    pub fn new(tx: T, digits: u8) -> Self {
        Self {
            tx,
            buffer: SegmentBuffer::new(digits),
            brightness: DEFAULT_BRIGHTNESS,
            mode: DisplayMode::Integer,
            state: PhantomData,
        }
    }

    /// Initializes the HT16K33 IC chip
    ///
    /// Upon initialization, commands are sent to turn on the HT16K33's oscillator, turn on
    /// the display without blinking, apply the stored brightness, and clear the display. The
    /// first failing command stops the sequence and the driver is handed back with the error.
    pub async fn initialize(
        mut self,
    ) -> Result<AsyncI2C7SegDisplay<T, Initialized>, InitializationError<Self, T::Error>> {
        match self.bring_up().await {
            Ok(()) => Ok(self.into_state()),
            Err(error) => Err(InitializationError {
                driver: self,
                error,
            }),
        }
    }

    async fn bring_up(&mut self) -> Result<(), T::Error> {
        self.write_command(HT16K33Commands::OscillatorOn as u8)
            .await?;
        self.write_command(BlinkRate::Off.command()).await?;
        self.apply_brightness(self.brightness).await?;
        self.buffer.clear();
        self.flush().await
    }
}

impl<T: AsyncI2c, S: InitializationState> AsyncI2C7SegDisplay<T, S> {
    /// Gives back the I2C interface
    pub fn release(self) -> T {
        self.tx
    }

    pub fn digits(&self) -> u8 {
        self.buffer.digits()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The local copy of the display RAM, leftmost digit first
    pub fn buffer(&self) -> &[u8; MAX_DIGITS] {
        self.buffer.segments()
    }

    /// Places a symbol in the buffer at `position`, optionally with its decimal point lit
    ///
    /// Raw `u8` symbol indices are accepted; anything outside the encoding table shows as blank.
    /// Nothing is sent until `write_display()`.
    pub fn set_digit(
        &mut self,
        position: u8,
        symbol: impl Into<Symbol>,
        dot: bool,
    ) -> Result<(), InvalidPosition> {
        self.buffer.set_digit(position, symbol.into(), dot)
    }

    /// Places a raw segment pattern in the buffer at `position`
    ///
    /// Nothing is sent until `write_display()`.
    pub fn set_segments(&mut self, position: u8, segments: u8) -> Result<(), InvalidPosition> {
        self.buffer.set_segments(position, segments)?;
        self.mode = DisplayMode::Raw;
        Ok(())
    }

    async fn apply_brightness(&mut self, brightness: u8) -> Result<(), T::Error> {
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self.write_command(HT16K33Commands::SetBrightness as u8 | self.brightness)
            .await
    }

    async fn write_command(&mut self, command: u8) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ht16k33 command {=u8:#x}", command);
        self.tx.write(HT16K33_ADDRESS, &[command]).await
    }

    async fn flush(&mut self) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ht16k33 write {=[u8]:x}", &self.buffer.segments()[..]);
        let frame = self.buffer.frame();
        self.tx.write(HT16K33_ADDRESS, &frame).await
    }

    fn into_state<N: InitializationState>(self) -> AsyncI2C7SegDisplay<T, N> {
        AsyncI2C7SegDisplay {
            tx: self.tx,
            buffer: self.buffer,
            brightness: self.brightness,
            mode: self.mode,
            state: PhantomData,
        }
    }
}

impl<T: AsyncI2c> AsyncI2C7SegDisplay<T, Initialized> {
    /// Clears the display
    ///
    /// Blanks the buffer and sends it to the HT16K33 IC, turning off all segments and lights.
    pub async fn clear(&mut self) -> Result<(), T::Error> {
        self.buffer.clear();
        self.flush().await
    }

    /// Sets the brightness of the display
    ///
    /// Acceptable brightness values is a range from [0, 15]. Anything higher than 15 will be
    /// interpreted as a brightness of 15. The new level is remembered even if the write fails.
    pub async fn set_brightness(&mut self, brightness: u8) -> Result<(), T::Error> {
        self.apply_brightness(brightness).await
    }

    /// Sets the blinkrate of the display
    ///
    /// The oscillator is switched on again first in case something turned it off. That write is
    /// best-effort: its failure is ignored and only the result of the blink command is returned.
    pub async fn set_blink(&mut self, blinkrate: BlinkRate) -> Result<(), T::Error> {
        if self
            .write_command(HT16K33Commands::OscillatorOn as u8)
            .await
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("ht16k33 oscillator re-enable failed, setting blink anyway");
        }
        self.write_command(blinkrate.command()).await
    }

    /// Sends the buffer to the display
    ///
    /// All 8 digit slots are written regardless of the digit count.
    pub async fn write_display(&mut self) -> Result<(), T::Error> {
        self.flush().await
    }

    /// Shows an integer right-aligned on the display
    pub async fn display_integer(&mut self, number: i32) -> Result<Rendered, T::Error> {
        self.display_number(f64::from(number), 0, Symbol::Blank)
            .await
    }

    /// Shows a float right-aligned with `decimal_places` fractional digits
    pub async fn display_float(
        &mut self,
        number: f32,
        decimal_places: u8,
    ) -> Result<Rendered, T::Error> {
        self.display_number(f64::from(number), decimal_places, Symbol::Blank)
            .await
    }

    /// Shows a number right-aligned with `decimal_places` fractional digits, followed by
    /// `annotation` in the last digit unless it is `Symbol::Blank`
    ///
    /// See [`SyncI2C7SegDisplay::display_number`].
    pub async fn display_number(
        &mut self,
        number: f64,
        decimal_places: u8,
        annotation: Symbol,
    ) -> Result<Rendered, T::Error> {
        self.mode = DisplayMode::for_places(decimal_places);
        let rendered = self.buffer.render_number(number, decimal_places, annotation);
        #[cfg(feature = "defmt")]
        if rendered == Rendered::Overflow {
            defmt::debug!("ht16k33 value does not fit in {=u8} digits", self.buffer.digits());
        }
        self.flush().await?;
        Ok(rendered)
    }

    /// Shows a temperature with at most 2 decimal places and a degree glyph in the last digit
    ///
    /// See [`SyncI2C7SegDisplay::display_temperature`].
    pub async fn display_temperature(
        &mut self,
        temperature: f32,
        decimal_places: u8,
    ) -> Result<Rendered, T::Error> {
        let decimal_places = decimal_places.min(MAX_TEMPERATURE_PLACES);
        let temperature = f64::from(temperature);
        if !self.buffer.temperature_fits(temperature, decimal_places) {
            self.buffer.fill_dashes();
            self.flush().await?;
            return Ok(Rendered::Overflow);
        }

        let rendered = self
            .display_number(temperature, decimal_places, Symbol::Blank)
            .await?;
        self.buffer.mark_degree();
        self.flush().await?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::segments::{
        DEGREE, DOT, EIGHT, FIVE, FOUR, NEGATIVE, ONE, SEVEN, THREE, TWO, ZERO,
    };

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::vec;
    use std::vec::Vec;

    const ADDR: u8 = HT16K33_ADDRESS;

    fn command(byte: u8) -> I2cTransaction {
        I2cTransaction::write(ADDR, vec![byte])
    }

    fn frame(digits: [u8; 8]) -> I2cTransaction {
        let mut bytes = Vec::with_capacity(17);
        bytes.push(0x00);
        for digit in digits {
            bytes.push(digit);
            bytes.push(0x00);
        }
        I2cTransaction::write(ADDR, bytes)
    }

    fn init_transactions() -> Vec<I2cTransaction> {
        vec![
            command(0x21),
            command(0x81),
            command(0xEF),
            frame([0; 8]),
        ]
    }

    fn initialized(
        digits: u8,
        expectations: &[I2cTransaction],
    ) -> SyncI2C7SegDisplay<I2cMock, Initialized> {
        let mut transactions = init_transactions();
        transactions.extend_from_slice(expectations);
        let i2c = I2cMock::new(&transactions);
        SyncI2C7SegDisplay::new(i2c, digits)
            .initialize()
            .expect("initialization")
    }

    #[test]
    fn initialize_brings_up_chip() {
        let display = initialized(4, &[]);
        assert_eq!(display.digits(), 4);
        assert_eq!(display.brightness(), 15);
        assert_eq!(display.mode(), DisplayMode::Integer);
        assert_eq!(display.buffer(), &[0; 8]);
        display.release().done();
    }

    #[test]
    fn initialize_stops_at_first_failure() {
        let i2c = I2cMock::new(&[
            command(0x21),
            command(0x81).with_error(ErrorKind::Other),
        ]);
        let Err(err) = SyncI2C7SegDisplay::new(i2c, 4).initialize() else {
            panic!("initialization should fail");
        };
        assert_eq!(err.error, ErrorKind::Other);
        err.driver.release().done();
    }

    #[test]
    fn digit_count_is_clamped() {
        let display = initialized(12, &[]);
        assert_eq!(display.digits(), 8);
        display.release().done();
    }

    #[test]
    fn brightness_is_clamped() {
        let mut display = initialized(4, &[command(0xE3), command(0xEF)]);
        display.set_brightness(3).unwrap();
        assert_eq!(display.brightness(), 3);
        display.set_brightness(200).unwrap();
        assert_eq!(display.brightness(), 15);
        display.release().done();
    }

    #[test]
    fn brightness_is_stored_when_write_fails() {
        let mut display = initialized(4, &[command(0xE7).with_error(ErrorKind::Bus)]);
        assert_eq!(display.set_brightness(7), Err(ErrorKind::Bus));
        assert_eq!(display.brightness(), 7);
        display.release().done();
    }

    #[test]
    fn blink_commands() {
        let mut display = initialized(
            4,
            &[
                command(0x21),
                command(0x83),
                command(0x21),
                command(0x85),
                command(0x21),
                command(0x87),
                command(0x21),
                command(0x81),
            ],
        );
        display.set_blink(BlinkRate::Fast).unwrap();
        display.set_blink(BlinkRate::Medium).unwrap();
        display.set_blink(BlinkRate::Slow).unwrap();
        display.set_blink(BlinkRate::from_raw(9)).unwrap();
        display.release().done();
    }

    #[test]
    fn blink_ignores_oscillator_failure() {
        let mut display = initialized(
            4,
            &[
                command(0x21).with_error(ErrorKind::Other),
                command(0x83),
                command(0x21),
                command(0x85).with_error(ErrorKind::Bus),
            ],
        );
        assert_eq!(display.set_blink(BlinkRate::Fast), Ok(()));
        assert_eq!(display.set_blink(BlinkRate::Medium), Err(ErrorKind::Bus));
        display.release().done();
    }

    #[test]
    fn raw_blink_modes() {
        assert_eq!(BlinkRate::from_raw(0), BlinkRate::Off);
        assert_eq!(BlinkRate::from_raw(1), BlinkRate::Fast);
        assert_eq!(BlinkRate::from_raw(2), BlinkRate::Medium);
        assert_eq!(BlinkRate::from_raw(3), BlinkRate::Off);
    }

    #[test]
    fn write_display_sends_all_slots() {
        let mut display = initialized(2, &[frame([ONE | DOT, 0x7f, 0, 0, 0, 0, 0, 0])]);
        display.set_digit(0, 1u8, true).unwrap();
        display.set_segments(1, 0x7f).unwrap();
        assert_eq!(display.mode(), DisplayMode::Raw);
        display.write_display().unwrap();
        display.release().done();
    }

    #[test]
    fn buffer_mutators_reject_out_of_range_positions() {
        let mut display = initialized(4, &[]);
        display.set_digit(3, Symbol::A, false).unwrap();
        assert_eq!(
            display.set_digit(4, Symbol::B, false),
            Err(InvalidPosition {
                position: 4,
                digits: 4
            })
        );
        assert!(display.set_segments(4, 0xff).is_err());
        assert_eq!(display.mode(), DisplayMode::Integer);
        assert_eq!(display.buffer(), &[0, 0, 0, Symbol::A.segments(), 0, 0, 0, 0]);
        display.release().done();
    }

    #[test]
    fn clear_blanks_display() {
        let mut display = initialized(4, &[frame([0; 8])]);
        display.set_digit(0, Symbol::Eight, true).unwrap();
        display.clear().unwrap();
        assert_eq!(display.buffer(), &[0; 8]);
        display.release().done();
    }

    #[test]
    fn display_integer_right_aligns() {
        let mut display = initialized(
            8,
            &[
                frame([0, 0, 0, 0, NEGATIVE, ONE, TWO, THREE]),
                frame([0, 0, 0, 0, 0, 0, 0, ZERO]),
            ],
        );
        assert_eq!(display.display_integer(-123), Ok(Rendered::Value));
        assert_eq!(display.display_integer(0), Ok(Rendered::Value));
        display.release().done();
    }

    #[test]
    fn display_float_places_dot() {
        let mut display = initialized(8, &[frame([0, 0, 0, 0, 0, THREE | DOT, ONE, FOUR])]);
        assert_eq!(display.display_float(3.14, 2), Ok(Rendered::Value));
        assert_eq!(display.mode(), DisplayMode::Float);
        display.release().done();
    }

    #[test]
    fn display_number_with_annotation() {
        let c = Symbol::C.segments();
        let mut display = initialized(4, &[frame([TWO, SEVEN | DOT, FIVE, c, 0, 0, 0, 0])]);
        assert_eq!(
            display.display_number(27.5, 1, Symbol::C),
            Ok(Rendered::Value)
        );
        display.release().done();
    }

    #[test]
    fn overflow_renders_dashes() {
        let dashes = [NEGATIVE, NEGATIVE, NEGATIVE, NEGATIVE, 0, 0, 0, 0];
        let mut display = initialized(4, &[frame(dashes)]);
        assert_eq!(display.display_integer(12345), Ok(Rendered::Overflow));
        display.release().done();
    }

    #[test]
    fn display_number_propagates_bus_error() {
        let mut display = initialized(
            4,
            &[I2cTransaction::write(ADDR, {
                let mut bytes = vec![0x00; 17];
                bytes[7] = EIGHT;
                bytes
            })
            .with_error(ErrorKind::Other)],
        );
        assert_eq!(display.display_integer(8), Err(ErrorKind::Other));
        display.release().done();
    }

    #[test]
    fn temperature_flushes_twice() {
        let mut display = initialized(
            8,
            &[
                frame([0, 0, 0, 0, 0, TWO, FIVE | DOT, FIVE]),
                frame([0, 0, 0, 0, 0, TWO, FIVE | DOT, DEGREE]),
            ],
        );
        assert_eq!(display.display_temperature(25.5, 1), Ok(Rendered::Value));
        assert_eq!(display.buffer()[7] & DOT, 0);
        display.release().done();
    }

    #[test]
    fn temperature_places_are_capped() {
        let mut display = initialized(
            8,
            &[
                frame([0, 0, 0, 0, 0, ONE | DOT, TWO, FIVE]),
                frame([0, 0, 0, 0, 0, ONE | DOT, TWO, DEGREE]),
            ],
        );
        assert_eq!(display.display_temperature(1.25, 5), Ok(Rendered::Value));
        display.release().done();
    }

    #[test]
    fn temperature_too_wide_renders_dashes_once() {
        let dashes = [NEGATIVE, NEGATIVE, NEGATIVE, NEGATIVE, 0, 0, 0, 0];
        let mut display = initialized(4, &[frame(dashes)]);
        assert_eq!(display.display_temperature(-12.5, 1), Ok(Rendered::Overflow));
        display.release().done();
    }

    #[test]
    fn temperature_stops_after_failed_first_flush() {
        let mut display = initialized(
            4,
            &[I2cTransaction::write(ADDR, {
                let mut bytes = vec![0x00; 17];
                bytes[7] = SEVEN;
                bytes
            })
            .with_error(ErrorKind::Bus)],
        );
        assert_eq!(display.display_temperature(7.0, 0), Err(ErrorKind::Bus));
        display.release().done();
    }

    #[tokio::test]
    async fn async_driver_mirrors_sync_driver() {
        let mut transactions = init_transactions();
        transactions.extend([
            command(0xE4),
            command(0x21),
            command(0x83),
            frame([0, 0, 0, 0, 0, 0, NEGATIVE, SEVEN]),
            frame([0, 0, 0, 0, 0, 0, 0, 0]),
        ]);
        let i2c = I2cMock::new(&transactions);
        let mut display = AsyncI2C7SegDisplay::new(i2c, 8)
            .initialize()
            .await
            .expect("initialization");
        display.set_brightness(4).await.unwrap();
        display.set_blink(BlinkRate::Fast).await.unwrap();
        assert_eq!(display.display_integer(-7).await, Ok(Rendered::Value));
        display.clear().await.unwrap();
        display.release().done();
    }

    #[tokio::test]
    async fn async_initialize_failure_returns_driver() {
        let i2c = I2cMock::new(&[command(0x21).with_error(ErrorKind::Other)]);
        let Err(err) = AsyncI2C7SegDisplay::new(i2c, 4).initialize().await else {
            panic!("initialization should fail");
        };
        assert_eq!(err.error, ErrorKind::Other);
        err.driver.release().done();
    }

    #[tokio::test]
    async fn async_temperature_flushes_twice() {
        let mut transactions = init_transactions();
        transactions.extend([
            frame([0, 0, 0, 0, 0, 0, TWO, ONE]),
            frame([0, 0, 0, 0, 0, 0, TWO, DEGREE]),
        ]);
        let i2c = I2cMock::new(&transactions);
        let mut display = AsyncI2C7SegDisplay::new(i2c, 8)
            .initialize()
            .await
            .expect("initialization");
        assert_eq!(display.display_temperature(21.0, 0).await, Ok(Rendered::Value));
        display.release().done();
    }
}
