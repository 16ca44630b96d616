//! The display buffer and the number formatting that fills it
//!
//! Nothing in here touches the bus. The drivers own a [`SegmentBuffer`], mutate it through the
//! methods below and then send [`SegmentBuffer::frame`] to the chip.

use core::fmt;

use super::segments::{Symbol, DOT, NEGATIVE};

/// Number of digit slots the HT16K33 display RAM provides for a 7-segment display
pub const MAX_DIGITS: usize = 8;
/// Length of a full display RAM write: the start address followed by 8 (pattern, padding) pairs
pub const FRAME_LEN: usize = MAX_DIGITS * 2 + 1;

const DISPLAY_RAM_START: u8 = 0x00;

/// A digit position was outside of the configured digit count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidPosition {
    pub position: u8,
    pub digits: u8,
}

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digit position {} is out of range for a {}-digit display",
            self.position, self.digits
        )
    }
}

impl core::error::Error for InvalidPosition {}

/// What a formatting call ended up putting on the display
///
/// Both outcomes are successful renders as far as the bus is concerned. `Overflow` means the
/// value needed more digits than the display has and every digit shows a dash instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rendered {
    Value,
    Overflow,
}

/// Segment patterns for every digit of the display, leftmost digit first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentBuffer {
    digits: u8,
    segments: [u8; MAX_DIGITS],
}

impl SegmentBuffer {
    /// Creates a blank buffer. The digit count is clamped into `1..=8`.
    pub fn new(digits: u8) -> Self {
        Self {
            digits: digits.clamp(1, MAX_DIGITS as u8),
            segments: [0; MAX_DIGITS],
        }
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    pub fn segments(&self) -> &[u8; MAX_DIGITS] {
        &self.segments
    }

    /// Blanks every digit
    pub fn clear(&mut self) {
        self.segments = [0; MAX_DIGITS];
    }

    /// Stores the pattern of `symbol` at `position`, with the decimal point lit when `dot` is set
    pub fn set_digit(
        &mut self,
        position: u8,
        symbol: Symbol,
        dot: bool,
    ) -> Result<(), InvalidPosition> {
        let mut pattern = symbol.segments();
        if dot {
            pattern |= DOT;
        }
        self.set_segments(position, pattern)
    }

    /// Stores a raw segment pattern at `position` without any transformation
    pub fn set_segments(&mut self, position: u8, pattern: u8) -> Result<(), InvalidPosition> {
        if position >= self.digits {
            return Err(InvalidPosition {
                position,
                digits: self.digits,
            });
        }
        self.segments[usize::from(position)] = pattern;
        Ok(())
    }

    /// Puts a dash on every digit. Used when a value does not fit.
    pub fn fill_dashes(&mut self) {
        self.active_mut().fill(NEGATIVE);
    }

    /// Lays out `value` right-aligned with `decimal_places` fractional digits and an optional
    /// trailing `annotation` glyph
    ///
    /// `Symbol::Blank` as annotation means none. The number of decimal places is reduced so that
    /// at least one integer digit (and the annotation, if any) always has room. A value that
    /// still does not fit, or that is not finite, fills the display with dashes.
    pub fn render_number(
        &mut self,
        value: f64,
        decimal_places: u8,
        annotation: Symbol,
    ) -> Rendered {
        let annotation = (annotation != Symbol::Blank).then_some(annotation);
        let decimal_places = self.clamp_decimal_places(decimal_places, annotation.is_some());

        let layout = match NumberLayout::new(value, decimal_places, annotation) {
            Some(layout) if layout.width() <= u32::from(self.digits) => layout,
            _ => {
                self.fill_dashes();
                return Rendered::Overflow;
            }
        };

        self.clear();
        self.draw(&layout);
        Rendered::Value
    }

    /// Whether a temperature with `decimal_places` fits next to a trailing degree glyph
    ///
    /// The decimal point is counted as a digit of its own here, so this is stricter than the
    /// check [`SegmentBuffer::render_number`] makes.
    pub fn temperature_fits(&self, temperature: f64, decimal_places: u8) -> bool {
        if !temperature.is_finite() {
            return false;
        }
        let negative = temperature < 0.0;
        let magnitude = if negative { -temperature } else { temperature };
        let width = decimal_digits(magnitude as u64)
            + u32::from(decimal_places)
            + u32::from(decimal_places > 0)
            + 1
            + u32::from(negative);
        width <= u32::from(self.digits)
    }

    /// Overwrites the last digit with the degree glyph, decimal point off
    pub fn mark_degree(&mut self) {
        let last = usize::from(self.digits) - 1;
        self.segments[last] = Symbol::Degree.segments();
    }

    /// Serializes the buffer into a display RAM write
    ///
    /// All 8 digit slots are always sent. Each slot's pattern is followed by a zero byte since the
    /// chip's RAM has two bytes per common line and 7-segment displays only wire up the first.
    pub fn frame(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0; FRAME_LEN];
        frame[0] = DISPLAY_RAM_START;
        for (slot, pattern) in frame[1..].chunks_exact_mut(2).zip(self.segments) {
            slot[0] = pattern;
        }
        frame
    }

    fn active_mut(&mut self) -> &mut [u8] {
        &mut self.segments[..usize::from(self.digits)]
    }

    fn clamp_decimal_places(&self, decimal_places: u8, annotated: bool) -> u8 {
        let available = (self.digits - 1).saturating_sub(u8::from(annotated));
        decimal_places.min(available)
    }

    fn draw(&mut self, layout: &NumberLayout) {
        let mut position = usize::from(self.digits) - layout.width() as usize;

        if layout.negative {
            self.segments[position] = NEGATIVE;
            position += 1;
        }

        let integer_end = position + usize::from(layout.integer_digits);
        write_decimal(&mut self.segments[position..integer_end], layout.integer);
        position = integer_end;

        if layout.decimal_places > 0 {
            self.segments[position - 1] |= DOT;
            let fraction_end = position + usize::from(layout.decimal_places);
            write_decimal(&mut self.segments[position..fraction_end], layout.fraction);
            position = fraction_end;
        }

        if let Some(annotation) = layout.annotation {
            self.segments[position] = annotation.segments();
        }
    }
}

/// A number split into the pieces that get drawn
#[derive(Debug)]
struct NumberLayout {
    negative: bool,
    integer: u64,
    integer_digits: u8,
    fraction: u64,
    decimal_places: u8,
    annotation: Option<Symbol>,
}

impl NumberLayout {
    fn new(value: f64, decimal_places: u8, annotation: Option<Symbol>) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let negative = value < 0.0;
        let magnitude = if negative { -value } else { value };

        let mut integer = magnitude as u64;
        let mut fraction = 0;
        if decimal_places > 0 {
            let scale = 10_u64.pow(u32::from(decimal_places));
            // Round half-up. A fraction that rounds up to a whole carries into the integer part.
            fraction = ((magnitude - integer as f64) * scale as f64 + 0.5) as u64;
            if fraction >= scale {
                integer = integer.saturating_add(1);
                fraction -= scale;
            }
        }

        Some(Self {
            negative,
            integer,
            integer_digits: decimal_digits(integer) as u8,
            fraction,
            decimal_places,
            annotation,
        })
    }

    fn width(&self) -> u32 {
        u32::from(self.integer_digits)
            + u32::from(self.decimal_places)
            + u32::from(self.negative)
            + u32::from(self.annotation.is_some())
    }
}

/// Number of decimal digits needed to print `value`; zero takes one
fn decimal_digits(mut value: u64) -> u32 {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Fills `slots` with the decimal digits of `value`, most significant first, zero-padded
fn write_decimal(slots: &mut [u8], mut value: u64) {
    for slot in slots.iter_mut().rev() {
        *slot = Symbol::digit((value % 10) as u8).segments();
        value /= 10;
    }
}
