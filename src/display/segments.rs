//! Segment encodings for the glyphs the display can render
//!
//! Bits 0-6 map to segments a-g, bit 7 is the decimal point.

pub const DOT: u8 = 0b10000000;
pub const ZERO: u8 = 0b00111111;
pub const ONE: u8 = 0b00000110;
pub const TWO: u8 = 0b01011011;
pub const THREE: u8 = 0b01001111;
pub const FOUR: u8 = 0b01100110;
pub const FIVE: u8 = 0b01101101;
pub const SIX: u8 = 0b01111101;
pub const SEVEN: u8 = 0b00000111;
pub const EIGHT: u8 = 0b01111111;
pub const NINE: u8 = 0b01101111;
pub const HEX_A: u8 = 0b01110111;
pub const HEX_B: u8 = 0b01111100;
pub const HEX_C: u8 = 0b00111001;
pub const HEX_D: u8 = 0b01011110;
pub const HEX_E: u8 = 0b01111001;
pub const HEX_F: u8 = 0b01110001;
pub const BLANK: u8 = 0b00000000;
pub const NEGATIVE: u8 = 0b01000000;
pub const TOP_C: u8 = 0b01100001;
pub const DEGREE: u8 = 0b01100011;

/// Every glyph in the encoding table, indexed by its symbol number
const SEGMENT_TABLE: [u8; 20] = [
    ZERO, ONE, TWO, THREE, FOUR, FIVE, SIX, SEVEN, EIGHT, NINE, HEX_A, HEX_B, HEX_C, HEX_D, HEX_E,
    HEX_F, BLANK, NEGATIVE, TOP_C, DEGREE,
];

/// A glyph from the fixed encoding table
///
/// The discriminant is the glyph's index in the table. Raw indices can be converted with
/// [`Symbol::from_index`], which maps anything outside the table to [`Symbol::Blank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Symbol {
    Zero = 0,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    A,
    B,
    C,
    D,
    E,
    F,
    Blank,
    Minus,
    TopC,
    Degree,
}

impl Symbol {
    const ALL: [Symbol; 20] = [
        Symbol::Zero,
        Symbol::One,
        Symbol::Two,
        Symbol::Three,
        Symbol::Four,
        Symbol::Five,
        Symbol::Six,
        Symbol::Seven,
        Symbol::Eight,
        Symbol::Nine,
        Symbol::A,
        Symbol::B,
        Symbol::C,
        Symbol::D,
        Symbol::E,
        Symbol::F,
        Symbol::Blank,
        Symbol::Minus,
        Symbol::TopC,
        Symbol::Degree,
    ];

    /// Looks up a symbol by its table index, falling back to `Blank` when out of range
    pub fn from_index(index: u8) -> Self {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .unwrap_or(Symbol::Blank)
    }

    /// Symbol for a single decimal digit. Values above 9 become `Blank`.
    pub fn digit(value: u8) -> Self {
        if value <= 9 {
            Self::from_index(value)
        } else {
            Symbol::Blank
        }
    }

    /// The symbol's index in the encoding table
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The 7-segment pattern of the symbol, decimal point cleared
    pub fn segments(self) -> u8 {
        SEGMENT_TABLE[self as usize]
    }
}

impl From<u8> for Symbol {
    fn from(index: u8) -> Self {
        Self::from_index(index)
    }
}
