//! Core data types for the Morse translator

use crate::hal::Duration;
use crate::unpack::Unpacker;

/// Morse code symbols
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Short pulse
    Dot,
    /// Long pulse
    Dash,
}

impl Symbol {
    /// Character appended to the textual rendering
    pub const fn mark(&self) -> u8 {
        match self {
            Symbol::Dot => b'.',
            Symbol::Dash => b'-',
        }
    }

    /// Number of bit positions this symbol occupies in a packed code
    pub const fn bit_width(&self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
        }
    }
}

/// Packed 16-bit Morse code for one letter.
///
/// The pattern is left-aligned: a dot is a single `1`, a dash is `111`, and
/// consecutive symbols are separated by a single `0`. Unused trailing bits are
/// zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MorseCode(u16);

impl MorseCode {
    /// Width of a packed code in bits
    pub const BITS: u32 = u16::BITS;

    /// Wrap a raw bit pattern
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bit pattern
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Lazily decode the symbols of this code
    pub fn symbols(&self) -> Unpacker {
        Unpacker::new(*self)
    }

    /// Pack a symbol sequence into its left-aligned bit pattern.
    ///
    /// Returns `None` for an empty sequence or one that does not fit in
    /// [`MorseCode::BITS`] bits.
    pub fn pack(symbols: &[Symbol]) -> Option<Self> {
        if symbols.is_empty() {
            return None;
        }

        let mut bits: u32 = 0;
        let mut width: u32 = 0;
        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                // separator
                bits <<= 1;
                width += 1;
            }
            let run = symbol.bit_width();
            bits = (bits << run) | ((1 << run) - 1);
            width += run;
            if width > Self::BITS {
                return None;
            }
        }

        Some(Self((bits << (Self::BITS - width)) as u16))
    }
}

/// Indicator timing parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Indicator on-time for a dot
    pub dot: Duration,
    /// Indicator on-time for a dash
    pub dash: Duration,
    /// Off-time following every symbol
    pub gap: Duration,
    /// Total off-time between letters, including the symbol gap
    pub letter_gap: Duration,
    /// Total off-time between words, including the symbol gap
    pub word_gap: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::from_unit(Duration::from_millis(DEFAULT_UNIT_MS))
    }
}

/// Default timing unit: 200 ms dots, 6 WPM
pub const DEFAULT_UNIT_MS: u64 = 200;

impl TimingConfig {
    /// Create a new configuration with validation
    pub fn new(
        dot: Duration,
        dash: Duration,
        gap: Duration,
        letter_gap: Duration,
        word_gap: Duration,
    ) -> Result<Self, &'static str> {
        if dot.as_millis() == 0 || gap.as_millis() == 0 {
            return Err("Dot and gap must be at least 1ms");
        }
        if dash <= dot {
            return Err("Dash must be longer than dot");
        }
        if letter_gap < gap {
            return Err("Letter gap must include the symbol gap");
        }
        if word_gap < letter_gap {
            return Err("Word gap must be at least the letter gap");
        }
        if dash.as_millis() > u32::MAX as u64 || word_gap.as_millis() > u32::MAX as u64 {
            return Err("Holds must fit the millisecond delay range");
        }

        Ok(Self {
            dot,
            dash,
            gap,
            letter_gap,
            word_gap,
        })
    }

    /// Standard ratios: dot 1, dash 3, gap 1, letter gap 3, word gap 7 units
    pub fn from_unit(unit: Duration) -> Self {
        Self {
            dot: unit,
            dash: unit * 3,
            gap: unit,
            letter_gap: unit * 3,
            word_gap: unit * 7,
        }
    }

    /// Standard timing for a keying speed (PARIS standard: 50 units per word)
    pub fn from_wpm(wpm: u32) -> Result<Self, &'static str> {
        if wpm == 0 || wpm > 100 {
            return Err("WPM must be between 1 and 100");
        }
        Ok(Self::from_unit(Duration::from_millis(1200 / wpm as u64)))
    }

    /// Get Words Per Minute from the dot duration
    pub fn wpm(&self) -> u32 {
        let dot_ms = self.dot.as_millis().max(1);
        (1200 / dot_ms).max(1) as u32
    }

    /// Indicator on-time for a symbol
    pub fn on_time(&self, symbol: Symbol) -> Duration {
        match symbol {
            Symbol::Dot => self.dot,
            Symbol::Dash => self.dash,
        }
    }

    /// Extra off-time after a letter that is followed by another letter
    pub fn letter_tail(&self) -> Duration {
        self.letter_gap
            .checked_sub(self.gap)
            .unwrap_or(Duration::from_millis(0))
    }

    /// Extra off-time after the final letter of a request
    pub fn word_tail(&self) -> Duration {
        self.word_gap
            .checked_sub(self.gap)
            .unwrap_or(Duration::from_millis(0))
    }
}
