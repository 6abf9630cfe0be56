//! Packed code decoding
//!
//! A [`MorseCode`] is scanned from the most significant bit down. Leading
//! zeros are skipped, a set bit followed by two more set bits is a dash
//! (consuming all three), any other set bit is a dot, and zero bits between
//! symbols are separators. Decoding ends once no set bits remain.

use crate::types::{MorseCode, Symbol};

/// Lazy symbol iterator over one packed code
#[derive(Clone, Debug)]
pub struct Unpacker {
    bits: u16,
    /// Bit positions not yet scanned, counted from the top
    remaining: u32,
}

impl Unpacker {
    /// Start decoding `code` at its most significant bit
    pub const fn new(code: MorseCode) -> Self {
        Self {
            bits: code.bits(),
            remaining: MorseCode::BITS,
        }
    }

    /// Read the bit at `position` (0 = least significant)
    fn bit(&self, position: u32) -> bool {
        (self.bits >> position) & 1 == 1
    }

    /// Whether any set bit remains at or below `position`
    fn has_set_bits_through(&self, position: u32) -> bool {
        let mask = if position + 1 >= MorseCode::BITS {
            u16::MAX
        } else {
            (1u16 << (position + 1)) - 1
        };
        self.bits & mask != 0
    }
}

impl Iterator for Unpacker {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        while self.remaining > 0 {
            let position = self.remaining - 1;
            if !self.has_set_bits_through(position) {
                self.remaining = 0;
                return None;
            }
            if !self.bit(position) {
                self.remaining -= 1;
                continue;
            }

            // Lookahead is bounded by the bits left below this one
            let dash = position >= 2 && self.bit(position - 1) && self.bit(position - 2);
            let symbol = if dash { Symbol::Dash } else { Symbol::Dot };
            self.remaining -= symbol.bit_width();
            return Some(symbol);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every symbol consumes at least one bit
        (0, Some(self.remaining as usize))
    }
}

impl core::iter::FusedIterator for Unpacker {}

/// Decode a packed code into its symbols
pub fn unpack(code: MorseCode) -> Unpacker {
    Unpacker::new(code)
}
