//! Letter to packed Morse code table

use crate::types::MorseCode;

/// Packed codes for `A` through `Z`
pub const CODES: [MorseCode; 26] = [
    MorseCode::from_bits(0xB800), // A .-
    MorseCode::from_bits(0xEA80), // B -...
    MorseCode::from_bits(0xEBA0), // C -.-.
    MorseCode::from_bits(0xEA00), // D -..
    MorseCode::from_bits(0x8000), // E .
    MorseCode::from_bits(0xAE80), // F ..-.
    MorseCode::from_bits(0xEE80), // G --.
    MorseCode::from_bits(0xAA00), // H ....
    MorseCode::from_bits(0xA000), // I ..
    MorseCode::from_bits(0xBBB8), // J .---
    MorseCode::from_bits(0xEB80), // K -.-
    MorseCode::from_bits(0xBA80), // L .-..
    MorseCode::from_bits(0xEE00), // M --
    MorseCode::from_bits(0xE800), // N -.
    MorseCode::from_bits(0xEEE0), // O ---
    MorseCode::from_bits(0xBBA0), // P .--.
    MorseCode::from_bits(0xEEB8), // Q --.-
    MorseCode::from_bits(0xBA00), // R .-.
    MorseCode::from_bits(0xA800), // S ...
    MorseCode::from_bits(0xE000), // T -
    MorseCode::from_bits(0xAE00), // U ..-
    MorseCode::from_bits(0xAB80), // V ...-
    MorseCode::from_bits(0xBB80), // W .--
    MorseCode::from_bits(0xEAE0), // X -..-
    MorseCode::from_bits(0xEBB8), // Y -.--
    MorseCode::from_bits(0xEEA0), // Z --..
];

/// Look up the code for an ASCII letter, ignoring case.
///
/// Returns `None` for anything outside `A..=Z` / `a..=z`.
pub fn lookup(letter: u8) -> Option<MorseCode> {
    if letter.is_ascii_alphabetic() {
        Some(CODES[(letter.to_ascii_uppercase() - b'A') as usize])
    } else {
        None
    }
}
