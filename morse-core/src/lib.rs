#![cfg_attr(not(feature = "std"), no_std)]

//! # Morse Core
//!
//! Text to Morse code translation for embedded systems.
//! Keys an on/off indicator with dot/dash/gap timing and keeps a textual
//! rendering of the most recent translation.

pub mod types;
pub mod table;
pub mod unpack;
pub mod sequencer;
pub mod buffer;
pub mod translator;
pub mod device;
pub mod hal;


pub use types::*;
pub use table::lookup;
pub use unpack::{unpack, Unpacker};
pub use sequencer::{sequence, Pulses, Step};
pub use buffer::{BufferFull, OutputBuffer, OUTPUT_CAPACITY};
pub use translator::*;
pub use device::{MorseDevice, DEVICE_NAME};
pub use hal::{DelayNs, Duration, EmbeddedHalIndicator, HalError, Indicator};

/// Morse core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timing: 200 ms dots, 600 ms dashes, 1400 ms word gaps
pub fn default_timing() -> TimingConfig {
    TimingConfig::default()
}
