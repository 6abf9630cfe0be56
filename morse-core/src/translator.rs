//! Text to Morse translation driver
//!
//! [`Translator`] owns the indicator, the delay and the output buffer. Each
//! call to [`Translator::translate`] resets the buffer, then walks the input:
//! letters are keyed through the [`sequencer`](crate::sequencer), a space
//! renders as three spaces plus a word gap, and any other byte is skipped.

use crate::buffer::{OutputBuffer, OUTPUT_CAPACITY};
use crate::hal::{DelayNs, Duration, Indicator};
use crate::sequencer::{sequence, Pulses, Step};
use crate::table::lookup;
use crate::types::TimingConfig;
use crate::unpack::Unpacker;

/// Rendered after every letter
const LETTER_SEPARATOR: &[u8] = b" ";
/// Rendered for a space in the input
const WORD_SEPARATOR: &[u8] = b"   ";

/// A byte could not be obtained from its source
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeliveryFault;

/// Input of one translation job.
///
/// Mirrors a user-space copy: the length is known up front, but any single
/// byte may fail to arrive.
pub trait ByteSource {
    /// Number of bytes in the request
    fn len(&self) -> usize;

    /// Fetch the byte at `index`
    fn read_byte(&mut self, index: usize) -> Result<u8, DeliveryFault>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for &[u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_byte(&mut self, index: usize) -> Result<u8, DeliveryFault> {
        self.get(index).copied().ok_or(DeliveryFault)
    }
}

impl<const L: usize> ByteSource for &[u8; L] {
    fn len(&self) -> usize {
        L
    }

    fn read_byte(&mut self, index: usize) -> Result<u8, DeliveryFault> {
        self.get(index).copied().ok_or(DeliveryFault)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn read_byte(&mut self, index: usize) -> Result<u8, DeliveryFault> {
        (**self).read_byte(index)
    }
}

/// Translation failures
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TranslateError {
    /// The input byte at `index` could not be delivered
    InputDelivery { index: usize },
    /// The rendering outgrew the output buffer
    BufferOverflow { capacity: usize },
}

#[cfg(feature = "std")]
impl core::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TranslateError::InputDelivery { index } => {
                write!(f, "Input byte {} could not be delivered", index)
            }
            TranslateError::BufferOverflow { capacity } => {
                write!(f, "Rendering exceeds the {} byte output buffer", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TranslateError {}

/// What one input byte turns into
enum Job {
    Letter(Pulses<Unpacker>),
    WordGap,
    Skip,
}

impl Job {
    fn classify(byte: u8, is_last: bool, timing: &TimingConfig) -> Self {
        if byte == b' ' {
            Job::WordGap
        } else if let Some(code) = lookup(byte) {
            Job::Letter(sequence(code.symbols(), is_last, timing))
        } else {
            Job::Skip
        }
    }
}

/// Number of bytes `input` renders to when fully delivered
pub fn rendered_len(input: &[u8]) -> usize {
    input
        .iter()
        .map(|&byte| {
            if byte == b' ' {
                WORD_SEPARATOR.len()
            } else if let Some(code) = lookup(byte) {
                code.symbols().count() + LETTER_SEPARATOR.len()
            } else {
                0
            }
        })
        .sum()
}

fn delay_millis(hold: Duration) -> u32 {
    hold.as_millis().min(u32::MAX as u64) as u32
}

/// Morse translator driving one indicator
pub struct Translator<I, D, const N: usize = OUTPUT_CAPACITY> {
    indicator: I,
    delay: D,
    timing: TimingConfig,
    output: OutputBuffer<N>,
}

impl<I, D, const N: usize> Translator<I, D, N>
where
    I: Indicator,
{
    /// Create a translator with the default 200 ms unit
    pub fn new(indicator: I, delay: D) -> Self {
        Self::with_timing(indicator, delay, TimingConfig::default())
    }

    pub fn with_timing(indicator: I, delay: D, timing: TimingConfig) -> Self {
        Self {
            indicator,
            delay,
            timing,
            output: OutputBuffer::new(),
        }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Takes effect from the next job
    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.timing = timing;
    }

    /// Rendering of the most recent job
    pub fn output(&self) -> &OutputBuffer<N> {
        &self.output
    }

    /// Up to `max_len` rendered bytes starting at `offset`
    pub fn read_output(&self, offset: usize, max_len: usize) -> &[u8] {
        self.output.read_at(offset, max_len)
    }

    fn begin(&mut self, len: usize) {
        #[cfg(feature = "defmt")]
        defmt::info!("Translating {=usize} bytes to morse code", len);
        #[cfg(not(feature = "defmt"))]
        let _ = len;

        self.output.reset();
    }

    fn finish(&mut self, len: usize) -> usize {
        self.output.terminate();
        #[cfg(feature = "defmt")]
        defmt::debug!("Rendered {=usize} bytes", self.output.len());
        len
    }

    /// Leave the indicator dark and the partial rendering readable
    fn abort(&mut self, error: TranslateError) -> TranslateError {
        #[cfg(feature = "defmt")]
        defmt::warn!("Translation aborted: {}", error);

        self.indicator.set_state(false).ok();
        self.output.terminate();
        error
    }

    fn read(&mut self, input: &mut impl ByteSource, index: usize) -> Result<u8, TranslateError> {
        match input.read_byte(index) {
            Ok(byte) => Ok(byte),
            Err(DeliveryFault) => Err(self.abort(TranslateError::InputDelivery { index })),
        }
    }

    fn emit(&mut self, text: &[u8]) -> Result<(), TranslateError> {
        match self.output.extend_from_slice(text) {
            Ok(()) => Ok(()),
            Err(_) => Err(self.abort(TranslateError::BufferOverflow { capacity: N })),
        }
    }

    /// Apply a step's indicator and buffer effects; returns its hold
    fn render(&mut self, step: Step) -> Result<Duration, TranslateError> {
        match step {
            Step::KeyDown(hold) => {
                self.indicator.set_state(true).ok();
                Ok(hold)
            }
            Step::KeyUp { mark, hold } => {
                self.emit(&[mark])?;
                self.indicator.set_state(false).ok();
                Ok(hold)
            }
            Step::Pause(hold) => Ok(hold),
        }
    }
}

impl<I, D, const N: usize> Translator<I, D, N>
where
    I: Indicator,
    D: DelayNs,
{
    /// Key `input` on the indicator and render it into the output buffer.
    ///
    /// Blocks for the full keying time. Returns the number of bytes consumed.
    pub fn translate<S: ByteSource>(&mut self, mut input: S) -> Result<usize, TranslateError> {
        let len = input.len();
        self.begin(len);

        for index in 0..len {
            let byte = self.read(&mut input, index)?;
            let is_last = index + 1 == len;

            match Job::classify(byte, is_last, &self.timing) {
                Job::Letter(pulses) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Keying {}", byte as char);

                    for step in pulses {
                        let hold = self.render(step)?;
                        self.delay.delay_ms(delay_millis(hold));
                    }
                    self.emit(LETTER_SEPARATOR)?;
                }
                Job::WordGap => {
                    self.emit(WORD_SEPARATOR)?;
                    self.delay.delay_ms(delay_millis(self.timing.word_gap));
                }
                Job::Skip => {}
            }
        }

        Ok(self.finish(len))
    }
}

#[cfg(feature = "async")]
impl<I, D, const N: usize> Translator<I, D, N>
where
    I: Indicator,
    D: embedded_hal_async::delay::DelayNs,
{
    /// Same as [`Translator::translate`], awaiting each hold instead of
    /// blocking on it
    pub async fn translate_async<S: ByteSource>(
        &mut self,
        mut input: S,
    ) -> Result<usize, TranslateError> {
        use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

        let len = input.len();
        self.begin(len);

        for index in 0..len {
            let byte = self.read(&mut input, index)?;
            let is_last = index + 1 == len;

            match Job::classify(byte, is_last, &self.timing) {
                Job::Letter(pulses) => {
                    for step in pulses {
                        let hold = self.render(step)?;
                        AsyncDelayNs::delay_ms(&mut self.delay, delay_millis(hold)).await;
                    }
                    self.emit(LETTER_SEPARATOR)?;
                }
                Job::WordGap => {
                    self.emit(WORD_SEPARATOR)?;
                    let gap = delay_millis(self.timing.word_gap);
                    AsyncDelayNs::delay_ms(&mut self.delay, gap).await;
                }
                Job::Skip => {}
            }
        }

        Ok(self.finish(len))
    }
}
