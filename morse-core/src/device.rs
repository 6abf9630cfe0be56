//! Character-device style front end
//!
//! Writes translate a request, reads hand back the rendering of the latest
//! request with file-position semantics.

use crate::buffer::OUTPUT_CAPACITY;
use crate::hal::{DelayNs, Indicator};
use crate::translator::{ByteSource, DeliveryFault, TranslateError, Translator};

/// Device node name
pub const DEVICE_NAME: &str = "morse-code";

/// Source view that hides one trailing newline
struct Line<S> {
    inner: S,
    len: usize,
}

impl<S: ByteSource> ByteSource for Line<S> {
    fn len(&self) -> usize {
        self.len
    }

    fn read_byte(&mut self, index: usize) -> Result<u8, DeliveryFault> {
        self.inner.read_byte(index)
    }
}

/// Translator exposed through write/read calls
pub struct MorseDevice<I, D, const N: usize = OUTPUT_CAPACITY> {
    translator: Translator<I, D, N>,
}

impl<I, D, const N: usize> MorseDevice<I, D, N>
where
    I: Indicator,
    D: DelayNs,
{
    pub fn new(translator: Translator<I, D, N>) -> Self {
        #[cfg(feature = "defmt")]
        defmt::info!("Morse code device ready at /dev/{=str}", DEVICE_NAME);
        Self { translator }
    }

    pub fn name(&self) -> &'static str {
        DEVICE_NAME
    }

    /// Translate one request.
    ///
    /// A single trailing `\n` ends the line and is not translated. Returns
    /// the full request length on success.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, TranslateError> {
        self.write_from(buf)
    }

    /// Translate a request whose bytes may fail to arrive
    pub fn write_from<S: ByteSource>(&mut self, mut source: S) -> Result<usize, TranslateError> {
        let count = source.len();
        let len = match count.checked_sub(1) {
            Some(last) => match source.read_byte(last) {
                Ok(b'\n') => last,
                Ok(_) => count,
                Err(DeliveryFault) => return Err(TranslateError::InputDelivery { index: last }),
            },
            None => 0,
        };

        self.translator.translate(Line { inner: source, len })?;
        Ok(count)
    }

    /// Copy rendered bytes from `*pos` into `buf`, advancing `*pos`.
    ///
    /// Returns 0 at or past the end of the rendering.
    pub fn read(&self, buf: &mut [u8], pos: &mut usize) -> usize {
        let chunk = self.translator.read_output(*pos, buf.len());
        buf[..chunk.len()].copy_from_slice(chunk);
        *pos += chunk.len();
        chunk.len()
    }

    pub fn translator(&self) -> &Translator<I, D, N> {
        &self.translator
    }
}
