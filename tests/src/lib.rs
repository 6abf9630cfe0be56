//! Host-side harness for morse-core
//!
//! Runs translations against the mock indicator and virtual clock and
//! flattens the results into std types for assertions.

use morse_core::hal::mock::{MockDelay, MockIndicator, Trace};
use morse_core::{TimingConfig, TranslateError, Translator};

#[cfg(test)]
mod translation_tests;
#[cfg(test)]
mod async_tests;

/// Everything observable about one translation job
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub result: Result<usize, TranslateError>,
    pub text: String,
    pub holds: Vec<u32>,
    pub pulses: Vec<u64>,
    pub on_time_ms: u64,
    pub elapsed_ms: u64,
    /// Indicator level when the job returned
    pub lit: bool,
    /// `holds` and `pulses` are partial
    pub truncated: bool,
}

impl Capture {
    fn collect(result: Result<usize, TranslateError>, text: &[u8], trace: &Trace) -> Self {
        Self {
            result,
            text: String::from_utf8_lossy(text).into_owned(),
            holds: trace.holds().to_vec(),
            pulses: trace.pulses_ms().to_vec(),
            on_time_ms: trace.on_time_ms(),
            elapsed_ms: trace.now_ms(),
            lit: trace.is_lit(),
            truncated: trace.truncated(),
        }
    }
}

/// Translate `input` with default timing
pub fn capture(input: &[u8]) -> Capture {
    capture_with(input, TimingConfig::default())
}

/// Translate `input` with the given timing
pub fn capture_with(input: &[u8], timing: TimingConfig) -> Capture {
    let trace = Trace::new();
    let mut translator: Translator<_, _> =
        Translator::with_timing(MockIndicator::new(&trace), MockDelay::new(&trace), timing);
    let result = translator.translate(input);
    Capture::collect(result, translator.output().as_bytes(), &trace)
}

/// Translate `input` through the async path with default timing
pub async fn capture_async(input: &[u8]) -> Capture {
    let trace = Trace::new();
    let mut translator: Translator<_, _> =
        Translator::new(MockIndicator::new(&trace), MockDelay::new(&trace));
    let result = translator.translate_async(input).await;
    Capture::collect(result, translator.output().as_bytes(), &trace)
}
