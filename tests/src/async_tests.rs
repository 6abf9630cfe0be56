//! Async translation path against the same mock clock

use crate::{capture, capture_async};
use morse_core::hal::mock::{MockDelay, MockIndicator, Trace};
use morse_core::{TranslateError, Translator};

#[tokio::test]
async fn test_async_sos_matches_blocking() {
    let blocking = capture(b"SOS");
    let awaited = capture_async(b"SOS").await;

    assert_eq!(awaited, blocking);
    assert_eq!(awaited.text, "... --- ... ");
    assert_eq!(awaited.elapsed_ms, 6800);
}

#[test]
fn test_async_word_gap() {
    let capture = tokio_test::block_on(capture_async(b"A B"));
    assert_eq!(capture.result, Ok(3));
    assert_eq!(capture.text, ".-    -... ");
    assert_eq!(capture.holds.iter().filter(|&&ms| ms == 1400).count(), 1);
}

#[tokio::test]
async fn test_async_overflow_leaves_indicator_dark() {
    let trace = Trace::new();
    let mut translator: Translator<_, _, 6> =
        Translator::new(MockIndicator::new(&trace), MockDelay::new(&trace));

    let result = translator.translate_async(b"SOS").await;
    assert_eq!(result, Err(TranslateError::BufferOverflow { capacity: 6 }));
    assert_eq!(translator.output().as_bytes(), b"... -");
    assert!(!trace.is_lit());
}
