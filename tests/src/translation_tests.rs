//! Letter table and end-to-end rendering tests

use crate::{capture, capture_with};
use morse_core::hal::mock::{MockDelay, MockIndicator, Trace};
use morse_core::{lookup, MorseDevice, Symbol, TimingConfig, TranslateError, Translator};
use rstest::rstest;

#[rstest]
#[case(b'A', ".-")]
#[case(b'B', "-...")]
#[case(b'C', "-.-.")]
#[case(b'D', "-..")]
#[case(b'E', ".")]
#[case(b'F', "..-.")]
#[case(b'G', "--.")]
#[case(b'H', "....")]
#[case(b'I', "..")]
#[case(b'J', ".---")]
#[case(b'K', "-.-")]
#[case(b'L', ".-..")]
#[case(b'M', "--")]
#[case(b'N', "-.")]
#[case(b'O', "---")]
#[case(b'P', ".--.")]
#[case(b'Q', "--.-")]
#[case(b'R', ".-.")]
#[case(b'S', "...")]
#[case(b'T', "-")]
#[case(b'U', "..-")]
#[case(b'V', "...-")]
#[case(b'W', ".--")]
#[case(b'X', "-..-")]
#[case(b'Y', "-.--")]
#[case(b'Z', "--..")]
fn test_letter_unpacks_to_itu_pattern(#[case] letter: u8, #[case] pattern: &str) {
    let symbols: Vec<Symbol> = lookup(letter).unwrap().symbols().collect();
    let rendered: String = symbols.iter().map(|s| s.mark() as char).collect();
    assert_eq!(rendered, pattern);

    // A lone letter keys exactly its pattern
    let capture = capture(&[letter]);
    assert!(!capture.truncated);
    assert_eq!(capture.text, format!("{} ", pattern));
    let expected_pulses: Vec<u64> = symbols
        .iter()
        .map(|s| if *s == Symbol::Dot { 200 } else { 600 })
        .collect();
    assert_eq!(capture.pulses, expected_pulses);
}

#[rstest]
#[case("SOS", "... --- ... ")]
#[case("sos", "... --- ... ")]
#[case("A B", ".-    -... ")]
#[case("", "")]
#[case("Hello, World!", ".... . .-.. .-.. ---    .-- --- .-. .-.. -.. ")]
#[case("73 de K1ABC", "   -.. .    -.- .- -... -.-. ")]
fn test_rendering(#[case] input: &str, #[case] expected: &str) {
    let capture = capture(input.as_bytes());
    assert_eq!(capture.result, Ok(input.len()));
    assert_eq!(capture.text, expected);
}

#[test]
fn test_sos_keys_three_seconds_of_light() {
    let capture = capture(b"SOS");
    assert_eq!(capture.on_time_ms, 3 * 200 + 3 * 600 + 3 * 200);
    // On-time plus one 200 ms gap per symbol plus the letter and final tails
    assert_eq!(capture.elapsed_ms, 3000 + 9 * 200 + 400 + 400 + 1200);
}

#[test]
fn test_word_gap_only_between_words() {
    let capture = capture(b"A B");
    assert!(!capture.truncated);
    let word_gaps = capture.holds.iter().filter(|&&ms| ms == 1400).count();
    assert_eq!(word_gaps, 1);
    assert_eq!(capture.text.matches("   ").count(), 1);
}

#[test]
fn test_faster_timing_scales_every_hold() {
    let slow = capture(b"PARIS");
    let fast = capture_with(b"PARIS", TimingConfig::from_wpm(12).unwrap());
    assert_eq!(slow.text, fast.text);
    assert!(!slow.truncated && !fast.truncated);
    let scaled: Vec<u32> = fast.holds.iter().map(|ms| ms * 2).collect();
    assert_eq!(slow.holds, scaled);
}

#[test]
fn test_default_buffer_overflow() {
    // Each O renders four bytes; 4095 bytes of text fit
    let input = vec![b'O'; 2000];
    let capture = capture(&input);
    assert_eq!(
        capture.result,
        Err(TranslateError::BufferOverflow { capacity: 4096 })
    );
    assert_eq!(capture.text.len(), 4095);
    assert!(capture.text.ends_with("---"));
    assert!(!capture.lit);

    // The per-hold logs are partial here; the on-time total is not.
    // 1023 full letters plus the dashes of the one that overflowed.
    assert!(capture.truncated);
    assert_eq!(capture.on_time_ms, 1024 * 3 * 600);
}

#[test]
fn test_device_echo_round_trip() {
    let trace = Trace::new();
    let translator: Translator<_, _> =
        Translator::new(MockIndicator::new(&trace), MockDelay::new(&trace));
    let mut device = MorseDevice::new(translator);

    assert_eq!(device.write(b"cq cq\n"), Ok(6));

    let mut rendered = Vec::new();
    let mut pos = 0;
    let mut chunk = [0u8; 3];
    loop {
        let n = device.read(&mut chunk, &mut pos);
        if n == 0 {
            break;
        }
        rendered.extend_from_slice(&chunk[..n]);
    }
    assert_eq!(rendered, b"-.-. --.-    -.-. --.- ");
    assert_eq!(trace.holds().last(), Some(&1200));
}
