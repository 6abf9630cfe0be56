//! Symbol to timed indicator step conversion

use crate::hal::Duration;
use crate::types::{Symbol, TimingConfig};

/// One timed action against the indicator
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Light the indicator, then hold
    KeyDown(Duration),
    /// Append `mark` to the rendering, darken the indicator, then hold
    KeyUp { mark: u8, hold: Duration },
    /// Hold with the indicator left dark
    Pause(Duration),
}

impl Step {
    /// How long the step holds its indicator state
    pub fn hold(&self) -> Duration {
        match *self {
            Step::KeyDown(hold) | Step::Pause(hold) => hold,
            Step::KeyUp { hold, .. } => hold,
        }
    }

    /// Indicator level this step writes, if any
    pub fn level(&self) -> Option<bool> {
        match self {
            Step::KeyDown(_) => Some(true),
            Step::KeyUp { .. } => Some(false),
            Step::Pause(_) => None,
        }
    }
}

/// Step iterator for one letter
#[derive(Clone, Debug)]
pub struct Pulses<S> {
    symbols: S,
    timing: TimingConfig,
    keyed: Option<Symbol>,
    tail: Option<Duration>,
}

impl<S> Iterator for Pulses<S>
where
    S: Iterator<Item = Symbol>,
{
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if let Some(symbol) = self.keyed.take() {
            return Some(Step::KeyUp {
                mark: symbol.mark(),
                hold: self.timing.gap,
            });
        }
        if let Some(symbol) = self.symbols.next() {
            self.keyed = Some(symbol);
            return Some(Step::KeyDown(self.timing.on_time(symbol)));
        }
        self.tail.take().map(Step::Pause)
    }
}

/// Sequence one letter's symbols into indicator steps.
///
/// Each symbol becomes a key-down for its on-time followed by a key-up for the
/// symbol gap. The letter ends with a pause that tops the last symbol gap up
/// to the letter gap, or to the word gap when `is_last_letter` is set.
pub fn sequence<I>(symbols: I, is_last_letter: bool, timing: &TimingConfig) -> Pulses<I::IntoIter>
where
    I: IntoIterator<Item = Symbol>,
{
    let tail = if is_last_letter {
        timing.word_tail()
    } else {
        timing.letter_tail()
    };
    Pulses {
        symbols: symbols.into_iter(),
        timing: *timing,
        keyed: None,
        tail: Some(tail),
    }
}
