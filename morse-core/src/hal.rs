//! Hardware Abstraction Layer for the indicator and timing primitives

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::Duration;

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::Duration;

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Millisecond duration for compilation without embassy-time
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }

        pub fn checked_sub(self, rhs: Duration) -> Option<Duration> {
            self.0.checked_sub(rhs.0).map(Duration)
        }
    }

    impl core::ops::Add for Duration {
        type Output = Duration;

        fn add(self, rhs: Duration) -> Duration {
            Duration(self.0 + rhs.0)
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }
}

pub use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for the binary output indicator (LED)
pub trait Indicator {
    type Error: From<HalError>;

    /// Set indicator state (true = lit, false = dark)
    fn set_state(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Get current indicator state
    fn get_state(&self) -> Result<bool, Self::Error>;
}

impl<T: Indicator + ?Sized> Indicator for &mut T {
    type Error = T::Error;

    fn set_state(&mut self, on: bool) -> Result<(), Self::Error> {
        (**self).set_state(on)
    }

    fn get_state(&self) -> Result<bool, Self::Error> {
        (**self).get_state()
    }
}

/// Indicator driven by an embedded-hal output pin
pub struct EmbeddedHalIndicator<P> {
    pin: P,
    inverted: bool,
    state: bool,
}

impl<P> EmbeddedHalIndicator<P>
where
    P: OutputPin,
{
    /// Wrap a pin; `inverted` for active-low LEDs. The pin is not touched
    /// until the first `set_state`.
    pub fn new(pin: P, inverted: bool) -> Self {
        Self {
            pin,
            inverted,
            state: false,
        }
    }

    /// Release the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> Indicator for EmbeddedHalIndicator<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_state(&mut self, on: bool) -> Result<(), Self::Error> {
        let level = if self.inverted { !on } else { on };
        let result = if level {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| HalError::GpioError)?;
        self.state = on;
        Ok(())
    }

    fn get_state(&self) -> Result<bool, Self::Error> {
        // Last successfully written state; output pins are not read back
        Ok(self.state)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing
    //!
    //! [`MockIndicator`] and [`MockDelay`] share a [`Trace`] so tests can
    //! check indicator edges against a virtual clock.

    use super::*;
    use core::cell::{Cell, RefCell};
    use heapless::Vec;

    /// Maximum recorded edges or holds per trace
    pub const TRACE_DEPTH: usize = 512;

    /// Indicator transition at a virtual time
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Edge {
        pub on: bool,
        pub at_ms: u64,
    }

    /// Virtual clock and event log.
    ///
    /// Edge and hold logs keep the first [`TRACE_DEPTH`] entries and set
    /// [`Trace::truncated`] past that. The clock, level, write count and
    /// on-time are always exact.
    #[derive(Default)]
    pub struct Trace {
        now_ns: Cell<u64>,
        edges: RefCell<Vec<Edge, TRACE_DEPTH>>,
        holds: RefCell<Vec<u32, TRACE_DEPTH>>,
        writes: Cell<usize>,
        lit: Cell<bool>,
        lit_since_ms: Cell<u64>,
        on_time_ms: Cell<u64>,
        truncated: Cell<bool>,
    }

    impl Trace {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current virtual time in milliseconds
        pub fn now_ms(&self) -> u64 {
            self.now_ns.get() / 1_000_000
        }

        fn advance_ns(&self, ns: u64) {
            self.now_ns.set(self.now_ns.get() + ns);
        }

        fn log<T, const D: usize>(&self, log: &RefCell<Vec<T, D>>, entry: T) {
            if log.borrow_mut().push(entry).is_err() {
                self.truncated.set(true);
            }
        }

        fn record_hold(&self, ms: u32) {
            self.log(&self.holds, ms);
            self.advance_ns(ms as u64 * 1_000_000);
        }

        fn record_write(&self, on: bool) {
            self.writes.set(self.writes.get() + 1);
            // Only transitions are edges; repeated writes of the same level are not
            if self.lit.get() == on {
                return;
            }
            let now = self.now_ms();
            if on {
                self.lit_since_ms.set(now);
            } else {
                self.on_time_ms
                    .set(self.on_time_ms.get() + now - self.lit_since_ms.get());
            }
            self.lit.set(on);
            self.log(&self.edges, Edge { on, at_ms: now });
        }

        /// Whether any edge or hold was dropped from the logs
        pub fn truncated(&self) -> bool {
            self.truncated.get()
        }

        /// Indicator transitions in order
        pub fn edges(&self) -> Vec<Edge, TRACE_DEPTH> {
            self.edges.borrow().clone()
        }

        /// Every hold requested from the delay, in milliseconds
        pub fn holds(&self) -> Vec<u32, TRACE_DEPTH> {
            self.holds.borrow().clone()
        }

        /// Number of `set_state` calls, including redundant ones
        pub fn writes(&self) -> usize {
            self.writes.get()
        }

        /// Total time spent lit
        pub fn on_time_ms(&self) -> u64 {
            let mut total = self.on_time_ms.get();
            if self.lit.get() {
                total += self.now_ms() - self.lit_since_ms.get();
            }
            total
        }

        /// Durations of each logged lit interval, in milliseconds
        pub fn pulses_ms(&self) -> Vec<u64, TRACE_DEPTH> {
            let edges = self.edges.borrow();
            let mut pulses = Vec::new();
            for pair in edges.windows(2) {
                if pair[0].on && !pair[1].on {
                    pulses.push(pair[1].at_ms - pair[0].at_ms).ok();
                }
            }
            pulses
        }

        /// Whether the indicator is currently lit
        pub fn is_lit(&self) -> bool {
            self.lit.get()
        }
    }

    /// Indicator that logs into a [`Trace`]
    pub struct MockIndicator<'a> {
        trace: &'a Trace,
        state: bool,
        failing: bool,
    }

    impl<'a> MockIndicator<'a> {
        pub fn new(trace: &'a Trace) -> Self {
            Self {
                trace,
                state: false,
                failing: false,
            }
        }

        /// Indicator whose every write reports a GPIO error (the write is
        /// still logged)
        pub fn failing(trace: &'a Trace) -> Self {
            Self {
                failing: true,
                ..Self::new(trace)
            }
        }
    }

    impl Indicator for MockIndicator<'_> {
        type Error = HalError;

        fn set_state(&mut self, on: bool) -> Result<(), Self::Error> {
            self.trace.record_write(on);
            self.state = on;
            if self.failing {
                Err(HalError::GpioError)
            } else {
                Ok(())
            }
        }

        fn get_state(&self) -> Result<bool, Self::Error> {
            Ok(self.state)
        }
    }

    /// Delay that advances the [`Trace`] clock instead of sleeping
    pub struct MockDelay<'a> {
        trace: &'a Trace,
    }

    impl<'a> MockDelay<'a> {
        pub fn new(trace: &'a Trace) -> Self {
            Self { trace }
        }
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.trace.advance_ns(ns as u64);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.trace.record_hold(ms);
        }
    }

    #[cfg(feature = "async")]
    impl embedded_hal_async::delay::DelayNs for MockDelay<'_> {
        async fn delay_ns(&mut self, ns: u32) {
            self.trace.advance_ns(ns as u64);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.trace.record_hold(ms);
        }
    }

    /// Output pin that remembers its level
    #[derive(Default)]
    pub struct MockPin {
        high: bool,
    }

    impl MockPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_high(&self) -> bool {
            self.high
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }
}
