//! Stopwatch implementation.
//!
//! Tracks cumulative active time across any number of start/stop cycles.
//! Like the rest of the crate it owns no threads: the host calls `tick()`
//! from its event loop and the stopwatch decides whether a display update
//! is due.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//!    ^                  |
//!    +------reset-------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut watch = Stopwatch::new(|text| println!("{text}"));
//! watch.start();
//! // In a loop:
//! watch.tick(); // writes "m:ss.cc" at most once per interval
//! watch.stop();
//! ```

use std::fmt;

use chrono::Utc;

use super::clock::{Clock, SystemClock};
use crate::error::ValidationError;
use crate::events::Event;

/// Default period between live display updates.
pub const DEFAULT_INTERVAL_MS: u64 = 35;

type Formatter = Box<dyn Fn(u64) -> String>;
type DisplaySink = Box<dyn FnMut(&str)>;

/// Something a game can start on the first selection and stop once every
/// region is solved. Returned events are queued by the game for the host.
pub trait GameTimer {
    fn start(&mut self) -> Option<Event>;
    fn stop(&mut self) -> Option<Event>;
}

/// Stand-in used when a game runs without a timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTimer;

impl GameTimer for NoTimer {
    fn start(&mut self) -> Option<Event> {
        None
    }
    fn stop(&mut self) -> Option<Event> {
        None
    }
}

/// Render milliseconds as `minutes:seconds.centiseconds`.
///
/// Minutes are unpadded; seconds and centiseconds are two digits.
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centiseconds = (ms % 1000) / 10;
    format!("{minutes}:{seconds:02}.{centiseconds:02}")
}

pub struct StopwatchOptions {
    /// Period between live display updates, in milliseconds. Must be positive.
    pub interval_ms: u64,
    /// Maps elapsed milliseconds to display text.
    pub format: Formatter,
}

impl Default for StopwatchOptions {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            format: Box::new(format_elapsed),
        }
    }
}

impl fmt::Debug for StopwatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopwatchOptions")
            .field("interval_ms", &self.interval_ms)
            .finish_non_exhaustive()
    }
}

/// Registration of the periodic display callback. It exists only while the
/// stopwatch runs; dropping it is what cancels the callback.
#[derive(Debug)]
struct Repeater {
    interval_ms: u64,
    next_due_ms: u64,
}

impl Repeater {
    fn new(interval_ms: u64, now: u64) -> Self {
        Self {
            interval_ms,
            next_due_ms: now.saturating_add(interval_ms),
        }
    }

    /// Returns true if a period has elapsed since the last firing.
    /// Missed periods are coalesced into one firing.
    fn poll(&mut self, now: u64) -> bool {
        if now < self.next_due_ms {
            return false;
        }
        let missed = (now - self.next_due_ms) / self.interval_ms;
        self.next_due_ms = self
            .next_due_ms
            .saturating_add((missed + 1).saturating_mul(self.interval_ms));
        true
    }
}

/// A running segment: the anchor instant plus its repeater.
#[derive(Debug)]
struct Run {
    anchor_ms: u64,
    repeater: Repeater,
}

pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    sink: DisplaySink,
    format: Formatter,
    interval_ms: u64,
    /// Committed time from finished segments.
    elapsed_ms: u64,
    run: Option<Run>,
}

impl Stopwatch<SystemClock> {
    /// Stopwatch on the system clock with default options.
    pub fn new(sink: impl FnMut(&str) + 'static) -> Self {
        Self {
            clock: SystemClock::new(),
            sink: Box::new(sink),
            format: Box::new(format_elapsed),
            interval_ms: DEFAULT_INTERVAL_MS,
            elapsed_ms: 0,
            run: None,
        }
    }

    /// # Errors
    ///
    /// Returns an error if `options.interval_ms` is zero.
    pub fn with_options(
        sink: impl FnMut(&str) + 'static,
        options: StopwatchOptions,
    ) -> Result<Self, ValidationError> {
        Stopwatch::with_clock(SystemClock::new(), sink, options)
    }
}

impl<C: Clock> Stopwatch<C> {
    /// # Errors
    ///
    /// Returns an error if `options.interval_ms` is zero.
    pub fn with_clock(
        clock: C,
        sink: impl FnMut(&str) + 'static,
        options: StopwatchOptions,
    ) -> Result<Self, ValidationError> {
        if options.interval_ms == 0 {
            return Err(ValidationError::invalid(
                "interval_ms",
                "must be a positive number of milliseconds",
            ));
        }
        Ok(Self {
            clock,
            sink: Box::new(sink),
            format: options.format,
            interval_ms: options.interval_ms,
            elapsed_ms: 0,
            run: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Time committed by `stop()`. Does not include the running segment.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Committed time plus the running segment, if any.
    pub fn current_ms(&self) -> u64 {
        match &self.run {
            Some(run) => self
                .elapsed_ms
                .saturating_add(self.clock.now_ms().saturating_sub(run.anchor_ms)),
            None => self.elapsed_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Display text for the current time, without writing it anywhere.
    pub fn formatted(&self) -> String {
        (self.format)(self.current_ms())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.run.is_some() {
            return None;
        }
        let now = self.clock.now_ms();
        self.run = Some(Run {
            anchor_ms: now,
            repeater: Repeater::new(self.interval_ms, now),
        });
        tracing::debug!(elapsed_ms = self.elapsed_ms, "stopwatch started");
        Some(Event::TimerStarted {
            elapsed_ms: self.elapsed_ms,
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        let run = self.run.take()?;
        let segment = self.clock.now_ms().saturating_sub(run.anchor_ms);
        self.elapsed_ms = self.elapsed_ms.saturating_add(segment);
        self.display(self.elapsed_ms);
        tracing::debug!(elapsed_ms = self.elapsed_ms, "stopwatch stopped");
        Some(Event::TimerStopped {
            elapsed_ms: self.elapsed_ms,
            at: Utc::now(),
        })
    }

    /// Stop if running, then zero the elapsed time.
    pub fn reset(&mut self) -> Option<Event> {
        self.stop();
        self.elapsed_ms = 0;
        self.display(0);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call periodically. Displays the live time when an interval has
    /// passed and returns the displayed value. Never mutates elapsed time.
    pub fn tick(&mut self) -> Option<u64> {
        let now = self.clock.now_ms();
        let run = self.run.as_mut()?;
        if !run.repeater.poll(now) {
            return None;
        }
        let live = self
            .elapsed_ms
            .saturating_add(now.saturating_sub(run.anchor_ms));
        tracing::trace!(live_ms = live, "stopwatch tick");
        self.display(live);
        Some(live)
    }

    fn display(&mut self, time: u64) {
        let text = (self.format)(time);
        (self.sink)(&text);
    }
}

impl<C: Clock> GameTimer for Stopwatch<C> {
    fn start(&mut self) -> Option<Event> {
        Stopwatch::start(self)
    }

    fn stop(&mut self) -> Option<Event> {
        Stopwatch::stop(self)
    }
}

impl<C: Clock> fmt::Debug for Stopwatch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("interval_ms", &self.interval_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = Rc::clone(&log);
        (log, move |text: &str| sink_log.borrow_mut().push(text.to_string()))
    }

    fn watch(clock: &ManualClock) -> (Stopwatch<ManualClock>, Rc<RefCell<Vec<String>>>) {
        let (log, sink) = recorded();
        let w = Stopwatch::with_clock(clock.clone(), sink, StopwatchOptions::default()).unwrap();
        (w, log)
    }

    #[test]
    fn default_format() {
        assert_eq!(format_elapsed(0), "0:00.00");
        assert_eq!(format_elapsed(1_230), "0:01.23");
        assert_eq!(format_elapsed(61_005), "1:01.00");
        assert_eq!(format_elapsed(12 * 60_000 + 59_999), "12:59.99");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let options = StopwatchOptions {
            interval_ms: 0,
            ..StopwatchOptions::default()
        };
        let err = Stopwatch::with_clock(ManualClock::new(), |_: &str| {}, options).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "interval_ms"));
    }

    #[test]
    fn start_is_idempotent() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        assert!(w.start().is_some());
        clock.advance(500);
        assert!(w.start().is_none());
        clock.advance(500);
        w.stop();
        assert_eq!(w.elapsed_ms(), 1000);
        assert_eq!(log.borrow().last().unwrap(), "0:01.00");
    }

    #[test]
    fn stop_when_stopped_is_noop() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        assert!(w.stop().is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn accumulates_across_cycles() {
        let clock = ManualClock::new();
        let (mut w, _log) = watch(&clock);
        w.start();
        clock.advance(1_500);
        w.stop();
        clock.advance(10_000);
        w.start();
        clock.advance(2_500);
        w.stop();
        assert_eq!(w.elapsed_ms(), 4_000);
        assert!(!w.is_running());
    }

    #[test]
    fn tick_displays_live_time_without_committing() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        w.start();
        clock.advance(20);
        assert_eq!(w.tick(), None);
        clock.advance(20);
        assert_eq!(w.tick(), Some(40));
        assert_eq!(w.elapsed_ms(), 0);
        assert_eq!(w.current_ms(), 40);
        assert_eq!(log.borrow().as_slice(), ["0:00.04"]);
    }

    #[test]
    fn missed_periods_fire_once() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        w.start();
        clock.advance(1_000);
        assert_eq!(w.tick(), Some(1_000));
        assert_eq!(w.tick(), None);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn no_tick_after_stop() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        w.start();
        clock.advance(100);
        w.stop();
        let displayed = log.borrow().len();
        clock.advance(1_000);
        assert_eq!(w.tick(), None);
        assert_eq!(log.borrow().len(), displayed);
    }

    #[test]
    fn reset_displays_zero_last() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        w.start();
        clock.advance(3_210);
        w.reset();
        assert_eq!(w.elapsed_ms(), 0);
        assert!(!w.is_running());
        let log = log.borrow();
        assert_eq!(log.as_slice(), ["0:03.21", "0:00.00"]);
    }

    #[test]
    fn reset_when_stopped_displays_zero() {
        let clock = ManualClock::new();
        let (mut w, log) = watch(&clock);
        assert!(w.reset().is_some());
        assert_eq!(log.borrow().as_slice(), ["0:00.00"]);
    }

    #[test]
    fn custom_format_and_interval() {
        let clock = ManualClock::new();
        let (log, sink) = recorded();
        let options = StopwatchOptions {
            interval_ms: 1_000,
            format: Box::new(|ms| format!("{}s", ms / 1000)),
        };
        let mut w = Stopwatch::with_clock(clock.clone(), sink, options).unwrap();
        w.start();
        clock.advance(999);
        assert_eq!(w.tick(), None);
        clock.advance(1);
        assert_eq!(w.tick(), Some(1_000));
        assert_eq!(w.formatted(), "1s");
        assert_eq!(log.borrow().as_slice(), ["1s"]);
    }

    #[test]
    fn game_timer_delegates() {
        let clock = ManualClock::new();
        let (mut w, _log) = watch(&clock);
        assert!(matches!(GameTimer::start(&mut w), Some(Event::TimerStarted { .. })));
        assert!(w.is_running());
        assert!(GameTimer::start(&mut w).is_none());
        clock.advance(10);
        assert!(matches!(
            GameTimer::stop(&mut w),
            Some(Event::TimerStopped { elapsed_ms: 10, .. })
        ));
        assert_eq!(w.elapsed_ms(), 10);
        assert!(NoTimer.start().is_none());
    }
}
