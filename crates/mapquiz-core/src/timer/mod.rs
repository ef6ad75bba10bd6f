mod clock;
mod stopwatch;

pub use clock::{Clock, ManualClock, SystemClock};
pub use stopwatch::{format_elapsed, GameTimer, NoTimer, Stopwatch, StopwatchOptions, DEFAULT_INTERVAL_MS};
