use std::fmt;

use crate::timer::{GameTimer, NoTimer};

type ScoreCallback = Box<dyn FnMut(u32)>;

/// Construction options for a [`Game`](super::Game).
///
/// The timer is a type parameter rather than an `Option`: a game without a
/// timer uses [`NoTimer`], whose start and stop do nothing.
pub struct GameOptions<T: GameTimer = NoTimer> {
    pub timer: T,
    /// Called with the new score whenever it changes, and once with 0 when
    /// the game is built.
    pub on_score_change: ScoreCallback,
    /// Key presses on the map move focus to the text field.
    pub capture_all_keys: bool,
    /// Normalize guesses before validating them.
    pub normalize_guesses: bool,
}

impl Default for GameOptions<NoTimer> {
    fn default() -> Self {
        Self {
            timer: NoTimer,
            on_score_change: Box::new(|_| {}),
            capture_all_keys: true,
            normalize_guesses: true,
        }
    }
}

impl GameOptions<NoTimer> {
    /// Default options driving the given timer.
    pub fn with_timer<T: GameTimer>(timer: T) -> GameOptions<T> {
        let defaults = Self::default();
        GameOptions {
            timer,
            on_score_change: defaults.on_score_change,
            capture_all_keys: defaults.capture_all_keys,
            normalize_guesses: defaults.normalize_guesses,
        }
    }
}

impl<T: GameTimer> GameOptions<T> {
    pub fn on_score_change(mut self, callback: impl FnMut(u32) + 'static) -> Self {
        self.on_score_change = Box::new(callback);
        self
    }

    pub fn capture_all_keys(mut self, enabled: bool) -> Self {
        self.capture_all_keys = enabled;
        self
    }

    pub fn normalize_guesses(mut self, enabled: bool) -> Self {
        self.normalize_guesses = enabled;
        self
    }
}

impl<T: GameTimer + fmt::Debug> fmt::Debug for GameOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameOptions")
            .field("timer", &self.timer)
            .field("capture_all_keys", &self.capture_all_keys)
            .field("normalize_guesses", &self.normalize_guesses)
            .finish_non_exhaustive()
    }
}
