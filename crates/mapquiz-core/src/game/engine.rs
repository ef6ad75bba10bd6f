//! Click-and-name game engine.
//!
//! The engine owns the selection, the score and the "started" flag. It is
//! driven entirely by host events and never blocks: every transition
//! completes inside the call that triggered it.
//!
//! ## Region transitions
//!
//! ```text
//! Unsolved --click--> Focused --correct guess--> Solved
//!                        |
//!                        +--click another--> Unsolved
//! ```
//!
//! Wrong guesses, clicks outside any region, clicks on solved regions and
//! submissions with nothing selected are all ignored.

use chrono::Utc;

use super::options::GameOptions;
use crate::answers::Validator;
use crate::error::ValidationError;
use crate::events::Event;
use crate::input::{DisplayMode, TextInput};
use crate::normalize::normalize;
use crate::region::{RegionTree, StatusMarker};
use crate::timer::{GameTimer, NoTimer};

/// Input the host forwards to the game. These are the only entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent<N> {
    /// Pointer click on the map; carries the clicked node.
    Click(N),
    /// The text field committed its value (enter or blur).
    Change,
    /// A key was pressed while focus was inside the map.
    KeyDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState<N> {
    pub selected: Option<N>,
    pub score: u32,
    pub started: bool,
}

pub struct Game<M, I, V, T = NoTimer>
where
    M: RegionTree,
    I: TextInput,
    V: Validator,
    T: GameTimer,
{
    map: M,
    input: I,
    validator: V,
    timer: T,
    on_score_change: Box<dyn FnMut(u32)>,
    capture_all_keys: bool,
    normalize_guesses: bool,
    max_score: u32,
    state: GameState<M::Node>,
    /// Events from the timer, waiting for the host to drain them.
    timer_events: Vec<Event>,
}

impl<M, I, V, T> Game<M, I, V, T>
where
    M: RegionTree,
    I: TextInput,
    V: Validator,
    T: GameTimer,
{
    /// Build a game and report the initial score of 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_score` is zero.
    pub fn new(
        map: M,
        input: I,
        validator: V,
        max_score: u32,
        options: GameOptions<T>,
    ) -> Result<Self, ValidationError> {
        if max_score == 0 {
            return Err(ValidationError::invalid(
                "max_score",
                "a game needs at least one region to name",
            ));
        }
        let mut game = Self {
            map,
            input,
            validator,
            timer: options.timer,
            on_score_change: options.on_score_change,
            capture_all_keys: options.capture_all_keys,
            normalize_guesses: options.normalize_guesses,
            max_score,
            state: GameState {
                selected: None,
                score: 0,
                started: false,
            },
            timer_events: Vec::new(),
        };
        (game.on_score_change)(0);
        Ok(game)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> GameState<M::Node> {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn is_started(&self) -> bool {
        self.state.started
    }

    pub fn is_complete(&self) -> bool {
        self.state.score >= self.max_score
    }

    pub fn selected(&self) -> Option<M::Node> {
        self.state.selected
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected.map(|node| self.map.region_id(node))
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Hosts type into the field through this handle.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Hosts drive the timer's display ticks through this handle.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Take the timer events produced since the last call, oldest first.
    pub fn drain_timer_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.timer_events)
    }

    /// The normalization applied to guesses when enabled.
    pub fn normalize(&self, raw: &str) -> String {
        normalize(raw)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Route a host event to its handler.
    pub fn dispatch(&mut self, event: HostEvent<M::Node>) -> Option<Event> {
        match event {
            HostEvent::Click(target) => self.handle_select(target),
            HostEvent::Change => self.submit_guess(),
            HostEvent::KeyDown => {
                if self.capture_all_keys {
                    self.input.focus();
                }
                None
            }
        }
    }

    /// Focus the region enclosing `target`.
    ///
    /// Ignored when no region encloses the target, when that region is
    /// already selected or solved, and once the game is complete.
    pub fn handle_select(&mut self, target: M::Node) -> Option<Event> {
        if self.is_complete() {
            return None;
        }
        let region = self.map.enclosing_region(target)?;
        if self.state.selected == Some(region) || self.map.has_marker(region, StatusMarker::Solved)
        {
            return None;
        }

        let previous = self.state.selected.replace(region);
        if let Some(prev) = previous {
            self.map.remove_marker(prev, StatusMarker::Focused);
        }
        self.map.add_marker(region, StatusMarker::Focused);
        self.input.clear();

        let first_selection = !self.state.started;
        if first_selection {
            self.timer_events.extend(self.timer.start());
            self.input.set_display_mode(DisplayMode::Uppercase);
            self.state.started = true;
        }
        self.input.focus();

        let region_id = self.map.region_id(region).to_string();
        tracing::debug!(region = %region_id, first_selection, "region focused");
        Some(Event::RegionFocused {
            region_id,
            previous: previous.map(|p| self.map.region_id(p).to_string()),
            first_selection,
            at: Utc::now(),
        })
    }

    /// Validate the field's value against the selected region.
    ///
    /// Returns `None` when nothing is selected. A wrong guess changes no
    /// state; the field keeps its value for the player to edit.
    pub fn submit_guess(&mut self) -> Option<Event> {
        let region = self.state.selected?;
        let raw = self.input.value();
        let guess = if self.normalize_guesses {
            normalize(raw)
        } else {
            raw.to_string()
        };
        let region_id = self.map.region_id(region).to_string();

        if !self.validator.accepts(&region_id, &guess) {
            tracing::debug!(region = %region_id, guess = %guess, "guess rejected");
            return Some(Event::GuessRejected {
                region_id,
                guess,
                at: Utc::now(),
            });
        }

        self.map.remove_marker(region, StatusMarker::Focused);
        self.map.add_marker(region, StatusMarker::Solved);
        self.state.selected = None;
        self.input.clear();
        self.state.score += 1;
        (self.on_score_change)(self.state.score);

        let completed = self.state.score == self.max_score;
        if completed {
            self.timer_events.extend(self.timer.stop());
            tracing::info!(score = self.state.score, "all regions named");
        } else {
            tracing::debug!(region = %region_id, score = self.state.score, "guess accepted");
        }
        Some(Event::GuessAccepted {
            region_id,
            guess,
            score: self.state.score,
            completed,
            at: Utc::now(),
        })
    }
}
