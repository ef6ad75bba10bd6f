//! # Mapquiz Core Library
//!
//! Core logic for a "click a region, then type its name" map quiz. The map,
//! the text field and the answer data are collaborators behind small traits,
//! so the same engine runs under a terminal host, a test harness or any
//! rendering layer that can implement them.
//!
//! ## Architecture
//!
//! - **Game**: the interaction state machine: selection, validation, score
//! - **Stopwatch**: cumulative elapsed time with cooperative display ticks
//! - **Normalization**: canonical form for typed guesses
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Game`]: Interaction engine
//! - [`Stopwatch`]: Elapsed-time tracker
//! - [`RegionTree`] / [`MapTree`]: Region-tree capability and in-memory map
//! - [`AnswerSet`]: Answer dataset and validator
//! - [`Config`]: Application configuration management

pub mod answers;
pub mod error;
pub mod events;
pub mod game;
pub mod input;
pub mod normalize;
pub mod region;
pub mod storage;
pub mod timer;

pub use answers::{AnswerEntry, AnswerSet, Validator};
pub use error::{ConfigError, CoreError, DatasetError, ValidationError};
pub use events::Event;
pub use game::{Game, GameOptions, GameState, HostEvent};
pub use input::{DisplayMode, InputField, TextInput};
pub use normalize::normalize;
pub use region::{MapTree, NodeId, NodeKind, RegionStatus, RegionTree, StatusMarker};
pub use storage::Config;
pub use timer::{
    format_elapsed, Clock, GameTimer, ManualClock, NoTimer, Stopwatch, StopwatchOptions,
    SystemClock,
};
