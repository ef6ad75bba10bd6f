mod engine;
mod options;

pub use engine::{Game, GameState, HostEvent};
pub use options::GameOptions;
