pub mod check;
pub mod config;
pub mod play;
pub mod regions;

use std::path::Path;

use mapquiz_core::{AnswerSet, Config};

const SAMPLE_ANSWERS: &str = include_str!("../../data/sample.json");

/// Dataset from `--answers`, else `data.answers_path`, else the built-in sample.
pub fn load_answers(
    flag: Option<&str>,
    config: &Config,
) -> Result<AnswerSet, Box<dyn std::error::Error>> {
    let configured = flag.or(config.data.answers_path.as_deref());
    tracing::debug!(path = configured.unwrap_or("<built-in>"), "loading answer dataset");
    let set = match configured {
        Some(path) => AnswerSet::load(Path::new(path))?,
        None => AnswerSet::from_json_str(SAMPLE_ANSWERS)?,
    };
    Ok(set)
}
