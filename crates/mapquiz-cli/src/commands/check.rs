use clap::Args;
use mapquiz_core::{normalize, Config, DatasetError, Validator};

#[derive(Args)]
pub struct CheckArgs {
    /// Region id
    region: String,
    /// Guess, as the player would type it
    guess: String,
    /// Answer dataset (JSON); defaults to the configured or built-in one
    #[arg(long)]
    answers: Option<String>,
    /// Compare the guess exactly as typed
    #[arg(long)]
    no_normalize: bool,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let answers = super::load_answers(args.answers.as_deref(), &config)?;
    if answers.get(&args.region).is_none() {
        return Err(DatasetError::UnknownRegion(args.region).into());
    }

    let normalizing = config.game.normalize_guesses && !args.no_normalize;
    let compared = if normalizing {
        normalize(&args.guess)
    } else {
        args.guess.clone()
    };
    let accepted = answers.accepts(&args.region, &compared);

    let out = serde_json::json!({
        "region": args.region,
        "guess": args.guess,
        "compared": compared,
        "accepted": accepted,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
