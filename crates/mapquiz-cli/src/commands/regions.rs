use clap::Args;
use mapquiz_core::Config;

#[derive(Args)]
pub struct RegionsArgs {
    /// Answer dataset (JSON); defaults to the configured or built-in one
    #[arg(long)]
    answers: Option<String>,
    /// Print the dataset as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RegionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let answers = super::load_answers(args.answers.as_deref(), &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&answers)?);
        return Ok(());
    }
    for id in answers.ids() {
        println!("{id}\t{}", answers.name(id).unwrap_or_default());
    }
    println!("{} regions", answers.len());
    Ok(())
}
