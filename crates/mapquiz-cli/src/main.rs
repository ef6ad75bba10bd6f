use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mapquiz", version, about = "Click a region, name it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game, reading clicks and guesses from stdin
    Play(commands::play::PlayArgs),
    /// Check a single guess against the answer dataset
    Check(commands::check::CheckArgs),
    /// Print the normalized form of a guess
    Normalize {
        /// Text to normalize (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the regions of the answer dataset
    Regions(commands::regions::RegionsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Normalize { text } => {
            println!("{}", mapquiz_core::normalize(&text.join(" ")));
            Ok(())
        }
        Commands::Regions(args) => commands::regions::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
