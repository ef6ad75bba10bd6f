use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use clap::Args;
use mapquiz_core::{
    AnswerSet, Config, Event, Game, GameOptions, HostEvent, InputField, MapTree, RegionTree,
    Stopwatch, TextInput,
};

type PlayGame = Game<MapTree, InputField, AnswerSet, Stopwatch>;

#[derive(Args)]
pub struct PlayArgs {
    /// Answer dataset (JSON); defaults to the configured or built-in one
    #[arg(long)]
    answers: Option<String>,
    /// Compare guesses exactly as typed
    #[arg(long)]
    no_normalize: bool,
    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Click(&'a str),
    Key,
    Time,
    Regions,
    Quit,
    Guess(&'a str),
}

fn parse_line(line: &str) -> Command<'_> {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Guess(line);
    };
    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim();
    match name {
        "click" | "c" => Command::Click(arg),
        "key" => Command::Key,
        "time" | "t" => Command::Time,
        "regions" | "r" => Command::Regions,
        "quit" | "q" => Command::Quit,
        _ => Command::Guess(line),
    }
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let answers = super::load_answers(args.answers.as_deref(), &config)?;
    let names = answers.clone();
    let map = MapTree::from_region_ids(answers.ids());
    answers.check_against(&map)?;
    let max_score = u32::try_from(answers.len())?;

    // Stand-in for the on-screen timer box.
    let timer_box = Rc::new(RefCell::new(String::new()));
    let timer_sink = Rc::clone(&timer_box);
    let stopwatch = Stopwatch::with_options(
        move |text: &str| *timer_sink.borrow_mut() = text.to_string(),
        config.stopwatch_options(),
    )?;

    let json = args.json;
    let options = config
        .apply_game_options(GameOptions::with_timer(stopwatch))
        .on_score_change(move |score| {
            if !json {
                println!("Score: {score} / {max_score}");
            }
        });
    let options = if args.no_normalize {
        options.normalize_guesses(false)
    } else {
        options
    };
    let mut game: PlayGame = Game::new(map, InputField::new(), answers, max_score, options)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        game.timer_mut().tick();

        let event = match parse_line(line.trim_end()) {
            Command::Quit => break,
            Command::Time => {
                println!("{}", shown_time(&timer_box, &game));
                continue;
            }
            Command::Regions => {
                print_regions(&game, &names);
                continue;
            }
            Command::Key => game.dispatch(HostEvent::KeyDown),
            Command::Click(id) => {
                let target = click_target(game.map(), id);
                game.dispatch(HostEvent::Click(target))
            }
            Command::Guess(text) => {
                game.input_mut().set_value(text);
                game.dispatch(HostEvent::Change)
            }
        };

        if let Some(event) = event {
            report(&event, &names, json)?;
        }
        for event in game.drain_timer_events() {
            report(&event, &names, json)?;
        }
        stdout.flush()?;

        if game.is_complete() {
            break;
        }
    }

    if let Some(event) = game.timer_mut().stop() {
        report(&event, &names, json)?;
    }
    if json {
        let summary = serde_json::json!({
            "type": "summary",
            "score": game.score(),
            "max_score": game.max_score(),
            "elapsed_ms": game.timer().elapsed_ms(),
        });
        println!("{summary}");
    } else {
        println!(
            "Named {} of {} regions in {}",
            game.score(),
            game.max_score(),
            shown_time(&timer_box, &game)
        );
    }
    Ok(())
}

/// What the timer box shows; before the first display, the formatted zero.
fn shown_time(timer_box: &RefCell<String>, game: &PlayGame) -> String {
    let shown = timer_box.borrow();
    if shown.is_empty() {
        game.timer().formatted()
    } else {
        shown.clone()
    }
}

/// Clicks land on a region's first shape, like a pointer would. Unknown ids
/// click the bare map.
fn click_target(map: &MapTree, id: &str) -> mapquiz_core::NodeId {
    map.find(id)
        .map(|region| map.first_child(region).unwrap_or(region))
        .unwrap_or_else(|| map.root())
}

fn print_regions(game: &PlayGame, names: &AnswerSet) {
    let map = game.map();
    for region in map.regions() {
        let id = map.region_id(region);
        let status = map.status(region);
        let label = match status {
            mapquiz_core::RegionStatus::Solved => names.name(id).unwrap_or(id),
            _ => "?",
        };
        println!("{id}\t{status:?}\t{label}");
    }
}

fn report(event: &Event, names: &AnswerSet, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::RegionFocused { region_id, .. } => println!("Selected {region_id}"),
        Event::GuessAccepted { region_id, .. } => {
            println!("Correct: {}", names.name(region_id).unwrap_or(region_id));
        }
        Event::GuessRejected { .. } => println!("Not quite"),
        _ => {}
    }
    Ok(())
}
