//! Full games driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use mapquiz_core::{
    AnswerSet, DisplayMode, Event, Game, GameOptions, HostEvent, InputField, ManualClock, MapTree,
    RegionStatus, RegionTree, Stopwatch, StopwatchOptions, TextInput,
};

type Log = Rc<RefCell<Vec<String>>>;

fn recording_stopwatch(clock: &ManualClock) -> (Stopwatch<ManualClock>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let watch = Stopwatch::with_clock(
        clock.clone(),
        move |text: &str| sink.borrow_mut().push(text.to_string()),
        StopwatchOptions::default(),
    )
    .unwrap();
    (watch, log)
}

#[test]
fn single_region_game() {
    let answers = AnswerSet::from_json_str(r#"{"X": {"name": "Ex", "accept": ["x", "ex"]}}"#)
        .unwrap();
    let map = MapTree::from_region_ids(answers.ids());
    let clock = ManualClock::new();
    let (watch, display) = recording_stopwatch(&clock);
    let scores = Rc::new(RefCell::new(Vec::new()));
    let score_sink = Rc::clone(&scores);

    let max_score = answers.len() as u32;
    let mut game = Game::new(
        map,
        InputField::new(),
        answers,
        max_score,
        GameOptions::with_timer(watch).on_score_change(move |s| score_sink.borrow_mut().push(s)),
    )
    .unwrap();
    assert_eq!(max_score, 1);

    let region = game.map().find("X").unwrap();
    let shape = game.map().first_child(region).unwrap();
    game.dispatch(HostEvent::Click(shape));
    assert!(game.is_started());
    assert!(game.timer().is_running());
    assert_eq!(game.map().status(region), RegionStatus::Focused);
    assert_eq!(game.input().display_mode(), DisplayMode::Uppercase);
    let started = game.drain_timer_events();
    assert!(matches!(started[..], [Event::TimerStarted { elapsed_ms: 0, .. }]));

    clock.advance(40);
    assert_eq!(game.timer_mut().tick(), Some(40));

    clock.advance(2_000);
    game.input_mut().set_value("Ex");
    let event = game.dispatch(HostEvent::Change).unwrap();
    match event {
        Event::GuessAccepted {
            region_id,
            guess,
            score,
            completed,
            ..
        } => {
            assert_eq!(region_id, "X");
            assert_eq!(guess, "ex");
            assert_eq!(score, 1);
            assert!(completed);
        }
        other => panic!("expected GuessAccepted, got {other:?}"),
    }

    assert_eq!(game.map().status(region), RegionStatus::Solved);
    assert_eq!(game.score(), 1);
    assert!(!game.timer().is_running());
    assert_eq!(game.timer().elapsed_ms(), 2_040);
    assert_eq!(*scores.borrow(), vec![0, 1]);
    assert_eq!(display.borrow().last().unwrap(), "0:02.04");
    let stopped = game.drain_timer_events();
    assert!(matches!(stopped[..], [Event::TimerStopped { elapsed_ms: 2_040, .. }]));

    // Nothing moves once the game is over.
    clock.advance(1_000);
    assert_eq!(game.timer_mut().tick(), None);
    assert!(game.dispatch(HostEvent::Click(shape)).is_none());
}

#[test]
fn country_names_with_articles_and_accents() {
    let answers = AnswerSet::from_json_str(
        r#"{
            "ar-uy": {"name": "Río de la Plata", "accept": ["rio de la plata", "plate river"]},
            "ba": {"name": "Bosnia and Herzegovina", "accept": ["bosnia herzegovina", "bosnia and herzegovina"]},
            "gm": {"name": "The Gambia", "accept": ["gambia"]}
        }"#,
    )
    .unwrap();
    let map = MapTree::from_region_ids(answers.ids());
    let max_score = answers.len() as u32;
    let mut game = Game::new(map, InputField::new(), answers, max_score, GameOptions::default())
        .unwrap();

    for (id, typed) in [
        ("ar-uy", "The Río de la Plata"),
        ("ba", "Bosnia-Herzegovina"),
        ("gm", "  the   GAMBIA "),
    ] {
        let region = game.map().find(id).unwrap();
        assert!(game.handle_select(region).is_some(), "select {id}");
        game.input_mut().set_value("wrong");
        assert!(matches!(game.submit_guess(), Some(Event::GuessRejected { .. })));
        game.input_mut().set_value(typed);
        assert!(
            matches!(game.submit_guess(), Some(Event::GuessAccepted { .. })),
            "guess {typed:?} for {id}"
        );
    }
    assert!(game.is_complete());
    assert_eq!(game.map().solved_count(), 3);
}
