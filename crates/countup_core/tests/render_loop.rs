use chrono::{DateTime, Duration, Utc};
use countup_core::{
    run_event_loop, App, Celebration, CelebrationPresenter, Command, CountupConfig,
    DisplaySurface, Event, FixedClock, HistoryPresenter, KeyValueStore, MemoryKeyValueStore,
    MilestoneHistory, MilestoneOutcome, StopReason, ViewMode,
};
use std::sync::mpsc;

#[derive(Default)]
struct Recorder {
    displayed: Vec<String>,
    celebrated: Vec<Celebration>,
    histories: Vec<MilestoneHistory>,
}

impl DisplaySurface for Recorder {
    fn show_elapsed(&mut self, text: &str) {
        self.displayed.push(text.to_string());
    }
}

impl CelebrationPresenter for Recorder {
    fn celebrate(&mut self, celebration: &Celebration) {
        self.celebrated.push(celebration.clone());
    }
}

impl HistoryPresenter for Recorder {
    fn show_history(&mut self, history: &MilestoneHistory) {
        self.histories.push(history.clone());
    }
}

fn utc(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn tick_renders_current_mode_and_celebrates_once() {
    let store = MemoryKeyValueStore::new();
    let mut app = App::new(&CountupConfig::default(), &store);
    let mut recorder = Recorder::default();
    let now = utc("2024-07-27T19:03:01+03:00");

    let frame = app.dispatch(Event::Tick, now, &mut recorder).unwrap();
    assert_eq!(frame.mode, ViewMode::Default);
    assert_eq!(frame.breakdown.total_months, 1);
    assert!(matches!(frame.milestone, MilestoneOutcome::Celebrated(_)));

    let second = app
        .dispatch(Event::Tick, now + Duration::seconds(1), &mut recorder)
        .unwrap();
    assert_eq!(second.milestone, MilestoneOutcome::Idle);

    assert_eq!(recorder.displayed.len(), 2);
    assert_eq!(recorder.celebrated.len(), 1);
    assert_eq!(recorder.celebrated[0].label, "1 Month");
    assert_eq!(
        store.get("celebratedMilestones").unwrap().as_deref(),
        Some("[1]")
    );
}

#[test]
fn advance_mode_renders_immediately_and_wraps() {
    let store = MemoryKeyValueStore::new();
    let mut app = App::new(&CountupConfig::default(), &store);
    let mut recorder = Recorder::default();
    let now = utc("2024-06-28T19:03:00+03:00");

    let modes: Vec<ViewMode> = (0..4)
        .map(|_| {
            app.dispatch(Event::AdvanceMode, now, &mut recorder)
                .unwrap()
                .mode
        })
        .collect();

    assert_eq!(
        modes,
        vec![
            ViewMode::MonthsAndWeeks,
            ViewMode::Totals,
            ViewMode::Simple,
            ViewMode::Default,
        ]
    );
    assert_eq!(recorder.displayed.len(), 4);
    assert_eq!(recorder.displayed[2], "1\u{a0}day together");
}

#[test]
fn history_is_sorted_newest_first() {
    let store = MemoryKeyValueStore::new();
    store.put("celebratedMilestones", "[1,12,6]").unwrap();
    let mut app = App::new(&CountupConfig::default(), &store);
    let mut recorder = Recorder::default();

    let frame = app.dispatch(Event::ShowHistory, Utc::now(), &mut recorder);

    assert!(frame.is_none());
    assert!(recorder.displayed.is_empty());
    assert_eq!(recorder.histories.len(), 1);
    assert_eq!(recorder.histories[0].months, vec![12, 6, 1]);
    assert_eq!(
        recorder.histories[0].labels(),
        vec!["1 year", "6 months", "1 month"]
    );
}

#[test]
fn event_loop_ticks_first_then_handles_queued_commands_until_shutdown() {
    let store = MemoryKeyValueStore::new();
    let config = CountupConfig::default();
    let mut app = App::new(&config, &store);
    let clock = FixedClock::new(utc("2024-09-27T19:03:01+03:00"));
    let mut recorder = Recorder::default();

    let (tx, rx) = mpsc::channel();
    tx.send(Command::AdvanceMode).unwrap();
    tx.send(Command::ShowHistory).unwrap();
    tx.send(Command::Shutdown).unwrap();

    let summary = run_event_loop(
        &mut app,
        &clock,
        &mut recorder,
        &rx,
        std::time::Duration::from_secs(60),
    );

    assert_eq!(summary.reason, StopReason::Shutdown);
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.commands, 2);
    assert_eq!(app.view_mode(), ViewMode::MonthsAndWeeks);

    // Initial tick celebrates month 3, the mode advance backfills month 2.
    assert_eq!(recorder.celebrated.len(), 1);
    assert_eq!(recorder.celebrated[0].month, 3);
    assert_eq!(recorder.histories[0].months, vec![3, 2]);
    assert_eq!(recorder.displayed.len(), 2);
    assert!(recorder.displayed[1].starts_with("3\u{a0}months"));
}

#[test]
fn event_loop_stops_when_senders_are_dropped() {
    let store = MemoryKeyValueStore::new();
    let mut app = App::new(&CountupConfig::default(), &store);
    let clock = FixedClock::new(utc("2024-06-27T19:03:00+03:00"));
    let mut recorder = Recorder::default();

    let (tx, rx) = mpsc::channel::<Command>();
    drop(tx);

    let summary = run_event_loop(
        &mut app,
        &clock,
        &mut recorder,
        &rx,
        std::time::Duration::from_secs(60),
    );

    assert_eq!(summary.reason, StopReason::Disconnected);
    assert_eq!(summary.ticks, 1);
    assert_eq!(recorder.displayed.len(), 1);
}

#[test]
fn event_loop_keeps_ticking_on_its_cadence() {
    let store = MemoryKeyValueStore::new();
    let mut app = App::new(&CountupConfig::default(), &store);
    let clock = FixedClock::new(utc("2024-06-27T19:03:00+03:00"));
    let mut recorder = Recorder::default();

    let (tx, rx) = mpsc::channel();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(120));
        tx.send(Command::Shutdown).unwrap();
    });

    let summary = run_event_loop(
        &mut app,
        &clock,
        &mut recorder,
        &rx,
        std::time::Duration::from_millis(10),
    );
    stopper.join().unwrap();

    assert_eq!(summary.reason, StopReason::Shutdown);
    assert!(summary.ticks >= 3, "only {} ticks", summary.ticks);
    assert_eq!(recorder.displayed.len() as u64, summary.ticks);
}
