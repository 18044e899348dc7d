use snake_pilot_core::{CellCoord, Direction, Event, GameConfig, SnakeStatus, TerminalReason};
use snake_pilot_system_autopilot::Autopilot;
use snake_pilot_system_manual::ManualControl;
use snake_pilot_system_session::{CycleReport, Session};
use snake_pilot_world::query;

fn autopilot_run(config: GameConfig, cycles: usize) -> Vec<CycleReport> {
    let mut session = Session::new(config, Autopilot::new()).expect("session");
    (0..cycles)
        .map(|_| session.run_cycle(&[]).expect("cycle"))
        .collect()
}

#[test]
fn autopilot_sessions_replay_identically() {
    let _ = tracing_subscriber::fmt::try_init();

    let first = autopilot_run(GameConfig::default(), 150);
    let second = autopilot_run(GameConfig::default(), 150);

    assert_eq!(first, second);
}

#[test]
fn autopilot_scores_and_speeds_up() {
    let _ = tracing_subscriber::fmt::try_init();
    let mut session = Session::new(GameConfig::default(), Autopilot::new()).expect("session");
    let starting_interval = session.tick_interval();

    let mut placements = 0;
    for _ in 0..400 {
        let report = session.run_cycle(&[]).expect("cycle");
        assert!(report.food_placed().is_none() || !report.is_game_over());
        if report.food_placed().is_some() {
            placements += 1;
        }
        if report.is_game_over() || report.score >= 1_000 {
            break;
        }
    }

    assert!(session.score() >= 1_000, "score stalled at {}", session.score());
    assert!(placements >= 7);
    assert_eq!(session.tick_rate(), 5);
    assert!(session.tick_interval() < starting_interval);
    assert_eq!(query::grid(session.world()).food_cells().count(), 1);
}

#[test]
fn manual_player_hits_the_wall() {
    let mut session = Session::new(GameConfig::default(), ManualControl::new()).expect("session");

    let mut reports = Vec::new();
    for _ in 0..4 {
        reports.push(session.run_cycle(&[Direction::Left]).expect("cycle"));
    }

    assert!(reports[..3].iter().all(|report| !report.is_game_over()));
    let last = reports.last().expect("four reports");
    assert_eq!(
        last.status,
        SnakeStatus::Terminated(TerminalReason::OutOfBounds)
    );
    assert!(last.events.contains(&Event::GameOver {
        reason: TerminalReason::OutOfBounds
    }));
    assert_eq!(session.outcome(), Some(TerminalReason::OutOfBounds));
    assert_eq!(session.cycles(), 4);
}

#[test]
fn finished_game_ignores_further_cycles() {
    let mut session = Session::new(GameConfig::default(), ManualControl::new()).expect("session");
    for _ in 0..4 {
        let _ = session.run_cycle(&[Direction::Left]).expect("cycle");
    }
    let body: Vec<_> = query::body(session.world()).iter().collect();

    let report = session.run_cycle(&[Direction::Down]).expect("cycle");

    assert!(report.events.is_empty());
    assert!(report.is_game_over());
    assert_eq!(report.decision, None);
    assert_eq!(query::body(session.world()).iter().collect::<Vec<_>>(), body);
    assert_eq!(session.cycles(), 4);
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let mut session = Session::new(GameConfig::default(), ManualControl::new()).expect("session");
    for _ in 0..4 {
        let _ = session.run_cycle(&[Direction::Left]).expect("cycle");
    }

    let events = session.restart().expect("restart");

    assert_eq!(session.outcome(), None);
    assert_eq!(session.cycles(), 0);
    assert_eq!(session.score(), 300);
    assert_eq!(
        query::body(session.world()).iter().collect::<Vec<_>>(),
        GameConfig::default().starting_body
    );
    assert!(matches!(events.as_slice(), [Event::WorldReset, Event::FoodPlaced { .. }]));

    let report = session.run_cycle(&[Direction::Down]).expect("cycle");
    assert!(!report.is_game_over());
}

#[test]
fn full_board_leaves_no_room_for_food() {
    let config = GameConfig {
        columns: 2,
        rows: 1,
        starting_body: vec![CellCoord::new(0, 0)],
        food_seed: 7,
    };
    let mut session = Session::new(config, ManualControl::new()).expect("session");
    assert_eq!(query::food(session.world()), Some(CellCoord::new(1, 0)));

    let report = session.run_cycle(&[Direction::Right]).expect("cycle");

    assert_eq!(report.score, 200);
    assert_eq!(report.food_placed(), None);
    assert_eq!(query::food(session.world()), None);
    assert!(query::free_cells(session.world()).is_empty());

    let report = session.run_cycle(&[]).expect("cycle");
    assert_eq!(
        report.status,
        SnakeStatus::Terminated(TerminalReason::OutOfBounds)
    );
}

#[test]
fn overlapping_starting_body_ends_the_game_immediately() {
    let config = GameConfig {
        columns: 10,
        rows: 10,
        starting_body: [(5, 5), (5, 4), (4, 4), (4, 5), (5, 5)]
            .into_iter()
            .map(CellCoord::from)
            .collect(),
        ..GameConfig::default()
    };
    let mut session = Session::new(config, Autopilot::new()).expect("session");

    assert_eq!(session.outcome(), Some(TerminalReason::SelfCollided));
    assert_eq!(query::food(session.world()), None);

    let report = session.run_cycle(&[]).expect("cycle");
    assert!(report.events.is_empty());
    assert_eq!(
        report.status,
        SnakeStatus::Terminated(TerminalReason::SelfCollided)
    );
}

#[test]
fn autopilot_reports_its_route() {
    let mut session = Session::new(GameConfig::default(), Autopilot::new()).expect("session");
    let food = query::food(session.world()).expect("food");

    let report = session.run_cycle(&[]).expect("cycle");
    if report
        .events
        .iter()
        .any(|event| matches!(event, Event::FoodEaten { .. }))
    {
        // Food next to the head is eaten at once and the route is dropped.
        assert!(report.path.is_none());
        return;
    }

    let path = report.path.expect("route planned");
    assert_eq!(path.source(), Some(CellCoord::new(3, 3)));
    assert_eq!(path.target(), Some(food));
    assert_eq!(report.decision, path.step(0));
}
