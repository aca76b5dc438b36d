//! Step-loop pacing and cancellation, driven by a simulated clock.

use std::time::Duration;
use torus_snake::game::{
    Direction, GameConfig, GameState, Grid, ManualScheduler, Scheduler, Session, Snake,
    StepOutcome,
};

fn session(seed: u64) -> Session<ManualScheduler> {
    Session::new(GameConfig::default().with_seed(seed), ManualScheduler::new()).unwrap()
}

/// Paused session on a 30x30 grid from a hand-placed position
fn session_at(body: &[usize], direction: Direction, food: usize) -> Session<ManualScheduler> {
    let state = GameState::new(
        Grid::new(30, 30),
        Snake::new(body.iter().copied()).unwrap(),
        direction,
        food,
    );
    Session::with_state(GameConfig::default().with_seed(1), state, ManualScheduler::new())
        .unwrap()
}

#[test]
fn test_steps_arrive_at_length_dependent_interval() {
    // food far behind the head, out of reach for a while
    let mut session = session_at(&[465, 466, 467], Direction::Right, 0);
    session.resume();

    // 500ms / 3 per step
    let outcomes = session.run_for(Duration::from_millis(1_000));
    assert_eq!(outcomes, vec![StepOutcome::Moved; 6]);
    assert_eq!(session.state().tick, 6);
    assert_eq!(session.scheduler().scheduled.len(), 7);
}

#[test]
fn test_growth_shortens_the_next_interval() {
    let mut session = session_at(&[465, 466, 467], Direction::Right, 468);
    session.resume();
    assert_eq!(session.scheduler().remaining(), Some(Duration::from_millis(500) / 3));

    let outcomes = session.run_for(Duration::from_millis(500) / 3);
    assert_eq!(outcomes, vec![StepOutcome::Grew]);
    assert_eq!(session.scheduler().remaining(), Some(Duration::from_millis(125)));
}

#[test]
fn test_interval_never_increases_across_growth() {
    let mut session = session(5);
    session.resume();

    let mut last = session.step_interval();
    for _ in 0..200 {
        // chase the food along its row, then its column
        let grid = session.state().grid;
        let (hx, hy) = grid.coords(session.state().snake.head());
        let (fx, fy) = grid.coords(session.state().food);
        let wanted = if hx != fx {
            Direction::Right
        } else if hy != fy {
            Direction::Down
        } else {
            session.state().direction
        };
        session.request_direction_change(wanted);

        let length_before = session.state().snake.len();
        let outcomes = session.run_for(last);
        assert_eq!(outcomes.len(), 1);
        if outcomes[0] == StepOutcome::Collided {
            break;
        }

        let now = session.step_interval();
        if session.state().snake.len() > length_before {
            assert!(now < last);
        } else {
            assert_eq!(now, last);
        }
        assert_eq!(session.scheduler().remaining(), Some(now));
        last = now;
    }
    assert!(session.state().score() > 0);
}

#[test]
fn test_pause_freezes_and_resume_uses_current_interval() {
    let mut session = session(3);
    session.resume();
    session.run_for(Duration::from_millis(400));
    let snapshot = session.snapshot();

    session.pause();
    assert!(session.run_for(Duration::from_secs(30)).is_empty());
    assert_eq!(session.snapshot().snake, snapshot.snake);
    assert!(session.snapshot().paused);

    session.resume();
    assert_eq!(session.scheduler().remaining(), Some(session.step_interval()));
}

#[test]
fn test_stale_tick_after_pause_is_ignored() {
    let mut session = session(3);
    session.resume();
    session.pause();
    let before = session.snapshot();

    // a timer that fired anyway must not move the snake
    assert_eq!(session.on_tick(), StepOutcome::Idle);
    assert_eq!(session.snapshot(), before);
    assert!(!session.scheduler().is_pending());
}

#[test]
fn test_game_over_cancels_the_loop() {
    // hook shape: turning up from 32 bites the segment at 2
    let mut session = session_at(&[1, 2, 3, 33, 32], Direction::Left, 500);
    session.resume();
    assert!(session.request_direction_change(Direction::Up));

    let outcomes = session.run_for(Duration::from_secs(1));
    assert_eq!(outcomes, vec![StepOutcome::Collided]);
    assert!(session.state().is_game_over());
    assert_eq!(session.state().snake.to_vec(), vec![1, 2, 3, 33, 32]);
    assert!(!session.scheduler().is_pending());

    assert!(session.run_for(Duration::from_secs(60)).is_empty());
    assert!(!session.resume());
    assert!(!session.request_direction_change(Direction::Down));
}

#[test]
fn test_restart_after_game_over_starts_paused() {
    let mut session = session_at(&[1, 2, 3, 33, 32], Direction::Up, 500);
    session.resume();
    session.run_for(Duration::from_millis(700));
    assert!(session.state().is_game_over());

    session.restart().unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.snake.len(), 3);
    assert_eq!(snapshot.direction, Direction::Right);
    assert!(snapshot.paused);
    assert!(!snapshot.game_over);
    assert_eq!(snapshot.tick, 0);
    assert!(!snapshot.snake.contains(&snapshot.food));
    assert!(session.run_for(Duration::from_secs(5)).is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let session = session(2);
    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["width"], 30);
    assert_eq!(json["direction"], "right");
    assert_eq!(json["paused"], true);
}
