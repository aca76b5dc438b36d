use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use torus_snake::game::{
    Direction, GameConfig, GameEngine, GameState, Phase, Snake, StepOutcome,
};

fn running_game(engine: &mut GameEngine) -> GameState {
    let mut state = engine.new_game().unwrap();
    assert!(engine.resume(&mut state));
    state
}

/// Random play until game over, checking invariants after every step
#[test]
fn test_random_play_keeps_invariants() {
    let mut input = StdRng::seed_from_u64(0x5EED);

    for seed in 0..20 {
        let mut engine = GameEngine::new(GameConfig::new(12, 9).with_seed(seed)).unwrap();
        let mut state = running_game(&mut engine);

        for _ in 0..2_000 {
            let candidate = Direction::ALL[input.gen_range(0..4)];
            let blocked = state.blocked_direction();
            engine.request_direction_change(&mut state, candidate);
            assert_ne!(Some(state.direction), blocked);

            let length_before = state.snake.len();
            let food_before = state.food;
            let interval_before = engine.step_interval(&state);
            let target = engine.grid().neighbor(state.snake.head(), state.direction);

            match engine.advance(&mut state) {
                StepOutcome::Moved => {
                    assert_ne!(target, food_before);
                    assert_eq!(state.snake.len(), length_before);
                    assert_eq!(engine.step_interval(&state), interval_before);
                }
                StepOutcome::Grew => {
                    assert_eq!(target, food_before);
                    assert_eq!(state.snake.len(), length_before + 1);
                    assert!(!state.snake.contains(state.food));
                    assert!(engine.step_interval(&state) < interval_before);
                }
                StepOutcome::Collided => {
                    assert_eq!(state.phase, Phase::GameOver);
                    assert_eq!(state.snake.len(), length_before);
                    break;
                }
                StepOutcome::Won => {
                    assert_eq!(state.snake.len(), state.grid.cell_count());
                    break;
                }
                StepOutcome::Idle => panic!("running game reported idle"),
            }

            assert_eq!(state.snake.head(), target);
            assert!(state.snake.is_self_disjoint());
            let cells = state.snake.to_vec();
            for pair in cells.windows(2) {
                assert!(state.grid.direction_between(pair[1], pair[0]).is_some());
            }
        }
    }
}

#[test]
fn test_slide_drops_tail() {
    let mut engine = GameEngine::new(GameConfig::new(30, 30).with_seed(1)).unwrap();
    let mut state = GameState::new(
        engine.grid(),
        Snake::new([451, 481, 511]).unwrap(),
        Direction::Right,
        0,
    );
    engine.resume(&mut state);

    assert_eq!(engine.advance(&mut state), StepOutcome::Moved);
    assert_eq!(state.snake.to_vec(), vec![481, 511, 512]);
}

#[test]
fn test_right_edge_wraps_to_same_row() {
    let mut engine = GameEngine::new(GameConfig::new(30, 30).with_seed(1)).unwrap();
    let mut state = GameState::new(
        engine.grid(),
        Snake::new([237, 238, 239]).unwrap(),
        Direction::Right,
        0,
    );
    engine.resume(&mut state);

    engine.advance(&mut state);
    let (x, y) = engine.grid().coords(state.snake.head());
    assert_eq!((x, y), (0, 7));
}

#[test]
fn test_biting_body_ends_game() {
    let mut engine = GameEngine::new(GameConfig::new(30, 30).with_seed(1)).unwrap();
    // hook: head at 32 heading up into 2
    let body = [1, 2, 3, 33, 32];
    let mut state = GameState::new(engine.grid(), Snake::new(body).unwrap(), Direction::Left, 500);
    engine.resume(&mut state);
    assert!(engine.request_direction_change(&mut state, Direction::Up));

    assert_eq!(engine.advance(&mut state), StepOutcome::Collided);
    assert!(state.is_game_over());
    assert_eq!(state.snake.to_vec(), body.to_vec());
}

#[test]
fn test_reversal_is_rejected() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(1)).unwrap();
    let mut state = running_game(&mut engine);
    assert_eq!(state.direction, Direction::Right);

    assert!(!engine.request_direction_change(&mut state, Direction::Left));
    assert_eq!(state.direction, Direction::Right);
}

#[test]
fn test_restart_after_game_over() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(9)).unwrap();
    let mut state = running_game(&mut engine);
    state.snake = Snake::new([1, 2, 3, 33, 32]).unwrap();
    state.direction = Direction::Up;
    assert_eq!(engine.advance(&mut state), StepOutcome::Collided);

    engine.restart(&mut state).unwrap();
    assert_eq!(state.snake.to_vec(), vec![465, 466, 467]);
    assert_eq!(state.direction, Direction::Right);
    assert_eq!(state.phase, Phase::Paused);
    assert_eq!(state.score(), 0);
    assert!(state.grid.contains(state.food));
    assert!(!state.snake.contains(state.food));
}
