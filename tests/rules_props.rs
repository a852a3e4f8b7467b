// Property tests for level scaling, scoring and ball motion.

use glam::Vec2;
use multiple_hunt::GameConfig;
use multiple_hunt::sim::{
    BallStatus, GameState, Level, Outcome, finish_round, start_round, tick, verify_ball,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn level_scaling_matches_formulas(level in 1u32..=5, seed in any::<u64>()) {
        let config = GameConfig::default();
        let mut state = GameState::new(seed, config.clone());
        start_round(&mut state, Level::new(level, 5).unwrap(), Vec2::new(500.0, 400.0)).unwrap();

        prop_assert_eq!(state.ball_count, level * config.base_ball_count);
        prop_assert_eq!(state.balls.len() as u32, state.ball_count);
        prop_assert_eq!(state.life, config.base_life - (level - 1) * config.life_step);
        prop_assert!(state.target >= config.divisor_min && state.target <= config.divisor_max);
        prop_assert!(state.balls.iter().any(|b| b.is_multiple_of(state.target)));
    }

    #[test]
    fn life_never_underflows(seed in any::<u64>(), clicks in proptest::collection::vec(0usize..50, 0..80)) {
        let config = GameConfig::default();
        let mut state = GameState::new(seed, config);
        start_round(&mut state, Level::new(5, 5).unwrap(), Vec2::new(500.0, 400.0)).unwrap();

        for pick in clicks {
            if state.balls.is_empty() {
                break;
            }
            let id = state.balls[pick % state.balls.len()].id;
            verify_ball(&mut state, id).unwrap();
            prop_assert!(state.life <= 60);
        }
        // Error balls stay, correct balls are gone
        prop_assert!(state.balls.iter().all(|b| b.status != BallStatus::Correct));

        match finish_round(&mut state).unwrap() {
            Outcome::Won { score } => prop_assert_eq!(score, state.life * 5),
            Outcome::Lost { unresolved, life } => {
                prop_assert!(unresolved > 0 || life == 0);
            }
        }
    }

    #[test]
    fn balls_stay_in_field(seed in any::<u64>(), w in 10.0f32..1200.0, h in 10.0f32..900.0, steps in 1usize..300) {
        let config = GameConfig::default();
        let size = config.ball_size;
        let mut state = GameState::new(seed, config);
        start_round(&mut state, Level::FIRST, Vec2::new(w, h)).unwrap();

        for _ in 0..steps {
            tick(&mut state);
        }
        let max = (Vec2::new(w, h) - Vec2::splat(size)).max(Vec2::ZERO);
        for ball in &state.balls {
            prop_assert!(ball.pos.x >= 0.0 && ball.pos.x <= max.x);
            prop_assert!(ball.pos.y >= 0.0 && ball.pos.y <= max.y);
        }
    }
}
