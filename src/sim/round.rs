//! Round flow: start, click checks, end-of-round tally and animation tick

use glam::Vec2;
use rand::Rng;

use super::level::Level;
use super::state::{Ball, BallStatus, GameEvent, GameState, Outcome, RoundPhase};
use crate::error::GameError;

/// Outcome of a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The ball was a multiple and is gone
    Cleared,
    /// Wrong ball (again, if already marked); life after the penalty
    Missed { life: u32 },
}

fn require_idle(state: &GameState) -> Result<(), GameError> {
    match state.phase {
        RoundPhase::Idle => Ok(()),
        RoundPhase::Playing => Err(GameError::RoundInProgress),
        RoundPhase::Finished(_) => Err(GameError::RoundOver),
    }
}

fn require_playing(state: &GameState) -> Result<(), GameError> {
    if state.is_playing() {
        Ok(())
    } else {
        Err(GameError::RoundNotActive)
    }
}

/// Configure the model for `level` and fill a `field`-sized area with balls
pub fn start_round(state: &mut GameState, level: Level, field: Vec2) -> Result<(), GameError> {
    require_idle(state)?;
    state.config.validate()?;

    state.level = level;
    state.ball_count = state.config.ball_count_for(level);
    state.life = state.config.starting_life_for(level);
    state.field = field.max(Vec2::ZERO);
    state.target = state
        .rng
        .random_range(state.config.divisor_min..=state.config.divisor_max);

    generate_balls(state);

    state.phase = RoundPhase::Playing;
    state.push_event(GameEvent::RoundStarted {
        level,
        target: state.target,
        life: state.life,
        balls: state.ball_count,
    });
    log::info!(
        "Round started: level {}, target {}, {} balls, life {}",
        level,
        state.target,
        state.ball_count,
        state.life
    );
    Ok(())
}

/// Spawn `ball_count` balls at random spots with random headings.
/// At least one of them is a multiple of the target.
fn generate_balls(state: &mut GameState) {
    state.balls.clear();

    let size = state.config.ball_size;
    let speed = state.config.ball_speed;
    let number_max = state.config.number_max;
    let max = (state.field - Vec2::splat(size)).max(Vec2::ZERO);

    for _ in 0..state.ball_count {
        let id = state.next_entity_id();
        let number = state.rng.random_range(1..=number_max);
        let mut ball = Ball::new(id, number);

        ball.pos = Vec2::new(
            state.rng.random_range(0.0..=max.x),
            state.rng.random_range(0.0..=max.y),
        );
        let heading = state.rng.random_range(0.0..std::f32::consts::TAU);
        ball.vel = Vec2::from_angle(heading) * speed;

        state.balls.push(ball);
    }

    let target = state.target;
    let multiples = number_max / target;
    if multiples > 0
        && !state.balls.is_empty()
        && !state.balls.iter().any(|b| b.is_multiple_of(target))
    {
        let number = target * state.rng.random_range(1..=multiples);
        let slot = state.rng.random_range(0..state.balls.len());
        state.balls[slot].number = number;
    }
}

/// Check a clicked ball against the target
pub fn verify_ball(state: &mut GameState, id: u32) -> Result<Verdict, GameError> {
    require_playing(state)?;

    let target = state.target;
    let idx = state
        .balls
        .iter()
        .position(|b| b.id == id)
        .ok_or(GameError::UnknownBall(id))?;

    let ball = &mut state.balls[idx];
    if ball.is_multiple_of(target) {
        ball.status = BallStatus::Correct;
        state.balls.remove(idx);
        state.push_event(GameEvent::BallCleared { id });
        log::debug!("Ball {} cleared", id);
        return Ok(Verdict::Cleared);
    }

    ball.status = BallStatus::Error;
    let number = ball.number;
    state.life = state.life.saturating_sub(state.config.miss_penalty);
    let life = state.life;
    state.push_event(GameEvent::BallMissed { id, life });
    log::debug!("Ball {} ({}) is not a multiple of {}, life {}", id, number, target, life);

    if life == 0 && state.config.end_on_depleted_life {
        state.push_event(GameEvent::LifeDepleted);
        log::info!("Life depleted");
        finish_round(state)?;
    }

    Ok(Verdict::Missed { life })
}

/// Tally the field and decide the round
pub fn finish_round(state: &mut GameState) -> Result<Outcome, GameError> {
    require_playing(state)?;

    let unresolved = state.unresolved_count();
    let outcome = if unresolved == 0 && state.life > 0 {
        Outcome::Won {
            score: state.life.saturating_mul(state.level.get()),
        }
    } else {
        Outcome::Lost {
            unresolved,
            life: state.life,
        }
    };

    state.balls.clear();
    state.phase = RoundPhase::Finished(outcome);
    state.push_event(GameEvent::RoundEnded(outcome));

    match outcome {
        Outcome::Won { score } => log::info!("Round won with score {}", score),
        Outcome::Lost { unresolved, life } => {
            log::info!("Round lost ({} multiples left, life {})", unresolved, life)
        }
    }
    Ok(outcome)
}

/// Advance ball motion by one animation step
pub fn tick(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }

    let field = state.field;
    let size = state.config.ball_size;
    for ball in &mut state.balls {
        ball.advance(field, size);
    }
    state.time_ticks += 1;
}
