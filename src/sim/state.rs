//! Game state and core types
//!
//! Everything the rules read or mutate lives here. No DOM access.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::Level;
use crate::config::GameConfig;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for the start button
    Idle,
    /// Balls on the field, clicks are checked
    Playing,
    /// Round decided; only a reload starts another
    Finished(Outcome),
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every multiple cleared with life to spare
    Won { score: u32 },
    /// Multiples left on the field, or no life left
    Lost { unresolved: u32, life: u32 },
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won { .. })
    }
}

/// Ball display state (mirrors the CSS class on its element)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallStatus {
    #[default]
    Normal,
    /// Clicked and a multiple; removed right after
    Correct,
    /// Clicked and not a multiple; stays on the field
    Error,
}

impl BallStatus {
    /// CSS class used by the page stylesheet
    pub fn css_class(&self) -> &'static str {
        match self {
            BallStatus::Normal => "bola",
            BallStatus::Correct => "bolaAcertada",
            BallStatus::Error => "bolaError",
        }
    }
}

/// A numbered ball on the field
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    /// Number printed on the ball
    pub number: u32,
    /// Top-left corner in field pixels
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub status: BallStatus,
}

impl Ball {
    pub fn new(id: u32, number: u32) -> Self {
        Self {
            id,
            number,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            status: BallStatus::Normal,
        }
    }

    #[inline]
    pub fn is_multiple_of(&self, target: u32) -> bool {
        target != 0 && self.number % target == 0
    }

    /// A multiple the player has not clicked yet
    pub fn is_unresolved(&self, target: u32) -> bool {
        self.status == BallStatus::Normal && self.is_multiple_of(target)
    }

    /// Advance one tick, bouncing off the field edges
    pub fn advance(&mut self, field: Vec2, size: f32) {
        let max = (field - Vec2::splat(size)).max(Vec2::ZERO);
        self.pos += self.vel;

        if self.pos.x < 0.0 {
            self.pos.x = -self.pos.x;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > max.x {
            self.pos.x = 2.0 * max.x - self.pos.x;
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y < 0.0 {
            self.pos.y = -self.pos.y;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > max.y {
            self.pos.y = 2.0 * max.y - self.pos.y;
            self.vel.y = -self.vel.y.abs();
        }

        // A step longer than the field can still overshoot
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }
}

/// Notifications for the view, drained after every action
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted {
        level: Level,
        target: u32,
        life: u32,
        balls: u32,
    },
    /// A multiple was clicked and removed
    BallCleared { id: u32 },
    /// A wrong ball was clicked
    BallMissed { id: u32, life: u32 },
    /// Life reached zero mid-round
    LifeDepleted,
    RoundEnded(Outcome),
}

/// Complete game state (the model)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Rules for this session
    pub config: GameConfig,
    pub level: Level,
    pub life: u32,
    pub ball_count: u32,
    /// Target divisor shown to the player (0 before the round starts)
    pub target: u32,
    pub phase: RoundPhase,
    /// Field size in pixels
    pub field: Vec2,
    /// Balls still on the field, sorted by id
    pub balls: Vec<Ball>,
    /// Animation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let level = Level::FIRST;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            life: config.base_life,
            ball_count: config.base_ball_count,
            config,
            level,
            target: 0,
            phase: RoundPhase::Idle,
            field: Vec2::ZERO,
            balls: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new ball id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Multiples still waiting to be clicked
    pub fn unresolved_count(&self) -> u32 {
        self.balls
            .iter()
            .filter(|b| b.is_unresolved(self.target))
            .count() as u32
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_at_level_one() {
        let state = GameState::new(7, GameConfig::default());
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.level, Level::FIRST);
        assert_eq!(state.life, 100);
        assert_eq!(state.ball_count, 10);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_multiple_check() {
        let ball = Ball::new(1, 42);
        assert!(ball.is_multiple_of(6));
        assert!(ball.is_multiple_of(7));
        assert!(!ball.is_multiple_of(5));
        assert!(!ball.is_multiple_of(0));
    }

    #[test]
    fn test_error_ball_is_not_unresolved() {
        let mut ball = Ball::new(1, 12);
        assert!(ball.is_unresolved(3));
        ball.status = BallStatus::Error;
        assert!(!ball.is_unresolved(3));
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(BallStatus::Normal.css_class(), "bola");
        assert_eq!(BallStatus::Correct.css_class(), "bolaAcertada");
        assert_eq!(BallStatus::Error.css_class(), "bolaError");
    }

    #[test]
    fn test_ball_bounces_off_right_wall() {
        let mut ball = Ball::new(1, 3);
        ball.pos = Vec2::new(145.0, 10.0);
        ball.vel = Vec2::new(10.0, 0.0);
        ball.advance(Vec2::new(200.0, 100.0), 50.0);
        assert_eq!(ball.pos, Vec2::new(145.0, 10.0));
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut ball = Ball::new(1, 3);
        ball.pos = Vec2::new(20.0, 4.0);
        ball.vel = Vec2::new(0.0, -10.0);
        ball.advance(Vec2::new(200.0, 100.0), 50.0);
        assert_eq!(ball.pos, Vec2::new(20.0, 6.0));
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_ball_in_tiny_field_stays_at_origin() {
        let mut ball = Ball::new(1, 3);
        ball.vel = Vec2::new(30.0, 30.0);
        ball.advance(Vec2::new(20.0, 20.0), 50.0);
        assert_eq!(ball.pos, Vec2::ZERO);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, GameConfig::default());
        state.push_event(GameEvent::LifeDepleted);
        assert_eq!(state.drain_events(), vec![GameEvent::LifeDepleted]);
        assert!(state.drain_events().is_empty());
    }
}
