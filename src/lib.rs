//! Multiple Hunt - click every ball that is a multiple of the target number
//!
//! Core modules:
//! - `sim`: Round rules (level scaling, click checks, end-of-round tally, ball motion)
//! - `config`: Data-driven game rules
//! - `score`: The `puntuacion` score cookie
//! - `platform`: Browser DOM view and cookie access (wasm only)
//! - `audio`: Web Audio sound effects (wasm only)

pub mod config;
pub mod error;
pub mod score;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;

pub use config::GameConfig;
pub use error::GameError;
pub use score::ScoreCookie;

/// Page element ids and class names the game expects
pub mod dom_ids {
    /// Area the balls move in
    pub const FIELD: &str = "ventanaJuego";
    /// Start button
    pub const START_BUTTON: &str = "juego";
    /// Level `<select>`
    pub const LEVEL_SELECT: &str = "niveles";
    /// Holds the target divisor
    pub const TARGET: &str = "numeroAside";
    /// Life display; the value is its second child
    pub const LIFE: &str = "puntuacion";
    /// End-game button
    pub const END_BUTTON: &str = "acabarJuego";
    /// Restart button created at the end of a round
    pub const RESTART_BUTTON: &str = "otraVez";
    /// Optional display of the previous round's score
    pub const LAST_SCORE: &str = "ultimaPuntuacion";
    /// Attribute carrying a ball's id on its element
    pub const BALL_ID_ATTR: &str = "data-ball-id";
}
