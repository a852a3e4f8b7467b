//! Difficulty level chosen in the level selector

use crate::error::GameError;

/// A validated level number (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    pub const FIRST: Level = Level(1);

    pub fn new(n: u32, max: u32) -> Result<Self, GameError> {
        if n == 0 || n > max {
            return Err(GameError::InvalidLevel {
                input: n.to_string(),
                max,
            });
        }
        Ok(Self(n))
    }

    /// Parse the value of the level `<select>`
    pub fn parse(s: &str, max: u32) -> Result<Self, GameError> {
        let n = s.trim().parse::<u32>().map_err(|_| GameError::InvalidLevel {
            input: s.to_string(),
            max,
        })?;
        Self::new(n, max)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_value() {
        assert_eq!(Level::parse("3", 5).unwrap().get(), 3);
        assert_eq!(Level::parse(" 1 ", 5).unwrap(), Level::FIRST);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(Level::parse("0", 5).is_err());
        assert!(Level::parse("6", 5).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Level::parse("hard", 5).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidLevel {
                input: "hard".into(),
                max: 5
            }
        );
        assert!(Level::parse("", 5).is_err());
        assert!(Level::parse("-2", 5).is_err());
    }
}
