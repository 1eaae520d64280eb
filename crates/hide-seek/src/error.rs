//! Engine error types

use thiserror::Error;

use crate::role::Role;

/// Errors surfaced by the engine
///
/// Position and strategy errors are programmer errors on the caller's
/// side and are never clamped or normalized away.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("position {index} is outside the world (0..{count})")]
    OutOfRange { index: usize, count: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid strategy: {0}")]
    InvalidStrategy(#[from] StrategyFault),

    #[error("invalid world dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("malformed payoff matrix: {0}")]
    MalformedMatrix(String),

    #[error("no move selected for the {0}")]
    NoMoveSelected(Role),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Why a probability vector was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyFault {
    #[error("strategy is empty")]
    Empty,

    #[error("strategy has {found} entries, world has {expected} positions")]
    LengthMismatch { expected: usize, found: usize },

    #[error("entry {index} is {value}")]
    BadEntry { index: usize, value: f64 },

    #[error("probabilities sum to {0}")]
    NotNormalized(f64),
}

impl GameError {
    /// Errors the caller caused by passing a bad position
    pub fn is_position_error(&self) -> bool {
        matches!(
            self,
            GameError::OutOfRange { .. } | GameError::CellOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = GameError::OutOfRange { index: 9, count: 4 };
        assert_eq!(e.to_string(), "position 9 is outside the world (0..4)");

        let e: GameError = StrategyFault::LengthMismatch { expected: 4, found: 3 }.into();
        assert_eq!(
            e.to_string(),
            "invalid strategy: strategy has 3 entries, world has 4 positions"
        );
    }

    #[test]
    fn test_is_position_error() {
        assert!(GameError::OutOfRange { index: 1, count: 1 }.is_position_error());
        assert!(GameError::CellOutOfRange { row: 3, col: 0, rows: 2, cols: 2 }.is_position_error());
        assert!(!GameError::InvalidStrategy(StrategyFault::Empty).is_position_error());
    }
}
