//! Errors used throughout the Onitama engine.
//!
//! `OnitamaError` is the single error type returned by the rules boundary,
//! card-table construction, evaluator configuration and the search driver.
//!
//! Usage guidelines:
//! - Parsing and input variants (`MoveParse`, `UnknownCard`, `IllegalMove`,
//!   `OutOfBounds`) are recoverable and suitable for showing to a player.
//! - `InvalidPlayer`, `InvalidCardIndex`, `InvalidDeal` and `InvalidConfig`
//!   signal a caller bug and should fail fast.
//! - `NoLegalMove` is returned by the search when the root offers nothing to
//!   play; the engine never hands back a null move.
//!
//! Internal corruption (apply/undo out of order, location sets disagreeing
//! with the board) is not represented here: those are `debug_assert!`
//! failures inside the move applicator.

use thiserror::Error;

pub type OnitamaResult<T> = Result<T, OnitamaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnitamaError {
    /// A player token other than 0 (red) or 1 (blue).
    #[error("invalid player token {0}; expected 0 (red) or 1 (blue)")]
    InvalidPlayer(u8),

    /// The root position has no legal move (or the game is already over).
    #[error("no legal move available at the root position")]
    NoLegalMove,

    /// A 2-D coordinate outside the 5x5 board.
    #[error("square ({0}, {1}) is off the board")]
    OutOfBounds(i32, i32),

    /// Card index outside the 16-card pool.
    #[error("card index {0} is out of range")]
    InvalidCardIndex(usize),

    /// A deal that is not exactly five cards, or holdings that are not a
    /// permutation of the dealt cards.
    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    /// Rejected by the rules: wrong player, card not held, bad displacement...
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Move text that does not follow the `c5-c4 [crane]` notation.
    #[error("could not parse move text '{0}'")]
    MoveParse(String),

    #[error("unknown card name '{0}'")]
    UnknownCard(String),

    /// Evaluator weights that are negative or could overflow the win score.
    #[error("invalid evaluator configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::OnitamaError;

    #[test]
    fn messages_carry_payloads() {
        assert_eq!(
            OnitamaError::InvalidPlayer(7).to_string(),
            "invalid player token 7; expected 0 (red) or 1 (blue)"
        );
        assert_eq!(
            OnitamaError::OutOfBounds(-1, 5).to_string(),
            "square (-1, 5) is off the board"
        );
        assert!(OnitamaError::UnknownCard("lion".to_owned())
            .to_string()
            .contains("lion"));
    }
}
