//! Core value types shared by the whole engine.
//!
//! Squares are linear indices `x + 5 * y` with `y = 0` on Red's home row and
//! `y = 4` on Blue's. Location sets are `u32` bitsets over those indices.

use std::fmt;

use crate::errors::{OnitamaError, OnitamaResult};

pub use crate::game_state::position::Position;

/// Board square index (`0..=24`).
pub type Square = u8;

/// Bitset of squares, bit `n` set when square `n` is a member.
pub type SquareSet = u32;

/// Index of a dealt card (`0..5`) in the starting deal.
pub type CardId = u8;

pub const BOARD_WIDTH: u8 = 5;
pub const NUM_SQUARES: usize = 25;

/// Square Red's king must reach to win (x = 2, y = 4).
pub const RED_GOAL: Square = 22;
/// Square Blue's king must reach to win (x = 2, y = 0).
pub const BLUE_GOAL: Square = 2;

/// Slot of the neutral card in a card slot assignment.
pub const NEUTRAL_SLOT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// The opponent's home-center square.
    #[inline]
    pub const fn goal_square(self) -> Square {
        match self {
            Player::Red => RED_GOAL,
            Player::Blue => BLUE_GOAL,
        }
    }

    #[inline]
    pub const fn pawn(self) -> Piece {
        match self {
            Player::Red => Piece::RedPawn,
            Player::Blue => Piece::BluePawn,
        }
    }

    #[inline]
    pub const fn king(self) -> Piece {
        match self {
            Player::Red => Piece::RedKing,
            Player::Blue => Piece::BlueKing,
        }
    }

    /// First of the two card slots this player holds.
    #[inline]
    pub const fn first_card_slot(self) -> usize {
        self.index() * 2
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = OnitamaError;

    fn try_from(token: u8) -> OnitamaResult<Self> {
        match token {
            0 => Ok(Player::Red),
            1 => Ok(Player::Blue),
            other => Err(OnitamaError::InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    RedPawn,
    RedKing,
    BluePawn,
    BlueKing,
}

impl Piece {
    #[inline]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Piece::Empty => None,
            Piece::RedPawn | Piece::RedKing => Some(Player::Red),
            Piece::BluePawn | Piece::BlueKing => Some(Player::Blue),
        }
    }

    #[inline]
    pub const fn belongs_to(self, player: Player) -> bool {
        match (self, player) {
            (Piece::RedPawn | Piece::RedKing, Player::Red) => true,
            (Piece::BluePawn | Piece::BlueKing, Player::Blue) => true,
            _ => false,
        }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::RedKing | Piece::BlueKing)
    }

    /// Index into `Position::locations`, `None` for an empty square.
    #[inline]
    pub const fn location_index(self) -> Option<usize> {
        match self {
            Piece::Empty => None,
            Piece::RedPawn => Some(0),
            Piece::RedKing => Some(1),
            Piece::BluePawn => Some(2),
            Piece::BlueKing => Some(3),
        }
    }
}

#[inline]
pub const fn square_from_xy(x: u8, y: u8) -> Square {
    x + BOARD_WIDTH * y
}

#[inline]
pub const fn square_xy(square: Square) -> (u8, u8) {
    (square % BOARD_WIDTH, square / BOARD_WIDTH)
}

/// Shift a square by a 2-D displacement, `None` when it leaves the board.
#[inline]
pub fn offset_square(square: Square, dx: i8, dy: i8) -> Option<Square> {
    let (x, y) = square_xy(square);
    let nx = x as i8 + dx;
    let ny = y as i8 + dy;
    if (0..BOARD_WIDTH as i8).contains(&nx) && (0..BOARD_WIDTH as i8).contains(&ny) {
        Some(square_from_xy(nx as u8, ny as u8))
    } else {
        None
    }
}

/// Validate a 2-D coordinate coming from outside the engine.
pub fn checked_square(x: i32, y: i32) -> OnitamaResult<Square> {
    let width = BOARD_WIDTH as i32;
    if (0..width).contains(&x) && (0..width).contains(&y) {
        Ok(square_from_xy(x as u8, y as u8))
    } else {
        Err(OnitamaError::OutOfBounds(x, y))
    }
}

#[inline]
pub const fn square_bit(square: Square) -> SquareSet {
    1 << square
}

/// Iterate the members of a square set in ascending order.
#[inline]
pub fn squares_in(set: SquareSet) -> SquareIter {
    SquareIter(set)
}

pub struct SquareIter(SquareSet);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(square)
    }
}
