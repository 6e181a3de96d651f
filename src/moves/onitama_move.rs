//! Engine-internal move record.
//!
//! A `Move` carries everything `undo_move` needs: the destination's previous
//! occupant and the neutral card that was in effect before the move.

use crate::game_state::onitama_types::{square_xy, CardId, Piece, Player, Square};
use crate::moves::card_table::CardTable;
use crate::moves::game_move::GameMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
    pub player: Player,
    pub card: CardId,
    pub captured: Piece,
    pub previous_neutral: CardId,
}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured != Piece::Empty
    }

    #[inline]
    pub fn captures_king(&self) -> bool {
        self.captured.is_king()
    }

    /// Translate into the rules-engine coordinate and card format.
    pub fn to_game_move(&self, table: &CardTable) -> GameMove {
        GameMove {
            player: self.player,
            start: square_xy(self.origin),
            end: square_xy(self.destination),
            card: table.card(self.card),
        }
    }
}
