//! In-place make/unmake of moves on a `Position`.
//!
//! `apply_move` and `undo_move` never allocate. Undo must follow strict stack
//! order; violations are caught by debug assertions only.

use crate::game_state::onitama_types::*;
use crate::moves::onitama_move::Move;

/// Play `mv` on `position` and report whether it ended the game.
///
/// The game ends when the captured piece is a king or when the moving king
/// lands on the opponent's home-center square. Both are decided from the
/// pre-move board.
#[inline]
pub fn apply_move(position: &mut Position, mv: &Move) -> bool {
    let origin = mv.origin as usize;
    let destination = mv.destination as usize;
    let mover = position.board[origin];

    debug_assert_eq!(position.active_player, mv.player, "move played out of turn");
    debug_assert!(mover.belongs_to(mv.player), "no mover on origin square");
    debug_assert_eq!(position.board[destination], mv.captured, "stale capture record");
    debug_assert_eq!(position.neutral_card(), mv.previous_neutral, "stale neutral card");

    let terminal = mv.captured.is_king()
        || (mover.is_king() && mv.destination == mv.player.goal_square());

    position.board[destination] = mover;
    position.board[origin] = Piece::Empty;

    let from_bit = square_bit(mv.origin);
    let to_bit = square_bit(mv.destination);
    if let Some(idx) = mover.location_index() {
        position.locations[idx] ^= from_bit | to_bit;
    }
    if let Some(idx) = mv.captured.location_index() {
        position.locations[idx] &= !to_bit;
    }

    let slot = held_slot(position, mv.player, mv.card);
    position.cards[slot] = mv.previous_neutral;
    position.cards[NEUTRAL_SLOT] = mv.card;

    position.active_player = mv.player.opponent();

    debug_assert!(position.is_consistent());
    terminal
}

/// Exact inverse of `apply_move`; `mv` must be the most recently applied move.
#[inline]
pub fn undo_move(position: &mut Position, mv: &Move) {
    let origin = mv.origin as usize;
    let destination = mv.destination as usize;
    let mover = position.board[destination];

    debug_assert_eq!(position.active_player, mv.player.opponent(), "undo out of order");
    debug_assert!(mover.belongs_to(mv.player), "undo out of order");
    debug_assert_eq!(position.board[origin], Piece::Empty, "undo out of order");
    debug_assert_eq!(position.neutral_card(), mv.card, "undo out of order");

    position.board[origin] = mover;
    position.board[destination] = mv.captured;

    let from_bit = square_bit(mv.origin);
    let to_bit = square_bit(mv.destination);
    if let Some(idx) = mover.location_index() {
        position.locations[idx] ^= from_bit | to_bit;
    }
    if let Some(idx) = mv.captured.location_index() {
        position.locations[idx] |= to_bit;
    }

    let slot = held_slot(position, mv.player, mv.previous_neutral);
    position.cards[slot] = mv.card;
    position.cards[NEUTRAL_SLOT] = mv.previous_neutral;

    position.active_player = mv.player;

    debug_assert!(position.is_consistent());
}

/// Slot index of `card` in `player`'s hand.
#[inline]
fn held_slot(position: &Position, player: Player, card: CardId) -> usize {
    let first = player.first_card_slot();
    debug_assert!(position.holds_card(player, card), "card not in hand");
    if position.cards[first] == card {
        first
    } else {
        first + 1
    }
}
