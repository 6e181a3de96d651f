//! Legal move generation for the side to move.
//!
//! Onitama has no check rule, so pseudo-legal and legal coincide: any card
//! destination that is not occupied by one of the mover's own pieces is a
//! legal move, including captures of the enemy king.

use crate::game_state::onitama_types::{square_bit, squares_in, Position};
use crate::moves::card_table::CardTable;
use crate::moves::onitama_move::Move;

/// Append every legal move of `position.active_player` to `out`.
///
/// Cards are the outer loop, then origins in ascending square order, then the
/// card-table destinations. The emitted set is fixed for a given position;
/// callers that care about order apply their own policy.
pub fn generate_moves(position: &Position, table: &CardTable, out: &mut Vec<Move>) {
    let player = position.active_player;
    let own = position.pieces_of(player);
    let previous_neutral = position.neutral_card();

    for card in position.held_cards(player) {
        for origin in squares_in(own) {
            for &destination in table.destinations(card, player, origin) {
                if own & square_bit(destination) != 0 {
                    continue;
                }
                out.push(Move {
                    origin,
                    destination,
                    player,
                    card,
                    captured: position.piece_at(destination),
                    previous_neutral,
                });
            }
        }
    }
}

pub fn legal_moves(position: &Position, table: &CardTable) -> Vec<Move> {
    let mut out = Vec::with_capacity(40);
    generate_moves(position, table, &mut out);
    out
}

/// Check one move against the current position.
pub fn is_legal_move(position: &Position, table: &CardTable, mv: &Move) -> bool {
    mv.player == position.active_player
        && position.piece_at(mv.origin).belongs_to(mv.player)
        && !position.piece_at(mv.destination).belongs_to(mv.player)
        && position.holds_card(mv.player, mv.card)
        && table
            .destinations(mv.card, mv.player, mv.origin)
            .contains(&mv.destination)
        && mv.captured == position.piece_at(mv.destination)
        && mv.previous_neutral == position.neutral_card()
}
