//! Visit-order policy for alpha-beta.

use crate::moves::onitama_move::Move;

/// Captures of any piece and king steps onto the goal square.
#[inline]
pub fn is_tactical(mv: &Move, mover_is_king: bool) -> bool {
    mv.is_capture() || (mover_is_king && mv.destination == mv.player.goal_square())
}

/// Stable partition: tactical moves first, everything else after, each group
/// keeping generation order.
pub fn order_moves<F>(moves: &mut [Move], mut mover_is_king: F)
where
    F: FnMut(&Move) -> bool,
{
    moves.sort_by_key(|mv| !is_tactical(mv, mover_is_king(mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::onitama_types::{Piece, Player, RED_GOAL};

    fn mv(origin: u8, destination: u8, captured: Piece) -> Move {
        Move {
            origin,
            destination,
            player: Player::Red,
            card: 0,
            captured,
            previous_neutral: 4,
        }
    }

    #[test]
    fn tactical_moves_come_first_and_order_is_stable() {
        let quiet_a = mv(0, 5, Piece::Empty);
        let capture = mv(1, 6, Piece::BluePawn);
        let quiet_b = mv(3, 8, Piece::Empty);
        let goal = mv(17, RED_GOAL, Piece::Empty);
        let king_capture = mv(4, 9, Piece::BlueKing);
        let mut moves = vec![quiet_a, capture, quiet_b, goal, king_capture];

        order_moves(&mut moves, |m| m.origin == 17);

        assert_eq!(moves, vec![capture, goal, king_capture, quiet_a, quiet_b]);
    }

    #[test]
    fn pawn_on_goal_square_is_not_tactical() {
        let pawn_step = mv(17, RED_GOAL, Piece::Empty);
        assert!(!is_tactical(&pawn_step, false));
        assert!(is_tactical(&pawn_step, true));
    }
}
