//! Plain-text board renderer.
//!
//! Creates a human-readable view of a position for the self-play driver,
//! debugging, and test failure messages.

use crate::game_state::onitama_types::*;
use crate::moves::card_table::CardTable;

/// Render the board, card holdings and side to move.
///
/// Rank 5 (Blue's home row) is printed on top, files `a`..`e` left to right.
pub fn render_position(position: &Position, table: &CardTable) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e\n");
    for y in (0..BOARD_WIDTH).rev() {
        let rank = char::from(b'1' + y);
        out.push(rank);
        out.push(' ');
        for x in 0..BOARD_WIDTH {
            out.push(piece_char(position.piece_at(square_from_xy(x, y))));
            if x + 1 < BOARD_WIDTH {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(rank);
        out.push('\n');
    }
    out.push_str("  a b c d e\n");

    for player in [Player::Red, Player::Blue] {
        let [first, second] = position.held_cards(player);
        out.push_str(&format!(
            "{:<8} {}, {}\n",
            format!("{player}:"),
            table.card(first),
            table.card(second)
        ));
    }
    out.push_str(&format!(
        "{:<8} {}\n",
        "neutral:",
        table.card(position.neutral_card())
    ));
    out.push_str(&format!("to move: {}", position.active_player));

    out
}

fn piece_char(piece: Piece) -> char {
    match piece {
        Piece::Empty => '·',
        Piece::RedPawn => 'r',
        Piece::RedKing => 'R',
        Piece::BluePawn => 'b',
        Piece::BlueKing => 'B',
    }
}
