//! Mutable search position.
//!
//! `Position` is the single source of truth mutated in place by the search:
//! the board array, one location bitset per piece type, the card slot
//! assignment and the side to move. The location sets mirror the board at
//! every point outside `apply_move` / `undo_move`.

use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::cards::{CardKind, Deal};
use crate::game_state::game::GameSnapshot;
use crate::game_state::onitama_types::*;
use crate::moves::card_table::CardTable;
use crate::moves::game_move::GameMove;
use crate::moves::onitama_move::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: [Piece; NUM_SQUARES],
    // RedPawn, RedKing, BluePawn, BlueKing
    pub locations: [SquareSet; 4],
    // [red0, red1, blue0, blue1, neutral]
    pub cards: [CardId; 5],
    pub active_player: Player,
}

impl Position {
    pub fn new(board: [Piece; NUM_SQUARES], cards: [CardId; 5], active_player: Player) -> Self {
        let mut locations = [0; 4];
        for (square, piece) in board.iter().enumerate() {
            if let Some(idx) = piece.location_index() {
                locations[idx] |= square_bit(square as Square);
            }
        }
        Self {
            board,
            locations,
            cards,
            active_player,
        }
    }

    /// Standard opening with the cards dealt in slot order.
    pub fn starting(active_player: Player) -> Self {
        Self::new(starting_board(), [0, 1, 2, 3, 4], active_player)
    }

    /// Build the root position and card table from a rules-engine snapshot.
    pub fn from_snapshot<G: GameSnapshot + ?Sized>(game: &G) -> OnitamaResult<(Self, CardTable)> {
        let deal = game.start_cards();
        let cards = assign_card_ids(&deal, &game.current_cards())?;
        let position = Self::new(game.board(), cards, game.active_player());
        Ok((position, CardTable::new(deal)))
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.board[square as usize]
    }

    #[inline]
    pub fn locations_of(&self, piece: Piece) -> SquareSet {
        piece
            .location_index()
            .map_or(0, |idx| self.locations[idx])
    }

    /// Squares occupied by any of `player`'s pieces.
    #[inline]
    pub fn pieces_of(&self, player: Player) -> SquareSet {
        self.locations_of(player.pawn()) | self.locations_of(player.king())
    }

    #[inline]
    pub fn has_king(&self, player: Player) -> bool {
        self.locations_of(player.king()) != 0
    }

    #[inline]
    pub fn pawn_count(&self, player: Player) -> i32 {
        self.locations_of(player.pawn()).count_ones() as i32
    }

    pub fn king_square(&self, player: Player) -> Option<Square> {
        squares_in(self.locations_of(player.king())).next()
    }

    #[inline]
    pub fn held_cards(&self, player: Player) -> [CardId; 2] {
        let first = player.first_card_slot();
        [self.cards[first], self.cards[first + 1]]
    }

    #[inline]
    pub fn neutral_card(&self) -> CardId {
        self.cards[NEUTRAL_SLOT]
    }

    #[inline]
    pub fn holds_card(&self, player: Player, card: CardId) -> bool {
        self.held_cards(player).contains(&card)
    }

    /// Winner if a king has been captured or has reached its goal square.
    pub fn winner(&self) -> Option<Player> {
        let red_wins = !self.has_king(Player::Blue)
            || self.locations_of(Piece::RedKing) & square_bit(RED_GOAL) != 0;
        let blue_wins = !self.has_king(Player::Red)
            || self.locations_of(Piece::BlueKing) & square_bit(BLUE_GOAL) != 0;
        match (red_wins, blue_wins) {
            (true, _) => Some(Player::Red),
            (false, true) => Some(Player::Blue),
            _ => None,
        }
    }

    /// Location sets agree with the board and the card slots are a permutation.
    pub fn is_consistent(&self) -> bool {
        let rebuilt = Self::new(self.board, self.cards, self.active_player);
        let mut seen = [false; 5];
        for &card in &self.cards {
            match seen.get_mut(card as usize) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        rebuilt.locations == self.locations
    }

    /// Turn a rules-engine move into an engine `Move`, checking legality.
    pub fn resolve_game_move(&self, table: &CardTable, game_move: &GameMove) -> OnitamaResult<Move> {
        if game_move.player != self.active_player {
            return Err(OnitamaError::IllegalMove(format!(
                "{} is not the side to move",
                game_move.player
            )));
        }
        let origin = checked_square(game_move.start.0 as i32, game_move.start.1 as i32)?;
        let destination = checked_square(game_move.end.0 as i32, game_move.end.1 as i32)?;
        let card = self
            .held_cards(game_move.player)
            .into_iter()
            .find(|&id| table.card(id) == game_move.card)
            .ok_or_else(|| {
                OnitamaError::IllegalMove(format!(
                    "{} does not hold {}",
                    game_move.player, game_move.card
                ))
            })?;
        if !self.piece_at(origin).belongs_to(game_move.player) {
            return Err(OnitamaError::IllegalMove(format!(
                "no {} piece on the start square",
                game_move.player
            )));
        }
        if self.piece_at(destination).belongs_to(game_move.player) {
            return Err(OnitamaError::IllegalMove(
                "destination holds the mover's own piece".to_owned(),
            ));
        }
        if !table
            .destinations(card, game_move.player, origin)
            .contains(&destination)
        {
            return Err(OnitamaError::IllegalMove(format!(
                "{} does not allow that displacement",
                game_move.card
            )));
        }
        Ok(Move {
            origin,
            destination,
            player: game_move.player,
            card,
            captured: self.piece_at(destination),
            previous_neutral: self.neutral_card(),
        })
    }
}

/// Pawns on the home rows, kings on the center files.
pub fn starting_board() -> [Piece; NUM_SQUARES] {
    let mut board = [Piece::Empty; NUM_SQUARES];
    for x in 0..BOARD_WIDTH {
        let (red, blue) = if x == 2 {
            (Piece::RedKing, Piece::BlueKing)
        } else {
            (Piece::RedPawn, Piece::BluePawn)
        };
        board[square_from_xy(x, 0) as usize] = red;
        board[square_from_xy(x, 4) as usize] = blue;
    }
    board
}

/// Map the current holdings onto dealt card ids.
///
/// Duplicate kinds in a deal are matched to unused ids in slot order, so the
/// result is always a permutation of `0..5`.
pub fn assign_card_ids(deal: &Deal, current: &[CardKind; 5]) -> OnitamaResult<[CardId; 5]> {
    let mut used = [false; 5];
    let mut ids = [0; 5];
    for (slot, kind) in current.iter().enumerate() {
        let id = (0..5)
            .find(|&id| !used[id] && deal[id] == *kind)
            .ok_or_else(|| {
                OnitamaError::InvalidDeal(format!("{kind} is not part of the dealt cards"))
            })?;
        used[id] = true;
        ids[slot] = id as CardId;
    }
    Ok(ids)
}
