//! Rules-side game record and the snapshot interface the engine consumes.
//!
//! The search engine never reads a `Game` directly; it only needs a
//! `GameSnapshot` (board, dealt cards, current holdings, side to move and the
//! victory predicate). `Game` is a compact reference implementation of that
//! interface that also validates and applies moves in 2-D coordinates.

use rand::Rng;

use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::cards::{deal_from_names, random_deal, CardKind, Deal};
use crate::game_state::onitama_types::*;
use crate::game_state::position::starting_board;
use crate::moves::game_move::GameMove;

/// What the search needs to know about a game in progress.
pub trait GameSnapshot {
    /// Board contents indexed by `x + 5 * y`.
    fn board(&self) -> [Piece; NUM_SQUARES];
    /// The five cards dealt at game start, `[red0, red1, blue0, blue1, neutral]`.
    fn start_cards(&self) -> Deal;
    /// The cards as currently held, same slot order as `start_cards`.
    fn current_cards(&self) -> [CardKind; 5];
    fn active_player(&self) -> Player;
    fn check_victory(&self) -> Option<Player>;
}

#[derive(Debug, Clone)]
pub struct Game {
    start_cards: Deal,
    hands: [[CardKind; 2]; 2],
    neutral_card: CardKind,
    board: [Piece; NUM_SQUARES],
    active_player: Player,
    moves: Vec<GameMove>,
}

impl Game {
    /// Standard opening. The neutral card decides who moves first.
    pub fn new(start_cards: Deal) -> Self {
        Self {
            start_cards,
            hands: [
                [start_cards[0], start_cards[1]],
                [start_cards[2], start_cards[3]],
            ],
            neutral_card: start_cards[4],
            board: starting_board(),
            active_player: start_cards[4].start_player(),
            moves: Vec::new(),
        }
    }

    pub fn from_names(names: &[&str]) -> OnitamaResult<Self> {
        deal_from_names(names).map(Self::new)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(random_deal(rng))
    }

    pub fn piece_at(&self, (x, y): (i32, i32)) -> OnitamaResult<Piece> {
        let square = checked_square(x, y)?;
        Ok(self.board[square as usize])
    }

    pub fn hand(&self, player: Player) -> [CardKind; 2] {
        self.hands[player.index()]
    }

    pub fn neutral_card(&self) -> CardKind {
        self.neutral_card
    }

    pub fn moves(&self) -> &[GameMove] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&GameMove> {
        self.moves.last()
    }

    pub fn validate_move(&self, mv: &GameMove) -> OnitamaResult<()> {
        if let Some(winner) = self.check_victory() {
            return Err(OnitamaError::IllegalMove(format!(
                "the game is over, {winner} has won"
            )));
        }
        if mv.player != self.active_player {
            return Err(OnitamaError::IllegalMove(format!(
                "it is {}'s turn",
                self.active_player
            )));
        }
        if !self.hand(mv.player).contains(&mv.card) {
            return Err(OnitamaError::IllegalMove(format!(
                "{} does not hold {}",
                mv.player, mv.card
            )));
        }
        let start = checked_square(mv.start.0 as i32, mv.start.1 as i32)?;
        let end = checked_square(mv.end.0 as i32, mv.end.1 as i32)?;
        if !self.board[start as usize].belongs_to(mv.player) {
            return Err(OnitamaError::IllegalMove(format!(
                "no {} piece on {:?}",
                mv.player, mv.start
            )));
        }
        if self.board[end as usize].belongs_to(mv.player) {
            return Err(OnitamaError::IllegalMove(format!(
                "{:?} holds a {} piece",
                mv.end, mv.player
            )));
        }
        if !mv.matches_card() {
            return Err(OnitamaError::IllegalMove(format!(
                "{} does not allow {:?}",
                mv.card,
                mv.displacement()
            )));
        }
        Ok(())
    }

    /// Validate and play a move, rotating the used card into the neutral slot.
    pub fn do_move(&mut self, mv: GameMove) -> OnitamaResult<()> {
        self.validate_move(&mv)?;

        let start = square_from_xy(mv.start.0, mv.start.1) as usize;
        let end = square_from_xy(mv.end.0, mv.end.1) as usize;
        self.board[end] = self.board[start];
        self.board[start] = Piece::Empty;

        let hand = &mut self.hands[mv.player.index()];
        if let Some(slot) = hand.iter_mut().find(|card| **card == mv.card) {
            *slot = self.neutral_card;
        }
        self.neutral_card = mv.card;

        self.active_player = mv.player.opponent();
        self.moves.push(mv);
        Ok(())
    }

    /// Every legal move for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<GameMove> {
        let mut out = Vec::new();
        if self.check_victory().is_some() {
            return out;
        }
        let player = self.active_player;
        for card in self.hand(player) {
            for start in 0..NUM_SQUARES as Square {
                if !self.board[start as usize].belongs_to(player) {
                    continue;
                }
                for (dx, dy) in card.displacements_for(player) {
                    let Some(end) = offset_square(start, dx, dy) else {
                        continue;
                    };
                    if self.board[end as usize].belongs_to(player) {
                        continue;
                    }
                    out.push(GameMove::new(player, square_xy(start), square_xy(end), card));
                }
            }
        }
        out
    }

    pub fn check_victory(&self) -> Option<Player> {
        let find = |piece: Piece| self.board.iter().position(|p| *p == piece);
        let red_king = find(Piece::RedKing);
        let blue_king = find(Piece::BlueKing);
        if blue_king.is_none() || red_king == Some(RED_GOAL as usize) {
            Some(Player::Red)
        } else if red_king.is_none() || blue_king == Some(BLUE_GOAL as usize) {
            Some(Player::Blue)
        } else {
            None
        }
    }
}

impl GameSnapshot for Game {
    fn board(&self) -> [Piece; NUM_SQUARES] {
        self.board
    }

    fn start_cards(&self) -> Deal {
        self.start_cards
    }

    fn current_cards(&self) -> [CardKind; 5] {
        let [red, blue] = self.hands;
        [red[0], red[1], blue[0], blue[1], self.neutral_card]
    }

    fn active_player(&self) -> Player {
        self.active_player
    }

    fn check_victory(&self) -> Option<Player> {
        Game::check_victory(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::game_move::parse_moves;

    fn standard_game() -> Game {
        Game::new([
            CardKind::Monkey,
            CardKind::Elephant,
            CardKind::Crane,
            CardKind::Mantis,
            CardKind::Tiger,
        ])
    }

    #[test]
    fn new_game_layout() {
        let game = standard_game();
        assert_eq!(game.active_player, Player::Blue);
        assert_eq!(game.hand(Player::Red), [CardKind::Monkey, CardKind::Elephant]);
        assert_eq!(game.hand(Player::Blue), [CardKind::Crane, CardKind::Mantis]);
        assert_eq!(game.neutral_card(), CardKind::Tiger);
        for x in [0, 1, 3, 4] {
            assert_eq!(game.piece_at((x, 0)), Ok(Piece::RedPawn));
            assert_eq!(game.piece_at((x, 4)), Ok(Piece::BluePawn));
        }
        assert_eq!(game.piece_at((2, 0)), Ok(Piece::RedKing));
        assert_eq!(game.piece_at((2, 4)), Ok(Piece::BlueKing));
    }

    #[test]
    fn board_access_is_bounds_checked() {
        let game = standard_game();
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5)] {
            assert_eq!(game.piece_at((x, y)), Err(OnitamaError::OutOfBounds(x, y)));
        }
    }

    #[test]
    fn do_move_rotates_cards_and_turns() {
        let mut game = standard_game();
        game.do_move(GameMove::new(Player::Blue, (2, 4), (2, 3), CardKind::Crane))
            .expect("crane step is legal");
        assert_eq!(game.piece_at((2, 3)), Ok(Piece::BlueKing));
        assert_eq!(game.piece_at((2, 4)), Ok(Piece::Empty));
        assert_eq!(game.active_player, Player::Red);
        assert_eq!(game.neutral_card(), CardKind::Crane);
        assert_eq!(game.hand(Player::Blue), [CardKind::Tiger, CardKind::Mantis]);

        game.do_move(GameMove::new(Player::Red, (0, 0), (1, 1), CardKind::Monkey))
            .expect("monkey diagonal is legal");
        assert_eq!(game.piece_at((0, 0)), Ok(Piece::Empty));
        assert_eq!(game.piece_at((1, 1)), Ok(Piece::RedPawn));
        assert_eq!(game.active_player, Player::Blue);
        assert_eq!(game.neutral_card(), CardKind::Monkey);
        assert_eq!(game.moves().len(), 2);
    }

    #[test]
    fn validation_rejects_wrong_owner_and_vectors() {
        let game = standard_game();
        // Red piece moved by Blue, and Red out of turn.
        let bad = GameMove::new(Player::Blue, (0, 0), (0, 2), CardKind::Tiger);
        assert!(matches!(game.validate_move(&bad), Err(OnitamaError::IllegalMove(_))));
        let out_of_turn = GameMove::new(Player::Red, (0, 0), (1, 1), CardKind::Monkey);
        assert!(matches!(
            game.validate_move(&out_of_turn),
            Err(OnitamaError::IllegalMove(_))
        ));
        // Onto an own piece.
        let own = GameMove::new(Player::Blue, (1, 4), (0, 4), CardKind::Mantis);
        assert!(matches!(game.validate_move(&own), Err(OnitamaError::IllegalMove(_))));
        // Off the board.
        let off = GameMove::new(Player::Blue, (0, 4), (0, 5), CardKind::Crane);
        assert_eq!(game.validate_move(&off), Err(OnitamaError::OutOfBounds(0, 5)));
    }

    #[test]
    fn legal_moves_from_opening() {
        let game = standard_game();
        let moves = game.legal_moves();
        // Mantis: the king and the two pawns next to it have two targets each,
        // the edge pawns one. Crane: one forward step per piece.
        assert_eq!(moves.len(), 8 + 5);
        for mv in &moves {
            assert_eq!(game.validate_move(mv), Ok(()));
        }
    }

    #[test]
    fn capturing_the_king_ends_the_game() {
        let mut game = Game::from_names(&["monkey", "crab", "tiger", "elephant", "rabbit"])
            .expect("card names are valid");
        let moves = parse_moves(
            Player::Blue,
            "b5-b3 [tiger] c1-b2 [monkey] c5-b4 [elephant] b2-b4 [tiger]",
        )
        .expect("notation should parse");
        for mv in moves {
            game.do_move(mv).expect("scripted move is legal");
        }
        assert_eq!(game.check_victory(), Some(Player::Red));
        assert!(game.legal_moves().is_empty());

        let late = parse_moves(Player::Blue, "b3-c2 [monkey]").expect("notation should parse");
        assert!(matches!(
            game.do_move(late[0]),
            Err(OnitamaError::IllegalMove(_))
        ));
    }
}
