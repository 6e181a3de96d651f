//! Pluggable position evaluation.
//!
//! Search delegates static scoring to the `Evaluator` trait so weights and
//! heuristics can change without touching search code. Scores are always
//! computed from Red's side and negated for Blue, which makes every
//! evaluator exactly antisymmetric.

use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::onitama_types::*;
use crate::moves::card_table::CardTable;

/// Score of a decided game. Larger than any reachable weighted feature sum.
pub const WIN_SCORE: i32 = 1_000_000;

pub trait Evaluator: Send + Sync {
    /// Score of `position` from `player`'s side.
    fn evaluate(&self, position: &Position, table: &CardTable, player: Player) -> i32;

    /// Same as `evaluate` for a raw player token (0 = red, 1 = blue).
    fn evaluate_token(&self, position: &Position, table: &CardTable, token: u8) -> OnitamaResult<i32> {
        let player = Player::try_from(token)?;
        Ok(self.evaluate(position, table, player))
    }
}

/// Tunable weights of the material + mobility evaluator.
///
/// The defaults are the historical weights (pawn 1, mobility 0.01, held card
/// bonus 1.25) scaled by 400 so that everything stays integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub pawn_weight: i32,
    pub mobility_weight: i32,
    /// Multiplier for mobility offered by a card the player holds.
    pub held_card_factor: i32,
    /// Multiplier for mobility offered by any other dealt card.
    pub reserve_card_factor: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            pawn_weight: 400,
            mobility_weight: 1,
            held_card_factor: 5,
            reserve_card_factor: 4,
        }
    }
}

impl EvalWeights {
    pub const MATERIAL_ONLY: EvalWeights = EvalWeights {
        pawn_weight: 1,
        mobility_weight: 0,
        held_card_factor: 1,
        reserve_card_factor: 1,
    };

    // 4 pawns per side; 5 pieces x 4 targets per card, 5 cards.
    const MAX_PAWN_DIFF: i64 = 4;
    const MAX_MOBILITY_PER_CARD: i64 = 20;

    pub fn validate(&self) -> OnitamaResult<()> {
        if self.pawn_weight < 0
            || self.mobility_weight < 0
            || self.held_card_factor < 0
            || self.reserve_card_factor < 0
        {
            return Err(OnitamaError::InvalidConfig(format!(
                "weights must be non-negative: {self:?}"
            )));
        }
        let factor = i64::from(self.held_card_factor.max(self.reserve_card_factor));
        let bound = (5 * Self::MAX_MOBILITY_PER_CARD)
            .checked_mul(factor)
            .and_then(|m| m.checked_mul(i64::from(self.mobility_weight)))
            .and_then(|m| m.checked_add(Self::MAX_PAWN_DIFF * i64::from(self.pawn_weight)));
        match bound {
            Some(bound) if bound < i64::from(WIN_SCORE) => Ok(()),
            Some(bound) => Err(OnitamaError::InvalidConfig(format!(
                "weights can reach the win score ({bound} >= {WIN_SCORE})"
            ))),
            None => Err(OnitamaError::InvalidConfig(format!(
                "weights overflow the score range: {self:?}"
            ))),
        }
    }
}

/// Pawn balance plus card mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityEvaluator {
    weights: EvalWeights,
}

impl MobilityEvaluator {
    pub fn new(weights: EvalWeights) -> OnitamaResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> EvalWeights {
        self.weights
    }

    /// `+WIN_SCORE` if Red has won, `-WIN_SCORE` if Blue has, else 0.
    pub fn victory(position: &Position) -> i32 {
        match position.winner() {
            Some(Player::Red) => WIN_SCORE,
            Some(Player::Blue) => -WIN_SCORE,
            None => 0,
        }
    }

    pub fn pawn_balance(position: &Position) -> i32 {
        position.pawn_count(Player::Red) - position.pawn_count(Player::Blue)
    }

    /// Red mobility minus Blue mobility over all five dealt cards.
    pub fn mobility_balance(&self, position: &Position, table: &CardTable) -> i32 {
        self.mobility(position, table, Player::Red) - self.mobility(position, table, Player::Blue)
    }

    fn mobility(&self, position: &Position, table: &CardTable, player: Player) -> i32 {
        let own = position.pieces_of(player);
        let held = position.held_cards(player);
        let mut total = 0;
        for card in 0..5 as CardId {
            let mut count = 0;
            for origin in squares_in(own) {
                count += table
                    .destinations(card, player, origin)
                    .iter()
                    .filter(|&&target| own & square_bit(target) == 0)
                    .count() as i32;
            }
            let factor = if held.contains(&card) {
                self.weights.held_card_factor
            } else {
                self.weights.reserve_card_factor
            };
            total += factor * count;
        }
        total
    }

    fn red_score(&self, position: &Position, table: &CardTable) -> i32 {
        let victory = Self::victory(position);
        if victory != 0 {
            return victory;
        }
        let mut score = self.weights.pawn_weight * Self::pawn_balance(position);
        if self.weights.mobility_weight != 0 {
            score += self.weights.mobility_weight * self.mobility_balance(position, table);
        }
        score
    }
}

impl Evaluator for MobilityEvaluator {
    fn evaluate(&self, position: &Position, table: &CardTable, player: Player) -> i32 {
        let red = self.red_score(position, table);
        match player {
            Player::Red => red,
            Player::Blue => -red,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::game_state::cards::{random_deal, CardKind};
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::move_generator::legal_moves;

    #[test]
    fn symmetric_opening_scores_zero() {
        let table = CardTable::new([CardKind::Tiger; 5]);
        let position = Position::starting(Player::Blue);
        let evaluator = MobilityEvaluator::default();
        assert_eq!(evaluator.evaluate(&position, &table, Player::Red), 0);
    }

    #[test]
    fn antisymmetric_over_random_playouts() {
        let evaluator = MobilityEvaluator::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..30 {
            let table = CardTable::new(random_deal(&mut rng));
            let mut position = Position::starting(Player::Red);
            for _ in 0..40 {
                let red = evaluator.evaluate(&position, &table, Player::Red);
                let blue = evaluator.evaluate(&position, &table, Player::Blue);
                assert_eq!(red, -blue);
                let moves = legal_moves(&position, &table);
                let Some(mv) = moves.choose(&mut rng) else {
                    break;
                };
                if apply_move(&mut position, mv) {
                    let red = evaluator.evaluate(&position, &table, Player::Red);
                    assert_eq!(red.abs(), WIN_SCORE);
                    assert_eq!(red, -evaluator.evaluate(&position, &table, Player::Blue));
                    break;
                }
            }
        }
    }

    #[test]
    fn victory_dominates_material() {
        let table = CardTable::new([CardKind::Tiger; 5]);
        let mut board = [Piece::Empty; NUM_SQUARES];
        board[RED_GOAL as usize] = Piece::RedKing;
        board[0] = Piece::BlueKing;
        for square in [5, 6, 7, 8] {
            board[square] = Piece::BluePawn;
        }
        let position = Position::new(board, [0, 1, 2, 3, 4], Player::Blue);
        let evaluator = MobilityEvaluator::default();
        assert_eq!(evaluator.evaluate(&position, &table, Player::Red), WIN_SCORE);
        assert_eq!(evaluator.evaluate(&position, &table, Player::Blue), -WIN_SCORE);
    }

    #[test]
    fn held_and_reserve_cards_are_weighted_separately() {
        // Red holds monkey + tiger, blue holds two oxen, boar is neutral.
        let table = CardTable::new([
            CardKind::Monkey,
            CardKind::Tiger,
            CardKind::Ox,
            CardKind::Ox,
            CardKind::Boar,
        ]);
        let position = Position::starting(Player::Red);
        let held_only = MobilityEvaluator::new(EvalWeights {
            pawn_weight: 0,
            mobility_weight: 1,
            held_card_factor: 1,
            reserve_card_factor: 0,
        })
        .expect("weights are valid");
        // From the home row every card but monkey offers one forward step per
        // piece; monkey offers eight diagonal steps.
        assert_eq!(held_only.mobility_balance(&position, &table), (8 + 5) - (5 + 5));

        let reserve_only = MobilityEvaluator::new(EvalWeights {
            held_card_factor: 0,
            reserve_card_factor: 1,
            ..held_only.weights()
        })
        .expect("weights are valid");
        assert_eq!(reserve_only.mobility_balance(&position, &table), (5 + 5 + 5) - (8 + 5 + 5));
    }

    #[test]
    fn pawn_weight_scales_material() {
        let table = CardTable::new([CardKind::Tiger; 5]);
        let mut position = Position::starting(Player::Red);
        position.board[20] = Piece::Empty;
        let position = Position::new(position.board, position.cards, Player::Red);
        let evaluator = MobilityEvaluator::new(EvalWeights::MATERIAL_ONLY).expect("weights are valid");
        assert_eq!(evaluator.evaluate(&position, &table, Player::Red), 1);
        assert_eq!(evaluator.evaluate(&position, &table, Player::Blue), -1);
    }

    #[test]
    fn token_evaluation_rejects_unknown_players() {
        let table = CardTable::new([CardKind::Tiger; 5]);
        let position = Position::starting(Player::Red);
        let evaluator = MobilityEvaluator::default();
        assert_eq!(evaluator.evaluate_token(&position, &table, 1), Ok(0));
        assert_eq!(
            evaluator.evaluate_token(&position, &table, 2),
            Err(OnitamaError::InvalidPlayer(2))
        );
    }

    #[test]
    fn weights_are_validated() {
        assert!(EvalWeights::default().validate().is_ok());
        assert!(matches!(
            MobilityEvaluator::new(EvalWeights {
                pawn_weight: -1,
                ..EvalWeights::default()
            }),
            Err(OnitamaError::InvalidConfig(_))
        ));
        assert!(matches!(
            MobilityEvaluator::new(EvalWeights {
                pawn_weight: WIN_SCORE,
                ..EvalWeights::default()
            }),
            Err(OnitamaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn oversized_weights_are_rejected_without_overflow() {
        let weights = EvalWeights {
            pawn_weight: 0,
            mobility_weight: i32::MAX,
            held_card_factor: i32::MAX,
            reserve_card_factor: 0,
        };
        assert!(matches!(weights.validate(), Err(OnitamaError::InvalidConfig(_))));

        let weights = EvalWeights {
            pawn_weight: i32::MAX,
            mobility_weight: i32::MAX,
            held_card_factor: 1,
            reserve_card_factor: 1,
        };
        assert!(matches!(weights.validate(), Err(OnitamaError::InvalidConfig(_))));
    }
}
