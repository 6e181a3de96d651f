//! Precomputed destination tables for a five-card deal.
//!
//! For every dealt card, both players and every origin square the table holds
//! the on-board destinations that card allows. Built once per deal and only
//! read afterwards; lookups in the search path are plain array indexing.

use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::cards::{CardKind, Deal};
use crate::game_state::onitama_types::{offset_square, CardId, Player, Square, NUM_SQUARES};

/// No card has more than four movement vectors.
pub const MAX_CARD_MOVES: usize = 4;

/// Small inline list of destination squares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Destinations {
    squares: [Square; MAX_CARD_MOVES],
    len: u8,
}

impl Destinations {
    #[inline]
    fn push(&mut self, square: Square) {
        self.squares[self.len as usize] = square;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone)]
pub struct CardTable {
    cards: Deal,
    // [card][player][origin]
    destinations: [[[Destinations; NUM_SQUARES]; 2]; 5],
}

impl CardTable {
    pub fn new(cards: Deal) -> Self {
        let mut destinations = [[[Destinations::default(); NUM_SQUARES]; 2]; 5];
        for (card_idx, card) in cards.iter().enumerate() {
            for player in [Player::Red, Player::Blue] {
                for origin in 0..NUM_SQUARES as Square {
                    let entry = &mut destinations[card_idx][player.index()][origin as usize];
                    for (dx, dy) in card.displacements_for(player) {
                        if let Some(target) = offset_square(origin, dx, dy) {
                            entry.push(target);
                        }
                    }
                }
            }
        }
        Self {
            cards,
            destinations,
        }
    }

    /// Build a table from indices into `ALL_CARDS`, rejecting bad input.
    pub fn from_card_indices(indices: &[usize]) -> OnitamaResult<Self> {
        if indices.len() != 5 {
            return Err(OnitamaError::InvalidDeal(format!(
                "expected 5 card indices, got {}",
                indices.len()
            )));
        }
        let mut cards = [CardKind::Tiger; 5];
        for (slot, &index) in cards.iter_mut().zip(indices) {
            *slot = CardKind::from_index(index)?;
        }
        Ok(Self::new(cards))
    }

    #[inline]
    pub fn cards(&self) -> &Deal {
        &self.cards
    }

    #[inline]
    pub fn card(&self, card: CardId) -> CardKind {
        self.cards[card as usize]
    }

    #[inline]
    pub fn destinations(&self, card: CardId, player: Player, origin: Square) -> &[Square] {
        self.destinations[card as usize][player.index()][origin as usize].as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::cards::ALL_CARDS;
    use crate::game_state::onitama_types::square_from_xy;

    fn sorted(squares: &[Square]) -> Vec<Square> {
        let mut out = squares.to_vec();
        out.sort_unstable();
        out
    }

    #[test]
    fn mantis_and_crane_from_blue_home_row() {
        let table = CardTable::new([
            CardKind::Monkey,
            CardKind::Elephant,
            CardKind::Crane,
            CardKind::Mantis,
            CardKind::Tiger,
        ]);
        let king = square_from_xy(2, 4);
        assert_eq!(
            sorted(table.destinations(3, Player::Blue, king)),
            vec![square_from_xy(1, 3), square_from_xy(3, 3)]
        );
        assert_eq!(
            table.destinations(2, Player::Blue, king),
            &[square_from_xy(2, 3)]
        );
        assert_eq!(
            table.destinations(3, Player::Blue, square_from_xy(0, 4)),
            &[square_from_xy(1, 3)]
        );
    }

    #[test]
    fn edge_origins_drop_off_board_targets() {
        let table = CardTable::new([CardKind::Crab; 5]);
        // Crab from the right edge keeps only the two-left step and the forward step.
        let origin = square_from_xy(4, 2);
        assert_eq!(
            sorted(table.destinations(0, Player::Red, origin)),
            vec![square_from_xy(2, 2), square_from_xy(4, 3)]
        );
    }

    #[test]
    fn every_entry_respects_card_vectors() {
        let table = CardTable::from_card_indices(&[0, 5, 10, 13, 15]).expect("valid indices");
        for card in 0..5u8 {
            let kind = table.card(card);
            for player in [Player::Red, Player::Blue] {
                for origin in 0..NUM_SQUARES as Square {
                    let dests = table.destinations(card, player, origin);
                    assert!(dests.len() <= kind.displacements().len());
                    for &dest in dests {
                        let (ox, oy) = (origin % 5, origin / 5);
                        let (dx, dy) = (dest % 5, dest / 5);
                        let disp = (dx as i8 - ox as i8, dy as i8 - oy as i8);
                        assert!(kind.allows(player, disp));
                    }
                }
            }
        }
    }

    #[test]
    fn construction_boundary_rejects_bad_indices() {
        assert!(matches!(
            CardTable::from_card_indices(&[0, 1, 2, 3]),
            Err(OnitamaError::InvalidDeal(_))
        ));
        assert_eq!(
            CardTable::from_card_indices(&[0, 1, 2, 3, ALL_CARDS.len()]).err(),
            Some(OnitamaError::InvalidCardIndex(16))
        );
    }
}
