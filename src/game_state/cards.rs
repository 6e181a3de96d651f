//! The sixteen movement cards.
//!
//! Displacements are written from Red's point of view (`+y` walks towards
//! Blue's home row). Blue plays the same card rotated by 180 degrees.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::onitama_types::Player;

/// Five dealt cards in `[red0, red1, blue0, blue1, neutral]` order.
pub type Deal = [CardKind; 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Monkey,
    Elephant,
    Crane,
    Mantis,
    Tiger,
    Dragon,
    Boar,
    Crab,
    Goose,
    Rooster,
    Eel,
    Cobra,
    Horse,
    Ox,
    Frog,
    Rabbit,
}

pub const ALL_CARDS: [CardKind; 16] = [
    CardKind::Monkey,
    CardKind::Elephant,
    CardKind::Crane,
    CardKind::Mantis,
    CardKind::Tiger,
    CardKind::Dragon,
    CardKind::Boar,
    CardKind::Crab,
    CardKind::Goose,
    CardKind::Rooster,
    CardKind::Eel,
    CardKind::Cobra,
    CardKind::Horse,
    CardKind::Ox,
    CardKind::Frog,
    CardKind::Rabbit,
];

impl CardKind {
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Monkey => "monkey",
            CardKind::Elephant => "elephant",
            CardKind::Crane => "crane",
            CardKind::Mantis => "mantis",
            CardKind::Tiger => "tiger",
            CardKind::Dragon => "dragon",
            CardKind::Boar => "boar",
            CardKind::Crab => "crab",
            CardKind::Goose => "goose",
            CardKind::Rooster => "rooster",
            CardKind::Eel => "eel",
            CardKind::Cobra => "cobra",
            CardKind::Horse => "horse",
            CardKind::Ox => "ox",
            CardKind::Frog => "frog",
            CardKind::Rabbit => "rabbit",
        }
    }

    /// Case-insensitive lookup by card name.
    pub fn from_name(name: &str) -> OnitamaResult<Self> {
        ALL_CARDS
            .iter()
            .copied()
            .find(|card| card.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| OnitamaError::UnknownCard(name.to_owned()))
    }

    /// Position of the card in `ALL_CARDS`.
    pub fn from_index(index: usize) -> OnitamaResult<Self> {
        ALL_CARDS
            .get(index)
            .copied()
            .ok_or(OnitamaError::InvalidCardIndex(index))
    }

    /// Red's displacement vectors `(dx, dy)`.
    pub const fn displacements(self) -> &'static [(i8, i8)] {
        match self {
            CardKind::Monkey => &[(1, -1), (1, 1), (-1, -1), (-1, 1)],
            CardKind::Elephant => &[(-1, 0), (-1, 1), (1, 0), (1, 1)],
            CardKind::Crane => &[(-1, -1), (0, 1), (1, -1)],
            CardKind::Mantis => &[(-1, 1), (0, -1), (1, 1)],
            CardKind::Tiger => &[(0, 2), (0, -1)],
            CardKind::Dragon => &[(-2, 1), (-1, -1), (1, -1), (2, 1)],
            CardKind::Boar => &[(-1, 0), (0, 1), (1, 0)],
            CardKind::Crab => &[(-2, 0), (0, 1), (2, 0)],
            CardKind::Goose => &[(-1, 1), (-1, 0), (1, 0), (1, -1)],
            CardKind::Rooster => &[(1, 1), (1, 0), (-1, 0), (-1, -1)],
            CardKind::Eel => &[(-1, 1), (-1, -1), (1, 0)],
            CardKind::Cobra => &[(1, 1), (1, -1), (-1, 0)],
            CardKind::Horse => &[(-1, 0), (0, 1), (0, -1)],
            CardKind::Ox => &[(1, 0), (0, 1), (0, -1)],
            CardKind::Frog => &[(-2, 0), (-1, 1), (1, -1)],
            CardKind::Rabbit => &[(2, 0), (1, 1), (-1, -1)],
        }
    }

    /// Who moves first when this card is dealt as the neutral card.
    pub const fn start_player(self) -> Player {
        match self {
            CardKind::Elephant
            | CardKind::Mantis
            | CardKind::Dragon
            | CardKind::Boar
            | CardKind::Rooster
            | CardKind::Cobra
            | CardKind::Horse
            | CardKind::Frog => Player::Red,
            CardKind::Monkey
            | CardKind::Crane
            | CardKind::Tiger
            | CardKind::Crab
            | CardKind::Goose
            | CardKind::Eel
            | CardKind::Ox
            | CardKind::Rabbit => Player::Blue,
        }
    }

    /// Displacements as seen by `player`.
    pub fn displacements_for(self, player: Player) -> impl Iterator<Item = (i8, i8)> {
        let sign = match player {
            Player::Red => 1,
            Player::Blue => -1,
        };
        self.displacements()
            .iter()
            .map(move |&(dx, dy)| (dx * sign, dy * sign))
    }

    pub fn allows(self, player: Player, displacement: (i8, i8)) -> bool {
        self.displacements_for(player).any(|d| d == displacement)
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw five distinct cards from the pool.
pub fn random_deal<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    let mut pool = ALL_CARDS;
    pool.shuffle(rng);
    [pool[0], pool[1], pool[2], pool[3], pool[4]]
}

/// Parse a comma separated list of five card names.
pub fn deal_from_names(names: &[&str]) -> OnitamaResult<Deal> {
    if names.len() != 5 {
        return Err(OnitamaError::InvalidDeal(format!(
            "expected 5 cards, got {}",
            names.len()
        )));
    }
    let mut deal = [CardKind::Tiger; 5];
    for (slot, name) in deal.iter_mut().zip(names) {
        *slot = CardKind::from_name(name)?;
    }
    Ok(deal)
}
