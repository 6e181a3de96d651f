//! Moves in rules-engine coordinates and their text notation.
//!
//! Notation: `c5-c4 [crane]`. Files `a..e` map to `x = 0..4`, ranks `1..5`
//! map to `y = 0..4`. A move list is space separated and alternates players,
//! e.g. `c5-c4 [crane] a1-b2 [monkey]`.

use std::fmt;

use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::cards::CardKind;
use crate::game_state::onitama_types::{Player, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameMove {
    pub player: Player,
    pub start: (u8, u8),
    pub end: (u8, u8),
    pub card: CardKind,
}

impl GameMove {
    pub fn new(player: Player, start: (u8, u8), end: (u8, u8), card: CardKind) -> Self {
        Self {
            player,
            start,
            end,
            card,
        }
    }

    /// `end - start` as a signed vector.
    pub fn displacement(&self) -> (i8, i8) {
        (
            (self.end.0 as i8).wrapping_sub(self.start.0 as i8),
            (self.end.1 as i8).wrapping_sub(self.start.1 as i8),
        )
    }

    /// Whether the card offers this displacement to the moving player.
    pub fn matches_card(&self) -> bool {
        self.card.allows(self.player, self.displacement())
    }
}

impl fmt::Display for GameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}{} [{}]",
            file_char(self.start.0),
            rank_char(self.start.1),
            file_char(self.end.0),
            rank_char(self.end.1),
            self.card
        )
    }
}

// Off-board coordinates print as `?`.
fn file_char(x: u8) -> char {
    if x < BOARD_WIDTH {
        char::from(b'a' + x)
    } else {
        '?'
    }
}

fn rank_char(y: u8) -> char {
    if y < BOARD_WIDTH {
        char::from(b'1' + y)
    } else {
        '?'
    }
}

fn parse_coordinate(text: &str) -> Option<(u8, u8)> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let x = bytes[0].checked_sub(b'a')?;
    let y = bytes[1].checked_sub(b'1')?;
    (x < BOARD_WIDTH && y < BOARD_WIDTH).then_some((x, y))
}

/// Parse a single `c5-c4 [crane]` move for `player`.
pub fn parse_move(player: Player, squares: &str, card: &str) -> OnitamaResult<GameMove> {
    let bad = || OnitamaError::MoveParse(format!("{squares} {card}"));

    let (start, end) = squares.split_once('-').ok_or_else(bad)?;
    let start = parse_coordinate(start).ok_or_else(bad)?;
    let end = parse_coordinate(end).ok_or_else(bad)?;

    let name = card
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(bad)?;
    let card = CardKind::from_name(name)?;

    Ok(GameMove::new(player, start, end, card))
}

/// Parse a space separated move list starting with `first_player`.
pub fn parse_moves(first_player: Player, text: &str) -> OnitamaResult<Vec<GameMove>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<&str> = text.split(' ').collect();
    if tokens.len() % 2 != 0 {
        return Err(OnitamaError::MoveParse(text.to_owned()));
    }

    let mut player = first_player;
    let mut moves = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks(2) {
        moves.push(parse_move(player, pair[0], pair[1])?);
        player = player.opponent();
    }
    Ok(moves)
}
