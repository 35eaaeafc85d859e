//! Court positions and six-player lineups.
//!
//! Positions follow the standard numbering seen from behind the own back line:
//! 1 is right-back (the server), 2 right-front, 3 middle-front, 4 left-front,
//! 5 left-back, 6 middle-back.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::MatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::One,
        Position::Two,
        Position::Three,
        Position::Four,
        Position::Five,
        Position::Six,
    ];

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=6 => Some(Self::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Position::One => 0,
            Position::Two => 1,
            Position::Three => 2,
            Position::Four => 3,
            Position::Five => 4,
            Position::Six => 5,
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Position::from_number(n).ok_or_else(|| format!("position out of range: {}", n))
    }
}

impl From<Position> for u8 {
    fn from(p: Position) -> u8 {
        p.number()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Jersey numbers on court, one per position. Never blank, never repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Lineup {
    slots: [String; 6],
}

impl Lineup {
    /// Build a lineup from jersey numbers listed in position order 1..6.
    pub fn new<S: AsRef<str>>(numbers: [S; 6]) -> Result<Self, MatchError> {
        let slots = numbers.map(|n| n.as_ref().trim().to_string());

        let mut seen = HashSet::new();
        for (i, number) in slots.iter().enumerate() {
            if number.is_empty() {
                return Err(MatchError::InvalidLineup(format!("position {} is empty", i + 1)));
            }
            if !seen.insert(number.as_str()) {
                return Err(MatchError::InvalidLineup(format!("#{} appears twice", number)));
            }
        }

        Ok(Self { slots })
    }

    pub fn get(&self, pos: Position) -> &str {
        &self.slots[pos.index()]
    }

    pub fn contains(&self, number: &str) -> bool {
        self.slots.iter().any(|n| n == number)
    }

    pub fn position_of(&self, number: &str) -> Option<Position> {
        Position::ALL.into_iter().find(|p| self.get(*p) == number)
    }

    /// Numbers in position order 1..6.
    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }

    /// Copy with one slot replaced. Callers check uniqueness first.
    pub(crate) fn with_player(&self, pos: Position, number: String) -> Self {
        let mut slots = self.slots.clone();
        slots[pos.index()] = number;
        Self { slots }
    }

    /// Clockwise side-out rotation: the player at 2 moves to 1, 3 to 2, and so
    /// on, with the server at 1 moving to 6.
    pub fn rotate(&self) -> Self {
        let mut slots = self.slots.clone();
        slots.rotate_left(1);
        Self { slots }
    }
}

impl TryFrom<BTreeMap<String, String>> for Lineup {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() != 6 {
            return Err(format!("lineup needs 6 positions, found {}", map.len()));
        }
        let mut numbers: [String; 6] = Default::default();
        for (key, number) in map {
            let pos = key
                .parse::<u8>()
                .ok()
                .and_then(Position::from_number)
                .ok_or_else(|| format!("unknown lineup position '{}'", key))?;
            numbers[pos.index()] = number;
        }
        Lineup::new(numbers).map_err(|e| e.to_string())
    }
}

impl From<Lineup> for BTreeMap<String, String> {
    fn from(lineup: Lineup) -> Self {
        Position::ALL
            .into_iter()
            .zip(lineup.slots)
            .map(|(pos, number)| (pos.number().to_string(), number))
            .collect()
    }
}

/// Rotate a lineup one step. See [`Lineup::rotate`].
pub fn rotate(lineup: &Lineup) -> Lineup {
    lineup.rotate()
}
