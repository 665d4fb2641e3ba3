//! The shared match record and its parts.
//!
//! `MatchRecord` mirrors the document stored under the room id. Field names
//! on the wire are fixed (`player1`, `player2`, `status`, `winner`,
//! `lastUpdated`); everything in the client goes through these types and
//! seat-keyed accessors instead of building field names by hand.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// One of the two places in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// Room creator
    #[serde(rename = "player1")]
    One,
    /// Joiner
    #[serde(rename = "player2")]
    Two,
}

impl Seat {
    /// Top-level field holding this seat's state
    pub fn field_name(self) -> &'static str {
        match self {
            Seat::One => "player1",
            Seat::Two => "player2",
        }
    }

    pub fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// rock beats scissors, scissors beats paper, paper beats rock
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChoiceError(pub String);

impl fmt::Display for ParseChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not rock, paper or scissors", self.0)
    }
}

impl std::error::Error for ParseChoiceError {}

impl FromStr for Choice {
    type Err = ParseChoiceError;

    /// Accepts the full name or its first letter, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Choice::Rock),
            "paper" | "p" => Ok(Choice::Paper),
            "scissors" | "s" => Ok(Choice::Scissors),
            _ => Err(ParseChoiceError(s.to_string())),
        }
    }
}

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Only seat 1 is occupied
    Waiting,
    /// Both seats occupied, round in progress
    Playing,
    /// Round decided, reset pending
    Result,
}

/// Display name, trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of one occupied seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    #[serde(default)]
    pub choice: Option<Choice>,
    /// Carried and displayed, never incremented
    #[serde(default)]
    pub score: u32,
}

impl PlayerState {
    /// A freshly seated player: no choice, score 0
    pub fn new(name: &PlayerName) -> Self {
        Self {
            name: name.as_str().to_string(),
            choice: None,
            score: 0,
        }
    }
}

/// The document stored under a room id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "player1", default)]
    pub seat1: Option<PlayerState>,
    #[serde(rename = "player2", default)]
    pub seat2: Option<PlayerState>,
    pub status: MatchStatus,
    #[serde(default)]
    pub winner: Option<Seat>,
    /// Epoch millis assigned by the store on every write
    #[serde(
        rename = "lastUpdated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<i64>,
}

impl MatchRecord {
    /// Record written by the room creator: seat 1 taken, seat 2 empty.
    pub fn new_waiting(creator: &PlayerName) -> Self {
        Self {
            seat1: Some(PlayerState::new(creator)),
            seat2: None,
            status: MatchStatus::Waiting,
            winner: None,
            last_updated: None,
        }
    }

    pub fn seat(&self, seat: Seat) -> Option<&PlayerState> {
        match seat {
            Seat::One => self.seat1.as_ref(),
            Seat::Two => self.seat2.as_ref(),
        }
    }

    pub fn choice(&self, seat: Seat) -> Option<Choice> {
        self.seat(seat).and_then(|player| player.choice)
    }

    /// A room is full once seat 2 is occupied
    pub fn is_full(&self) -> bool {
        self.seat2.is_some()
    }

    /// Both submitted choices, seat 1 first
    pub fn both_choices(&self) -> Option<(Choice, Choice)> {
        Some((self.choice(Seat::One)?, self.choice(Seat::Two)?))
    }
}
