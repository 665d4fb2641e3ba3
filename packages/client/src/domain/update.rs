//! Typed partial writes to a match record.
//!
//! Every write the client performs is one of the `MatchUpdate` constructors
//! below. Field paths come from `FieldUpdate::path`, keyed by `Seat`, so a
//! seat can never address a field that does not exist.

use serde_json::Value;

use super::{
    match_record::{Choice, MatchStatus, PlayerState, Seat},
    resolution::RoundOutcome,
};

/// Field the store stamps with its own clock on every client write
pub const LAST_UPDATED_FIELD: &str = "lastUpdated";

/// One field of a partial write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Player(Seat, PlayerState),
    Choice(Seat, Option<Choice>),
    Status(MatchStatus),
    Winner(Option<Seat>),
}

impl FieldUpdate {
    pub fn path(&self) -> &'static str {
        match self {
            FieldUpdate::Player(seat, _) => seat.field_name(),
            FieldUpdate::Choice(Seat::One, _) => "player1.choice",
            FieldUpdate::Choice(Seat::Two, _) => "player2.choice",
            FieldUpdate::Status(_) => "status",
            FieldUpdate::Winner(_) => "winner",
        }
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            FieldUpdate::Player(_, player) => serde_json::to_value(player),
            FieldUpdate::Choice(_, choice) => serde_json::to_value(choice),
            FieldUpdate::Status(status) => serde_json::to_value(status),
            FieldUpdate::Winner(winner) => serde_json::to_value(winner),
        }
    }
}

/// A set of field writes applied atomically, plus a `lastUpdated` stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchUpdate {
    fields: Vec<FieldUpdate>,
}

impl MatchUpdate {
    /// Seat 2 taken and the match started
    pub fn join(player: PlayerState) -> Self {
        Self {
            fields: vec![
                FieldUpdate::Player(Seat::Two, player),
                FieldUpdate::Status(MatchStatus::Playing),
            ],
        }
    }

    /// Only the caller's own choice field
    pub fn submit_choice(seat: Seat, choice: Choice) -> Self {
        Self {
            fields: vec![FieldUpdate::Choice(seat, Some(choice))],
        }
    }

    /// `{status: result, winner}`, identical from either client
    pub fn resolve(outcome: RoundOutcome) -> Self {
        Self {
            fields: vec![
                FieldUpdate::Status(MatchStatus::Result),
                FieldUpdate::Winner(outcome.winner()),
            ],
        }
    }

    /// Both choices cleared and play resumed
    pub fn reset_round() -> Self {
        Self {
            fields: vec![
                FieldUpdate::Choice(Seat::One, None),
                FieldUpdate::Choice(Seat::Two, None),
                FieldUpdate::Status(MatchStatus::Playing),
                FieldUpdate::Winner(None),
            ],
        }
    }

    pub fn fields(&self) -> &[FieldUpdate] {
        &self.fields
    }
}
