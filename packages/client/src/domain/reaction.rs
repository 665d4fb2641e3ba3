//! Snapshot reaction: what to show and what to write next.
//!
//! `react` is a pure function of one snapshot and the local seat. The
//! session controller renders `Reaction::view` and carries out
//! `Reaction::follow_up`; keeping the decision here makes the round
//! protocol testable without a store or a clock.

use std::fmt;

use super::{
    match_record::{Choice, MatchRecord, MatchStatus, Seat},
    resolution::{RoundOutcome, resolve},
};

/// Advisory line shown under the hands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Seat 2 is still empty
    WaitingForOpponent,
    MakeYourChoice,
    /// Local choice submitted, opponent's not yet
    WaitingForOpponentChoice { opponent: String },
    /// Opponent's choice visible, result not written yet
    WaitingForResults,
    Win { mine: Option<Choice>, theirs: Option<Choice> },
    Lose { mine: Option<Choice>, theirs: Option<Choice> },
    Tie { mine: Option<Choice>, theirs: Option<Choice> },
}

fn choice_text(choice: Option<Choice>) -> &'static str {
    choice.map_or("?", Choice::as_str)
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::WaitingForOpponent => f.write_str("Waiting for opponent..."),
            StatusLine::MakeYourChoice => f.write_str("Make your choice!"),
            StatusLine::WaitingForOpponentChoice { opponent } => {
                write!(f, "Waiting for {opponent} to choose...")
            }
            StatusLine::WaitingForResults => f.write_str("Waiting for results..."),
            StatusLine::Win { mine, theirs } => write!(
                f,
                "You win! {} beats {}",
                choice_text(*mine),
                choice_text(*theirs)
            ),
            StatusLine::Lose { mine, theirs } => write!(
                f,
                "You lose! {} beats {}",
                choice_text(*theirs),
                choice_text(*mine)
            ),
            StatusLine::Tie { mine, theirs } => write!(
                f,
                "It's a tie! {} vs {}",
                choice_text(*mine),
                choice_text(*theirs)
            ),
        }
    }
}

/// Everything the render step needs, from the local player's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    pub self_name: String,
    pub self_score: u32,
    pub self_hand: Option<Choice>,
    pub opponent_name: String,
    pub opponent_score: u32,
    pub opponent_hand: Option<Choice>,
    pub status_line: StatusLine,
}

/// Write the local client should perform after rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Both choices present and no result yet
    Resolve(RoundOutcome),
    /// Result shown; reset after the local delay
    ScheduleReset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub view: MatchView,
    pub follow_up: Option<FollowUp>,
}

/// Derives the view and the follow-up write for one snapshot.
pub fn react(record: &MatchRecord, seat: Seat) -> Reaction {
    let opponent = seat.opponent();
    let me = record.seat(seat);
    let them = record.seat(opponent);

    let mine = record.choice(seat);
    let theirs = record.choice(opponent);
    let opponent_name = them.map_or_else(|| opponent.to_string(), |p| p.name.clone());

    let status_line = match record.status {
        MatchStatus::Result => match record.winner {
            Some(winner) if winner == seat => StatusLine::Win { mine, theirs },
            Some(_) => StatusLine::Lose { mine, theirs },
            None => StatusLine::Tie { mine, theirs },
        },
        _ if theirs.is_some() => StatusLine::WaitingForResults,
        MatchStatus::Waiting => StatusLine::WaitingForOpponent,
        MatchStatus::Playing if mine.is_some() => StatusLine::WaitingForOpponentChoice {
            opponent: opponent_name.clone(),
        },
        MatchStatus::Playing => StatusLine::MakeYourChoice,
    };

    let follow_up = match (record.status, record.both_choices()) {
        (MatchStatus::Result, _) => Some(FollowUp::ScheduleReset),
        (_, Some((seat1, seat2))) => Some(FollowUp::Resolve(resolve(seat1, seat2))),
        _ => None,
    };

    Reaction {
        view: MatchView {
            self_name: me.map_or_else(|| seat.to_string(), |p| p.name.clone()),
            self_score: me.map_or(0, |p| p.score),
            self_hand: mine,
            opponent_name,
            opponent_score: them.map_or(0, |p| p.score),
            opponent_hand: theirs,
            status_line,
        },
        follow_up,
    }
}
