//! Terminal formatting for the match view.

use crate::{
    domain::{Choice, MatchView, RoomId, Seat},
    usecase::SessionError,
};

const RULE: &str = "============================================================";

/// Glyph depicting a hand
pub fn hand_glyph(choice: Choice) -> &'static str {
    match choice {
        Choice::Rock => "✊",
        Choice::Paper => "✋",
        Choice::Scissors => "✌️",
    }
}

fn hand_cell(hand: Option<Choice>) -> String {
    match hand {
        Some(choice) => format!("{} {}", hand_glyph(choice), choice),
        None => "-".to_string(),
    }
}

pub struct MatchFormatter;

impl MatchFormatter {
    /// Format the full match view
    ///
    /// # Arguments
    ///
    /// * `room_id` - Room the view belongs to
    /// * `view` - View derived from the latest snapshot
    pub fn format_view(room_id: &RoomId, view: &MatchView) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{RULE}\n"));
        output.push_str(&format!("Room {room_id}\n"));
        output.push_str(&format!(
            "  {} (me)  score {}  {}\n",
            view.self_name,
            view.self_score,
            hand_cell(view.self_hand)
        ));
        output.push_str(&format!(
            "  {}  score {}  {}\n",
            view.opponent_name,
            view.opponent_score,
            hand_cell(view.opponent_hand)
        ));
        output.push_str(&format!("{}\n", view.status_line));
        output.push_str(&format!("{RULE}\n"));
        output
    }

    /// Format the greeting shown once the session is established
    pub fn format_session_started(room_id: &RoomId, seat: Seat) -> String {
        match seat {
            Seat::One => format!(
                "\nRoom created. Share the room code with your opponent: {room_id}\n"
            ),
            Seat::Two => format!("\nJoined room {room_id} as {seat}.\n"),
        }
    }

    pub fn format_help() -> String {
        "Type rock / paper / scissors (or r / p / s) and press Enter. Type quit to leave.\n"
            .to_string()
    }

    pub fn format_error(error: &SessionError) -> String {
        format!("\n! {error}\n")
    }
}
