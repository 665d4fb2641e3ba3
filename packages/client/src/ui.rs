//! Terminal UI for the client.

use std::io::Write;

use crate::{
    controller::Renderer,
    domain::{MatchView, RoomId},
    formatter::MatchFormatter,
    usecase::SessionError,
};

/// Prompt shown by the readline thread
pub fn prompt(name: &str) -> String {
    format!("{name}> ")
}

/// Redisplay the prompt after printing asynchronously
pub fn redisplay_prompt(name: &str) {
    print!("{}", prompt(name));
    std::io::stdout().flush().ok();
}

/// Prints every view to stdout
pub struct TerminalRenderer {
    room_id: RoomId,
    name: String,
}

impl TerminalRenderer {
    pub fn new(room_id: RoomId, name: &str) -> Self {
        Self {
            room_id,
            name: name.trim().to_string(),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &MatchView) {
        print!("{}", MatchFormatter::format_view(&self.room_id, view));
        redisplay_prompt(&self.name);
    }

    fn show_error(&mut self, error: &SessionError) {
        print!("{}", MatchFormatter::format_error(error));
        std::io::stdout().flush().ok();
    }
}
