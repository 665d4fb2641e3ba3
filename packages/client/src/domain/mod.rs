//! Match domain: the shared record, the round rules and the pure
//! snapshot-to-view derivation.
//!
//! Nothing in this module performs I/O.

pub mod error;
pub mod match_record;
pub mod reaction;
pub mod resolution;
pub mod room_id;
pub mod update;

pub use error::ValidationError;
pub use match_record::{Choice, MatchRecord, MatchStatus, PlayerName, PlayerState, Seat};
pub use reaction::{FollowUp, MatchView, Reaction, StatusLine, react};
pub use resolution::{RoundOutcome, resolve};
pub use room_id::{RoomId, RoomIdFactory};
pub use update::{FieldUpdate, LAST_UPDATED_FIELD, MatchUpdate};
