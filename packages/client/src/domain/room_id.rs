//! Room code value object and its generator.

use std::fmt;

use janken_store::domain::MAX_DOCUMENT_ID_LENGTH;
use rand::Rng;

use super::error::ValidationError;

/// Characters a generated room code is drawn from
const ROOM_ID_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Identifier of a match, also used as the store document id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Parses a code typed by a user.
    ///
    /// Surrounding whitespace is ignored. Lowercase letters are kept as typed,
    /// the store lookup decides whether such a room exists. Codes longer than
    /// a store document id are rejected here.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > MAX_DOCUMENT_ID_LENGTH
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidRoomCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates room codes: 4 characters from `[0-9A-Z]`.
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub const LENGTH: usize = 4;

    pub fn generate() -> RoomId {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> RoomId {
        let code = (0..Self::LENGTH)
            .map(|_| char::from(ROOM_ID_CHARSET[rng.gen_range(0..ROOM_ID_CHARSET.len())]))
            .collect();
        RoomId(code)
    }
}
