//! Room-related DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roomboard_domain::room::Room;

/// Command to create a new room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomCommand {
    pub name: String,
    pub location: Option<String>,
    pub capacity: u32,
}

/// Room projection exposed to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomView {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub capacity: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RoomView {
    /// Create from domain entity
    pub fn from_domain(room: &Room) -> Self {
        Self {
            id: room.id().to_string(),
            name: room.name().to_string(),
            location: room.location().map(str::to_string),
            capacity: room.capacity(),
            is_active: room.is_active(),
            created_at: room.created_at(),
            updated_at: room.updated_at(),
        }
    }
}
