//! In-memory room repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use roomboard_domain::{
    errors::DomainResult,
    repositories::RoomRepository,
    room::Room,
    value_objects::RoomId,
};

use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of RoomRepository
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Stores cloned Room instances to maintain isolation. Name lookups are
/// case-insensitive.
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// Create a new empty in-memory room repository
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Create with initial rooms (useful for testing)
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        let map: HashMap<RoomId, Room> = rooms.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            rooms: RwLock::new(map),
        }
    }

    /// Get the current count of rooms (for testing)
    pub fn count(&self) -> usize {
        self.rooms.read().len()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, id: &RoomId) -> DomainResult<Option<Room>> {
        let rooms = self.rooms.read();
        Ok(rooms.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Room>> {
        let needle = name.to_lowercase();
        let rooms = self.rooms.read();
        Ok(rooms
            .values()
            .find(|r| r.name().to_lowercase() == needle)
            .cloned())
    }

    async fn exists_by_name(&self, name: &str) -> DomainResult<bool> {
        let needle = name.to_lowercase();
        let rooms = self.rooms.read();
        Ok(rooms.values().any(|r| r.name().to_lowercase() == needle))
    }

    async fn list_active(&self) -> DomainResult<Vec<Room>> {
        let rooms = self.rooms.read();
        let mut active: Vec<Room> = rooms.values().filter(|r| r.is_active()).cloned().collect();
        active.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(active)
    }

    async fn add(&self, room: &Room) -> DomainResult<()> {
        let mut rooms = self.rooms.write();
        if rooms.contains_key(&room.id()) {
            return Err(PersistenceError::concurrency_conflict(format!(
                "room {} already exists",
                room.id()
            ))
            .into());
        }
        rooms.insert(room.id(), room.clone());
        Ok(())
    }

    async fn update(&self, room: &Room) -> DomainResult<()> {
        let mut rooms = self.rooms.write();
        if !rooms.contains_key(&room.id()) {
            return Err(PersistenceError::not_found("Room", room.id().to_string()).into());
        }
        rooms.insert(room.id(), room.clone());
        Ok(())
    }
}
