//! Room application service
//!
//! Room administration use cases: create, rename, resize, toggle and list.
//! Name uniqueness across rooms is case-insensitive and checked against the
//! store inside the same unit of work as the write.

use std::sync::Arc;

use tracing::warn;

use crate::dto::{CreateRoomCommand, RoomView};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};

use roomboard_domain::clock::Clock;
use roomboard_domain::repositories::{IsolationLevel, RoomRepository, UnitOfWork};
use roomboard_domain::room::Room;
use roomboard_domain::value_objects::RoomId;

/// Room application service
pub struct RoomService<RR, U, C, E>
where
    RR: RoomRepository,
    U: UnitOfWork,
    C: Clock,
    E: EventPublisher,
{
    rooms: Arc<RR>,
    uow: Arc<U>,
    clock: Arc<C>,
    events: Arc<E>,
}

impl<RR, U, C, E> RoomService<RR, U, C, E>
where
    RR: RoomRepository,
    U: UnitOfWork,
    C: Clock,
    E: EventPublisher,
{
    /// Create a new RoomService with injected dependencies
    pub fn new(rooms: Arc<RR>, uow: Arc<U>, clock: Arc<C>, events: Arc<E>) -> Self {
        Self {
            rooms,
            uow,
            clock,
            events,
        }
    }

    /// Create a new room.
    pub async fn create_room(&self, cmd: CreateRoomCommand) -> ApplicationResult<RoomView> {
        let view = self.in_transaction(|| self.create_in_txn(cmd)).await?;
        self.events
            .publish(ApplicationEvent::RoomCreated {
                room_id: view.id.clone(),
                name: view.name.clone(),
                timestamp: self.clock.now(),
            })
            .await;
        Ok(view)
    }

    /// Rename a room, keeping names unique ignoring case.
    pub async fn rename_room(&self, id: &str, new_name: String) -> ApplicationResult<RoomView> {
        let room_id = Self::parse_room_id(id)?;
        let view = self
            .in_transaction(|| self.rename_in_txn(room_id, new_name))
            .await?;
        self.publish_updated(&view).await;
        Ok(view)
    }

    /// Change a room's seat count.
    pub async fn update_capacity(&self, id: &str, capacity: u32) -> ApplicationResult<RoomView> {
        let room_id = Self::parse_room_id(id)?;
        let view = self
            .in_transaction(|| self.update_capacity_in_txn(room_id, capacity))
            .await?;
        self.publish_updated(&view).await;
        Ok(view)
    }

    /// Activate or deactivate a room. Existing bookings stay untouched;
    /// an inactive room just accepts no new windows.
    pub async fn set_room_active(&self, id: &str, active: bool) -> ApplicationResult<RoomView> {
        let room_id = Self::parse_room_id(id)?;
        let view = self
            .in_transaction(|| self.set_active_in_txn(room_id, active))
            .await?;
        self.publish_updated(&view).await;
        Ok(view)
    }

    /// Get room by ID
    pub async fn get_room(&self, id: &str) -> ApplicationResult<RoomView> {
        let room_id = Self::parse_room_id(id)?;
        let room = self.load(&room_id).await?;
        Ok(RoomView::from_domain(&room))
    }

    /// List all active rooms
    pub async fn list_active_rooms(&self) -> ApplicationResult<Vec<RoomView>> {
        let rooms = self.rooms.list_active().await?;
        Ok(rooms.iter().map(RoomView::from_domain).collect())
    }

    // === Internals ===

    async fn create_in_txn(&self, cmd: CreateRoomCommand) -> ApplicationResult<RoomView> {
        if self.rooms.exists_by_name(&cmd.name).await? {
            return Err(ApplicationError::RoomAlreadyExists(cmd.name));
        }
        let room = Room::create(cmd.name, cmd.location, cmd.capacity, self.clock.now())?;
        self.rooms.add(&room).await?;
        Ok(RoomView::from_domain(&room))
    }

    async fn rename_in_txn(&self, id: RoomId, new_name: String) -> ApplicationResult<RoomView> {
        let mut room = self.load(&id).await?;
        let same_name = room.name().to_lowercase() == new_name.to_lowercase();
        if !same_name && self.rooms.exists_by_name(&new_name).await? {
            return Err(ApplicationError::RoomAlreadyExists(new_name));
        }
        room.rename(new_name, self.clock.now())?;
        self.rooms.update(&room).await?;
        Ok(RoomView::from_domain(&room))
    }

    async fn update_capacity_in_txn(
        &self,
        id: RoomId,
        capacity: u32,
    ) -> ApplicationResult<RoomView> {
        let mut room = self.load(&id).await?;
        room.update_capacity(capacity, self.clock.now())?;
        self.rooms.update(&room).await?;
        Ok(RoomView::from_domain(&room))
    }

    async fn set_active_in_txn(&self, id: RoomId, active: bool) -> ApplicationResult<RoomView> {
        let mut room = self.load(&id).await?;
        if active {
            room.activate(self.clock.now());
        } else {
            room.deactivate(self.clock.now());
        }
        self.rooms.update(&room).await?;
        Ok(RoomView::from_domain(&room))
    }

    async fn load(&self, id: &RoomId) -> ApplicationResult<Room> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::RoomNotFound(id.to_string()))
    }

    async fn in_transaction<T, F, Fut>(&self, work: F) -> ApplicationResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ApplicationResult<T>>,
    {
        self.uow
            .begin(IsolationLevel::Serializable)
            .await
            .map_err(|e| ApplicationError::TransactionFailed(e.to_string()))?;
        match work().await {
            Ok(value) => {
                self.uow
                    .save_changes()
                    .await
                    .map_err(|e| ApplicationError::TransactionFailed(e.to_string()))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.uow.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn publish_updated(&self, view: &RoomView) {
        self.events
            .publish(ApplicationEvent::RoomUpdated {
                room_id: view.id.clone(),
                timestamp: self.clock.now(),
            })
            .await;
    }

    fn parse_room_id(id: &str) -> ApplicationResult<RoomId> {
        RoomId::from_string(id)
            .map_err(|_| ApplicationError::ValidationFailed("Invalid room ID".into()))
    }
}
