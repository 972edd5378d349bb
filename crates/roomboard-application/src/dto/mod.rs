//! Data transfer objects for the application layer
//!
//! Commands carry caller input into the services; views are the
//! presentation-safe projections handed back out.

mod booking;
mod room;

pub use booking::{BookingView, CreateBookingCommand, RescheduleBookingCommand};
pub use room::{CreateRoomCommand, RoomView};
