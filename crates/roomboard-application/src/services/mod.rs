//! Application services orchestrating the booking use cases

pub mod booking_service;
pub mod room_service;

pub use booking_service::BookingService;
pub use room_service::RoomService;
