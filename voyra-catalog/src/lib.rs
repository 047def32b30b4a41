//! Seat map engine for flight cabins and bus seat types.
//!
//! A [`SeatMap`] is generated once per vehicle from its class descriptor.
//! Booking state is never stored on it; [`resolve`] overlays it per request.

pub mod availability;
pub mod error;
pub mod generator;
pub mod layout;
pub mod seat;

pub use availability::{available_count, resolve, AvailabilityView, BookedSeats, SeatAvailability};
pub use error::LayoutError;
pub use generator::generate;
pub use layout::{class_names, lookup, BusSeatType, CabinClass, LayoutDescriptor, SeatClass, TransportMode};
pub use seat::{Deck, Seat, SeatMap, SeatPosition, SeatType};
