//! Persistence module split across logical submodules.

mod collections;
mod snapshot;

pub use collections::{
    customer_choices, fetch_customers, fetch_reservations, fetch_rooms, persist_customers,
    persist_reservations, persist_rooms, room_choices,
};
pub use snapshot::{Record, Store};
