use crate::models::{Customer, Reservation, Room};

use super::snapshot::Store;

/// Every room on file, in the order they were entered.
pub fn fetch_rooms(store: &Store) -> Vec<Room> {
    store.load()
}

/// Every registered guest.
pub fn fetch_customers(store: &Store) -> Vec<Customer> {
    store.load()
}

/// Every reservation.
pub fn fetch_reservations(store: &Store) -> Vec<Reservation> {
    store.load()
}

pub fn persist_rooms(store: &Store, rooms: &[Room]) {
    store.save(rooms);
}

pub fn persist_customers(store: &Store, customers: &[Customer]) {
    store.save(customers);
}

pub fn persist_reservations(store: &Store, reservations: &[Reservation]) {
    store.save(reservations);
}

/// Display strings offered by the reservation room picker.
pub fn room_choices(store: &Store) -> Vec<String> {
    fetch_rooms(store).iter().map(ToString::to_string).collect()
}

/// Display strings offered by the reservation guest picker.
pub fn customer_choices(store: &Store) -> Vec<String> {
    fetch_customers(store)
        .iter()
        .map(ToString::to_string)
        .collect()
}
