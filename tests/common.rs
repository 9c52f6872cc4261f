#![allow(dead_code)]
use hotel_manager::{BedType, Customer, Room, RoomType, Store};
use tempfile::TempDir;

/// Fresh store in its own temp directory. Keep the `TempDir` alive for the
/// length of the test.
pub fn temp_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = Store::open(dir.path()).expect("failed to open store");
    (dir, store)
}

pub fn room(id: &str, price: i64) -> Room {
    Room {
        id: id.into(),
        room_type: RoomType::Single,
        bed: BedType::Single,
        price,
    }
}

pub fn customer(id: &str, name: &str) -> Customer {
    Customer {
        id: id.into(),
        name: name.into(),
        phone: String::new(),
        email: String::new(),
    }
}
