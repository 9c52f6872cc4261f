use std::fs;

use chrono::NaiveDate;
use hotel_manager::store::{
    customer_choices, fetch_customers, fetch_reservations, fetch_rooms, persist_customers,
    persist_reservations, persist_rooms, room_choices,
};
use hotel_manager::{BedType, Customer, Reservation, Room, RoomType, StoreError};

mod common;
use common::{customer, temp_store};

#[test]
fn test_room_scenario_survives_reload() {
    let (_dir, store) = temp_store();
    assert!(fetch_rooms(&store).is_empty());

    let mut rooms = vec![
        Room {
            id: "R1".into(),
            room_type: RoomType::Double,
            bed: BedType::King,
            price: 100,
        },
        Room {
            id: "R2".into(),
            room_type: RoomType::Suite,
            bed: BedType::King,
            price: 250,
        },
    ];
    persist_rooms(&store, &rooms);
    rooms.remove(0);
    persist_rooms(&store, &rooms);

    assert_eq!(fetch_rooms(&store), rooms);
    assert_eq!(room_choices(&store), ["R2"]);
}

#[test]
fn test_customers_and_reservations_round_trip() {
    let (_dir, store) = temp_store();
    let customers: Vec<Customer> = vec![customer("C1", "Ada"), customer("C2", "Grace")];
    persist_customers(&store, &customers);

    let reservations = vec![Reservation {
        id: "B1".into(),
        room_id: "R9".into(),
        customer_id: "C1 - Ada".into(),
        check_in: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        total: 0,
    }];
    persist_reservations(&store, &reservations);

    assert_eq!(fetch_customers(&store), customers);
    assert_eq!(customer_choices(&store), ["C1 - Ada", "C2 - Grace"]);
    assert_eq!(fetch_reservations(&store), reservations);

    let raw = fs::read_to_string(store.path_for::<Reservation>()).unwrap();
    assert!(raw.contains("\"2024-02-28\""));
}

#[test]
fn test_corrupt_file_loads_empty_but_reports_corrupt() {
    let (_dir, store) = temp_store();
    fs::write(store.path_for::<Room>(), "[{\"id\": ").unwrap();

    assert!(fetch_rooms(&store).is_empty());
    assert!(matches!(
        store.try_load::<Room>(),
        Err(StoreError::Corrupt { .. })
    ));
}

#[test]
fn test_missing_file_is_distinguished_from_empty() {
    let (_dir, store) = temp_store();
    let err = store.try_load::<Customer>().unwrap_err();
    assert!(err.is_missing());

    persist_customers(&store, &[]);
    assert_eq!(store.try_load::<Customer>().unwrap(), Vec::<Customer>::new());
}
