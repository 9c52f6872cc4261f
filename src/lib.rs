//! Terminal front desk for a small hotel: rooms, guests and reservations kept
//! as JSON snapshot files and edited through three list screens.
pub mod config;
pub mod editor;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;

pub use config::{AppConfig, Cli};
pub use editor::{EditorAction, Effect, ListEditor, Phase};
pub use errors::{EditError, StoreError};
pub use models::{BedType, Customer, Reservation, Room, RoomType};
pub use store::Store;
pub use ui::{run_app, App};
