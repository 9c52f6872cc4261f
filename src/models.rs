//! Domain models for rooms, guests and reservations. These types stay plain
//! data holders: the store serializes them wholesale and the editor replaces
//! them by index, so nothing here carries behaviour beyond formatting.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by forms, tables and the JSON encoding.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Category of a room. Labels match the upper-case names guests see on the
/// rate card.
pub enum RoomType {
    #[default]
    Single,
    Double,
    Deluxe,
    Suite,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Deluxe,
        RoomType::Suite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoomType::Single => "SINGLE",
            RoomType::Double => "DOUBLE",
            RoomType::Deluxe => "DELUXE",
            RoomType::Suite => "SUITE",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Bed fitted in a room.
pub enum BedType {
    #[default]
    Single,
    Double,
    King,
}

impl BedType {
    pub const ALL: [BedType; 3] = [BedType::Single, BedType::Double, BedType::King];

    pub fn label(self) -> &'static str {
        match self {
            BedType::Single => "SINGLE",
            BedType::Double => "DOUBLE",
            BedType::King => "KING",
        }
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A bookable room. The id is whatever the front desk typed; nothing checks it
/// for uniqueness.
pub struct Room {
    /// Front-desk identifier such as `R101`. Also the string reservations
    /// store when they book this room.
    pub id: String,
    /// Stored under the JSON key `type`, which is a reserved word in Rust.
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub bed: BedType,
    /// Nightly rate in whole currency units.
    pub price: i64,
}

impl fmt::Display for Room {
    /// Rooms are referenced by id alone when a reservation copies them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A registered guest.
pub struct Customer {
    /// Identifier typed at registration; the prefix of the guest picker label.
    pub id: String,
    /// Full name as entered, shown after the id in reservation pickers.
    pub name: String,
    /// Free text; no format is enforced so international numbers fit.
    pub phone: String,
    /// Free text, possibly empty.
    pub email: String,
}

impl fmt::Display for Customer {
    /// `"<id> - <name>"`, the string a reservation stores as its guest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A booking. `room_id` and `customer_id` hold display strings copied from
/// the room and customer lists at booking time; they are not validated
/// references and survive the deletion of the room or guest they name.
pub struct Reservation {
    pub id: String,
    /// Room display string (the room id) at booking time.
    pub room_id: String,
    /// Guest display string (`"<id> - <name>"`) at booking time.
    pub customer_id: String,
    /// Arrival day, serialized as `YYYY-MM-DD`.
    pub check_in: NaiveDate,
    /// Departure day. Not checked against `check_in`, so a check-out before
    /// check-in is stored as typed.
    pub check_out: NaiveDate,
    /// Amount charged for the stay in whole currency units, entered by hand
    /// rather than derived from the nightly rate.
    pub total: i64,
}

/// Typed value used to order table rows. Text compares case-insensitively so
/// "alice" and "Alice" sit together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    Text(String),
    Number(i64),
    Date(NaiveDate),
}

impl SortValue {
    fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            // Columns never mix kinds; fall back to a stable rank.
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Text(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Date(_) => 2,
        }
    }
}

/// How a record shows up as a table row.
pub trait TableRow {
    /// Column headers, in display order.
    const COLUMNS: &'static [&'static str];

    /// Display text for every column, matching `COLUMNS`.
    fn cells(&self) -> Vec<String>;

    /// Sort key for a column index. Out-of-range columns sort as empty text.
    fn sort_value(&self, column: usize) -> SortValue;
}

impl TableRow for Room {
    const COLUMNS: &'static [&'static str] = &["ID", "Type", "Bed", "Price"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.room_type.to_string(),
            self.bed.to_string(),
            self.price.to_string(),
        ]
    }

    fn sort_value(&self, column: usize) -> SortValue {
        match column {
            0 => SortValue::text(&self.id),
            1 => SortValue::text(self.room_type.label()),
            2 => SortValue::text(self.bed.label()),
            3 => SortValue::Number(self.price),
            _ => SortValue::text(""),
        }
    }
}

impl TableRow for Customer {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Phone", "Email"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
    }

    fn sort_value(&self, column: usize) -> SortValue {
        match column {
            0 => SortValue::text(&self.id),
            1 => SortValue::text(&self.name),
            2 => SortValue::text(&self.phone),
            3 => SortValue::text(&self.email),
            _ => SortValue::text(""),
        }
    }
}

impl TableRow for Reservation {
    const COLUMNS: &'static [&'static str] = &["RID", "Room", "Guest", "In", "Out", "Total"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.room_id.clone(),
            self.customer_id.clone(),
            self.check_in.format(DATE_FORMAT).to_string(),
            self.check_out.format(DATE_FORMAT).to_string(),
            self.total.to_string(),
        ]
    }

    fn sort_value(&self, column: usize) -> SortValue {
        match column {
            0 => SortValue::text(&self.id),
            1 => SortValue::text(&self.room_id),
            2 => SortValue::text(&self.customer_id),
            3 => SortValue::Date(self.check_in),
            4 => SortValue::Date(self.check_out),
            5 => SortValue::Number(self.total),
            _ => SortValue::text(""),
        }
    }
}
