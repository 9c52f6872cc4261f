use chrono::NaiveDate;

use crate::errors::EditError;
use crate::models::{BedType, Customer, Reservation, Room, RoomType, DATE_FORMAT};
use crate::store::Record;

/// How a form field accepts input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed character by character.
    Text,
    /// A fixed set of values cycled with Left/Right.
    Choice,
}

/// Static description of one form field.
#[derive(Debug, Copy, Clone)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn text(label: &'static str) -> Field {
    Field {
        label,
        kind: FieldKind::Text,
    }
}

const fn choice(label: &'static str) -> Field {
    Field {
        label,
        kind: FieldKind::Choice,
    }
}

/// Form bound to one record kind. Field indices follow `FIELDS`.
pub trait RecordForm {
    type Record: Record;

    const FIELDS: &'static [Field];

    /// Current display text of a field.
    fn value(&self, field: usize) -> String;

    /// Index of the focused field.
    fn active(&self) -> usize;

    fn focus(&mut self, field: usize);

    /// Append a character to the focused text field. Returns false when the
    /// focused field does not take typed input.
    fn push_char(&mut self, ch: char) -> bool;

    /// Remove the last character of the focused text field.
    fn backspace(&mut self);

    /// Step the focused choice field. Returns false for text fields.
    fn cycle_choice(&mut self, delta: isize) -> bool;

    /// Copy a record's values into the form.
    fn load(&mut self, record: &Self::Record);

    /// Clear typed values back to the defaults of a fresh form.
    fn reset(&mut self);

    /// Whether the user has typed anything since the last reset.
    fn is_blank(&self) -> bool;

    /// Validate the inputs and build the record they describe.
    fn parse(&self) -> Result<Self::Record, EditError>;

    /// Move focus forward, wrapping around.
    fn next_field(&mut self) {
        let len = Self::FIELDS.len();
        self.focus((self.active() + 1) % len);
    }

    /// Move focus backward, wrapping around.
    fn previous_field(&mut self) {
        let len = Self::FIELDS.len();
        self.focus((self.active() + len - 1) % len);
    }

    /// Character count of a field, used to place the terminal cursor.
    fn value_len(&self, field: usize) -> usize {
        self.value(field).chars().count()
    }
}

/// Step through `all` from `current`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let position = all.iter().position(|item| *item == current).unwrap_or(0) as isize;
    all[(position + delta).rem_euclid(len) as usize]
}

fn push_text(target: &mut String, ch: char) -> bool {
    if ch.is_control() {
        return false;
    }
    target.push(ch);
    true
}

fn parse_integer(raw: &str, field: &'static str) -> Result<i64, EditError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| EditError::InvalidNumber { field })
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, EditError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| EditError::InvalidDate { field })
}

/// Room form: id, type, bed and nightly price.
#[derive(Debug, Default, Clone)]
pub struct RoomForm {
    pub id: String,
    pub room_type: RoomType,
    pub bed: BedType,
    pub price: String,
    active: usize,
}

impl RoomForm {
    const ID: usize = 0;
    const TYPE: usize = 1;
    const BED: usize = 2;
    const PRICE: usize = 3;
}

impl RecordForm for RoomForm {
    type Record = Room;

    const FIELDS: &'static [Field] = &[
        text("Room ID"),
        choice("Room Type"),
        choice("Bed Type"),
        text("Price per Night"),
    ];

    fn value(&self, field: usize) -> String {
        match field {
            Self::ID => self.id.clone(),
            Self::TYPE => self.room_type.to_string(),
            Self::BED => self.bed.to_string(),
            Self::PRICE => self.price.clone(),
            _ => String::new(),
        }
    }

    fn active(&self) -> usize {
        self.active
    }

    fn focus(&mut self, field: usize) {
        self.active = field.min(Self::FIELDS.len() - 1);
    }

    fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            Self::ID => push_text(&mut self.id, ch),
            Self::PRICE => push_text(&mut self.price, ch),
            _ => false,
        }
    }

    fn backspace(&mut self) {
        match self.active {
            Self::ID => {
                self.id.pop();
            }
            Self::PRICE => {
                self.price.pop();
            }
            _ => {}
        }
    }

    fn cycle_choice(&mut self, delta: isize) -> bool {
        match self.active {
            Self::TYPE => {
                self.room_type = cycle(&RoomType::ALL, self.room_type, delta);
                true
            }
            Self::BED => {
                self.bed = cycle(&BedType::ALL, self.bed, delta);
                true
            }
            _ => false,
        }
    }

    fn load(&mut self, room: &Room) {
        self.id = room.id.clone();
        self.room_type = room.room_type;
        self.bed = room.bed;
        self.price = room.price.to_string();
    }

    fn reset(&mut self) {
        *self = Self {
            active: self.active,
            ..Self::default()
        };
    }

    fn is_blank(&self) -> bool {
        self.id.is_empty()
            && self.price.is_empty()
            && self.room_type == RoomType::default()
            && self.bed == BedType::default()
    }

    fn parse(&self) -> Result<Room, EditError> {
        let price = parse_integer(&self.price, "price")?;
        Ok(Room {
            id: self.id.clone(),
            room_type: self.room_type,
            bed: self.bed,
            price,
        })
    }
}

/// Guest registration form. Every field is free text.
#[derive(Debug, Default, Clone)]
pub struct CustomerForm {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    active: usize,
}

impl CustomerForm {
    fn field_mut(&mut self, field: usize) -> Option<&mut String> {
        match field {
            0 => Some(&mut self.id),
            1 => Some(&mut self.name),
            2 => Some(&mut self.phone),
            3 => Some(&mut self.email),
            _ => None,
        }
    }
}

impl RecordForm for CustomerForm {
    type Record = Customer;

    const FIELDS: &'static [Field] = &[
        text("Customer ID"),
        text("Full Name"),
        text("Phone Number"),
        text("Email Address"),
    ];

    fn value(&self, field: usize) -> String {
        match field {
            0 => self.id.clone(),
            1 => self.name.clone(),
            2 => self.phone.clone(),
            3 => self.email.clone(),
            _ => String::new(),
        }
    }

    fn active(&self) -> usize {
        self.active
    }

    fn focus(&mut self, field: usize) {
        self.active = field.min(Self::FIELDS.len() - 1);
    }

    fn push_char(&mut self, ch: char) -> bool {
        let active = self.active;
        match self.field_mut(active) {
            Some(target) => push_text(target, ch),
            None => false,
        }
    }

    fn backspace(&mut self) {
        let active = self.active;
        if let Some(target) = self.field_mut(active) {
            target.pop();
        }
    }

    fn cycle_choice(&mut self, _delta: isize) -> bool {
        false
    }

    fn load(&mut self, customer: &Customer) {
        self.id = customer.id.clone();
        self.name = customer.name.clone();
        self.phone = customer.phone.clone();
        self.email = customer.email.clone();
    }

    fn reset(&mut self) {
        *self = Self {
            active: self.active,
            ..Self::default()
        };
    }

    fn is_blank(&self) -> bool {
        self.id.is_empty() && self.name.is_empty() && self.phone.is_empty() && self.email.is_empty()
    }

    fn parse(&self) -> Result<Customer, EditError> {
        Ok(Customer {
            id: self.id.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        })
    }
}

/// Drop-down style choice over display strings of another entity list.
#[derive(Debug, Default, Clone)]
pub struct Picker {
    pub options: Vec<String>,
    pub value: Option<String>,
}

impl Picker {
    /// Start on the first option, like a freshly built combo box.
    pub fn new(options: Vec<String>) -> Self {
        let value = options.first().cloned();
        Self { options, value }
    }

    fn cycle(&mut self, delta: isize) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let len = self.options.len() as isize;
        let next = match self
            .value
            .as_ref()
            .and_then(|current| self.options.iter().position(|option| option == current))
        {
            Some(position) => (position as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.value = Some(self.options[next as usize].clone());
        true
    }

    /// Select a stored display string. Strings that no longer match an option
    /// are kept verbatim so re-saving a booking does not rewrite its history.
    fn select(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }

    fn reset(&mut self) {
        self.value = self.options.first().cloned();
    }

    fn display(&self) -> String {
        self.value.clone().unwrap_or_default()
    }
}

/// Booking form. Room and guest are pickers fed from the room and customer
/// lists when the screen opens.
#[derive(Debug, Clone)]
pub struct ReservationForm {
    pub id: String,
    pub room: Picker,
    pub guest: Picker,
    pub check_in: String,
    pub check_out: String,
    pub total: String,
    today: NaiveDate,
    active: usize,
}

impl ReservationForm {
    const ID: usize = 0;
    const ROOM: usize = 1;
    const GUEST: usize = 2;
    const CHECK_IN: usize = 3;
    const CHECK_OUT: usize = 4;
    const TOTAL: usize = 5;

    /// Build a blank booking form; both dates start on `today`.
    pub fn new(rooms: Vec<String>, guests: Vec<String>, today: NaiveDate) -> Self {
        let today_text = today.format(DATE_FORMAT).to_string();
        Self {
            id: String::new(),
            room: Picker::new(rooms),
            guest: Picker::new(guests),
            check_in: today_text.clone(),
            check_out: today_text,
            total: String::new(),
            today,
            active: 0,
        }
    }

    fn text_field_mut(&mut self, field: usize) -> Option<&mut String> {
        match field {
            Self::ID => Some(&mut self.id),
            Self::CHECK_IN => Some(&mut self.check_in),
            Self::CHECK_OUT => Some(&mut self.check_out),
            Self::TOTAL => Some(&mut self.total),
            _ => None,
        }
    }
}

impl RecordForm for ReservationForm {
    type Record = Reservation;

    const FIELDS: &'static [Field] = &[
        text("Reservation ID"),
        choice("Select Room"),
        choice("Select Guest"),
        text("Check-In Date"),
        text("Check-Out Date"),
        text("Total Amount ($)"),
    ];

    fn value(&self, field: usize) -> String {
        match field {
            Self::ID => self.id.clone(),
            Self::ROOM => self.room.display(),
            Self::GUEST => self.guest.display(),
            Self::CHECK_IN => self.check_in.clone(),
            Self::CHECK_OUT => self.check_out.clone(),
            Self::TOTAL => self.total.clone(),
            _ => String::new(),
        }
    }

    fn active(&self) -> usize {
        self.active
    }

    fn focus(&mut self, field: usize) {
        self.active = field.min(Self::FIELDS.len() - 1);
    }

    fn push_char(&mut self, ch: char) -> bool {
        let active = self.active;
        match self.text_field_mut(active) {
            Some(target) => push_text(target, ch),
            None => false,
        }
    }

    fn backspace(&mut self) {
        let active = self.active;
        if let Some(target) = self.text_field_mut(active) {
            target.pop();
        }
    }

    fn cycle_choice(&mut self, delta: isize) -> bool {
        match self.active {
            Self::ROOM => self.room.cycle(delta),
            Self::GUEST => self.guest.cycle(delta),
            _ => false,
        }
    }

    fn load(&mut self, reservation: &Reservation) {
        self.id = reservation.id.clone();
        self.room.select(&reservation.room_id);
        self.guest.select(&reservation.customer_id);
        self.check_in = reservation.check_in.format(DATE_FORMAT).to_string();
        self.check_out = reservation.check_out.format(DATE_FORMAT).to_string();
        self.total = reservation.total.to_string();
    }

    fn reset(&mut self) {
        let today = self.today.format(DATE_FORMAT).to_string();
        self.id.clear();
        self.room.reset();
        self.guest.reset();
        self.check_in = today.clone();
        self.check_out = today;
        self.total.clear();
    }

    fn is_blank(&self) -> bool {
        let today = self.today.format(DATE_FORMAT).to_string();
        self.id.is_empty()
            && self.total.is_empty()
            && self.check_in == today
            && self.check_out == today
            && self.room.value == self.room.options.first().cloned()
            && self.guest.value == self.guest.options.first().cloned()
    }

    fn parse(&self) -> Result<Reservation, EditError> {
        let room_id = self
            .room
            .value
            .clone()
            .ok_or(EditError::MissingChoice { field: "room" })?;
        let customer_id = self
            .guest
            .value
            .clone()
            .ok_or(EditError::MissingChoice { field: "guest" })?;
        let check_in = parse_date(&self.check_in, "Check-in")?;
        let check_out = parse_date(&self.check_out, "Check-out")?;
        let total = parse_integer(&self.total, "total")?;
        Ok(Reservation {
            id: self.id.clone(),
            room_id,
            customer_id,
            check_in,
            check_out,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    fn type_text<F: RecordForm>(form: &mut F, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn room_form_parses_typed_values() {
        let mut form = RoomForm::default();
        type_text(&mut form, "R1");
        form.next_field();
        form.cycle_choice(1);
        form.next_field();
        form.cycle_choice(2);
        form.next_field();
        type_text(&mut form, " 100 ");

        let room = form.parse().unwrap();
        assert_eq!(room.id, "R1");
        assert_eq!(room.room_type, RoomType::Double);
        assert_eq!(room.bed, BedType::King);
        assert_eq!(room.price, 100);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let form = RoomForm {
            id: "R1".into(),
            price: "12a".into(),
            ..RoomForm::default()
        };
        assert_eq!(
            form.parse().unwrap_err(),
            EditError::InvalidNumber { field: "price" }
        );
    }

    #[test]
    fn choice_cycling_wraps_both_ways() {
        let mut form = RoomForm::default();
        form.focus(1);
        assert!(form.cycle_choice(-1));
        assert_eq!(form.room_type, RoomType::Suite);
        assert!(form.cycle_choice(1));
        assert_eq!(form.room_type, RoomType::Single);

        form.focus(0);
        assert!(!form.cycle_choice(1));
    }

    #[test]
    fn focus_wraps_around_fields() {
        let mut form = CustomerForm::default();
        form.previous_field();
        assert_eq!(form.active(), 3);
        form.next_field();
        assert_eq!(form.active(), 0);
    }

    #[test]
    fn customer_form_round_trips_a_record() {
        let customer = Customer {
            id: "C1".into(),
            name: "Grace Hopper".into(),
            phone: "555-0199".into(),
            email: "grace@example.com".into(),
        };
        let mut form = CustomerForm::default();
        form.load(&customer);
        assert_eq!(form.parse().unwrap(), customer);

        form.reset();
        assert!(form.is_blank());
    }

    #[test]
    fn reservation_form_defaults_to_first_options_and_today() {
        let form = ReservationForm::new(
            vec!["R1".into(), "R2".into()],
            vec!["C1 - Ada".into()],
            today(),
        );
        assert!(form.is_blank());
        assert_eq!(form.value(1), "R1");
        assert_eq!(form.value(3), "2026-05-10");
    }

    #[test]
    fn reservation_requires_room_and_guest_choices() {
        let mut form = ReservationForm::new(Vec::new(), vec!["C1 - Ada".into()], today());
        form.total = "300".into();
        assert_eq!(
            form.parse().unwrap_err(),
            EditError::MissingChoice { field: "room" }
        );
    }

    #[test]
    fn reservation_rejects_malformed_dates() {
        let mut form = ReservationForm::new(vec!["R1".into()], vec!["C1 - Ada".into()], today());
        form.check_out = "10/05/2026".into();
        form.total = "300".into();
        assert_eq!(
            form.parse().unwrap_err(),
            EditError::InvalidDate { field: "Check-out" }
        );
    }

    #[test]
    fn reservation_total_must_be_a_whole_number() {
        let mut form = ReservationForm::new(vec!["R1".into()], vec!["C1 - Ada".into()], today());
        form.total = "12.5".into();
        assert_eq!(
            form.parse().unwrap_err(),
            EditError::InvalidNumber { field: "total" }
        );
    }

    #[test]
    fn reservation_accepts_check_out_before_check_in() {
        let mut form = ReservationForm::new(vec!["R1".into()], vec!["C1 - Ada".into()], today());
        form.check_out = "2026-05-01".into();
        form.total = "0".into();
        let reservation = form.parse().unwrap();
        assert!(reservation.check_out < reservation.check_in);
    }

    #[test]
    fn loading_keeps_room_strings_without_a_matching_option() {
        let reservation = Reservation {
            id: "B1".into(),
            room_id: "R404".into(),
            customer_id: "C1 - Ada".into(),
            check_in: today(),
            check_out: NaiveDate::from_ymd_opt(2026, 5, 12).unwrap(),
            total: 400,
        };
        let mut form = ReservationForm::new(vec!["R1".into()], vec!["C1 - Ada".into()], today());
        form.load(&reservation);
        assert_eq!(form.parse().unwrap(), reservation);

        form.focus(1);
        form.cycle_choice(1);
        assert_eq!(form.room.value.as_deref(), Some("R1"));
    }
}
