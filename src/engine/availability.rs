//! Daily slot availability for a professional.
//!
//! A day has ten one-hour slots, 09:00 through 18:00. A booking occupies only
//! its start slot: `durationHours` is not taken into account, so a three-hour
//! job at 10:00 leaves 11:00 and 12:00 open. Dates are compared as plain
//! strings.

use serde::Serialize;

use crate::db::Booking;

/// Start times of the bookable slots
pub const ALL_TIME_SLOTS: [&str; 10] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub professional_id: String,
    pub date: String,
    pub all_slots: Vec<String>,
    pub available_slots: Vec<String>,
    /// Start times of the day's bookings, in store order
    pub booked_slots: Vec<String>,
    pub total_slots: usize,
    pub available_count: usize,
    pub booked_count: usize,
}

fn books(booking: &Booking, professional_id: &str, date: &str) -> bool {
    booking.professional_id == professional_id && booking.scheduled_date == date
}

/// Free and booked slots of `professional_id` on `date`
pub fn compute(professional_id: &str, date: &str, bookings: &[Booking]) -> Availability {
    let booked_slots: Vec<String> = bookings
        .iter()
        .filter(|b| books(b, professional_id, date))
        .map(|b| b.scheduled_time.clone())
        .collect();

    let available_slots: Vec<String> = ALL_TIME_SLOTS
        .iter()
        .filter(|slot| !booked_slots.iter().any(|b| b == *slot))
        .map(|slot| slot.to_string())
        .collect();

    Availability {
        professional_id: professional_id.to_string(),
        date: date.to_string(),
        all_slots: ALL_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        total_slots: ALL_TIME_SLOTS.len(),
        available_count: available_slots.len(),
        booked_count: booked_slots.len(),
        available_slots,
        booked_slots,
    }
}

/// True when no booking of the professional starts at `date` `time`
pub fn is_slot_free(bookings: &[Booking], professional_id: &str, date: &str, time: &str) -> bool {
    !bookings
        .iter()
        .any(|b| books(b, professional_id, date) && b.scheduled_time == time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::booking::tests::booking;

    #[test]
    fn test_empty_day_is_fully_available() {
        let a = compute("1", "2099-05-04", &[]);
        assert_eq!(a.total_slots, 10);
        assert_eq!(a.available_count, 10);
        assert_eq!(a.booked_count, 0);
        assert_eq!(a.available_slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(a.available_slots.last().map(String::as_str), Some("18:00"));
    }

    #[test]
    fn test_only_matching_professional_and_date_count() {
        let bookings = vec![
            booking("a", "1", "2099-05-04", "10:00"),
            booking("b", "1", "2099-05-05", "11:00"),
            booking("c", "2", "2099-05-04", "12:00"),
        ];
        let a = compute("1", "2099-05-04", &bookings);
        assert_eq!(a.booked_slots, vec!["10:00"]);
        assert_eq!(a.available_count, 9);
        assert!(!a.available_slots.contains(&"10:00".to_string()));
        assert!(a.available_slots.contains(&"12:00".to_string()));
    }

    #[test]
    fn test_duration_does_not_block_following_slots() {
        let mut long_job = booking("a", "1", "2099-05-04", "10:00");
        long_job.duration_hours = 3;

        let a = compute("1", "2099-05-04", &[long_job]);
        assert!(!a.available_slots.contains(&"10:00".to_string()));
        assert!(a.available_slots.contains(&"11:00".to_string()));
        assert!(a.available_slots.contains(&"12:00".to_string()));
    }

    #[test]
    fn test_off_grid_booking_is_reported_but_frees_nothing() {
        let bookings = vec![booking("a", "1", "2099-05-04", "10:30")];
        let a = compute("1", "2099-05-04", &bookings);
        assert_eq!(a.booked_count, 1);
        assert_eq!(a.available_count, 10);
    }

    #[test]
    fn test_date_is_compared_as_text() {
        let bookings = vec![booking("a", "1", "2099-05-04", "10:00")];
        assert!(is_slot_free(&bookings, "1", "2099-5-4", "10:00"));
        assert!(!is_slot_free(&bookings, "1", "2099-05-04", "10:00"));
        assert!(is_slot_free(&bookings, "1", "2099-05-04", "11:00"));
    }
}
