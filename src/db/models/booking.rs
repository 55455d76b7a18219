//! Booking models and store queries.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{info, warn};

use super::common::{deserialize_lenient_f64, present};
use crate::db::{Store, StoreError};
use crate::engine::availability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// A citizen's appointment with a professional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub citizen_id: String,
    pub professional_id: String,
    pub professional_name: String,
    pub profession: String,
    pub service_type: String,
    /// `YYYY-MM-DD`
    pub scheduled_date: String,
    /// `HH:MM`, normally one of the daily slots
    pub scheduled_time: String,
    pub duration_hours: u32,
    pub address: String,
    pub description: String,
    pub status: BookingStatus,
    pub base_price: f64,
    pub municipality_subsidy: f64,
    pub citizen_pays: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub citizen_id: Option<String>,
    pub professional_id: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    /// Whole hours; numeric strings accepted, `0` means unset
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub duration_hours: Option<f64>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Query parameters for listing bookings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    pub citizen_id: Option<String>,
    pub professional_id: Option<String>,
    pub status: Option<String>,
}

impl BookingFilter {
    pub fn for_professional(professional_id: &str) -> Self {
        Self {
            professional_id: Some(professional_id.to_string()),
            ..Default::default()
        }
    }

    /// Blank parameters (`?status=`) do not filter
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(citizen_id) = present(&self.citizen_id) {
            if booking.citizen_id != citizen_id {
                return false;
            }
        }
        if let Some(professional_id) = present(&self.professional_id) {
            if booking.professional_id != professional_id {
                return false;
            }
        }
        if let Some(status) = present(&self.status) {
            if booking.status.as_str() != status {
                return false;
            }
        }
        true
    }
}

impl Booking {
    /// Bookings matching the filter, latest scheduled date first
    pub fn list(store: &Store, filter: &BookingFilter) -> Vec<Booking> {
        let tables = store.read();
        let mut bookings: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        // ISO dates order lexicographically
        bookings.sort_by_key(|b| Reverse(b.scheduled_date.clone()));
        bookings
    }

    /// Advisory check: is the slot free right now? Claims nothing.
    pub fn is_slot_free(store: &Store, professional_id: &str, date: &str, time: &str) -> bool {
        let tables = store.read();
        availability::is_slot_free(&tables.bookings, professional_id, date, time)
    }

    /// Store a new booking.
    ///
    /// With `reject_double_booking` the slot is re-checked under the same
    /// write lock that appends the booking, so concurrent requests for one
    /// slot cannot both succeed.
    pub fn insert(
        store: &Store,
        booking: Booking,
        reject_double_booking: bool,
    ) -> Result<Booking, StoreError> {
        let mut tables = store.write();

        let free = availability::is_slot_free(
            &tables.bookings,
            &booking.professional_id,
            &booking.scheduled_date,
            &booking.scheduled_time,
        );
        if !free {
            if reject_double_booking {
                return Err(StoreError::SlotTaken {
                    professional_id: booking.professional_id,
                    date: booking.scheduled_date,
                    time: booking.scheduled_time,
                });
            }
            warn!(
                professional_id = %booking.professional_id,
                date = %booking.scheduled_date,
                time = %booking.scheduled_time,
                "Storing booking for an already booked slot"
            );
        }

        tables.bookings.push(booking.clone());
        info!(
            booking_id = %booking.id,
            total = tables.bookings.len(),
            "Booking stored"
        );
        Ok(booking)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn booking(id: &str, professional_id: &str, date: &str, time: &str) -> Booking {
        Booking {
            id: id.to_string(),
            citizen_id: "user-citizen-1".to_string(),
            professional_id: professional_id.to_string(),
            professional_name: "Γιάννης Παπαδόπουλος".to_string(),
            profession: "Ηλεκτρολόγος".to_string(),
            service_type: "electrical".to_string(),
            scheduled_date: date.to_string(),
            scheduled_time: time.to_string(),
            duration_hours: 2,
            address: "Λεωφ. Αλεξάνδρας 123, Αθήνα".to_string(),
            description: "Επισκευή".to_string(),
            status: BookingStatus::Pending,
            base_price: 100.0,
            municipality_subsidy: 70.0,
            citizen_pays: 30.0,
            created_at: "2025-11-10T10:00:00.000Z".to_string(),
            updated_at: "2025-11-10T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_filter_matches_every_given_field() {
        let b = booking("b1", "1", "2099-01-01", "10:00");

        assert!(BookingFilter::default().matches(&b));
        assert!(BookingFilter::for_professional("1").matches(&b));
        assert!(!BookingFilter::for_professional("2").matches(&b));

        let filter = BookingFilter {
            citizen_id: Some("user-citizen-1".to_string()),
            status: Some("confirmed".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&b));
    }

    #[test]
    fn test_list_sorts_latest_date_first() {
        let store = Store::new();
        Booking::insert(&store, booking("a", "1", "2099-01-01", "10:00"), true).unwrap();
        Booking::insert(&store, booking("b", "1", "2099-03-01", "10:00"), true).unwrap();
        Booking::insert(&store, booking("c", "1", "2099-02-01", "10:00"), true).unwrap();

        let ids: Vec<String> = Booking::list(&store, &BookingFilter::default())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_insert_rejects_taken_slot_when_guarded() {
        let store = Store::new();
        Booking::insert(&store, booking("a", "1", "2099-01-01", "10:00"), true).unwrap();

        let err = Booking::insert(&store, booking("b", "1", "2099-01-01", "10:00"), true)
            .unwrap_err();
        assert!(matches!(err, StoreError::SlotTaken { .. }));

        // Another professional, or another hour, is fine
        Booking::insert(&store, booking("c", "2", "2099-01-01", "10:00"), true).unwrap();
        Booking::insert(&store, booking("d", "1", "2099-01-01", "11:00"), true).unwrap();
        assert_eq!(store.read().bookings.len(), 3);
    }

    #[test]
    fn test_insert_allows_double_booking_when_unguarded() {
        let store = Store::new();
        Booking::insert(&store, booking("a", "1", "2099-01-01", "10:00"), false).unwrap();
        Booking::insert(&store, booking("b", "1", "2099-01-01", "10:00"), false).unwrap();
        assert_eq!(store.read().bookings.len(), 2);
        assert!(!Booking::is_slot_free(&store, "1", "2099-01-01", "10:00"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&BookingStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
