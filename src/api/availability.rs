//! Slot availability endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ApiError, ApiJson};
use super::validation::require_fields;
use crate::db::models::present;
use crate::db::{Booking, BookingFilter};
use crate::engine::{availability, Availability};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub professional_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    #[serde(flatten)]
    pub availability: Availability,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSlotRequest {
    pub professional_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSlotResponse {
    pub success: bool,
    pub is_available: bool,
    pub professional_id: String,
    pub date: String,
    pub time: String,
    pub message: String,
}

/// Free and booked slots of a professional for one day
///
/// GET /api/availability?professionalId=&date=
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let (professional_id, date) = match (present(&query.professional_id), present(&query.date)) {
        (Some(p), Some(d)) => (p, d),
        _ => return Err(ApiError::bad_request("Missing professionalId or date")),
    };

    let bookings = Booking::list(&state.store, &BookingFilter::for_professional(professional_id));
    let availability = availability::compute(professional_id, date, &bookings);

    Ok(Json(AvailabilityResponse {
        success: true,
        availability,
    }))
}

/// Whether a single slot is currently free. Advisory only: nothing is reserved.
///
/// POST /api/availability/check
pub async fn check_slot(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CheckSlotRequest>,
) -> Result<Json<CheckSlotResponse>, ApiError> {
    require_fields(&[
        ("professionalId", present(&req.professional_id).is_some()),
        ("date", present(&req.date).is_some()),
        ("time", present(&req.time).is_some()),
    ])?;

    let professional_id = present(&req.professional_id).unwrap_or_default();
    let date = present(&req.date).unwrap_or_default();
    let time = present(&req.time).unwrap_or_default();

    let is_available = Booking::is_slot_free(&state.store, professional_id, date, time);
    let message = if is_available {
        "Time slot is available"
    } else {
        "Time slot is already booked"
    };

    Ok(Json(CheckSlotResponse {
        success: true,
        is_available,
        professional_id: professional_id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        message: message.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get, post_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_query_param_is_rejected() {
        let app = test_app();
        let (status, body) = get(&app, "/api/availability?professionalId=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing professionalId or date");
    }

    #[tokio::test]
    async fn test_seeded_booking_blocks_its_slot() {
        let app = test_app();
        let (status, body) = get(&app, "/api/availability?professionalId=1&date=2025-11-20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["totalSlots"], 10);
        assert_eq!(body["bookedSlots"], json!(["10:00"]));
        assert_eq!(body["availableCount"], 9);
    }

    #[tokio::test]
    async fn test_check_reports_missing_fields() {
        let app = test_app();
        let (status, body) =
            post_json(&app, "/api/availability/check", json!({ "professionalId": "1" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: date, time");
    }

    #[tokio::test]
    async fn test_check_free_and_taken_slots() {
        let app = test_app();
        let (_, body) = post_json(
            &app,
            "/api/availability/check",
            json!({ "professionalId": "1", "date": "2025-11-20", "time": "10:00" }),
        )
        .await;
        assert_eq!(body["isAvailable"], false);
        assert_eq!(body["message"], "Time slot is already booked");

        let (_, body) = post_json(
            &app,
            "/api/availability/check",
            json!({ "professionalId": "1", "date": "2025-11-20", "time": "11:00" }),
        )
        .await;
        assert_eq!(body["isAvailable"], true);
        assert_eq!(body["message"], "Time slot is available");
    }
}
