//! Booking endpoints: listing and subsidized booking creation.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::error::{ApiError, ApiJson, ValidationErrorBuilder};
use super::validation::{
    require_fields, resolve_duration, validate_date, validate_duration, validate_future,
    validate_time,
};
use crate::db::models::{new_id, now_timestamp, present};
use crate::db::{Booking, BookingFilter, BookingStatus, CreateBookingRequest, Professional};
use crate::engine::{PriceQuote, RateCard};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ListBookingsResponse {
    pub success: bool,
    pub bookings: Vec<Booking>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
    pub message: String,
}

/// Checks the request and returns the booked duration in hours
fn validate_create_request(req: &CreateBookingRequest, default_hours: u32) -> Result<u32, ApiError> {
    require_fields(&[
        ("citizenId", present(&req.citizen_id).is_some()),
        ("professionalId", present(&req.professional_id).is_some()),
        ("serviceType", present(&req.service_type).is_some()),
        ("scheduledDate", present(&req.scheduled_date).is_some()),
        ("scheduledTime", present(&req.scheduled_time).is_some()),
        ("address", present(&req.address).is_some()),
        ("description", present(&req.description).is_some()),
    ])?;

    let date = present(&req.scheduled_date).unwrap_or_default();
    let time = present(&req.scheduled_time).unwrap_or_default();

    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_date(date) {
        errors.add("scheduledDate", e);
    }
    if let Err(e) = validate_time(time) {
        errors.add("scheduledTime", e);
    }
    let duration_hours = match resolve_duration(req.duration_hours, default_hours) {
        Ok(hours) => hours,
        Err(e) => {
            errors.add("durationHours", e);
            default_hours
        }
    };
    if let Err(e) = validate_duration(duration_hours) {
        errors.add("durationHours", e);
    }
    errors.finish()?;

    let now = chrono::Local::now().naive_local();
    validate_future(date, time, now).map_err(|e| ApiError::validation_field("scheduledDate", e))?;
    Ok(duration_hours)
}

/// List bookings, latest scheduled date first
///
/// GET /api/bookings?citizenId=&professionalId=&status=
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> Json<ListBookingsResponse> {
    let bookings = Booking::list(&state.store, &filter);
    let total = bookings.len();
    Json(ListBookingsResponse {
        success: true,
        bookings,
        total,
    })
}

/// Create a pending booking priced from the professional's hourly rate
///
/// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let duration_hours =
        validate_create_request(&req, state.config.bookings.default_duration_hours)?;

    let professional_id = present(&req.professional_id).unwrap_or_default().to_string();
    let professional = Professional::find(&state.store, &professional_id);
    let rate = RateCard::resolve(professional.as_ref(), &state.config.pricing);
    let quote = PriceQuote::new(rate.hourly_rate, duration_hours, state.config.pricing.subsidy_rate);

    let now = now_timestamp();
    let booking = Booking {
        id: new_id("booking"),
        citizen_id: present(&req.citizen_id).unwrap_or_default().to_string(),
        professional_id,
        professional_name: rate.name,
        profession: rate.profession,
        service_type: present(&req.service_type).unwrap_or_default().to_string(),
        scheduled_date: present(&req.scheduled_date).unwrap_or_default().to_string(),
        scheduled_time: present(&req.scheduled_time).unwrap_or_default().to_string(),
        duration_hours,
        address: present(&req.address).unwrap_or_default().to_string(),
        description: present(&req.description).unwrap_or_default().to_string(),
        status: BookingStatus::Pending,
        base_price: quote.base_price,
        municipality_subsidy: quote.municipality_subsidy,
        citizen_pays: quote.citizen_pays,
        created_at: now.clone(),
        updated_at: now,
    };

    let booking = Booking::insert(
        &state.store,
        booking,
        state.config.bookings.reject_double_booking,
    )?;

    info!(
        booking_id = %booking.id,
        professional_id = %booking.professional_id,
        date = %booking.scheduled_date,
        time = %booking.scheduled_time,
        citizen_pays = booking.citizen_pays,
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            booking,
            message: "Booking created successfully. Waiting for professional confirmation."
                .to_string(),
        }),
    ))
}
