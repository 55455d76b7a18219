//! Professional catalog: browsing and self-registration.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::error::{ApiError, ApiJson, ValidationErrorBuilder};
use super::validation::{require_fields, validate_email, validate_positive};
use crate::db::models::{new_id, now_timestamp, present, round_cents};
use crate::db::{
    ProfessionType, Professional, ProfessionalFilter, RegisterProfessionalRequest,
};
use crate::AppState;

/// Rating every newly registered professional starts with
const INITIAL_RATING: f64 = 5.0;

#[derive(Debug, Serialize)]
pub struct ListProfessionalsResponse {
    pub success: bool,
    pub professionals: Vec<Professional>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ProfessionalResponse {
    pub success: bool,
    pub professional: Professional,
    pub message: String,
}

fn validate_register_request(req: &RegisterProfessionalRequest) -> Result<ProfessionType, ApiError> {
    require_fields(&[
        ("userId", present(&req.user_id).is_some()),
        ("profession", present(&req.profession).is_some()),
        ("name", present(&req.name).is_some()),
        ("email", present(&req.email).is_some()),
        ("phone", present(&req.phone).is_some()),
        ("hourlyRate", req.hourly_rate.is_some()),
    ])?;

    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_email(present(&req.email).unwrap_or_default()) {
        errors.add("email", e);
    }
    if let Err(e) = validate_positive(req.hourly_rate.unwrap_or_default(), "hourlyRate") {
        errors.add("hourlyRate", e);
    }
    if let Some(rate) = req.subsidized_rate {
        if let Err(e) = validate_positive(rate, "subsidizedRate") {
            errors.add("subsidizedRate", e);
        }
    }
    let profession = match present(&req.profession).unwrap_or_default().parse::<ProfessionType>() {
        Ok(profession) => Some(profession),
        Err(e) => {
            errors.add("profession", e);
            None
        }
    };
    errors.finish()?;

    profession.ok_or_else(|| ApiError::validation_field("profession", "profession is required"))
}

/// GET /api/professionals?profession=&serviceArea=&approved=
pub async fn list_professionals(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProfessionalFilter>,
) -> Json<ListProfessionalsResponse> {
    let professionals = Professional::list(&state.store, &filter);
    let total = professionals.len();
    Json(ListProfessionalsResponse {
        success: true,
        professionals,
        total,
    })
}

/// Register a professional. New entries await municipality approval but are
/// bookable and priced from their own rate right away.
///
/// POST /api/professionals
pub async fn register_professional(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterProfessionalRequest>,
) -> Result<(StatusCode, Json<ProfessionalResponse>), ApiError> {
    let profession = validate_register_request(&req)?;

    let hourly_rate = req.hourly_rate.unwrap_or_default();
    let subsidized_rate = req
        .subsidized_rate
        .unwrap_or_else(|| round_cents(hourly_rate * (1.0 - state.config.pricing.subsidy_rate)));

    let professional = Professional {
        id: new_id("prof"),
        user_id: present(&req.user_id).unwrap_or_default().to_string(),
        profession,
        name: present(&req.name).unwrap_or_default().to_string(),
        email: present(&req.email).unwrap_or_default().to_string(),
        phone: present(&req.phone).unwrap_or_default().to_string(),
        license_number: present(&req.license_number).map(str::to_string),
        years_experience: req.years_experience.unwrap_or_default(),
        hourly_rate,
        municipality_subsidized: req.municipality_subsidized.unwrap_or(true),
        subsidized_rate,
        rating: INITIAL_RATING,
        total_reviews: 0,
        availability: req.availability.unwrap_or_default(),
        service_areas: req.service_areas,
        specializations: req.specializations,
        approved_by_municipality: false,
        bio: present(&req.bio).map(str::to_string),
        avatar: None,
        created_at: Some(now_timestamp()),
    };

    let professional = Professional::insert(&state.store, professional);

    Ok((
        StatusCode::CREATED,
        Json(ProfessionalResponse {
            success: true,
            professional,
            message: "Professional registered successfully. Pending municipality approval."
                .to_string(),
        }),
    ))
}
