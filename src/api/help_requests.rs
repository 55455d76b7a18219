//! Neighbourhood help requests and volunteer assignment.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::error::{ApiError, ApiJson, ValidationErrorBuilder};
use super::validation::require_fields;
use crate::db::models::{new_id, now_timestamp, present};
use crate::db::{
    AssignVolunteerRequest, CreateHelpRequestRequest, HelpCategory, HelpRequest,
    HelpRequestFilter, HelpRequestStatus, Urgency,
};
use crate::AppState;

const DEFAULT_VOLUNTEER_NAME: &str = "Εθελοντής";

#[derive(Debug, Serialize)]
pub struct ListHelpRequestsResponse {
    pub success: bool,
    pub requests: Vec<HelpRequest>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct HelpRequestResponse {
    pub success: bool,
    pub request: HelpRequest,
    pub message: String,
}

fn validate_create_request(
    req: &CreateHelpRequestRequest,
) -> Result<(HelpCategory, Urgency), ApiError> {
    require_fields(&[
        ("requesterId", present(&req.requester_id).is_some()),
        ("title", present(&req.title).is_some()),
        ("description", present(&req.description).is_some()),
        ("category", present(&req.category).is_some()),
        ("location", present(&req.location).is_some()),
    ])?;

    let mut errors = ValidationErrorBuilder::new();
    let category = match present(&req.category).unwrap_or_default().parse::<HelpCategory>() {
        Ok(category) => Some(category),
        Err(e) => {
            errors.add("category", e);
            None
        }
    };
    let urgency = match present(&req.urgency).map(str::parse::<Urgency>) {
        None => Some(Urgency::default()),
        Some(Ok(urgency)) => Some(urgency),
        Some(Err(e)) => {
            errors.add("urgency", e);
            None
        }
    };
    errors.finish()?;

    match (category, urgency) {
        (Some(category), Some(urgency)) => Ok((category, urgency)),
        _ => Err(ApiError::bad_request("Invalid category or urgency")),
    }
}

/// Requests, most urgent first
///
/// GET /api/help-requests?status=&category=&urgency=&requesterId=&volunteerId=
pub async fn list_help_requests(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<HelpRequestFilter>,
) -> Json<ListHelpRequestsResponse> {
    let requests = HelpRequest::list(&state.store, &filter);
    let total = requests.len();
    Json(ListHelpRequestsResponse {
        success: true,
        requests,
        total,
    })
}

/// POST /api/help-requests
pub async fn create_help_request(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateHelpRequestRequest>,
) -> Result<(StatusCode, Json<HelpRequestResponse>), ApiError> {
    let (category, urgency) = validate_create_request(&req)?;

    let now = now_timestamp();
    let request = HelpRequest {
        id: new_id("help"),
        requester_id: present(&req.requester_id).unwrap_or_default().to_string(),
        requester_name: present(&req.requester_name).map(str::to_string),
        title: present(&req.title).unwrap_or_default().to_string(),
        description: present(&req.description).unwrap_or_default().to_string(),
        category,
        urgency,
        location: present(&req.location).unwrap_or_default().to_string(),
        status: HelpRequestStatus::Open,
        volunteer_id: None,
        volunteer_name: None,
        assigned_at: None,
        images: req.images,
        created_at: now.clone(),
        updated_at: now,
    };

    let request = HelpRequest::insert(&state.store, request);

    Ok((
        StatusCode::CREATED,
        Json(HelpRequestResponse {
            success: true,
            request,
            message: "Help request created successfully. Volunteers will be notified.".to_string(),
        }),
    ))
}

/// Assign a volunteer to an open request
///
/// PUT /api/help-requests/:id/assign
pub async fn assign_volunteer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AssignVolunteerRequest>,
) -> Result<Json<HelpRequestResponse>, ApiError> {
    let volunteer_id = present(&req.volunteer_id)
        .ok_or_else(|| ApiError::validation_field("volunteerId", "volunteerId is required"))?;
    let volunteer_name = present(&req.volunteer_name).unwrap_or(DEFAULT_VOLUNTEER_NAME);

    let request = HelpRequest::assign(&state.store, &id, volunteer_id, volunteer_name)?;

    Ok(Json(HelpRequestResponse {
        success: true,
        request,
        message: "Volunteer assigned successfully. Requester will be notified.".to_string(),
    }))
}
