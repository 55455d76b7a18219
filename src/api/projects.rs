//! Community project endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::error::{ApiError, ApiJson, ValidationErrorBuilder};
use super::validation::{require_fields, validate_description, validate_positive};
use crate::db::models::{new_id, present, today};
use crate::db::{
    CreateProjectRequest, Location, Project, ProjectCategory, ProjectFilter, ProjectPatch,
    ProjectStatus, UpdateProjectRequest,
};
use crate::AppState;

const DEFAULT_CREATOR_ID: &str = "user-1";
const DEFAULT_CREATOR_NAME: &str = "Χρήστης";

#[derive(Debug, Serialize)]
pub struct ListProjectsResponse {
    pub success: bool,
    pub projects: Vec<Project>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    pub success: bool,
    pub message: String,
}

fn validate_create_request(req: &CreateProjectRequest) -> Result<ProjectCategory, ApiError> {
    require_fields(&[
        ("title", present(&req.title).is_some()),
        ("description", present(&req.description).is_some()),
        ("category", present(&req.category).is_some()),
        ("budgetNeeded", req.budget_needed.is_some()),
    ])?;

    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_description(present(&req.description).unwrap_or_default()) {
        errors.add("description", e);
    }
    if let Err(e) = validate_positive(req.budget_needed.unwrap_or_default(), "budgetNeeded") {
        errors.add("budgetNeeded", e);
    }
    let category = match present(&req.category).unwrap_or_default().parse::<ProjectCategory>() {
        Ok(category) => Some(category),
        Err(e) => {
            errors.add("category", e);
            None
        }
    };
    errors.finish()?;

    category.ok_or_else(|| ApiError::validation_field("category", "category is required"))
}

/// Validate an update and turn it into a patch of typed fields
fn validate_update_request(req: UpdateProjectRequest) -> Result<ProjectPatch, ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref title) = req.title {
        if title.trim().is_empty() {
            errors.add("title", "title cannot be empty");
        }
    }
    if let Some(ref description) = req.description {
        if let Err(e) = validate_description(description) {
            errors.add("description", e);
        }
    }
    if let Some(budget_needed) = req.budget_needed {
        if let Err(e) = validate_positive(budget_needed, "budgetNeeded") {
            errors.add("budgetNeeded", e);
        }
    }

    let category = match req.category.as_deref().map(str::parse::<ProjectCategory>) {
        Some(Ok(category)) => Some(category),
        Some(Err(e)) => {
            errors.add("category", e);
            None
        }
        None => None,
    };
    let status = match req.status.as_deref().map(str::parse::<ProjectStatus>) {
        Some(Ok(status)) => Some(status),
        Some(Err(e)) => {
            errors.add("status", e);
            None
        }
        None => None,
    };
    errors.finish()?;

    Ok(ProjectPatch {
        title: req.title.map(|t| t.trim().to_string()),
        description: req.description.map(|d| d.trim().to_string()),
        category,
        budget_needed: req.budget_needed,
        status,
        location: req.location,
    })
}

/// List projects, newest first
///
/// GET /api/projects?category=&status=
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProjectFilter>,
) -> Json<ListProjectsResponse> {
    let projects = Project::list(&state.store, &filter);
    let total = projects.len();
    Json(ListProjectsResponse {
        success: true,
        projects,
        total,
    })
}

/// Propose a new community project
///
/// POST /api/projects
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let category = validate_create_request(&req)?;

    let date = today();
    let project = Project {
        id: new_id("project"),
        title: present(&req.title).unwrap_or_default().to_string(),
        description: present(&req.description).unwrap_or_default().to_string(),
        category,
        budget_needed: req.budget_needed.unwrap_or_default(),
        budget_pledged: 0.0,
        pledge_count: 0,
        status: ProjectStatus::Active,
        creator_id: present(&req.creator_id)
            .unwrap_or(DEFAULT_CREATOR_ID)
            .to_string(),
        creator_name: present(&req.creator_name)
            .unwrap_or(DEFAULT_CREATOR_NAME)
            .to_string(),
        location: req
            .location
            .map(|l| l.into_location())
            .unwrap_or_else(Location::default),
        created_at: date.clone(),
        updated_at: date,
    };

    let project = Project::insert(&state.store, project);

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            success: true,
            project,
        }),
    ))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = Project::get(&state.store, &id)?;
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// Partial update. Pledge counters cannot be changed here.
///
/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let patch = validate_update_request(req)?;
    let project = Project::update(&state.store, &id, patch)?;
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteProjectResponse>, ApiError> {
    let removed = Project::delete(&state.store, &id)?;
    info!(project_id = %removed.id, "Pledges of the deleted project are kept");

    Ok(Json(DeleteProjectResponse {
        success: true,
        message: "Project deleted successfully".to_string(),
    }))
}
