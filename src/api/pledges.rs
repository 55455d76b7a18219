//! Pledge endpoints and per-project funding statistics.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ApiError, ApiJson, ValidationErrorBuilder};
use super::validation::{require_fields, validate_positive};
use crate::db::models::{new_id, now_timestamp, present};
use crate::db::{CreatePledgeRequest, Pledge, PledgeFilter, PledgeStatus, PledgeType};
use crate::engine::PledgeStats;
use crate::AppState;

const DEFAULT_USER_ID: &str = "user-1";
const DEFAULT_USER_NAME: &str = "Χρήστης";

#[derive(Debug, Serialize)]
pub struct ListPledgesResponse {
    pub success: bool,
    pub pledges: Vec<Pledge>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct PledgeResponse {
    pub success: bool,
    pub pledge: Pledge,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: PledgeStats,
}

fn validate_create_request(req: &CreatePledgeRequest) -> Result<PledgeType, ApiError> {
    require_fields(&[
        ("projectId", present(&req.project_id).is_some()),
        ("amount", req.amount.is_some()),
        ("type", present(&req.pledge_type).is_some()),
    ])?;

    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_positive(req.amount.unwrap_or_default(), "amount") {
        errors.add("amount", e);
    }
    if let Some(hours) = req.hours {
        if let Err(e) = validate_positive(hours, "hours") {
            errors.add("hours", e);
        }
    }
    let pledge_type = match present(&req.pledge_type).unwrap_or_default().parse::<PledgeType>() {
        Ok(pledge_type) => Some(pledge_type),
        Err(e) => {
            errors.add("type", e);
            None
        }
    };
    errors.finish()?;

    pledge_type.ok_or_else(|| ApiError::validation_field("type", "type is required"))
}

/// GET /api/pledges?projectId=
pub async fn list_pledges(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PledgeFilter>,
) -> Json<ListPledgesResponse> {
    let pledges = Pledge::list(&state.store, &filter);
    let total = pledges.len();
    Json(ListPledgesResponse {
        success: true,
        pledges,
        total,
    })
}

/// Record a pledge and update the project's counters
///
/// POST /api/pledges
pub async fn create_pledge(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePledgeRequest>,
) -> Result<(StatusCode, Json<PledgeResponse>), ApiError> {
    let pledge_type = validate_create_request(&req)?;

    let pledge = Pledge {
        id: new_id("pledge"),
        project_id: present(&req.project_id).unwrap_or_default().to_string(),
        user_id: present(&req.user_id).unwrap_or(DEFAULT_USER_ID).to_string(),
        user_name: present(&req.user_name).unwrap_or(DEFAULT_USER_NAME).to_string(),
        amount: req.amount.unwrap_or_default(),
        pledge_type,
        hours: req.hours,
        materials: present(&req.materials).map(str::to_string),
        message: req.message.unwrap_or_default(),
        status: PledgeStatus::Pending,
        created_at: now_timestamp(),
    };

    let (pledge, _project) = Pledge::insert(&state.store, pledge);

    Ok((
        StatusCode::CREATED,
        Json(PledgeResponse {
            success: true,
            pledge,
        }),
    ))
}

/// Funding totals recomputed from a project's pledges
///
/// GET /api/pledges/stats?projectId=
pub async fn pledge_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let project_id =
        present(&query.project_id).ok_or_else(|| ApiError::bad_request("Project ID required"))?;

    let (project, pledges) = Pledge::for_project(&state.store, project_id);
    let stats = PledgeStats::compute(project.as_ref(), &pledges);

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get, post_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_reports_missing_fields() {
        let app = test_app();
        let (status, body) = post_json(&app, "/api/pledges", json!({ "amount": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required fields: projectId, amount, type"
        );
    }

    #[tokio::test]
    async fn test_create_rejects_bad_amount_and_type() {
        let app = test_app();
        let (status, body) = post_json(
            &app,
            "/api/pledges",
            json!({ "projectId": "1", "amount": -5, "type": "favours" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["amount"].is_array());
        assert!(body["details"]["type"].is_array());
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let app = test_app();
        let (status, body) = post_json(
            &app,
            "/api/pledges",
            json!({ "projectId": "1", "amount": "250", "type": "money" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["pledge"]["userId"], "user-1");
        assert_eq!(body["pledge"]["userName"], "Χρήστης");
        assert_eq!(body["pledge"]["amount"], 250.0);
        assert_eq!(body["pledge"]["type"], "money");
        assert_eq!(body["pledge"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_counters_and_recomputed_stats() {
        let app = test_app();
        for body in [
            json!({ "projectId": "1", "amount": 100, "type": "money" }),
            json!({ "projectId": "1", "amount": 60, "type": "money" }),
            json!({ "projectId": "1", "amount": 1, "type": "time", "hours": 5 }),
            json!({ "projectId": "1", "amount": 1, "type": "materials", "materials": "Χρώματα" }),
        ] {
            let (status, _) = post_json(&app, "/api/pledges", body).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = get(&app, "/api/projects/1").await;
        assert_eq!(body["project"]["budgetPledged"], 2500.0);
        assert_eq!(body["project"]["pledgeCount"], 27);

        let (status, body) = get(&app, "/api/pledges/stats?projectId=1").await;
        assert_eq!(status, StatusCode::OK);
        let stats = &body["stats"];
        assert_eq!(stats["total_money"], 160.0);
        assert_eq!(stats["total_hours"], 5.0);
        assert_eq!(stats["total_materials"], 1);
        assert_eq!(stats["pledge_count"], 4);
        assert_eq!(stats["progress_percentage"], 3);
        assert_eq!(stats["budget_pledged"], 2500.0);
        assert_eq!(stats["unreconciled_amount"], 2340.0);
        assert_eq!(stats["breakdown"]["money_pledges"], 2);
        assert_eq!(stats["breakdown"]["time_pledges"], 1);
        assert_eq!(stats["breakdown"]["materials_pledges"], 1);
    }

    #[tokio::test]
    async fn test_pledge_for_unknown_project_is_stored() {
        let app = test_app();
        let (status, _) = post_json(
            &app,
            "/api/pledges",
            json!({ "projectId": "ghost", "amount": 10, "type": "money" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = get(&app, "/api/pledges?projectId=ghost").await;
        assert_eq!(body["total"], 1);

        let (_, body) = get(&app, "/api/pledges/stats?projectId=ghost").await;
        assert_eq!(body["stats"]["total_money"], 10.0);
        assert_eq!(body["stats"]["progress_percentage"], 0);
    }

    #[tokio::test]
    async fn test_stats_requires_project_id() {
        let app = test_app();
        let (status, body) = get(&app, "/api/pledges/stats").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Project ID required");
    }
}
