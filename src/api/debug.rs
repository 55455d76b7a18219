//! Store inspection endpoint for local development.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::db::models::now_timestamp;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TableDump<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for TableDump<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDump {
    pub projects: TableDump<crate::db::Project>,
    pub bookings: TableDump<crate::db::Booking>,
    pub pledges: TableDump<crate::db::Pledge>,
    pub help_requests: TableDump<crate::db::HelpRequest>,
    pub professionals: TableDump<crate::db::Professional>,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub stores: StoreDump,
    pub warning: String,
}

/// Every table with its row count
///
/// GET /api/debug
pub async fn store_dump(State(state): State<Arc<AppState>>) -> Json<DebugResponse> {
    let tables = state.store.snapshot();

    Json(DebugResponse {
        success: true,
        message: "In-Memory Store Debug Info".to_string(),
        timestamp: now_timestamp(),
        stores: StoreDump {
            projects: tables.projects.into(),
            bookings: tables.bookings.into(),
            pledges: tables.pledges.into(),
            help_requests: tables.help_requests.into(),
            professionals: tables.professionals.into(),
        },
        warning: "Data is held in memory and is lost when the server restarts".to_string(),
    })
}
