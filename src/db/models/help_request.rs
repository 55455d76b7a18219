//! Volunteer help request models and store queries.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::info;

use super::common::{now_timestamp, present};
use crate::db::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpCategory {
    HomeRepair,
    Moving,
    Gardening,
    Shopping,
    Companionship,
    Technology,
    Translation,
    Tutoring,
    PetCare,
    Other,
}

impl HelpCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HelpCategory::HomeRepair => "home_repair",
            HelpCategory::Moving => "moving",
            HelpCategory::Gardening => "gardening",
            HelpCategory::Shopping => "shopping",
            HelpCategory::Companionship => "companionship",
            HelpCategory::Technology => "technology",
            HelpCategory::Translation => "translation",
            HelpCategory::Tutoring => "tutoring",
            HelpCategory::PetCare => "pet_care",
            HelpCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for HelpCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home_repair" => Ok(Self::HomeRepair),
            "moving" => Ok(Self::Moving),
            "gardening" => Ok(Self::Gardening),
            "shopping" => Ok(Self::Shopping),
            "companionship" => Ok(Self::Companionship),
            "technology" => Ok(Self::Technology),
            "translation" => Ok(Self::Translation),
            "tutoring" => Ok(Self::Tutoring),
            "pet_care" => Ok(Self::PetCare),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown help category: {}", s)),
        }
    }
}

/// Ordered so that `High > Medium > Low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown urgency: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpRequestStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl HelpRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HelpRequestStatus::Open => "open",
            HelpRequestStatus::Assigned => "assigned",
            HelpRequestStatus::InProgress => "in_progress",
            HelpRequestStatus::Completed => "completed",
            HelpRequestStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: String,
    pub requester_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,
    pub title: String,
    pub description: String,
    pub category: HelpCategory,
    pub urgency: Urgency,
    pub location: String,
    pub status: HelpRequestStatus,
    pub volunteer_id: Option<String>,
    pub volunteer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHelpRequestRequest {
    pub requester_id: Option<String>,
    pub requester_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub urgency: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignVolunteerRequest {
    pub volunteer_id: Option<String>,
    pub volunteer_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub urgency: Option<String>,
    pub requester_id: Option<String>,
    pub volunteer_id: Option<String>,
}

impl HelpRequestFilter {
    pub fn matches(&self, request: &HelpRequest) -> bool {
        if let Some(status) = present(&self.status) {
            if request.status.as_str() != status {
                return false;
            }
        }
        if let Some(category) = present(&self.category) {
            if request.category.as_str() != category {
                return false;
            }
        }
        if let Some(urgency) = present(&self.urgency) {
            if request.urgency.as_str() != urgency {
                return false;
            }
        }
        if let Some(requester_id) = present(&self.requester_id) {
            if request.requester_id != requester_id {
                return false;
            }
        }
        if let Some(volunteer_id) = present(&self.volunteer_id) {
            if request.volunteer_id.as_deref() != Some(volunteer_id) {
                return false;
            }
        }
        true
    }
}

impl HelpRequest {
    /// Matching requests, most urgent first, then newest first
    pub fn list(store: &Store, filter: &HelpRequestFilter) -> Vec<HelpRequest> {
        let tables = store.read();
        let mut requests: Vec<HelpRequest> = tables
            .help_requests
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        requests.sort_by_key(|r| (Reverse(r.urgency), Reverse(r.created_at.clone())));
        requests
    }

    pub fn insert(store: &Store, request: HelpRequest) -> HelpRequest {
        let mut tables = store.write();
        tables.help_requests.push(request.clone());
        info!(
            request_id = %request.id,
            urgency = request.urgency.as_str(),
            "Help request created"
        );
        request
    }

    /// Hand an open request to a volunteer
    pub fn assign(
        store: &Store,
        id: &str,
        volunteer_id: &str,
        volunteer_name: &str,
    ) -> Result<HelpRequest, StoreError> {
        let mut tables = store.write();
        let request = tables
            .help_requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("Help request", id))?;

        if request.status != HelpRequestStatus::Open {
            return Err(StoreError::InvalidState {
                entity: "Help request",
                id: id.to_string(),
                state: request.status.as_str(),
            });
        }

        let now = now_timestamp();
        request.volunteer_id = Some(volunteer_id.to_string());
        request.volunteer_name = Some(volunteer_name.to_string());
        request.status = HelpRequestStatus::Assigned;
        request.assigned_at = Some(now.clone());
        request.updated_at = now;

        info!(request_id = %id, volunteer_id = %volunteer_id, "Volunteer assigned");
        Ok(request.clone())
    }
}
