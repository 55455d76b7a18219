//! Community project models and store queries.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::info;

use super::common::{deserialize_lenient_f64, today, Location, LocationInput};
use crate::db::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Infrastructure,
    Parks,
    Community,
    Environment,
    Culture,
    Safety,
    Other,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Infrastructure => "infrastructure",
            ProjectCategory::Parks => "parks",
            ProjectCategory::Community => "community",
            ProjectCategory::Environment => "environment",
            ProjectCategory::Culture => "culture",
            ProjectCategory::Safety => "safety",
            ProjectCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "infrastructure" => Ok(Self::Infrastructure),
            "parks" => Ok(Self::Parks),
            "community" => Ok(Self::Community),
            "environment" => Ok(Self::Environment),
            "culture" => Ok(Self::Culture),
            "safety" => Ok(Self::Safety),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown project category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    PendingApproval,
    Approved,
    Active,
    InProgress,
    Completed,
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::PendingApproval => "pending_approval",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Active => "active",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "active" => Ok(Self::Active),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// A citizen-proposed community project seeking pledges
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub budget_needed: f64,
    /// Running total of money pledges, maintained by pledge creation
    pub budget_pledged: f64,
    pub pledge_count: u32,
    pub status: ProjectStatus,
    pub creator_id: String,
    pub creator_name: String,
    pub location: Location,
    /// `YYYY-MM-DD`
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub budget_needed: Option<f64>,
    pub creator_id: Option<String>,
    pub creator_name: Option<String>,
    #[serde(default)]
    pub location: Option<LocationInput>,
}

/// Partial update; pledge counters are not writable here
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub budget_needed: Option<f64>,
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<LocationInput>,
}

/// Validated form of [`UpdateProjectRequest`]
#[derive(Debug, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    pub budget_needed: Option<f64>,
    pub status: Option<ProjectStatus>,
    pub location: Option<LocationInput>,
}

impl ProjectPatch {
    fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(budget_needed) = self.budget_needed {
            project.budget_needed = budget_needed;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(location) = self.location {
            project.location = location.merge_into(project.location.clone());
        }
        project.updated_at = today();
    }
}

/// Query parameters for listing projects; `all` disables a filter
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ProjectFilter {
    fn wanted(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty() && *v != "all")
    }

    pub fn matches(&self, project: &Project) -> bool {
        if let Some(category) = Self::wanted(&self.category) {
            if project.category.as_str() != category {
                return false;
            }
        }
        if let Some(status) = Self::wanted(&self.status) {
            if project.status.as_str() != status {
                return false;
            }
        }
        true
    }
}

impl Project {
    /// Projects matching the filter, newest first
    pub fn list(store: &Store, filter: &ProjectFilter) -> Vec<Project> {
        let tables = store.read();
        let mut projects: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        projects.sort_by_key(|p| Reverse(p.created_at.clone()));
        projects
    }

    pub fn get(store: &Store, id: &str) -> Result<Project, StoreError> {
        store
            .read()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Project", id))
    }

    pub fn insert(store: &Store, project: Project) -> Project {
        let mut tables = store.write();
        tables.projects.push(project.clone());
        info!(project_id = %project.id, title = %project.title, "Project created");
        project
    }

    pub fn update(store: &Store, id: &str, patch: ProjectPatch) -> Result<Project, StoreError> {
        let mut tables = store.write();
        let project = tables
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Project", id))?;

        patch.apply(project);
        info!(project_id = %project.id, title = %project.title, "Project updated");
        Ok(project.clone())
    }

    /// Remove a project. Its pledges stay in the store.
    pub fn delete(store: &Store, id: &str) -> Result<Project, StoreError> {
        let mut tables = store.write();
        let index = tables
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Project", id))?;

        let removed = tables.projects.remove(index);
        info!(
            project_id = %removed.id,
            remaining = tables.projects.len(),
            "Project deleted"
        );
        Ok(removed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn project(id: &str, created_at: &str, budget_needed: f64) -> Project {
        Project {
            id: id.to_string(),
            title: "Ανακαίνιση Παιδικής Χαράς".to_string(),
            description: "Η παιδική χαρά χρειάζεται επισκευή των παιχνιδιών".to_string(),
            category: ProjectCategory::Parks,
            budget_needed,
            budget_pledged: 0.0,
            pledge_count: 0,
            status: ProjectStatus::Active,
            creator_id: "user-1".to_string(),
            creator_name: "Χρήστης".to_string(),
            location: Location::default(),
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_filter_all_means_no_filter() {
        let p = project("1", "2025-01-10", 5000.0);
        let filter = ProjectFilter {
            category: Some("all".to_string()),
            status: Some("all".to_string()),
        };
        assert!(filter.matches(&p));

        let filter = ProjectFilter {
            category: Some("environment".to_string()),
            status: None,
        };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let store = Store::new();
        Project::insert(&store, project("1", "2025-01-10", 5000.0));

        let patch = ProjectPatch {
            budget_needed: Some(6000.0),
            status: Some(ProjectStatus::InProgress),
            ..Default::default()
        };
        let updated = Project::update(&store, "1", patch).unwrap();

        assert_eq!(updated.budget_needed, 6000.0);
        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.title, "Ανακαίνιση Παιδικής Χαράς");
        assert_eq!(updated.updated_at, today());
    }

    #[test]
    fn test_delete_unknown_project() {
        let store = Store::new();
        let err = Project::delete(&store, "missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_list_newest_first() {
        let store = Store::new();
        Project::insert(&store, project("old", "2025-01-08", 1.0));
        Project::insert(&store, project("new", "2025-01-10", 1.0));

        let projects = Project::list(&store, &ProjectFilter::default());
        assert_eq!(projects[0].id, "new");
        assert_eq!(projects[1].id, "old");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Parks".parse::<ProjectCategory>(), Ok(ProjectCategory::Parks));
        assert!("playgrounds".parse::<ProjectCategory>().is_err());
    }
}
