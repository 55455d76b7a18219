//! Pledge models and store queries.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::common::{deserialize_lenient_f64, present};
use super::project::Project;
use crate::db::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PledgeType {
    Money,
    Time,
    Materials,
}

impl PledgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PledgeType::Money => "money",
            PledgeType::Time => "time",
            PledgeType::Materials => "materials",
        }
    }
}

impl std::str::FromStr for PledgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "money" => Ok(Self::Money),
            "time" => Ok(Self::Time),
            "materials" => Ok(Self::Materials),
            _ => Err(format!("Unknown pledge type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PledgeStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// A contribution of money, time or materials toward a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pledge {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub user_name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub pledge_type: PledgeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<String>,
    pub message: String,
    pub status: PledgeStatus,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePledgeRequest {
    pub project_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub pledge_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub hours: Option<f64>,
    pub materials: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeFilter {
    pub project_id: Option<String>,
}

impl Pledge {
    pub fn list(store: &Store, filter: &PledgeFilter) -> Vec<Pledge> {
        let tables = store.read();
        tables
            .pledges
            .iter()
            .filter(|p| match present(&filter.project_id) {
                Some(project_id) => p.project_id == project_id,
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Store a pledge and bump the parent project's counters in one write.
    ///
    /// Every pledge increments `pledgeCount`; only money pledges add to
    /// `budgetPledged`. Returns the updated project, if it exists.
    pub fn insert(store: &Store, pledge: Pledge) -> (Pledge, Option<Project>) {
        let mut tables = store.write();
        tables.pledges.push(pledge.clone());

        let project = tables
            .projects
            .iter_mut()
            .find(|p| p.id == pledge.project_id)
            .map(|project| {
                project.pledge_count += 1;
                if pledge.pledge_type == PledgeType::Money {
                    project.budget_pledged += pledge.amount;
                }
                project.clone()
            });

        match project {
            Some(ref p) => info!(
                pledge_id = %pledge.id,
                project_id = %p.id,
                pledge_type = pledge.pledge_type.as_str(),
                budget_pledged = p.budget_pledged,
                pledge_count = p.pledge_count,
                "Pledge recorded"
            ),
            None => warn!(
                pledge_id = %pledge.id,
                project_id = %pledge.project_id,
                "Pledge recorded for unknown project, no counters updated"
            ),
        }

        (pledge, project)
    }

    /// The project (if any) together with every pledge that references it
    pub fn for_project(store: &Store, project_id: &str) -> (Option<Project>, Vec<Pledge>) {
        let tables = store.read();
        let project = tables.projects.iter().find(|p| p.id == project_id).cloned();
        let pledges = tables
            .pledges
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect();
        (project, pledges)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::models::project::tests::project;

    pub(crate) fn pledge(id: &str, project_id: &str, pledge_type: PledgeType, amount: f64) -> Pledge {
        Pledge {
            id: id.to_string(),
            project_id: project_id.to_string(),
            user_id: "user-1".to_string(),
            user_name: "Χρήστης".to_string(),
            amount,
            pledge_type,
            hours: None,
            materials: None,
            message: String::new(),
            status: PledgeStatus::Pending,
            created_at: "2025-11-14T09:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_money_pledge_updates_both_counters() {
        let store = Store::new();
        Project::insert(&store, project("p1", "2025-01-10", 1000.0));

        let (_, updated) = Pledge::insert(&store, pledge("a", "p1", PledgeType::Money, 250.0));
        let updated = updated.unwrap();
        assert_eq!(updated.budget_pledged, 250.0);
        assert_eq!(updated.pledge_count, 1);

        let (_, updated) = Pledge::insert(&store, pledge("b", "p1", PledgeType::Time, 4.0));
        let updated = updated.unwrap();
        assert_eq!(updated.budget_pledged, 250.0);
        assert_eq!(updated.pledge_count, 2);
    }

    #[test]
    fn test_pledge_for_unknown_project_is_kept() {
        let store = Store::new();
        let (_, project) = Pledge::insert(&store, pledge("a", "ghost", PledgeType::Money, 10.0));
        assert!(project.is_none());
        assert_eq!(Pledge::list(&store, &PledgeFilter::default()).len(), 1);
    }

    #[test]
    fn test_blank_project_filter_lists_everything() {
        let store = Store::new();
        Pledge::insert(&store, pledge("a", "p1", PledgeType::Money, 10.0));
        Pledge::insert(&store, pledge("b", "p2", PledgeType::Time, 2.0));

        let blank = PledgeFilter {
            project_id: Some(String::new()),
        };
        assert_eq!(Pledge::list(&store, &blank).len(), 2);

        let one = PledgeFilter {
            project_id: Some("p2".to_string()),
        };
        assert_eq!(Pledge::list(&store, &one).len(), 1);
    }

    #[test]
    fn test_concurrent_pledges_keep_counter_consistent() {
        use std::sync::Arc;

        let store = Arc::new(Store::new());
        Project::insert(&store, project("p1", "2025-01-10", 100_000.0));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        let id = format!("{}-{}", i, j);
                        Pledge::insert(&store, pledge(&id, "p1", PledgeType::Money, 2.0));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (project, pledges) = Pledge::for_project(&store, "p1");
        let project = project.unwrap();
        let total: f64 = pledges.iter().map(|p| p.amount).sum();
        assert_eq!(pledges.len(), 400);
        assert_eq!(project.pledge_count, 400);
        assert_eq!(project.budget_pledged, total);
    }
}
