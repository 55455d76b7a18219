//! Funding statistics for a project, recomputed from its pledges.
//!
//! The project's `budgetPledged` counter is kept alongside the recomputed
//! money total; `unreconciled_amount` is their difference.

use serde::Serialize;

use crate::db::models::round_cents;
use crate::db::{Pledge, PledgeType, Project};

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PledgeBreakdown {
    pub money_pledges: usize,
    pub time_pledges: usize,
    pub materials_pledges: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PledgeStats {
    pub total_money: f64,
    pub total_hours: f64,
    pub total_materials: usize,
    pub pledge_count: usize,
    pub progress_percentage: i64,
    pub budget_pledged: f64,
    pub unreconciled_amount: f64,
    pub breakdown: PledgeBreakdown,
}

impl PledgeStats {
    /// `pledges` must already be restricted to the project
    pub fn compute(project: Option<&Project>, pledges: &[Pledge]) -> Self {
        let mut stats = PledgeStats {
            pledge_count: pledges.len(),
            ..Default::default()
        };

        for pledge in pledges {
            match pledge.pledge_type {
                PledgeType::Money => {
                    stats.total_money += pledge.amount;
                    stats.breakdown.money_pledges += 1;
                }
                PledgeType::Time => {
                    stats.total_hours += pledge.hours.unwrap_or(pledge.amount);
                    stats.breakdown.time_pledges += 1;
                }
                PledgeType::Materials => {
                    stats.total_materials += 1;
                    stats.breakdown.materials_pledges += 1;
                }
            }
        }
        stats.total_money = round_cents(stats.total_money);

        if let Some(project) = project {
            if project.budget_needed > 0.0 {
                stats.progress_percentage =
                    (stats.total_money / project.budget_needed * 100.0).round() as i64;
            }
            stats.budget_pledged = project.budget_pledged;
            stats.unreconciled_amount = round_cents(project.budget_pledged - stats.total_money);
        }

        stats
    }
}
