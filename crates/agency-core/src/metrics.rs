//! Reporting aggregates over analytics entries, projects, and leads.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::store::Store;
use crate::types::{AnalyticsType, LeadStatus, ProjectStatus};

#[derive(Debug, Clone, Serialize)]
pub struct RevenueMetrics {
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectMetrics {
    pub total: usize,
    pub completed: usize,
    pub status_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadMetrics {
    pub total: usize,
    pub converted: usize,
    /// Percentage of leads marked won; 0 when there are no leads.
    pub conversion_rate: f64,
    pub status_distribution: BTreeMap<String, usize>,
}

/// Midnight on the first day of `now`'s calendar month.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    match first.and_hms_opt(0, 0, 0) {
        Some(t) => Utc.from_utc_datetime(&t),
        None => now,
    }
}

impl Store {
    pub fn revenue_metrics(&self) -> Result<RevenueMetrics> {
        self.revenue_metrics_at(Utc::now())
    }

    /// `now` is injectable so the month boundary is testable.
    pub fn revenue_metrics_at(&self, now: DateTime<Utc>) -> Result<RevenueMetrics> {
        let entries = self.analytics_by_type(AnalyticsType::RevenueGenerated)?;
        let total_revenue: f64 = entries.iter().map(|e| e.value).sum();
        let start = month_start(now);
        let monthly_revenue: f64 = entries
            .iter()
            .filter(|e| e.date >= start)
            .map(|e| e.value)
            .sum();
        Ok(RevenueMetrics {
            total_revenue,
            monthly_revenue,
            entries: entries.len(),
        })
    }

    pub fn project_metrics(&self) -> Result<ProjectMetrics> {
        let projects = self.list_projects()?;
        let completed = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count();
        let mut status_distribution = BTreeMap::new();
        for project in &projects {
            *status_distribution
                .entry(project.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        Ok(ProjectMetrics {
            total: projects.len(),
            completed,
            status_distribution,
        })
    }

    pub fn lead_metrics(&self) -> Result<LeadMetrics> {
        let leads = self.list_leads()?;
        let converted = leads
            .iter()
            .filter(|l| l.status == LeadStatus::Won)
            .count();
        let conversion_rate = if leads.is_empty() {
            0.0
        } else {
            converted as f64 / leads.len() as f64 * 100.0
        };
        let mut status_distribution = BTreeMap::new();
        for lead in &leads {
            *status_distribution
                .entry(lead.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        Ok(LeadMetrics {
            total: leads.len(),
            converted,
            conversion_rate,
            status_distribution,
        })
    }
}
