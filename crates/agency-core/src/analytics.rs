use crate::types::AnalyticsType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of a business event used for reporting aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnalyticsType,
    pub value: f64,
    pub currency: Option<String>,
    pub project_id: Option<String>,
    pub client_id: Option<String>,
    pub lead_id: Option<String>,
    pub date: DateTime<Utc>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAnalyticsEntry {
    #[serde(rename = "type")]
    pub kind: AnalyticsType,
    pub value: f64,
    pub currency: Option<String>,
    pub project_id: Option<String>,
    pub client_id: Option<String>,
    pub lead_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// A revenue event, recorded as a `revenue_generated` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRevenue {
    pub amount: f64,
    pub currency: String,
    pub project_id: Option<String>,
    pub client_id: Option<String>,
    pub description: Option<String>,
}

impl AnalyticsEntry {
    pub fn new(input: NewAnalyticsEntry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: input.kind,
            value: input.value,
            currency: input.currency,
            project_id: input.project_id,
            client_id: input.client_id,
            lead_id: input.lead_id,
            date: Utc::now(),
            metadata: input.metadata,
        }
    }

    pub fn revenue(input: NewRevenue) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: AnalyticsType::RevenueGenerated,
            value: input.amount,
            currency: Some(input.currency),
            project_id: input.project_id,
            client_id: input.client_id,
            lead_id: None,
            date: Utc::now(),
            metadata: Some(serde_json::json!({ "description": input.description })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_type_field() {
        let entry = AnalyticsEntry::new(NewAnalyticsEntry {
            kind: AnalyticsType::ClientAcquired,
            value: 1.0,
            currency: None,
            project_id: None,
            client_id: Some("c-1".into()),
            lead_id: None,
            metadata: None,
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "client_acquired");
        assert_eq!(json["client_id"], "c-1");
    }

    #[test]
    fn revenue_entry_carries_amount_and_description() {
        let entry = AnalyticsEntry::revenue(NewRevenue {
            amount: 2_500.0,
            currency: "USD".into(),
            project_id: Some("p-1".into()),
            client_id: None,
            description: Some("milestone invoice".into()),
        });
        assert_eq!(entry.kind, AnalyticsType::RevenueGenerated);
        assert_eq!(entry.value, 2_500.0);
        assert_eq!(
            entry.metadata.unwrap()["description"],
            "milestone invoice"
        );
    }
}
