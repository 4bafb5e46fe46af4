use crate::types::LeadStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prospective client tracked through the sales pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub estimated_value: Option<f64>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub estimated_value: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
    pub estimated_value: Option<f64>,
    pub currency: Option<String>,
}

impl LeadPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.source.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.estimated_value.is_none()
            && self.currency.is_none()
    }
}

impl Lead {
    pub fn new(input: NewLead) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            source: input.source,
            status: input.status,
            notes: input.notes,
            estimated_value: input.estimated_value,
            currency: input.currency,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: LeadPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(company) = patch.company {
            self.company = Some(company);
        }
        if let Some(source) = patch.source {
            self.source = Some(source);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(estimated_value) = patch.estimated_value {
            self.estimated_value = Some(estimated_value);
        }
        if let Some(currency) = patch.currency {
            self.currency = Some(currency);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewLead {
        NewLead {
            name: "Jordan Reyes".into(),
            email: "jordan@prospect.test".into(),
            phone: None,
            company: Some("Prospect Ltd".into()),
            source: Some("referral".into()),
            status: LeadStatus::New,
            notes: None,
            estimated_value: Some(5_000.0),
            currency: Some("EUR".into()),
        }
    }

    #[test]
    fn new_lead_starts_in_pipeline() {
        let lead = Lead::new(sample());
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.created_at, lead.updated_at);
    }

    #[test]
    fn apply_moves_through_pipeline() {
        let mut lead = Lead::new(sample());
        lead.apply(LeadPatch {
            status: Some(LeadStatus::Qualified),
            notes: Some("budget confirmed".into()),
            ..Default::default()
        });
        assert_eq!(lead.status, LeadStatus::Qualified);
        assert_eq!(lead.notes.as_deref(), Some("budget confirmed"));
        assert_eq!(lead.estimated_value, Some(5_000.0));
    }
}
