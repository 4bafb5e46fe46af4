//! Lead-to-client conversion, the one multi-step write in the system.
//!
//! Three dependent writes share a single timestamp: insert a client copying
//! the lead's contact fields, patch the lead to `won`, and record one
//! `lead_converted` analytics entry referencing both. Each write commits its
//! own transaction; there is no rollback if a later step fails.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::analytics::AnalyticsEntry;
use crate::client::Client;
use crate::error::Result;
use crate::store::{Store, ANALYTICS, CLIENTS, LEADS};
use crate::types::{AnalyticsType, ClientStatus, LeadStatus};

impl Store {
    /// Convert the lead with `id` into an active client.
    ///
    /// Returns the new client. Fails wholesale with `LeadNotFound` when the
    /// id does not resolve; a lead that is already `won` converts again and
    /// produces another client.
    pub fn convert_lead(&self, id: &str) -> Result<Client> {
        let lead = self.get_lead(id)?;
        let now = Utc::now();

        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.put(CLIENTS, &client.id, &client)?;

        let mut won = lead.clone();
        won.status = LeadStatus::Won;
        won.updated_at = now;
        self.put(LEADS, id, &won)?;

        let entry = AnalyticsEntry {
            id: Uuid::new_v4().to_string(),
            kind: AnalyticsType::LeadConverted,
            value: lead.estimated_value.unwrap_or(0.0),
            currency: Some(lead.currency.clone().unwrap_or_else(|| "USD".to_string())),
            project_id: None,
            client_id: Some(client.id.clone()),
            lead_id: Some(lead.id.clone()),
            date: now,
            metadata: Some(json!({ "converted_from": "lead" })),
        };
        self.put(ANALYTICS, &entry.id, &entry)?;

        Ok(client)
    }
}
