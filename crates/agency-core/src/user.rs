use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record mirrored from the external identity provider.
///
/// Keyed by the provider's user id; the app only reads name and email for
/// display, so there is no status or lifecycle beyond upsert/remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields pushed by the identity provider on sign-in or update.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSync {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub image_url: Option<String>,
}

impl User {
    pub fn new(user_id: impl Into<String>, sync: UserSync) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            first_name: sync.first_name,
            last_name: sync.last_name,
            email: sync.email,
            image_url: sync.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite profile fields from the provider, keeping `created_at`.
    pub fn refresh(&mut self, sync: UserSync) {
        self.first_name = sync.first_name;
        self.last_name = sync.last_name;
        self.email = sync.email;
        self.image_url = sync.image_url;
        self.updated_at = Utc::now();
    }
}
