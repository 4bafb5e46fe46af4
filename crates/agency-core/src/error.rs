use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgencyError {
    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("lead not found: {0}")]
    LeadNotFound(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("analytics entry not found: {0}")]
    AnalyticsNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("no valid fields to update")]
    NoFieldsToUpdate,

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error("invalid analytics type: {0}")]
    InvalidAnalyticsType(String),

    #[error("database error: {0}")]
    Db(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AgencyError>;
