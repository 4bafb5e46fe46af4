use agency_core::AgencyError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<AgencyError>() {
            match e {
                AgencyError::ClientNotFound(_)
                | AgencyError::ProjectNotFound(_)
                | AgencyError::LeadNotFound(_)
                | AgencyError::TaskNotFound(_)
                | AgencyError::AnalyticsNotFound(_)
                | AgencyError::UserNotFound(_) => StatusCode::NOT_FOUND,
                AgencyError::NoFieldsToUpdate
                | AgencyError::InvalidStatus(_)
                | AgencyError::InvalidPriority(_)
                | AgencyError::InvalidAnalyticsType(_) => StatusCode::BAD_REQUEST,
                AgencyError::Db(_)
                | AgencyError::Io(_)
                | AgencyError::Json(_)
                | AgencyError::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_not_found_maps_to_404() {
        let err = AppError(AgencyError::ClientNotFound("c-1".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn lead_not_found_maps_to_404() {
        let err = AppError(AgencyError::LeadNotFound("l-1".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_patch_maps_to_400() {
        let err = AppError(AgencyError::NoFieldsToUpdate.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_status_maps_to_400() {
        let err = AppError(AgencyError::InvalidStatus("archived".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn db_error_maps_to_500() {
        let err = AppError(AgencyError::Db("storage full".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_domain_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_contains_error_field() {
        let err = AppError(AgencyError::TaskNotFound("t-9".into()).into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(
            ct.to_str().unwrap().contains("application/json"),
            "expected JSON content type, got {:?}",
            ct
        );
    }
}
