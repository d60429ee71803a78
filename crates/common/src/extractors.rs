//! Request extractors shared by the API handlers.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::Error;

/// Query-string paging for list endpoints. The payment history grows
/// by a row per charge forever, so reads are windowed rather than
/// returned whole.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    offset: Option<i64>,
    limit: Option<i64>,
}

impl Pagination {
    /// Rows to skip. Negative values read as zero.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Window size, between 1 and 100 rows with a 50-row default.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

/// JSON body extractor that runs the payload's `validator` rules
/// before the handler sees it. Malformed bodies and rule violations
/// both come back as 400s in the standard response envelope.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(e.body_text()))?;
        value
            .validate()
            .map_err(|e| Error::Validation(format!("Invalid request: {}", e)))?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{self, Request as HttpRequest, StatusCode};
    use axum::response::IntoResponse;

    #[derive(Debug, Deserialize, Validate)]
    struct ContactForm {
        #[validate(email)]
        email: String,
        #[validate(length(min = 1))]
        message: String,
    }

    fn post_json(body: &str) -> HttpRequest<axum::body::Body> {
        HttpRequest::builder()
            .method(http::Method::POST)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let req = post_json(r#"{"email": "robin@sherwood.example", "message": "hello"}"#);
        let form = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .unwrap()
            .0;
        assert_eq!(form.message, "hello");
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_bad_request() {
        let req = post_json("{not json");
        let err = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rule_violation_is_a_bad_request() {
        let req = post_json(r#"{"email": "not-an-address", "message": "hello"}"#);
        let err = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 50);
    }

    #[test]
    fn test_pagination_window_is_bounded() {
        let page = Pagination {
            offset: Some(-3),
            limit: Some(10_000),
        };
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 100);

        let page = Pagination {
            offset: Some(40),
            limit: Some(0),
        };
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 1);
    }
}
