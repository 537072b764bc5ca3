use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::{ApiError, ValidationError};

/// `Json<T>` whose rejections answer 400 with the usual `{"error": ...}` body.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::Malformed(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod extractors_tests {
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        focus: Vec<String>,
    }

    fn request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_well_formed_bodies() {
        let JsonBody(p) = JsonBody::<Payload>::from_request(request(r#"{"focus":["chest"]}"#), &())
            .await
            .unwrap();
        assert_eq!(p.focus, vec!["chest"]);
    }

    #[tokio::test]
    async fn wrong_field_type_is_a_validation_error() {
        let err = JsonBody::<Payload>::from_request(request(r#"{"focus":"chest"}"#), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::Validation(ValidationError::Malformed(_))));
    }
}
