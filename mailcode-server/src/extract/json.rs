//! JSON extractor reporting rejections in the application's error format.

use crate::error::AppError;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;
use serde::Serialize;

/// Drop-in for [axum::Json].
///
/// Malformed bodies or a missing `Content-Type` are rejected with an
/// [AppError], so clients always get `{ "error": ... }` back.
#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::parse_error;
    use axum::{body::Body, routing::post, Router};
    use http::{header, Method, Request, StatusCode};
    use serde::Deserialize;
    use testresult::TestResult;
    use tower::ServiceExt;

    #[derive(Deserialize, Serialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|Json(payload): Json<Payload>| async move { Json(payload) }),
        )
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_content_type_is_app_error() -> TestResult {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .body(Body::from(r#"{"name":"x"}"#))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(!parse_error(response).await.error.is_empty());

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_body_is_app_error() -> TestResult {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(Body::from("{not json"))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!parse_error(response).await.error.is_empty());

        Ok(())
    }
}
