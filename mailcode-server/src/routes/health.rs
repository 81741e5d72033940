//! Healthcheck route.

use crate::{app_state::AppState, error::AppResult, extract::json::Json, setups::ServerSetup};
use axum::{self, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A healthcheck response containing diagnostic information for the service
#[derive(ToSchema, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct HealthcheckResponse {
    healthy: bool,
    pending_verifications: usize,
}

/// GET handler for checking service health.
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "mailcode-server healthy", body=HealthcheckResponse),
    )
)]
pub async fn healthcheck<S: ServerSetup>(
    State(state): State<AppState<S>>,
) -> AppResult<(StatusCode, Json<HealthcheckResponse>)> {
    let response = HealthcheckResponse {
        healthy: true,
        pending_verifications: state.registry.len(),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{route_builder::RouteBuilder, test_context::TestContext};
    use http::Method;
    use testresult::TestResult;

    #[test_log::test(tokio::test)]
    async fn test_healthcheck_reports_pending_codes() -> TestResult {
        let ctx = TestContext::new()?;
        ctx.app_state().registry.issue_code("a@b.com");

        let (status, body) = RouteBuilder::new(ctx.app(), Method::GET, "/healthcheck")
            .into_json_response::<HealthcheckResponse>()
            .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            HealthcheckResponse {
                healthy: true,
                pending_verifications: 1,
            }
        );

        Ok(())
    }
}
