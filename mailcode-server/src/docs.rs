//! OpenAPI doc generation.

use crate::{
    error::ErrorResponse,
    routes::{health, ping, verification},
};
use mailcode_core::{
    code::VerificationCode,
    common::{CodeVerifyRequest, EmailVerifyRequest, MessageResponse, SendCodeResponse},
};
use utoipa::OpenApi;

/// API documentation generator.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck,
        ping::get,
        verification::send_verification_email,
        verification::verify_code,
    ),
    components(
        schemas(
            ErrorResponse,
            EmailVerifyRequest,
            CodeVerifyRequest,
            SendCodeResponse,
            MessageResponse,
            VerificationCode,
            health::HealthcheckResponse
        )
    )
)]

/// Tied to OpenAPI documentation.
#[derive(Debug)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_verification_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/send_verification_email"));
        assert!(doc.paths.paths.contains_key("/verify_code"));
        assert!(doc.paths.paths.contains_key("/healthcheck"));
    }
}
