//! Request and response data types that are common and useful between clients of and the mailcode server

use crate::code::VerificationCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Request to send a verification code to an email address.
///
/// Fields are optional on the wire so that absent values can be reported
/// with a domain error instead of a deserialization error.
#[derive(Deserialize, Serialize, Clone, Debug, Default, ToSchema)]
pub struct EmailVerifyRequest {
    /// The email address the code should be sent to
    #[schema(example = "a@b.com")]
    pub email: Option<String>,
}

impl EmailVerifyRequest {
    /// The email address, if present and non-empty.
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }
}

/// Request to check a code previously sent to an email address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, ToSchema)]
pub struct CodeVerifyRequest {
    /// The email address the code was sent to
    #[schema(example = "a@b.com")]
    pub email: Option<String>,
    /// The code as entered by the user
    #[schema(value_type = Option<String>, example = "482913")]
    pub code: Option<SubmittedCode>,
}

impl CodeVerifyRequest {
    /// The email address and code, if both are present and non-blank.
    pub fn email_and_code(&self) -> Option<(&str, &SubmittedCode)> {
        let code = self.code.as_ref().filter(|code| !code.is_blank())?;
        Some((non_empty(&self.email)?, code))
    }
}

/// A code as submitted by a client.
///
/// Codes are strings. Other JSON values are still accepted so they can be
/// rejected as a wrong code rather than as a malformed body.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum SubmittedCode {
    /// A code sent as a JSON string
    Text(String),
    /// Any other JSON value, which never matches an issued code
    Other(serde_json::Value),
}

impl SubmittedCode {
    /// The code, if it was sent as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SubmittedCode::Text(code) => Some(code),
            SubmittedCode::Other(_) => None,
        }
    }

    /// Empty strings, `null`, `false`, zero and empty collections count as
    /// no code at all.
    pub fn is_blank(&self) -> bool {
        match self {
            SubmittedCode::Text(code) => code.is_empty(),
            SubmittedCode::Other(Value::Null) => true,
            SubmittedCode::Other(Value::Bool(flag)) => !flag,
            SubmittedCode::Other(Value::Number(n)) => n.as_f64() == Some(0.0),
            SubmittedCode::Other(Value::String(s)) => s.is_empty(),
            SubmittedCode::Other(Value::Array(items)) => items.is_empty(),
            SubmittedCode::Other(Value::Object(fields)) => fields.is_empty(),
        }
    }
}

/// Response after a verification code was issued and mailed.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SendCodeResponse {
    /// Human readable status message
    pub message: String,
    /// The issued code, only present when the server echoes codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<VerificationCode>,
}

/// Response carrying only a status message.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct MessageResponse {
    /// Human readable status message
    pub message: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use testresult::TestResult;

    #[test]
    fn test_missing_and_empty_email_are_absent() -> TestResult {
        let missing: EmailVerifyRequest = serde_json::from_value(json!({}))?;
        let null: EmailVerifyRequest = serde_json::from_value(json!({ "email": null }))?;
        let empty: EmailVerifyRequest = serde_json::from_value(json!({ "email": "" }))?;
        let present: EmailVerifyRequest = serde_json::from_value(json!({ "email": "a@b.com" }))?;

        assert_eq!(missing.email(), None);
        assert_eq!(null.email(), None);
        assert_eq!(empty.email(), None);
        assert_eq!(present.email(), Some("a@b.com"));

        Ok(())
    }

    #[test]
    fn test_code_verify_request_requires_both_fields() -> TestResult {
        let only_email: CodeVerifyRequest = serde_json::from_value(json!({ "email": "a@b.com" }))?;
        let empty_code: CodeVerifyRequest =
            serde_json::from_value(json!({ "email": "a@b.com", "code": "" }))?;
        let only_code: CodeVerifyRequest = serde_json::from_value(json!({ "code": "123456" }))?;
        let both: CodeVerifyRequest =
            serde_json::from_value(json!({ "email": "a@b.com", "code": "123456" }))?;

        assert_eq!(only_email.email_and_code(), None);
        assert_eq!(empty_code.email_and_code(), None);
        assert_eq!(only_code.email_and_code(), None);
        assert_eq!(
            both.email_and_code(),
            Some(("a@b.com", &SubmittedCode::Text("123456".to_string())))
        );

        Ok(())
    }

    #[test]
    fn test_non_string_codes_are_accepted_but_never_text() -> TestResult {
        let number: CodeVerifyRequest =
            serde_json::from_value(json!({ "email": "a@b.com", "code": 123456 }))?;

        let (email, code) = number.email_and_code().expect("code present");
        assert_eq!(email, "a@b.com");
        assert_eq!(code, &SubmittedCode::Other(json!(123456)));
        assert_eq!(code.as_str(), None);

        for blank in [json!(0), json!(false), json!([]), json!({})] {
            let request: CodeVerifyRequest =
                serde_json::from_value(json!({ "email": "a@b.com", "code": blank }))?;
            assert_eq!(request.email_and_code(), None);
        }

        Ok(())
    }

    #[test]
    fn test_send_code_response_omits_hidden_code() -> TestResult {
        let hidden = SendCodeResponse {
            message: "ok".to_string(),
            code: None,
        };

        assert_eq!(serde_json::to_value(&hidden)?, json!({ "message": "ok" }));

        Ok(())
    }
}
