use serde::{Deserialize, Serialize};

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for forgot-password.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for verify-otp.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Request body for reset-password.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub password: String,
}

/// Response envelope shared by every endpoint. Clients branch on `success`,
/// not on the HTTP status code.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()) }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()) }
    }

    pub fn fail_bare() -> Self {
        Self { success: false, message: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_absent_message() {
        let json = serde_json::to_string(&Envelope::ok()).expect("serialize");
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn envelope_includes_failure_message() {
        let json = serde_json::to_string(&Envelope::fail("User does not exist")).expect("serialize");
        assert_eq!(json, r#"{"success":false,"message":"User does not exist"}"#);
    }
}
