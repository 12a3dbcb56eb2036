use thiserror::Error;

/// Failure taxonomy for the auth flows. Business variants carry the message
/// shown to the caller and keep HTTP 200; `Internal` is reported as 500 with
/// a generic body and logged server-side.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("User already exists")]
    UserExists,
    #[error("User does not exist")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid OTP")]
    InvalidOtp,
    #[error("OTP expired")]
    OtpExpired,
    #[error("Failed to send OTP email")]
    OtpEmailFailed(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FlowError {
    pub fn is_business(&self) -> bool {
        !matches!(self, FlowError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_render_their_caller_message() {
        assert_eq!(FlowError::UserExists.to_string(), "User already exists");
        assert_eq!(FlowError::InvalidOtp.to_string(), "Invalid OTP");
        assert_eq!(FlowError::OtpExpired.to_string(), "OTP expired");
        assert!(FlowError::IncorrectPassword.is_business());
    }

    #[test]
    fn internal_errors_are_not_business() {
        let err = FlowError::Internal(anyhow::anyhow!("store unreachable"));
        assert!(!err.is_business());
        // A caught provider failure stays in the business tier.
        let err = FlowError::OtpEmailFailed(anyhow::anyhow!("provider 500"));
        assert!(err.is_business());
    }
}
