use thiserror::Error;

/// Top-level application error. All variants carry a human-readable message
/// suitable for the `{"error": ...}` body the frontend displays.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("AI gateway credential is not configured")]
    MissingCredential,

    // ── Gateway errors ───────────────────────────────────────────────────────
    #[error("AI gateway unreachable: {0}")]
    GatewayUnreachable(#[source] reqwest::Error),

    #[error("Rate limited. Please try again shortly.")]
    RateLimited,

    #[error("Credits exhausted. Please add funds.")]
    CreditsExhausted,

    /// Any other non-2xx from the gateway. The upstream body is logged at the
    /// call site and never surfaced to the user.
    #[error("AI service error")]
    UpstreamFailure { status: u16 },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },
}

impl AppError {
    /// The HTTP status the proxy reports for this error. Rate-limit and
    /// quota failures keep their upstream codes so the client can tell
    /// them apart; everything else collapses per the taxonomy.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::RateLimited => 429,
            AppError::CreditsExhausted => 402,
            AppError::EmptyField { .. } => 400,
            AppError::GatewayUnreachable(_) => 503,
            AppError::MissingCredential | AppError::UpstreamFailure { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_quota_and_generic_failures_are_distinct() {
        let rate = AppError::RateLimited.to_string();
        let quota = AppError::CreditsExhausted.to_string();
        let generic = AppError::UpstreamFailure { status: 500 }.to_string();

        assert_ne!(rate, quota);
        assert_ne!(rate, generic);
        assert_ne!(quota, generic);

        assert_eq!(AppError::RateLimited.status_code(), 429);
        assert_eq!(AppError::CreditsExhausted.status_code(), 402);
        assert_eq!(AppError::UpstreamFailure { status: 500 }.status_code(), 500);
    }

    #[test]
    fn upstream_failure_never_leaks_the_status_in_the_message() {
        let err = AppError::UpstreamFailure { status: 418 };
        assert_eq!(err.to_string(), "AI service error");
    }
}
