use thiserror::Error;

/// Failure taxonomy for one chat request.
///
/// `Validation` is decided locally before any provider traffic. `Generation`
/// wraps a provider failure and aborts the request with no partial response.
/// `RateLimited` is raised by the service boundary before orchestration runs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("validation failed: {message}")]
    Validation { message: String },
    #[error("generation failed: {message}")]
    Generation { message: String },
    #[error("Rate limit exceeded. Maximum {limit} requests per minute allowed.")]
    RateLimited { limit: usize },
}

impl ChatError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::ChatError;

    #[test]
    fn rate_limited_message_carries_configured_limit() {
        let error = ChatError::RateLimited { limit: 10 };
        assert_eq!(
            error.to_string(),
            "Rate limit exceeded. Maximum 10 requests per minute allowed."
        );
    }

    #[test]
    fn validation_and_generation_are_distinguishable() {
        let validation = ChatError::validation("message cannot be empty");
        let generation = ChatError::generation("model call failed");

        assert!(matches!(validation, ChatError::Validation { .. }));
        assert!(matches!(generation, ChatError::Generation { .. }));
        assert_ne!(validation, generation);
    }
}
