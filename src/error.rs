use alloc::string::String;

/// Failures reported by the record/configuration sources.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The credential was rejected. Adapters should surface an
    /// authentication prompt instead of treating this as a generic failure.
    #[error("permission denied")]
    PermissionDenied,
    /// Non-success response; carries the response body text.
    #[error("request failed: {body}")]
    Transport { body: String },
    /// The request never produced a response.
    #[error("network error: {message}")]
    Network { message: String },
}

impl SourceError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
