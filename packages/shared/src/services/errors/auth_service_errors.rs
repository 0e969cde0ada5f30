use std::fmt;

#[derive(Debug)]
pub enum AuthServiceError {
    /// Signature, structure or algorithm check failed.
    InvalidToken,
    /// Signing or key handling failed on our side.
    JwtError(String),
}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthServiceError::InvalidToken => write!(f, "Invalid JWT token"),
            AuthServiceError::JwtError(msg) => write!(f, "JWT error: {}", msg),
        }
    }
}

impl std::error::Error for AuthServiceError {}
