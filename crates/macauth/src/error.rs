//! Error types for request signing and verification.
//!
//! Every failure is represented by [`AuthError`]. The variants are specific so
//! callers can log and count them, but they should not be echoed to the remote
//! party: [`AuthError::status_code`] collapses them into a uniform response.

use http::StatusCode;

/// Errors that can occur while signing or verifying a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A required call argument (host, method, header, credential) is empty or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// The authorization header carries no content at all.
    #[error("Malformed authorization header")]
    MalformedHeader,

    /// One or more of `id`, `ts`, `mac` is absent from the header.
    #[error("Missing required attributes: {0}")]
    MissingAttributes(String),

    /// The header carries attributes outside `id`, `ts`, `mac`, `ext`.
    #[error("Unknown attributes: {0}")]
    UnknownAttributes(String),

    /// The credential resolver failed or returned nothing for the given id.
    #[error("Unknown principal: {0}")]
    UnknownPrincipal(String),

    /// The resolved credential has an empty key or algorithm.
    #[error("Invalid credential for id: {0}")]
    InvalidCredential(String),

    /// The credential's algorithm is not in the supported set.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The recomputed MAC does not match the supplied one.
    #[error("Bad MAC")]
    BadMac,
}

impl AuthError {
    /// A stable, low-cardinality name for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::MalformedHeader => "malformed_header",
            Self::MissingAttributes(_) => "missing_attributes",
            Self::UnknownAttributes(_) => "unknown_attributes",
            Self::UnknownPrincipal(_) => "unknown_principal",
            Self::InvalidCredential(_) => "invalid_credential",
            Self::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            Self::BadMac => "bad_mac",
        }
    }

    /// The HTTP status to answer the remote party with.
    ///
    /// Only argument errors surface as `400`; every credential or MAC failure
    /// maps to the same `401` so the response does not reveal which check failed.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::MalformedHeader => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
