//! Canonical string construction and MAC computation.
//!
//! Signer and verifier both reduce the request to the same six lines, each
//! terminated by a newline:
//!
//! ```text
//! <timestamp>\n
//! <METHOD>\n
//! <path and query>\n
//! <host>\n
//! <port>\n
//! <ext>\n
//! ```
//!
//! The method is uppercased and the host lowercased; everything else is used
//! exactly as received. The host line keeps any `:port` suffix of the declared
//! host, and the port line comes from the request port independently.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use sha2::Sha256;
use tracing::trace;

use crate::credentials::{Algorithm, Credential};
use crate::error::AuthError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// The request target as seen by the server: path, raw query and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUri {
    /// The path component, e.g. `/resource`.
    pub path: String,
    /// The raw query string without the leading `?`.
    pub query: Option<String>,
    /// The port the request was received on.
    pub port: u16,
}

impl RequestUri {
    /// Create a request target from its components.
    pub fn new(path: impl Into<String>, query: Option<&str>, port: u16) -> Self {
        Self {
            path: path.into(),
            query: query.map(ToOwned::to_owned),
            port,
        }
    }

    /// Split a raw `path?query` string at the first `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use macauth::canonical::RequestUri;
    ///
    /// let uri = RequestUri::from_path_and_query("/resource?a=1&b=2", 8000);
    /// assert_eq!(uri.path, "/resource");
    /// assert_eq!(uri.query.as_deref(), Some("a=1&b=2"));
    /// assert_eq!(uri.path_and_query(), "/resource?a=1&b=2");
    /// ```
    #[must_use]
    pub fn from_path_and_query(path_and_query: &str, port: u16) -> Self {
        match path_and_query.split_once('?') {
            Some((path, query)) => Self::new(path, Some(query), port),
            None => Self::new(path_and_query, None, port),
        }
    }

    /// The path followed by `?query` when a query is present.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Build the canonical string for a request.
///
/// # Examples
///
/// ```
/// use macauth::canonical::build_canonical_string;
///
/// let canonical = build_canonical_string(
///     "1353832234",
///     "get",
///     "/resource?a=1&b=2",
///     "Example.com",
///     8000,
///     None,
/// );
/// assert_eq!(canonical, "1353832234\nGET\n/resource?a=1&b=2\nexample.com\n8000\n\n");
/// ```
#[must_use]
pub fn build_canonical_string(
    timestamp: &str,
    method: &str,
    path_and_query: &str,
    host: &str,
    port: u16,
    ext: Option<&str>,
) -> String {
    let method = method.to_uppercase();
    let host = host.to_lowercase();
    let ext = ext.unwrap_or("");

    format!("{timestamp}\n{method}\n{path_and_query}\n{host}\n{port}\n{ext}\n")
}

/// Compute the base64-encoded MAC of a request with the given credential.
///
/// # Errors
///
/// Returns [`AuthError::UnsupportedAlgorithm`] if the credential's algorithm
/// is not supported.
pub fn compute_mac(
    host: &str,
    method: &str,
    path_and_query: &str,
    port: u16,
    ext: Option<&str>,
    timestamp: &str,
    credential: &Credential,
) -> Result<String, AuthError> {
    let algorithm = Algorithm::from_name(&credential.algorithm)?;
    let canonical = build_canonical_string(timestamp, method, path_and_query, host, port, ext);

    trace!(canonical, %algorithm, "Built canonical string");

    let digest = match algorithm {
        Algorithm::HmacSha1 => hmac_sha1(credential.key.as_bytes(), canonical.as_bytes()),
        Algorithm::HmacSha256 => hmac_sha256(credential.key.as_bytes(), canonical.as_bytes()),
    };

    Ok(BASE64.encode(digest))
}

/// Compute HMAC-SHA1 and return the raw bytes.
fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
