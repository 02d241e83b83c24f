//! Client-side header construction.
//!
//! [`HeaderBuilder`] computes the MAC for a request and serializes the
//! attribute list the verifier expects:
//!
//! ```text
//! id="<id>", ts="<unix seconds>", mac="<base64>"[, ext="<ext>"]
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::canonical::{RequestUri, compute_mac};
use crate::credentials::Credential;
use crate::error::AuthError;

/// Builder for a signed attribute list.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use macauth::{Credential, HeaderBuilder, RequestUri};
///
/// let credential = Credential::new("dh37fgj492je", "werxhqb98rpaxn39848xrunpaw3489ruxnpaw398", "HMACSHA256");
/// let uri = RequestUri::new("/resource", Some("a=1&b=2"), 8000);
///
/// let header = HeaderBuilder::new("example.com", "GET", &uri)
///     .ext("some-app-data")
///     .timestamp(DateTime::from_timestamp(1353832234, 0).unwrap())
///     .build(&credential)
///     .unwrap();
///
/// assert_eq!(
///     header,
///     r#"id="dh37fgj492je", ts="1353832234", mac="QQY82LpBxhLw04rx7pVotsLN2LEvLDEdCr5FAbZLLmM=", ext="some-app-data""#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HeaderBuilder<'a> {
    host: &'a str,
    method: &'a str,
    uri: &'a RequestUri,
    ext: Option<&'a str>,
    timestamp: Option<DateTime<Utc>>,
}

impl<'a> HeaderBuilder<'a> {
    /// Start a header for the given request.
    #[must_use]
    pub fn new(host: &'a str, method: &'a str, uri: &'a RequestUri) -> Self {
        Self {
            host,
            method,
            uri,
            ext: None,
            timestamp: None,
        }
    }

    /// Attach application-specific data covered by the MAC.
    #[must_use]
    pub fn ext(mut self, ext: &'a str) -> Self {
        self.ext = Some(ext);
        self
    }

    /// Sign with a fixed timestamp instead of the current time.
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Compute the MAC and serialize the header.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] for an empty host, method or
    /// credential id, or for an id or ext that cannot be carried in a quoted
    /// value; [`AuthError::InvalidCredential`] or
    /// [`AuthError::UnsupportedAlgorithm`] if the credential cannot sign.
    pub fn build(&self, credential: &Credential) -> Result<String, AuthError> {
        if self.host.trim().is_empty() {
            return Err(AuthError::InvalidInput("host"));
        }
        if self.method.trim().is_empty() {
            return Err(AuthError::InvalidInput("method"));
        }
        if credential.id.trim().is_empty() || !is_representable(&credential.id) {
            return Err(AuthError::InvalidInput("credential id"));
        }
        if self.ext.is_some_and(|ext| !is_representable(ext)) {
            return Err(AuthError::InvalidInput("ext"));
        }
        credential.ensure_usable()?;

        let ts = normalize_timestamp(self.timestamp.unwrap_or_else(Utc::now));
        let mac = compute_mac(
            self.host,
            self.method,
            &self.uri.path_and_query(),
            self.uri.port,
            self.ext,
            &ts,
            credential,
        )?;

        debug!(id = %credential.id, ts, host = self.host, method = self.method, "Signed request");

        let mut header = format!(r#"id="{}", ts="{ts}", mac="{mac}""#, credential.id);
        if let Some(ext) = self.ext {
            write!(header, r#", ext="{ext}""#).expect("writing to a String cannot fail");
        }
        Ok(header)
    }
}

/// Build a signed header in one call.
///
/// Equivalent to [`HeaderBuilder`] with the optional `ext` and `timestamp`
/// applied; `None` for the timestamp signs with the current time.
///
/// # Errors
///
/// See [`HeaderBuilder::build`].
pub fn build_header(
    host: &str,
    method: &str,
    uri: &RequestUri,
    credential: &Credential,
    ext: Option<&str>,
    timestamp: Option<DateTime<Utc>>,
) -> Result<String, AuthError> {
    let mut builder = HeaderBuilder::new(host, method, uri);
    if let Some(ext) = ext {
        builder = builder.ext(ext);
    }
    if let Some(timestamp) = timestamp {
        builder = builder.timestamp(timestamp);
    }
    builder.build(credential)
}

/// Render an instant as whole Unix seconds, rounding towards negative infinity.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use macauth::header::normalize_timestamp;
///
/// let instant = DateTime::from_timestamp(1353832234, 999_999_999).unwrap();
/// assert_eq!(normalize_timestamp(instant), "1353832234");
/// ```
#[must_use]
pub fn normalize_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.timestamp().to_string()
}

/// Whether a value survives the unescaped `key="value"` list format.
fn is_representable(value: &str) -> bool {
    !value.contains(['"', ','])
}
