//! Credentials, supported algorithms and the resolver trait.
//!
//! This module defines the [`CredentialResolver`] trait through which the
//! verifier looks up the shared secret for an `id`, along with a
//! [`StaticCredentialResolver`] for testing and development use cases.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Boxed error returned by credential stores.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Keyed-hash families accepted for signing and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC over SHA-1.
    HmacSha1,
    /// HMAC over SHA-256.
    HmacSha256,
}

impl Algorithm {
    /// Every supported algorithm, in order of preference for new credentials.
    pub const ALL: [Self; 2] = [Self::HmacSha256, Self::HmacSha1];

    /// The canonical name of the algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMACSHA1",
            Self::HmacSha256 => "HMACSHA256",
        }
    }

    /// Resolve an algorithm name, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use macauth::credentials::Algorithm;
    ///
    /// assert_eq!(Algorithm::from_name("hmacsha1").unwrap(), Algorithm::HmacSha1);
    /// assert!(Algorithm::from_name("HMACMD5").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedAlgorithm`] if the name is not in the allow-list.
    pub fn from_name(name: &str) -> Result<Self, AuthError> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AuthError::UnsupportedAlgorithm(name.to_owned()))
    }
}

impl FromStr for Algorithm {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared secret and the metadata of the principal it belongs to.
///
/// The algorithm is kept as the name the credential store supplied; it is
/// checked against [`Algorithm`] whenever the credential is used.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// The opaque identifier carried in the `id` attribute.
    pub id: String,
    /// The shared secret.
    pub key: String,
    /// The keyed-hash family, e.g. `HMACSHA256`.
    pub algorithm: String,
    /// Name of the principal on whose behalf requests are signed.
    #[serde(default)]
    pub principal_name: Option<String>,
    /// Additional claims attached to the verified identity, in order.
    #[serde(default)]
    pub extra_claims: Vec<(String, String)>,
}

impl Credential {
    /// Create a credential with no principal name and no extra claims.
    pub fn new(id: impl Into<String>, key: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            algorithm: algorithm.into(),
            principal_name: None,
            extra_claims: Vec::new(),
        }
    }

    /// Set the principal name.
    #[must_use]
    pub fn with_principal_name(mut self, name: impl Into<String>) -> Self {
        self.principal_name = Some(name.into());
        self
    }

    /// Append an extra claim.
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_claims.push((key.into(), value.into()));
        self
    }

    /// Check that the key and algorithm are usable.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] if either is empty.
    pub fn ensure_usable(&self) -> Result<(), AuthError> {
        if self.key.is_empty() || self.algorithm.trim().is_empty() {
            return Err(AuthError::InvalidCredential(self.id.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("principal_name", &self.principal_name)
            .field("extra_claims", &self.extra_claims)
            .finish()
    }
}

/// Trait for looking up credentials by id.
///
/// Implementations may back this with a database, a cache or a configuration
/// file; the call may block. `Ok(None)` means the id is not known.
pub trait CredentialResolver: Send + Sync {
    /// Retrieve the credential for the given id.
    ///
    /// # Errors
    ///
    /// Returns the store's own error if the lookup could not be performed.
    fn resolve(&self, id: &str) -> Result<Option<Credential>, BoxError>;
}

impl<F> CredentialResolver for F
where
    F: Fn(&str) -> Result<Option<Credential>, BoxError> + Send + Sync,
{
    fn resolve(&self, id: &str) -> Result<Option<Credential>, BoxError> {
        self(id)
    }
}

/// A simple in-memory credential resolver backed by a `HashMap`.
///
/// Suitable for testing and development environments. For production use,
/// implement [`CredentialResolver`] over a real credential store.
///
/// # Examples
///
/// ```
/// use macauth::credentials::{Credential, CredentialResolver, StaticCredentialResolver};
///
/// let resolver = StaticCredentialResolver::new(vec![
///     Credential::new("dh37fgj492je", "werxhqb98rpaxn39848xrunpaw3489ruxnpaw398", "HMACSHA256"),
/// ]);
///
/// let credential = resolver.resolve("dh37fgj492je").unwrap().unwrap();
/// assert_eq!(credential.algorithm, "HMACSHA256");
/// assert!(resolver.resolve("nobody").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialResolver {
    credentials: HashMap<String, Credential>,
}

impl StaticCredentialResolver {
    /// Create a resolver from an iterable of credentials, keyed by their id.
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        Self {
            credentials: credentials
                .into_iter()
                .map(|credential| (credential.id.clone(), credential))
                .collect(),
        }
    }

    /// Load credentials from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if the document is not a list of credentials.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let credentials: Vec<Credential> = serde_json::from_str(json)?;
        Ok(Self::new(credentials))
    }

    /// Number of credentials held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the resolver holds no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn resolve(&self, id: &str) -> Result<Option<Credential>, BoxError> {
        Ok(self.credentials.get(id).cloned())
    }
}
