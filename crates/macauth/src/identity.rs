//! The identity produced by a successful verification.

use serde::{Deserialize, Serialize};

use crate::credentials::Credential;

/// Claim type under which the principal name is published.
pub const PRINCIPAL_NAME_CLAIM: &str = "name";

/// A principal whose request carried a valid MAC.
///
/// Handed to the authorization layer; this crate makes no access decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentity {
    /// The credential id the request was signed with.
    pub id: String,
    /// The principal name, empty when the credential has none.
    pub principal_name: String,
    /// Claims in order: the principal name first, then the credential's extra claims.
    pub claims: Vec<(String, String)>,
}

impl VerifiedIdentity {
    /// Build the identity for a verified credential.
    #[must_use]
    pub fn from_credential(credential: &Credential) -> Self {
        let principal_name = credential.principal_name.clone().unwrap_or_default();
        let claims = std::iter::once((PRINCIPAL_NAME_CLAIM.to_owned(), principal_name.clone()))
            .chain(credential.extra_claims.iter().cloned())
            .collect();

        Self {
            id: credential.id.clone(),
            principal_name,
            claims,
        }
    }

    /// The first value of the given claim type.
    #[must_use]
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|(k, _)| k == claim_type)
            .map(|(_, v)| v.as_str())
    }
}
