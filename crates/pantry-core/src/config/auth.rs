//! Token verification configuration.
//!
//! Pantry does not issue tokens itself; the identity provider that fronts
//! it does. This section only configures verification of incoming access
//! tokens.

use serde::{Deserialize, Serialize};

/// Bearer token verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer.
    pub jwt_secret: String,
    /// Expected `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
}
