//! Authentication for the Artifacts API.
//!
//! Requests are authenticated with a credential taken from the profile: either
//! a bearer token (for example a session token minted by the OCI CLI) or an
//! auth-token pair sent as HTTP Basic.

use crate::error::{OcirError, Result};
use base64::{Engine as _, engine::general_purpose};
use std::fmt;

#[cfg(test)]
mod tests;

/// Credentials for registry authentication.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic authentication with username and auth token
    Basic {
        /// Username, usually `<tenancy-namespace>/<user>`
        username: String,
        /// Auth token or password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl Credentials {
    /// Creates Basic authentication credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libocir::auth::Credentials;
    ///
    /// let creds = Credentials::basic("tenancy/jdoe", "auth-token");
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates Bearer token credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libocir::auth::Credentials;
    ///
    /// let creds = Credentials::bearer("token123");
    /// assert_eq!(creds.to_header_value(), "Bearer token123");
    /// ```
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the Authorization header value for these credentials.
    pub fn to_header_value(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials);
                format!("Basic {}", encoded)
            }
            Self::Bearer { token } => format!("Bearer {}", token),
        }
    }

    /// Builds credentials from optional profile fields.
    ///
    /// A token wins over a username/password pair. Having neither is a
    /// configuration error, as is a username without a password.
    pub fn from_parts(
        token: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let username = username.map(str::trim).filter(|u| !u.is_empty());

        match (token, username, password) {
            (Some(token), _, _) => Ok(Self::bearer(token)),
            (None, Some(username), Some(password)) if !password.is_empty() => {
                Ok(Self::basic(username, password))
            }
            (None, Some(username), _) => Err(OcirError::config(
                format!("Missing password for registry user '{}'", username),
                None,
            )),
            (None, None, _) => Err(OcirError::config(
                "Missing credentials: set auth.token or auth.username/auth.password",
                None,
            )),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
