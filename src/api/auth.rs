//! Admin authentication
//!
//! HTTP Basic credentials checked against process-wide configuration.
//! There are no sessions or tokens; every privileged call presents the
//! header again and is re-verified. Both fields are compared in constant
//! time and neither comparison short-circuits the other.

use crate::error::{Error, Result};
use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Admin credential checker, fixed at startup
#[derive(Clone)]
pub struct AdminAuth {
    username: String,
    password: String,
}

impl AdminAuth {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Constant-time comparison of both credential fields
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let username_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (username_ok & password_ok).into()
    }

    /// Verify the Basic authorization header on a privileged request
    pub fn require(&self, headers: &HeaderMap) -> Result<()> {
        let credentials = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic);

        match credentials {
            Some((username, password)) if self.authenticate(&username, &password) => Ok(()),
            _ => {
                warn!("Rejected admin request with missing or bad credentials");
                Err(Error::Auth)
            }
        }
    }
}

/// Decode `Basic <base64(user:pass)>` into its two fields
fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
