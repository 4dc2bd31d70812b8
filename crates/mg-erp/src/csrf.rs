//! Cross-site request forgery token verification.
//!
//! Front ends hold a [`CsrfVerifier`] chosen once at startup: a keyed verifier
//! when protection is on, or a no-op verifier when it is turned off. The store
//! never depends on either.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::{CsrfMode, InventoryConfig};

/// Context string for deriving the token key from the configured secret.
const KEY_CONTEXT: &str = "mg-erp csrf token key v1";

/// Random bytes per token.
const NONCE_LEN: usize = 16;

/// Reasons a token is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsrfError {
    #[error("missing CSRF token")]
    Missing,

    #[error("malformed CSRF token")]
    Malformed,

    #[error("CSRF token does not match the session")]
    Mismatch,
}

/// A token handed to a client for embedding in forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues and checks CSRF tokens bound to a client session key.
pub trait CsrfVerifier: Send + Sync {
    /// Issue a fresh token for `session_key`.
    fn issue(&self, session_key: &str) -> CsrfToken;

    /// Check a submitted token against `session_key`.
    fn verify(&self, session_key: &str, token: &str) -> Result<(), CsrfError>;

    /// Whether tokens are actually checked.
    fn is_enforcing(&self) -> bool;
}

/// Verifier that binds tokens to a session with a keyed BLAKE3 hash.
///
/// Token format: `hex(nonce) "." hex(keyed_hash(session_key, nonce))`.
pub struct KeyedVerifier {
    key: [u8; 32],
}

impl KeyedVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
        }
    }

    fn tag(&self, session_key: &str, nonce: &[u8]) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(&(session_key.len() as u64).to_le_bytes());
        hasher.update(session_key.as_bytes());
        hasher.update(nonce);
        hasher.finalize()
    }
}

impl fmt::Debug for KeyedVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedVerifier").finish_non_exhaustive()
    }
}

impl CsrfVerifier for KeyedVerifier {
    fn issue(&self, session_key: &str) -> CsrfToken {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        let tag = self.tag(session_key, &nonce);
        CsrfToken(format!("{}.{}", hex::encode(nonce), tag.to_hex()))
    }

    fn verify(&self, session_key: &str, token: &str) -> Result<(), CsrfError> {
        if token.is_empty() {
            return Err(CsrfError::Missing);
        }
        let (nonce_hex, tag_hex) = token.split_once('.').ok_or(CsrfError::Malformed)?;
        let nonce = hex::decode(nonce_hex).map_err(|_| CsrfError::Malformed)?;
        if nonce.len() != NONCE_LEN {
            return Err(CsrfError::Malformed);
        }
        let provided = blake3::Hash::from_hex(tag_hex).map_err(|_| CsrfError::Malformed)?;

        // blake3::Hash equality is constant-time.
        if self.tag(session_key, &nonce) == provided {
            Ok(())
        } else {
            Err(CsrfError::Mismatch)
        }
    }

    fn is_enforcing(&self) -> bool {
        true
    }
}

/// Verifier installed when CSRF protection is turned off. Accepts everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVerifier;

impl CsrfVerifier for NoopVerifier {
    fn issue(&self, _session_key: &str) -> CsrfToken {
        CsrfToken(String::new())
    }

    fn verify(&self, _session_key: &str, _token: &str) -> Result<(), CsrfError> {
        Ok(())
    }

    fn is_enforcing(&self) -> bool {
        false
    }
}

/// Build the verifier selected by `config`.
pub fn verifier_for(config: &InventoryConfig) -> Arc<dyn CsrfVerifier> {
    match config.csrf {
        CsrfMode::Enforce => {
            if config.uses_default_secret() {
                warn!("SECRET_KEY not set; CSRF tokens are keyed with the development secret");
            }
            Arc::new(KeyedVerifier::new(&config.secret_key))
        }
        CsrfMode::Disabled => {
            warn!("CSRF protection is disabled");
            Arc::new(NoopVerifier)
        }
    }
}
