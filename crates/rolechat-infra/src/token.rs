//! HMAC-SHA256 bearer tokens.
//!
//! Token format: `base64url(payload).base64url(mac)` where the payload is
//! a small JSON object `{"sub": username, "iat": unix_seconds}` and the
//! mac is HMAC-SHA256 over the encoded payload. Verification recomputes
//! the mac in constant time; any structural or signature failure is the
//! same opaque `AuthError::InvalidToken`.

use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use rolechat_core::auth::TokenVerifier;
use rolechat_types::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    iat: i64,
}

/// Issues and verifies HMAC-signed bearer tokens.
pub struct HmacTokenSigner {
    key: Vec<u8>,
}

impl HmacTokenSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Load the signing key from a file, generating a fresh random key on
    /// first run. The key file lives in the data directory next to the
    /// stores, so tokens survive server restarts.
    pub async fn from_key_file(path: &Path) -> anyhow::Result<Self> {
        match tokio::fs::read(path).await {
            Ok(key) => Ok(Self::new(key)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                use argon2::password_hash::rand_core::{OsRng, RngCore};
                let mut key = vec![0u8; 32];
                OsRng.fill_bytes(&mut key);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(path, &key).await?;
                Ok(Self::new(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn mac_of(&self, data: &[u8]) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(data);
        mac
    }

    /// Issue a token for a username.
    pub fn issue(&self, username: &str) -> String {
        let claims = TokenClaims {
            sub: username.to_string(),
            iat: chrono::Utc::now().timestamp(),
        };
        let payload = serde_json::to_vec(&claims).expect("claims always serialize");
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let mac = self.mac_of(encoded.as_bytes()).finalize().into_bytes();
        format!("{encoded}.{}", URL_SAFE_NO_PAD.encode(mac))
    }
}

impl TokenVerifier for HmacTokenSigner {
    fn verify(&self, token: &str) -> Result<String, AuthError> {
        let (encoded, sig) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
        let sig_bytes = URL_SAFE_NO_PAD
            .decode(sig)
            .map_err(|_| AuthError::InvalidToken)?;
        self.mac_of(encoded.as_bytes())
            .verify_slice(&sig_bytes)
            .map_err(|_| AuthError::InvalidToken)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;
        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_issue_verify_roundtrip() {
        let signer = HmacTokenSigner::new(*b"0123456789abcdef0123456789abcdef");
        let token = signer.issue("ann");
        assert_eq!(signer.verify(&token).unwrap(), "ann");
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = HmacTokenSigner::new(*b"0123456789abcdef0123456789abcdef");
        let token = signer.issue("ann");
        let (payload, sig) = token.split_once('.').unwrap();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(br#"{"sub":"admin","iat":0}"#);
        let forged = format!("{forged_payload}.{sig}");
        assert!(signer.verify(&forged).is_err());
        // The untampered token still verifies.
        assert!(signer.verify(&format!("{payload}.{sig}")).is_ok());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signer = HmacTokenSigner::new(*b"0123456789abcdef0123456789abcdef");
        let other = HmacTokenSigner::new(*b"ffffffffffffffffffffffffffffffff");
        let token = signer.issue("ann");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = HmacTokenSigner::new(*b"0123456789abcdef0123456789abcdef");
        for garbage in ["", "no-dot", "a.b", "!!!.???"] {
            assert!(signer.verify(garbage).is_err(), "accepted '{garbage}'");
        }
    }

    #[tokio::test]
    async fn test_key_file_persists_across_instances() {
        let dir = tempdir().unwrap();
        let key_path = dir.path().join("token.key");

        let first = HmacTokenSigner::from_key_file(&key_path).await.unwrap();
        let token = first.issue("ann");

        let second = HmacTokenSigner::from_key_file(&key_path).await.unwrap();
        assert_eq!(second.verify(&token).unwrap(), "ann");
    }
}
