use crate::core::errors::ExchangeError;
use crate::core::kernel::hmac_sha256_base64;
use base64::{engine::general_purpose, Engine as _};
use secrecy::{ExposeSecret, Secret, SecretVec};
use std::collections::HashMap;

pub const HEADER_PUBLIC_KEY: &str = "X-PCK";
pub const HEADER_STAMP: &str = "X-Stamp";
pub const HEADER_SIGNATURE: &str = "X-Signature";

/// Compute the BtcTurk request signature
///
/// `base64(HMAC-SHA256(base64decode(secret), public_key ++ nonce))`
pub fn sign(
    secret_b64: &str,
    public_key: &str,
    nonce_millis: u64,
) -> Result<String, ExchangeError> {
    let key = decode_secret(secret_b64)?;
    hmac_sha256_base64(&key, format!("{}{}", public_key, nonce_millis).as_bytes())
}

fn decode_secret(secret_b64: &str) -> Result<Vec<u8>, ExchangeError> {
    general_purpose::STANDARD
        .decode(secret_b64.trim())
        .map_err(|e| {
            ExchangeError::InvalidCredentials(format!("Secret key is not valid base64: {}", e))
        })
}

/// Holds the API key pair and produces the `X-PCK` / `X-Stamp` /
/// `X-Signature` headers for a given nonce
pub struct BtcturkSigner {
    public_key: Secret<String>,
    secret: SecretVec<u8>,
}

impl BtcturkSigner {
    /// Create a signer, decoding the base64 secret up front
    pub fn new(public_key: String, secret_b64: &str) -> Result<Self, ExchangeError> {
        if public_key.is_empty() {
            return Err(ExchangeError::InvalidCredentials(
                "Public key must not be empty".to_string(),
            ));
        }

        let secret = decode_secret(secret_b64)?;
        if secret.is_empty() {
            return Err(ExchangeError::InvalidCredentials(
                "Secret key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            public_key: Secret::new(public_key),
            secret: SecretVec::new(secret),
        })
    }

    /// Signature for a given nonce
    pub fn signature(&self, nonce_millis: u64) -> Result<String, ExchangeError> {
        let message = format!("{}{}", self.public_key.expose_secret(), nonce_millis);
        hmac_sha256_base64(self.secret.expose_secret(), message.as_bytes())
    }

    /// Authentication headers for a given nonce
    pub fn auth_headers(
        &self,
        nonce_millis: u64,
    ) -> Result<HashMap<String, String>, ExchangeError> {
        let mut headers = HashMap::with_capacity(3);
        headers.insert(
            HEADER_PUBLIC_KEY.to_string(),
            self.public_key.expose_secret().clone(),
        );
        headers.insert(HEADER_STAMP.to_string(), nonce_millis.to_string());
        headers.insert(HEADER_SIGNATURE.to_string(), self.signature(nonce_millis)?);
        Ok(headers)
    }
}

impl std::fmt::Debug for BtcturkSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtcturkSigner")
            .field("public_key", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
