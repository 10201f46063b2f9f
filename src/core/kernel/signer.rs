use crate::core::errors::ExchangeError;
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Current wall clock time in milliseconds since the Unix epoch
pub fn current_timestamp_millis() -> Result<u64, ExchangeError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ExchangeError::Other(format!("System clock is before the Unix epoch: {}", e)))?
        .as_millis();

    u64::try_from(millis)
        .map_err(|_| ExchangeError::Other("Timestamp does not fit in 64 bits".to_string()))
}

/// Millisecond nonce generator
///
/// Nonces follow the wall clock but never repeat or go backwards: two calls
/// within the same millisecond (or across a clock step back) get consecutive
/// values.
#[derive(Debug, Default)]
pub struct NonceSource {
    last: AtomicU64,
}

impl NonceSource {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next nonce, strictly greater than every nonce issued before
    pub fn next(&self) -> Result<u64, ExchangeError> {
        let now = current_timestamp_millis()?;
        Ok(self.next_at(now))
    }

    fn next_at(&self, now: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Base64 encoded HMAC-SHA256 of `message` under `key`
pub fn hmac_sha256_base64(key: &[u8], message: &[u8]) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ExchangeError::InvalidCredentials(format!("Failed to create HMAC: {}", e)))?;

    mac.update(message);
    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}
