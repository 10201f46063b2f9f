use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared authentication flag
///
/// Cloned handles observe the same state. The flag only ever goes from
/// `false` to `true`; a new client is needed to start over.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    authenticated: Arc<AtomicBool>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    pub(crate) fn mark_authenticated(&self) {
        self.authenticated.store(true, Ordering::Release);
    }
}

/// Whether a server message reports a rejected nonce
pub fn is_nonce_error(message: &str) -> bool {
    message.to_lowercase().contains("nonce")
}

/// Describe the offset between the local and the server clock
pub fn describe_clock_skew(local_millis: i64, server_millis: i64) -> String {
    let skew = local_millis - server_millis;
    match skew {
        0 => "local clock matches server time".to_string(),
        s if s > 0 => format!("local clock is {} ms ahead of server", s),
        s => format!("local clock is {} ms behind server", s.unsigned_abs()),
    }
}
