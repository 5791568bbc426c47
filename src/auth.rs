//! Credential check for write routes that require an API key.

use subtle::ConstantTimeEq;

/// Decides whether a presented key is acceptable. Swap the implementation to change the key source.
pub trait KeyCheck: Send + Sync {
    fn check_key(&self, presented: &str) -> bool;
}

/// A single shared secret fixed at startup.
#[derive(Clone)]
pub struct StaticKey {
    secret: String,
}

impl StaticKey {
    pub fn new(secret: impl Into<String>) -> Self {
        StaticKey {
            secret: secret.into(),
        }
    }
}

impl KeyCheck for StaticKey {
    fn check_key(&self, presented: &str) -> bool {
        if self.secret.is_empty() {
            return false;
        }
        self.secret.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}
