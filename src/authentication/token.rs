use secrecy::{ExposeSecret, Secret};

/// Opaque token issued by `POST /auth`.
///
/// Owned by a single scenario and dropped with it; its `Debug` output is redacted.
#[derive(Clone, Debug)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    /// Value for the `Cookie` header.
    pub fn cookie(&self) -> String {
        format!("token={}", self.0.expose_secret())
    }
}
