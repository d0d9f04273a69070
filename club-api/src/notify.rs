//! Delivery of password reset tokens.

/// Hands a freshly issued reset token to the account owner.
pub trait ResetNotifier: Send + Sync {
    fn send_reset(&self, email: &str, token: &str);
}

/// Writes the token to the debug log. Meant for development setups without mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ResetNotifier for LogNotifier {
    fn send_reset(&self, email: &str, token: &str) {
        tracing::debug!(%email, %token, "password reset token issued");
    }
}
