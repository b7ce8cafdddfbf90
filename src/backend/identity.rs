use super::{Backend, BackendError};
use serde_json::json;

impl Backend {
    /// Ask the backend to email a magic link. Passwordless: no
    /// credential ever reaches this service.
    pub async fn send_magic_link(&self, email: &str) -> Result<(), BackendError> {
        let request = self
            .keyed(self.http().post(self.url("/auth/v1/otp")))
            .json(&json!({ "email": email, "create_user": true }));
        self.execute(request).await?;
        Ok(())
    }

    /// Revoke the caller's session server-side.
    pub async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        let request = self.authed(self.http().post(self.url("/auth/v1/logout")), token);
        self.execute(request).await?;
        Ok(())
    }
}
