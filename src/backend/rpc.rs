use super::{Backend, BackendError};
use serde::Serialize;

impl Backend {
    /// Invoke a named server-side procedure. The attendance procedures
    /// answer with nothing useful on success, so the body is dropped.
    pub async fn rpc<T: Serialize>(
        &self,
        function: &str,
        args: &T,
        token: &str,
    ) -> Result<(), BackendError> {
        let request = self
            .authed(
                self.http()
                    .post(self.url(&format!("/rest/v1/rpc/{}", function))),
                token,
            )
            .json(args);
        self.execute(request).await?;
        Ok(())
    }
}
