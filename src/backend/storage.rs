use super::{Backend, BackendError};

impl Backend {
    /// Upload a byte payload into `bucket` at `path`. With `upsert` an
    /// existing object at the same path is replaced; without it the
    /// backend rejects the collision and the error is surfaced as-is.
    /// Returns the publicly resolvable URL of the stored object.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
        token: &str,
    ) -> Result<String, BackendError> {
        let request = self
            .authed(
                self.http()
                    .post(self.url(&format!("/storage/v1/object/{}/{}", bucket, path))),
                token,
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, "3600")
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);
        self.execute(request).await?;
        Ok(self.public_url(bucket, path))
    }

    /// Public-bucket URL; resolvable without credentials.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.url(&format!("/storage/v1/object/public/{}/{}", bucket, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn public_url_points_at_the_public_object_route() {
        let b = Backend::new("https://proj.supabase.test", "anon", Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            b.public_url("absen", "user-1/2025-08-25-s1.jpg"),
            "https://proj.supabase.test/storage/v1/object/public/absen/user-1/2025-08-25-s1.jpg"
        );
    }
}
