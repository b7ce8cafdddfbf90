//! PostgREST-style table access: column projection, equality/range
//! filters, multi-key ascending ordering, plus insert and targeted
//! update. Only what the flows actually use.

use super::error::status_error;
use super::{Backend, BackendError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

pub struct SelectQuery<'a> {
    backend: &'a Backend,
    table: &'a str,
    select: String,
    filters: Vec<(String, String)>,
    order: Vec<String>,
}

impl Backend {
    pub fn table<'a>(&'a self, table: &'a str) -> SelectQuery<'a> {
        SelectQuery {
            backend: self,
            table,
            select: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Insert rows. The backend answers with the inserted rows by
    /// default; `return=minimal` skips that round-trip.
    pub async fn insert<T: Serialize>(
        &self,
        table: &str,
        rows: &[T],
        token: &str,
    ) -> Result<(), BackendError> {
        let request = self
            .authed(self.http().post(self.url(&format!("/rest/v1/{}", table))), token)
            .header("Prefer", "return=minimal")
            .json(rows);
        self.execute(request).await?;
        Ok(())
    }

    /// Update named fields of the row matching `id`.
    pub async fn update<T: Serialize>(
        &self,
        table: &str,
        id: &Uuid,
        patch: &T,
        token: &str,
    ) -> Result<(), BackendError> {
        let request = self
            .authed(self.http().patch(self.url(&format!("/rest/v1/{}", table))), token)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(patch);
        self.execute(request).await?;
        Ok(())
    }
}

impl<'a> SelectQuery<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        // PostgREST takes the projection as one comma-separated value.
        self.select = columns.replace(' ', "");
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lte", value)
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(format!("{}.asc", column));
        self
    }

    fn filter(mut self, column: &str, op: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("{}.{}", op, value.to_string())));
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];
        pairs.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        pairs
    }

    /// Zero or more rows.
    pub async fn fetch<T: DeserializeOwned>(self, token: &str) -> Result<Vec<T>, BackendError> {
        let request = self.backend.authed(
            self.backend
                .http()
                .get(self.backend.url(&format!("/rest/v1/{}", self.table)))
                .query(&self.query_pairs()),
            token,
        );
        let body = self.backend.execute(request).await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Exactly one row, or `None` when the filter matches nothing
    /// (including rows hidden by a row-level policy).
    pub async fn single<T: DeserializeOwned>(
        self,
        token: &str,
    ) -> Result<Option<T>, BackendError> {
        let request = self
            .backend
            .authed(
                self.backend
                    .http()
                    .get(self.backend.url(&format!("/rest/v1/{}", self.table)))
                    .query(&self.query_pairs()),
                token,
            )
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT_ACCEPT);

        let response = request
            .send()
            .await
            .map_err(super::error::transport_error)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(super::error::transport_error)?;

        // With the single-object Accept header the backend answers 406
        // when the filter matched zero rows.
        if status == reqwest::StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn backend() -> Backend {
        Backend::new("https://proj.supabase.test/", "anon", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let b = backend();
        assert_eq!(
            b.url("/rest/v1/attendance"),
            "https://proj.supabase.test/rest/v1/attendance"
        );
    }

    #[test]
    fn query_pairs_cover_projection_filters_and_order() {
        let b = backend();
        let pairs = b
            .table("attendance")
            .select("a_date, shift, clock_in_at")
            .eq("user_id", "u-1")
            .gte("a_date", "2025-08-01")
            .lte("a_date", "2025-08-31")
            .order_asc("a_date")
            .order_asc("shift")
            .query_pairs();

        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), "a_date,shift,clock_in_at".to_string()),
                ("user_id".to_string(), "eq.u-1".to_string()),
                ("a_date".to_string(), "gte.2025-08-01".to_string()),
                ("a_date".to_string(), "lte.2025-08-31".to_string()),
                ("order".to_string(), "a_date.asc,shift.asc".to_string()),
            ]
        );
    }

    #[test]
    fn default_projection_is_star_with_no_order() {
        let b = backend();
        let pairs = b.table("attendance").query_pairs();
        assert_eq!(pairs, vec![("select".to_string(), "*".to_string())]);
    }
}
