use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "budi@example.com", format = "email", value_type = String)]
    pub email: String,
}

/// Claims carried by a Supabase-issued access token.
///
/// The backend signs these with the project JWT secret (HS256); this
/// service only verifies, it never issues tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id (uuid) as issued by the backend auth service.
    pub sub: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub aud: String,
    pub exp: usize,
}
