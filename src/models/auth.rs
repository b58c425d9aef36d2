use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the identity provider's `/userinfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Refresh-token grant sent to `/oauth/token`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub grant_type: &'static str,
    pub client_id: String,
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Present when the tenant rotates refresh tokens
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body returned by the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}
