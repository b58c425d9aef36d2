//! Identity provider client (Auth0)
//!
//! Supplies a current access token, refreshing it silently with a stored
//! refresh token when it is close to expiry, and the authenticated user's
//! profile from `/userinfo`. Interactive login is handled by the host page.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use std::sync::RwLock;
use thiserror::Error;

use crate::api::http_client;
use crate::models::{AuthUser, OAuthErrorResponse, RefreshTokenRequest, TokenResponse};

/// Tokens expiring within this window are refreshed before use
pub const EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentityError {
    #[error("Login required")]
    LoginRequired,
    #[error("Token request rejected: {error}{}", .description.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default())]
    Rejected {
        error: String,
        description: Option<String>,
    },
    #[error("Identity provider returned {0}")]
    Status(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Network(err.to_string())
    }
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Current access token, refreshed silently when needed
    async fn access_token(&self) -> Result<String, IdentityError>;

    /// The authenticated user
    async fn current_user(&self) -> Result<AuthUser, IdentityError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn from_response(response: &TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token.clone(),
            expires_at: now + Duration::seconds(response.expires_in.max(0)),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_LEEWAY_SECS) < self.expires_at
    }
}

#[derive(Default)]
struct Session {
    token: Option<CachedToken>,
    refresh_token: Option<String>,
    user: Option<AuthUser>,
}

pub struct Auth0Client {
    base_url: String,
    client_id: String,
    audience: Option<String>,
    client: Client,
    session: RwLock<Session>,
}

impl Auth0Client {
    pub fn new(base_url: &str, client_id: &str, audience: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            audience,
            client: http_client(),
            session: RwLock::new(Session::default()),
        }
    }

    pub fn with_refresh_token(self, refresh_token: Option<String>) -> Self {
        self.write_session(|s| s.refresh_token = refresh_token);
        self
    }

    #[cfg(test)]
    pub fn with_access_token(self, token: CachedToken) -> Self {
        self.write_session(|s| s.token = Some(token));
        self
    }

    fn read_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let guard = self.session.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn write_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.session.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    fn fresh_token(&self, now: DateTime<Utc>) -> Option<String> {
        self.read_session(|s| {
            s.token
                .as_ref()
                .filter(|t| t.is_fresh(now))
                .map(|t| t.access_token.clone())
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, IdentityError> {
        let request = RefreshTokenRequest {
            grant_type: "refresh_token",
            client_id: self.client_id.clone(),
            refresh_token: refresh_token.to_string(),
            audience: self.audience.clone(),
        };

        let response = self
            .client
            .post(format!("{}/oauth/token", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<TokenResponse>()
                .await
                .map_err(|e| IdentityError::Parse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_token_error(status, &body))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, IdentityError> {
        let response = self
            .client
            .get(format!("{}/userinfo", self.base_url))
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<AuthUser>()
                .await
                .map_err(|e| IdentityError::Parse(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(IdentityError::LoginRequired),
            status => Err(IdentityError::Status(status.as_u16())),
        }
    }
}

/// Map a failed token endpoint response to an error
fn classify_token_error(status: StatusCode, body: &str) -> IdentityError {
    match serde_json::from_str::<OAuthErrorResponse>(body) {
        Ok(err) if matches!(err.error.as_str(), "invalid_grant" | "login_required") => {
            IdentityError::LoginRequired
        }
        Ok(err) => IdentityError::Rejected {
            error: err.error,
            description: err.error_description,
        },
        Err(_) => IdentityError::Status(status.as_u16()),
    }
}

#[async_trait(?Send)]
impl IdentityProvider for Auth0Client {
    async fn access_token(&self) -> Result<String, IdentityError> {
        if let Some(token) = self.fresh_token(Utc::now()) {
            return Ok(token);
        }

        let refresh_token = self
            .read_session(|s| s.refresh_token.clone())
            .ok_or(IdentityError::LoginRequired)?;

        tracing::debug!("refreshing access token");
        let response = match self.refresh(&refresh_token).await {
            Ok(response) => response,
            Err(IdentityError::LoginRequired) => {
                // The stored refresh token is dead; forget the session
                self.write_session(|s| *s = Session::default());
                return Err(IdentityError::LoginRequired);
            }
            Err(e) => return Err(e),
        };

        let token = CachedToken::from_response(&response, Utc::now());
        let access_token = token.access_token.clone();
        self.write_session(|s| {
            s.token = Some(token);
            if let Some(rotated) = response.refresh_token {
                s.refresh_token = Some(rotated);
            }
        });

        Ok(access_token)
    }

    async fn current_user(&self) -> Result<AuthUser, IdentityError> {
        if let Some(user) = self.read_session(|s| s.user.clone()) {
            return Ok(user);
        }

        let access_token = self.access_token().await?;
        let user = self.fetch_user(&access_token).await?;
        self.write_session(|s| s.user = Some(user.clone()));
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_expiring_in(secs: i64, now: DateTime<Utc>) -> CachedToken {
        CachedToken {
            access_token: "at-123".to_string(),
            expires_at: now + Duration::seconds(secs),
        }
    }

    #[test]
    fn test_token_freshness_respects_leeway() {
        let now = Utc::now();

        assert!(token_expiring_in(3600, now).is_fresh(now));
        assert!(token_expiring_in(EXPIRY_LEEWAY_SECS + 1, now).is_fresh(now));
        assert!(!token_expiring_in(EXPIRY_LEEWAY_SECS, now).is_fresh(now));
        assert!(!token_expiring_in(-10, now).is_fresh(now));
    }

    #[test]
    fn test_cached_token_from_response() {
        let now = Utc::now();
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"at-new","expires_in":86400,"token_type":"Bearer","scope":"openid"}"#,
        )
        .unwrap();

        let token = CachedToken::from_response(&response, now);
        assert_eq!(token.access_token, "at-new");
        assert_eq!(token.expires_at, now + Duration::seconds(86400));
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn test_classify_invalid_grant_as_login_required() {
        let body = r#"{"error":"invalid_grant","error_description":"Unknown or invalid refresh token."}"#;
        assert_eq!(
            classify_token_error(StatusCode::FORBIDDEN, body),
            IdentityError::LoginRequired
        );
    }

    #[test]
    fn test_classify_other_oauth_error() {
        let body = r#"{"error":"unauthorized_client","error_description":"Grant type not allowed"}"#;
        let err = classify_token_error(StatusCode::FORBIDDEN, body);

        assert_eq!(
            err,
            IdentityError::Rejected {
                error: "unauthorized_client".to_string(),
                description: Some("Grant type not allowed".to_string()),
            }
        );
        assert_eq!(
            err.to_string(),
            "Token request rejected: unauthorized_client (Grant type not allowed)"
        );
    }

    #[test]
    fn test_classify_unparseable_body() {
        assert_eq!(
            classify_token_error(StatusCode::BAD_GATEWAY, "<html>"),
            IdentityError::Status(502)
        );
    }

    #[tokio::test]
    async fn test_fresh_cached_token_is_returned_without_refresh() {
        let client = Auth0Client::new("https://demo.auth0.com", "client", None)
            .with_access_token(token_expiring_in(3600, Utc::now()));

        assert_eq!(client.access_token().await.unwrap(), "at-123");
    }

    #[tokio::test]
    async fn test_no_session_requires_login() {
        let client = Auth0Client::new("https://demo.auth0.com", "client", None);

        assert_eq!(client.access_token().await, Err(IdentityError::LoginRequired));
        assert_eq!(client.current_user().await, Err(IdentityError::LoginRequired));
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_requires_login() {
        let client = Auth0Client::new("https://demo.auth0.com", "client", None)
            .with_access_token(token_expiring_in(-5, Utc::now()));

        assert_eq!(client.access_token().await, Err(IdentityError::LoginRequired));
    }
}
