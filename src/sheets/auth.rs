use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{AppError, AppResult};
use crate::utils::secrets::read_secret_file;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// The fields of a Google service-account key file the bot uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "ServiceAccountKey::default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    fn default_token_uri() -> String {
        DEFAULT_TOKEN_URI.to_string()
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Auth(format!("invalid service account key: {e}")))
    }

    pub fn from_file(path: &str) -> AppResult<Self> {
        let raw = read_secret_file(path)
            .map_err(|e| AppError::Auth(format!("unable to read credentials file {path}: {e}")))?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "TokenResponse::default_expires_in")]
    expires_in: u64,
}

impl TokenResponse {
    fn default_expires_in() -> u64 {
        3600
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// OAuth2 JWT-bearer flow for a service account, with the access token
/// cached until shortly before it expires.
pub struct TokenProvider {
    http: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(http: Client, key: ServiceAccountKey) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AppError::Auth(format!("invalid private key: {e}")))?;
        Ok(Self {
            http,
            key,
            encoding_key,
            scope: SPREADSHEETS_SCOPE.to_string(),
            cached: RwLock::new(None),
        })
    }

    fn assertion(&self, now: DateTime<Utc>) -> AppResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Auth(format!("unable to sign assertion: {e}")))
    }

    fn fresh_cached(&self, now: DateTime<Utc>) -> Option<String> {
        self.cached
            .read()
            .as_ref()
            .filter(|token| token.expires_at > now)
            .map(|token| token.value.clone())
    }

    #[instrument(skip(self))]
    pub async fn access_token(&self) -> AppResult<String> {
        let now = Utc::now();
        if let Some(token) = self.fresh_cached(now) {
            return Ok(token);
        }

        let assertion = self.assertion(now)?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::Upstream {
                service: "google oauth",
                status: status.as_u16(),
                body,
            });
        }
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Auth(format!("undecodable token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);
        let expires_at =
            now + chrono::Duration::from_std(lifetime).unwrap_or_else(|_| chrono::Duration::zero());
        debug!(%expires_at, "access token refreshed");
        *self.cached.write() = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }
}
