use anyhow::Context;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;

// https://developers.google.com/identity/protocols/oauth2/service-account#httprest

const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
// Google rejects assertions that are valid for more than one hour
const ASSERTION_LIFETIME_SECS: i64 = 60 * 60;

/// The fields of a service account key file that are needed to get tokens
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default)]
    token_uri: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    // Access token expires in specified in seconds
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_ts: i64,
}

/// Hands out access tokens of a Google service account, fetching a new one
/// when the current one expires within a minute
pub struct ServiceAccountAuth {
    client: Client,
    key_file: PathBuf,
    token: Mutex<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    pub fn new(client: Client, key_file: PathBuf) -> Self {
        Self {
            client,
            key_file,
            token: Mutex::new(None),
        }
    }

    pub async fn get_access_token(&self) -> anyhow::Result<String> {
        let mut token = self.token.lock().await;

        let now = Utc::now().timestamp_millis();
        let one_minute_in_millis = 1000 * 60;
        if let Some(current) = token.as_ref() {
            if now + one_minute_in_millis <= current.expires_ts {
                return Ok(current.token.clone());
            }
        }

        let fresh = self.fetch_access_token(now).await?;
        let access_token = fresh.token.clone();
        *token = Some(fresh);
        Ok(access_token)
    }

    async fn fetch_access_token(&self, now: i64) -> anyhow::Result<AccessToken> {
        let raw_key = tokio::fs::read(&self.key_file)
            .await
            .with_context(|| format!("Unable to read service account key {:?}", self.key_file))?;
        let key: ServiceAccountKey = serde_json::from_slice(&raw_key)
            .with_context(|| format!("Invalid service account key {:?}", self.key_file))?;
        let token_uri = key.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);

        let assertion = sign_assertion(&key, token_uri, now / 1000)?;
        let params = [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ];
        let res = self
            .client
            .post(token_uri)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<TokenResponse>()
            .await?;

        info!("Fetched a new Google access token for: {}", key.client_email);
        Ok(AccessToken {
            token: res.access_token,
            expires_ts: now + res.expires_in * 1000,
        })
    }
}

fn sign_assertion(key: &ServiceAccountKey, token_uri: &str, now_secs: i64) -> anyhow::Result<String> {
    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: SPREADSHEETS_SCOPE,
        aud: token_uri,
        iat: now_secs,
        exp: now_secs + ASSERTION_LIFETIME_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Service account private key is not a valid RSA PEM key")?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
}
