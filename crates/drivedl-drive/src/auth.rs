//! One-shot service-account token grant.
//!
//! Signs a JWT-bearer assertion with the key's RSA private key and trades
//! it for a short-lived access token. No caching and no refresh: the tool
//! is a single invocation and the token outlives the download.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credentials::ServiceAccountKey;
use crate::error::DriveError;

const SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub(crate) async fn access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, DriveError> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    let signer = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &signer)?;

    debug!(token_uri = %key.token_uri, account = %key.client_email, "requesting access token");
    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(DriveError::Status {
            status: response.status(),
        });
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
