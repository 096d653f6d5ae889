//! Twitter's three-legged OAuth 1.0a flow with PIN (out-of-band) verification.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use sha1::Sha1;
use tracing::{debug, info};
use url::Url;

use super::bootstrap::OAuthHandshake;

const REQUEST_TOKEN_URL: &str = "https://api.twitter.com/oauth/request_token";
const AUTHORIZE_URL: &str = "https://api.twitter.com/oauth/authorize";
const ACCESS_TOKEN_URL: &str = "https://api.twitter.com/oauth/access_token";

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A token and its secret, as returned by the request and access token endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Long-lived user credentials produced by the handshake.
pub type AccessToken = TokenPair;

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("request to Twitter failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Twitter rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Twitter response is missing {0}")]
    MalformedResponse(&'static str),
    #[error("no request token; fetch an authorization URL first")]
    MissingRequestToken,
    #[error("unable to sign request: {0}")]
    Signing(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// `METHOD&url&params` with parameters encoded, sorted and joined.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (encode(key), encode(value)))
        .collect();
    encoded.sort();

    let joined = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&joined)
    )
}

/// HMAC-SHA1 over the base string, keyed by both secrets.
pub(crate) fn sign(
    base_string: &str,
    consumer_secret: &str,
    token_secret: Option<&str>,
) -> Result<String, OAuthError> {
    let key = format!(
        "{}&{}",
        encode(consumer_secret),
        encode(token_secret.unwrap_or(""))
    );
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|err| OAuthError::Signing(err.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds signed `Authorization: OAuth ...` headers for one consumer.
pub(crate) struct Signer<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: Option<&'a TokenPair>,
}

impl Signer<'_> {
    pub(crate) fn header(
        &self,
        method: &str,
        url: &str,
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, OAuthError> {
        let timestamp = timestamp.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", self.consumer_key),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", &timestamp),
            ("oauth_version", "1.0"),
        ];
        if let Some(token) = self.token {
            params.push(("oauth_token", &token.key));
        }
        params.extend_from_slice(extra);

        let base = signature_base_string(method, url, &params);
        let signature = sign(
            &base,
            self.consumer_secret,
            self.token.map(|token| token.secret.as_str()),
        )?;
        params.push(("oauth_signature", &signature));
        params.sort();

        let fields = params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }
}

fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Parse a `oauth_token=...&oauth_token_secret=...` body.
pub(crate) fn parse_token_response(body: &str) -> Result<TokenPair, OAuthError> {
    let fields: BTreeMap<String, String> = url::form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect();

    let key = fields
        .get("oauth_token")
        .filter(|value| !value.is_empty())
        .ok_or(OAuthError::MalformedResponse("oauth_token"))?;
    let secret = fields
        .get("oauth_token_secret")
        .filter(|value| !value.is_empty())
        .ok_or(OAuthError::MalformedResponse("oauth_token_secret"))?;

    Ok(TokenPair {
        key: key.clone(),
        secret: secret.clone(),
    })
}

/// HTTP client for the PIN-based handshake. Holds the request token
/// between the authorization and exchange steps.
pub struct TwitterOAuth1 {
    client: Client,
    consumer_key: String,
    consumer_secret: String,
    request_token: Option<TokenPair>,
}

impl TwitterOAuth1 {
    pub fn new(consumer_key: String, consumer_secret: String) -> Self {
        Self {
            client: Client::new(),
            consumer_key,
            consumer_secret,
            request_token: None,
        }
    }

    async fn post(
        &self,
        url: &str,
        token: Option<&TokenPair>,
        extra: &[(&str, &str)],
    ) -> Result<TokenPair, OAuthError> {
        let signer = Signer {
            consumer_key: &self.consumer_key,
            consumer_secret: &self.consumer_secret,
            token,
        };
        let header = signer.header(
            "POST",
            url,
            extra,
            &nonce(),
            chrono::Utc::now().timestamp(),
        )?;

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, header)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OAuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_token_response(&body)
    }
}

#[async_trait]
impl OAuthHandshake for TwitterOAuth1 {
    async fn authorization_url(&mut self) -> Result<String, OAuthError> {
        debug!("requesting OAuth request token");
        let token = self
            .post(REQUEST_TOKEN_URL, None, &[("oauth_callback", "oob")])
            .await?;

        let url = Url::parse_with_params(AUTHORIZE_URL, &[("oauth_token", token.key.as_str())])?;
        self.request_token = Some(token);
        Ok(url.into())
    }

    async fn access_token(&mut self, verifier: &str) -> Result<AccessToken, OAuthError> {
        let request_token = self
            .request_token
            .take()
            .ok_or(OAuthError::MissingRequestToken)?;

        let token = self
            .post(
                ACCESS_TOKEN_URL,
                Some(&request_token),
                &[("oauth_verifier", verifier)],
            )
            .await?;
        info!("exchanged PIN for access token");
        Ok(token)
    }
}
