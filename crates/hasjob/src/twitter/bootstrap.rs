use std::io::{BufRead, Write};

use async_trait::async_trait;
use tracing::info;

use super::oauth1::{AccessToken, OAuthError};

/// The two network steps of the PIN handshake.
#[async_trait]
pub trait OAuthHandshake: Send {
    /// Obtain a request token and return the URL the operator must visit.
    async fn authorization_url(&mut self) -> Result<String, OAuthError>;

    /// Exchange the operator's PIN for long-lived credentials.
    async fn access_token(&mut self, verifier: &str) -> Result<AccessToken, OAuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("no PIN was entered")]
    MissingPin,
}

/// Walk the operator through authorization and print the resulting
/// credentials as configuration lines. There is no retry: the first
/// failure is returned.
pub async fn run_bootstrap<C, R, W>(
    client: &mut C,
    input: &mut R,
    output: &mut W,
) -> Result<AccessToken, BootstrapError>
where
    C: OAuthHandshake + ?Sized,
    R: BufRead,
    W: Write,
{
    let url = client.authorization_url().await?;
    writeln!(output, "Please authorize: {url}")?;
    write!(output, "PIN: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let pin = line.trim();
    if pin.is_empty() {
        return Err(BootstrapError::MissingPin);
    }

    let token = client.access_token(pin).await?;
    writeln!(output, "TWITTER_ACCESS_KEY = '{}'", token.key)?;
    writeln!(output, "TWITTER_ACCESS_SECRET = '{}'", token.secret)?;
    output.flush()?;

    info!("twitter access credentials issued");
    Ok(token)
}
