use hasjob::config::{AppConfig, AppEnvironment};
use hasjob::error::AppError;
use hasjob::telemetry;
use hasjob::twitter::{run_bootstrap, TwitterOAuth1};
use std::io;

/// Interactive PIN handshake on the terminal. Always uses the development
/// configuration, which is where the consumer credentials live.
pub(crate) async fn run() -> Result<(), AppError> {
    let config = AppConfig::load_for(AppEnvironment::Development)?;
    let mut client = client_from_config(&config)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    run_bootstrap(&mut client, &mut input, &mut output).await?;
    Ok(())
}

/// Logging goes to stderr, leaving stdout to the prompt and the credentials.
fn client_from_config(config: &AppConfig) -> Result<TwitterOAuth1, AppError> {
    let (consumer_key, consumer_secret) = config.twitter.consumer_credentials()?;
    telemetry::init(&config.telemetry)?;
    Ok(TwitterOAuth1::new(consumer_key, consumer_secret))
}
