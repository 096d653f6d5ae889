//! Operator tooling for obtaining Twitter access credentials.

pub mod bootstrap;
pub mod oauth1;

pub use bootstrap::{run_bootstrap, BootstrapError, OAuthHandshake};
pub use oauth1::{AccessToken, OAuthError, TokenPair, TwitterOAuth1};
