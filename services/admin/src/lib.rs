mod cli;
mod infra;
mod routes;
mod server;
mod twitter;

use hasjob::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
