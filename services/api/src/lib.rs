mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use oral_proficiency::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
