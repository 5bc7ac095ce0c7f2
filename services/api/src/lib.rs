mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use work_quote::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
