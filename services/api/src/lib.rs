mod cli;
mod infra;
mod relay;
mod routes;
mod server;
mod simulate;

use loan_broker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
