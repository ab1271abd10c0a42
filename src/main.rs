//! Polydivisible Service Entry Point
//!
//! Loads a `.env` file if present, then hands off to [`run`].

use polydivisible_service::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    run().await
}
