use std::net::SocketAddr;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use feebook_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("could not connect to the database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("could not apply database migrations")?;

    let app = feebook_server::app(pool);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("Starting FeeBook HTTP Server on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
